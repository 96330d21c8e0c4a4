//! Glint Animation Core
//!
//! Timing curves, keyframe tracks, and tick-driven sequencing.
//!
//! # Features
//!
//! - **Timing Curves**: cubic bezier (Newton-Raphson with bisection
//!   fallback), closed-form damped springs, elastic, bounce, and
//!   polynomial easing
//! - **Keyframe Tracks**: per-segment easing over any [`Interpolate`]
//!   value type
//! - **Instances**: start/pause/resume/stop with drift-free elapsed
//!   time under injected timestamps
//! - **Phases & Steps**: discrete phase cycling (loop / ping-pong /
//!   manual) and sequential or parallel step choreography
//!
//! The core never reads the clock and never schedules itself: a host
//! delivers `tick(now)` at whatever cadence it likes, and observers
//! receive progress values and terminal signals synchronously inside
//! the tick.
//!
//! # Example
//!
//! ```rust
//! use glint_animation::{AnimationInstance, presets};
//! use std::time::{Duration, Instant};
//!
//! let mut fade = AnimationInstance::new(
//!     Duration::from_millis(300),
//!     presets::EASE_OUT,
//! )
//! .unwrap();
//! fade.on_frame(|p| println!("opacity {p:.2}"));
//!
//! let t0 = Instant::now();
//! fade.start(t0);
//! fade.tick(t0 + Duration::from_millis(150));
//! ```

pub mod curve;
pub mod error;
pub mod instance;
pub mod keyframe;
pub mod phase;
pub mod presets;
pub mod scheduler;
pub mod sequencer;

pub use curve::{Bounce, CubicBezier, Curve, EaseMode, Elastic, Polynomial, Spring};
pub use error::GlintError;
pub use glint_core::{Completion, Interpolate};
pub use instance::{AnimationInstance, PlaybackState};
pub use keyframe::{Keyframe, KeyframeTrack};
pub use phase::{Direction, Phase, PhaseSequence};
pub use scheduler::{InstanceId, Scheduler};
pub use sequencer::{SequencerMode, SequencerState, Step, StepSequencer};
