//! Animation instances
//!
//! An instance owns the elapsed-time bookkeeping for one animated
//! interaction: started, paused, resumed, stopped, finished. It never
//! reads the clock itself; every time-sensitive call takes the host's
//! timestamp, which keeps tests deterministic and leaves scheduling to
//! the embedder.

use crate::curve::Curve;
use crate::error::GlintError;
use glint_core::{Completion, CompletionFn, ProgressFn};
use std::time::{Duration, Instant};

/// Lifecycle state of an [`AnimationInstance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
}

/// Tick-driven progress driver for a single animation.
///
/// Elapsed time is monotonic while Running and frozen while Paused;
/// resuming shifts the effective start forward by exactly the paused
/// span, so a pause never leaks into progress. Invalid transitions
/// (resume while Idle, tick after Finished) are no-ops so host tick
/// delivery can never desynchronize the machine.
pub struct AnimationInstance {
    duration: Duration,
    delay: Duration,
    curve: Curve,
    state: PlaybackState,
    started_at: Option<Instant>,
    paused_at: Option<Instant>,
    completion_fired: bool,
    on_frame: Option<ProgressFn>,
    on_complete: Option<CompletionFn>,
}

impl AnimationInstance {
    /// Create an instance. Duration must be non-zero.
    pub fn new(duration: Duration, curve: Curve) -> Result<Self, GlintError> {
        if duration.is_zero() {
            return Err(GlintError::InvalidDuration);
        }
        Ok(Self {
            duration,
            delay: Duration::ZERO,
            curve,
            state: PlaybackState::Idle,
            started_at: None,
            paused_at: None,
            completion_fired: false,
            on_frame: None,
            on_complete: None,
        })
    }

    /// Hold progress at zero for `delay` after start before easing in.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Register the per-frame observer. Receives eased progress.
    pub fn on_frame<F: FnMut(f64) + Send + 'static>(&mut self, observer: F) {
        self.on_frame = Some(Box::new(observer));
    }

    /// Register the terminal observer. Fires at most once per run.
    pub fn on_complete<F: FnMut(Completion) + Send + 'static>(&mut self, observer: F) {
        self.on_complete = Some(Box::new(observer));
    }

    /// Begin running at `now`. No-op while Running or Paused; starting
    /// a Finished instance restarts it from scratch.
    pub fn start(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Idle | PlaybackState::Finished => {
                self.started_at = Some(now);
                self.paused_at = None;
                self.completion_fired = false;
                self.state = PlaybackState::Running;
                tracing::debug!("animation started");
            }
            PlaybackState::Running | PlaybackState::Paused => {}
        }
    }

    /// Freeze elapsed time at `now`.
    pub fn pause(&mut self, now: Instant) {
        if self.state == PlaybackState::Running {
            self.paused_at = Some(now);
            self.state = PlaybackState::Paused;
            tracing::trace!("animation paused");
        }
    }

    /// Resume at `now`, shifting the start so the paused span never
    /// counts as elapsed time.
    pub fn resume(&mut self, now: Instant) {
        if self.state != PlaybackState::Paused {
            return;
        }
        if let (Some(started), Some(paused)) = (self.started_at, self.paused_at) {
            self.started_at = Some(started + now.duration_since(paused));
        }
        self.paused_at = None;
        self.state = PlaybackState::Running;
        tracing::trace!("animation resumed");
    }

    /// Cancel the run. Synchronous: the Cancelled signal fires inside
    /// this call and nothing fires afterwards. No-op while Idle or
    /// already Finished.
    pub fn stop(&mut self) {
        match self.state {
            PlaybackState::Running | PlaybackState::Paused => {
                self.state = PlaybackState::Finished;
                tracing::debug!("animation cancelled");
                self.fire_completion(Completion::Cancelled);
            }
            PlaybackState::Idle | PlaybackState::Finished => {}
        }
    }

    /// Advance to `now`. Only meaningful while Running; every other
    /// state ignores the tick.
    pub fn tick(&mut self, now: Instant) {
        if self.state != PlaybackState::Running {
            return;
        }
        let Some(started) = self.started_at else {
            return;
        };

        let elapsed = now.duration_since(started);
        if elapsed >= self.delay + self.duration {
            // Settle state before any observer runs.
            self.state = PlaybackState::Finished;
            tracing::debug!("animation finished");
            self.fire_completion(Completion::Finished);
            return;
        }

        let progress = if elapsed < self.delay {
            0.0
        } else {
            let active = (elapsed - self.delay).as_secs_f64();
            self.curve.progress(active / self.duration.as_secs_f64())
        };
        if let Some(observer) = self.on_frame.as_mut() {
            observer(progress);
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PlaybackState::Running
    }

    /// True once the instance reached Finished, by completion or stop.
    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    fn fire_completion(&mut self, completion: Completion) {
        if self.completion_fired {
            return;
        }
        self.completion_fired = true;
        if let Some(observer) = self.on_complete.as_mut() {
            observer(completion);
        }
    }
}
