//! Phase sequences
//!
//! A phase sequence cycles a subject through a closed set of discrete
//! states, each holding for its own duration with its own transition
//! curve. Boundaries branch deterministically: ping-pong reverses,
//! looping wraps, and a plain sequence stops at the edge and reports
//! one cycle completion.

use crate::curve::Curve;
use crate::error::GlintError;
use glint_core::{EventFn, ProgressFn};
use std::time::{Duration, Instant};

/// Traversal direction through the phase list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

/// One discrete phase: a value, how long it holds, and the curve shown
/// to the progress observer while it runs.
#[derive(Clone, Debug)]
pub struct Phase<P> {
    value: P,
    duration: Duration,
    curve: Curve,
}

impl<P> Phase<P> {
    pub fn new(value: P, duration: Duration) -> Self {
        Self::with_curve(value, duration, Curve::Linear)
    }

    pub fn with_curve(value: P, duration: Duration, curve: Curve) -> Self {
        Self {
            value,
            duration,
            curve,
        }
    }

    pub fn value(&self) -> &P {
        &self.value
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }
}

type PhaseFn<P> = Box<dyn FnMut(&P) + Send>;

/// Tick-driven traversal over a non-empty, ordered phase list.
///
/// The phase timer re-arms lazily: after an advance or a manual jump
/// the next tick anchors the new phase at its own timestamp, so manual
/// navigation never inherits a stale deadline.
pub struct PhaseSequence<P> {
    phases: Vec<Phase<P>>,
    current: usize,
    direction: Direction,
    initial_direction: Direction,
    looping: bool,
    ping_pong: bool,
    running: bool,
    completed: bool,
    phase_started: Option<Instant>,
    on_phase_change: Option<PhaseFn<P>>,
    on_progress: Option<ProgressFn>,
    on_cycle_complete: Option<EventFn>,
}

impl<P> PhaseSequence<P> {
    /// Build a sequence over the given phases. Rejects an empty list.
    pub fn new(phases: Vec<Phase<P>>) -> Result<Self, GlintError> {
        if phases.is_empty() {
            return Err(GlintError::EmptyPhaseList);
        }
        Ok(Self {
            phases,
            current: 0,
            direction: Direction::Forward,
            initial_direction: Direction::Forward,
            looping: false,
            ping_pong: false,
            running: false,
            completed: false,
            phase_started: None,
            on_phase_change: None,
            on_progress: None,
            on_cycle_complete: None,
        })
    }

    /// Build a sequence where every phase shares one duration and a
    /// linear curve.
    pub fn uniform(
        values: impl IntoIterator<Item = P>,
        duration: Duration,
    ) -> Result<Self, GlintError> {
        Self::new(
            values
                .into_iter()
                .map(|value| Phase::new(value, duration))
                .collect(),
        )
    }

    /// Wrap around at the boundary instead of stopping.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Reverse at the boundary instead of wrapping or stopping.
    pub fn ping_pong(mut self) -> Self {
        self.ping_pong = true;
        self
    }

    /// Traverse the list back-to-front.
    pub fn reversed(mut self) -> Self {
        self.initial_direction = Direction::Reverse;
        self.direction = Direction::Reverse;
        self.current = self.phases.len() - 1;
        self
    }

    /// Observer fired with the newly-entered phase on every advance.
    pub fn on_phase_change<F: FnMut(&P) + Send + 'static>(&mut self, observer: F) {
        self.on_phase_change = Some(Box::new(observer));
    }

    /// Observer fired with eased intra-phase progress on every tick
    /// that does not advance.
    pub fn on_progress<F: FnMut(f64) + Send + 'static>(&mut self, observer: F) {
        self.on_progress = Some(Box::new(observer));
    }

    /// Observer fired exactly once when a non-looping traversal
    /// reaches its boundary.
    pub fn on_cycle_complete<F: FnMut() + Send + 'static>(&mut self, observer: F) {
        self.on_cycle_complete = Some(Box::new(observer));
    }

    /// Reset to the starting phase and begin advancing on ticks.
    pub fn start(&mut self) {
        self.direction = self.initial_direction;
        self.current = match self.direction {
            Direction::Forward => 0,
            Direction::Reverse => self.phases.len() - 1,
        };
        self.running = true;
        self.completed = false;
        self.phase_started = None;
    }

    /// Stop advancing. Manual navigation still works.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance phase time to `now`, transitioning when the current
    /// phase's duration has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if !self.running {
            return;
        }
        let started = *self.phase_started.get_or_insert(now);
        let phase = &self.phases[self.current];
        let elapsed = now.duration_since(started);

        if elapsed < phase.duration {
            if let Some(observer) = self.on_progress.as_mut() {
                let fraction = elapsed.as_secs_f64() / phase.duration.as_secs_f64();
                observer(phase.curve.progress(fraction));
            }
            return;
        }

        self.advance(now);
    }

    fn advance(&mut self, now: Instant) {
        let len = self.phases.len();
        let step = |direction: Direction, from: usize| match direction {
            Direction::Forward => {
                if from + 1 < len {
                    Some(from + 1)
                } else {
                    None
                }
            }
            Direction::Reverse => from.checked_sub(1),
        };

        let next = match step(self.direction, self.current) {
            Some(index) => index,
            None if self.ping_pong => {
                // Reverse and take one step back, clamped so no phase
                // is skipped.
                self.direction = self.direction.flipped();
                step(self.direction, self.current).unwrap_or(self.current)
            }
            None if self.looping => match self.direction {
                Direction::Forward => 0,
                Direction::Reverse => len - 1,
            },
            None => {
                self.running = false;
                if !self.completed {
                    self.completed = true;
                    tracing::debug!("phase cycle complete");
                    if let Some(observer) = self.on_cycle_complete.as_mut() {
                        observer();
                    }
                }
                return;
            }
        };

        self.current = next;
        self.phase_started = Some(now);
        tracing::trace!("phase advanced");
        self.notify_phase();
    }

    /// Jump straight to `phase` if it is in the list, bypassing the
    /// duration timer. Does not change the running/stopped state.
    pub fn jump_to(&mut self, phase: &P) -> bool
    where
        P: PartialEq,
    {
        match self.phases.iter().position(|p| &p.value == phase) {
            Some(index) => {
                self.current = index;
                self.phase_started = None;
                self.notify_phase();
                true
            }
            None => false,
        }
    }

    /// Step to the following phase immediately, wrapping cyclically.
    pub fn next_phase(&mut self) {
        self.current = (self.current + 1) % self.phases.len();
        self.phase_started = None;
        self.notify_phase();
    }

    /// Step to the preceding phase immediately, wrapping cyclically.
    pub fn previous_phase(&mut self) {
        let len = self.phases.len();
        self.current = (self.current + len - 1) % len;
        self.phase_started = None;
        self.notify_phase();
    }

    pub fn current_phase(&self) -> &P {
        &self.phases[self.current].value
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }

    fn notify_phase(&mut self) {
        if let Some(observer) = self.on_phase_change.as_mut() {
            observer(&self.phases[self.current].value);
        }
    }
}
