//! Step sequencers
//!
//! A sequencer choreographs named, time-bounded steps either one after
//! another or all at once. Steps are windows of (delay + duration)
//! measured by the sequencer's own accounting; an optional action
//! fires when a step's delay elapses. Chaining is drift-free: the next
//! step (or cycle) is anchored at the previous window's exact end, not
//! at whatever timestamp the tick happened to deliver.

use glint_core::EventFn;
use std::time::{Duration, Instant};

/// One unit of sequenced or parallel work.
pub struct Step {
    name: String,
    duration: Duration,
    delay: Duration,
    action: Option<Box<dyn FnMut() + Send>>,
}

impl Step {
    pub fn new(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
            delay: Duration::ZERO,
            action: None,
        }
    }

    /// Wait this long before the step begins.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Work to run when the step begins (after its delay).
    pub fn with_action<F: FnMut() + Send + 'static>(mut self, action: F) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn total(&self) -> Duration {
        self.delay + self.duration
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SequencerState {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SequencerMode {
    /// Steps run one after another in list order.
    #[default]
    Sequential,
    /// All step windows open together, measured from the cycle start.
    Parallel,
}

type StepFn = Box<dyn FnMut(&str) + Send>;

/// Composes steps with completion aggregation and optional looping.
///
/// `on_complete` fires exactly once per run, or once per completed
/// cycle when looping. A tick may finish several steps (they fire in
/// step order) but never more than one full cycle.
pub struct StepSequencer {
    steps: Vec<Step>,
    mode: SequencerMode,
    looping: bool,
    state: SequencerState,
    current_step: usize,
    begun: Vec<bool>,
    finished: Vec<bool>,
    completed_count: usize,
    completed_loops: u32,
    anchor: Option<Instant>,
    paused_at: Option<Instant>,
    on_step_complete: Option<StepFn>,
    on_complete: Option<EventFn>,
}

impl StepSequencer {
    pub fn new(steps: Vec<Step>) -> Self {
        let count = steps.len();
        Self {
            steps,
            mode: SequencerMode::Sequential,
            looping: false,
            state: SequencerState::Idle,
            current_step: 0,
            begun: vec![false; count],
            finished: vec![false; count],
            completed_count: 0,
            completed_loops: 0,
            anchor: None,
            paused_at: None,
            on_step_complete: None,
            on_complete: None,
        }
    }

    /// Run every step concurrently instead of in order.
    pub fn parallel(mut self) -> Self {
        self.mode = SequencerMode::Parallel;
        self
    }

    /// Restart the cycle each time it completes.
    pub fn looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Observer fired with the step's name as each step finishes.
    pub fn on_step_complete<F: FnMut(&str) + Send + 'static>(&mut self, observer: F) {
        self.on_step_complete = Some(Box::new(observer));
    }

    /// Observer fired when the whole cycle finishes.
    pub fn on_complete<F: FnMut() + Send + 'static>(&mut self, observer: F) {
        self.on_complete = Some(Box::new(observer));
    }

    /// Begin a run. No-op while already Running or Paused; an empty
    /// step list completes immediately with zero loops counted.
    pub fn start(&mut self) {
        match self.state {
            SequencerState::Running | SequencerState::Paused => return,
            SequencerState::Idle | SequencerState::Completed => {}
        }
        self.current_step = 0;
        self.begun.fill(false);
        self.finished.fill(false);
        self.completed_count = 0;
        self.completed_loops = 0;
        self.anchor = None;
        self.paused_at = None;

        if self.steps.is_empty() {
            self.state = SequencerState::Completed;
            self.fire_complete();
            return;
        }
        self.state = SequencerState::Running;
        tracing::debug!("sequence started");
    }

    /// Freeze the active window at `now`.
    pub fn pause(&mut self, now: Instant) {
        if self.state == SequencerState::Running {
            self.paused_at = Some(now);
            self.state = SequencerState::Paused;
        }
    }

    /// Resume at `now`; the paused span never counts toward any step.
    pub fn resume(&mut self, now: Instant) {
        if self.state != SequencerState::Paused {
            return;
        }
        if let (Some(anchor), Some(paused)) = (self.anchor, self.paused_at) {
            self.anchor = Some(anchor + now.duration_since(paused));
        }
        self.paused_at = None;
        self.state = SequencerState::Running;
    }

    /// Cancel the run without firing completion. No further callbacks
    /// after this returns.
    pub fn stop(&mut self) {
        match self.state {
            SequencerState::Running | SequencerState::Paused => {
                self.state = SequencerState::Idle;
                self.anchor = None;
                self.paused_at = None;
                tracing::debug!("sequence cancelled");
            }
            SequencerState::Idle | SequencerState::Completed => {}
        }
    }

    /// Advance to `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.state != SequencerState::Running {
            return;
        }
        if self.anchor.is_none() {
            self.anchor = Some(now);
        }
        match self.mode {
            SequencerMode::Sequential => self.tick_sequential(now),
            SequencerMode::Parallel => self.tick_parallel(now),
        }
    }

    fn tick_sequential(&mut self, now: Instant) {
        loop {
            let index = self.current_step;
            let Some(anchor) = self.anchor else { return };
            let elapsed = now.duration_since(anchor);
            let step_delay = self.steps[index].delay;
            let step_total = self.steps[index].total();

            if !self.begun[index] && elapsed >= step_delay {
                self.begun[index] = true;
                if let Some(action) = self.steps[index].action.as_mut() {
                    action();
                }
            }
            if elapsed < step_total {
                return;
            }

            self.completed_count += 1;
            if let Some(observer) = self.on_step_complete.as_mut() {
                observer(&self.steps[index].name);
            }

            // The next window starts exactly where this one ended.
            self.anchor = Some(anchor + step_total);
            self.current_step += 1;

            if self.current_step == self.steps.len() {
                self.finish_cycle();
                return;
            }
        }
    }

    fn tick_parallel(&mut self, now: Instant) {
        let Some(anchor) = self.anchor else { return };
        let elapsed = now.duration_since(anchor);

        for index in 0..self.steps.len() {
            if !self.begun[index] && elapsed >= self.steps[index].delay {
                self.begun[index] = true;
                if let Some(action) = self.steps[index].action.as_mut() {
                    action();
                }
            }
            if !self.finished[index] && elapsed >= self.steps[index].total() {
                self.finished[index] = true;
                self.completed_count += 1;
                if let Some(observer) = self.on_step_complete.as_mut() {
                    observer(&self.steps[index].name);
                }
            }
        }

        if self.completed_count == self.steps.len() {
            // Anchor the next cycle at the slowest window's end.
            let cycle_len = self
                .steps
                .iter()
                .map(Step::total)
                .max()
                .unwrap_or(Duration::ZERO);
            self.anchor = Some(anchor + cycle_len);
            self.finish_cycle();
        }
    }

    /// Shared cycle bookkeeping. At most one cycle completes per tick,
    /// which also keeps a zero-length looping cycle from spinning.
    fn finish_cycle(&mut self) {
        self.completed_loops += 1;
        if self.looping {
            self.current_step = 0;
            self.completed_count = 0;
            self.begun.fill(false);
            self.finished.fill(false);
            tracing::debug!("sequence cycle complete");
            self.fire_complete();
        } else {
            self.state = SequencerState::Completed;
            self.anchor = None;
            tracing::debug!("sequence complete");
            self.fire_complete();
        }
    }

    fn fire_complete(&mut self) {
        if let Some(observer) = self.on_complete.as_mut() {
            observer();
        }
    }

    /// Fraction of the current cycle's steps that have finished.
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 1.0;
        }
        self.completed_count as f64 / self.steps.len() as f64
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn mode(&self) -> SequencerMode {
        self.mode
    }

    pub fn completed_loops(&self) -> u32 {
        self.completed_loops
    }

    /// Index of the step currently running (sequential mode).
    pub fn current_step_index(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}
