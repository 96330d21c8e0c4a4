//! Keyframe tracks
//!
//! A track pins values at normalized times and interpolates between
//! them. The easing attached to a keyframe governs the segment that
//! *ends* at it (the transition from the previous keyframe to this
//! one). Track duration maps the normalized [0, 1] axis onto real
//! seconds.

use crate::curve::Curve;
use crate::error::GlintError;
use glint_core::Interpolate;
use smallvec::SmallVec;

/// A pinned (time, value) pair with the easing for the segment leading
/// into it.
#[derive(Clone, Debug)]
pub struct Keyframe<V> {
    time: f64,
    value: V,
    curve: Curve,
}

impl<V> Keyframe<V> {
    /// Create a keyframe with linear easing. `time` is clamped to
    /// [0, 1].
    pub fn new(time: f64, value: V) -> Self {
        Self::with_curve(time, value, Curve::Linear)
    }

    /// Create a keyframe with an explicit easing for its segment.
    pub fn with_curve(time: f64, value: V, curve: Curve) -> Self {
        Self {
            time: time.clamp(0.0, 1.0),
            value,
            curve,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }
}

/// An ordered-by-time collection of keyframes over a real duration.
#[derive(Clone, Debug)]
pub struct KeyframeTrack<V> {
    keyframes: SmallVec<[Keyframe<V>; 4]>,
    duration_secs: f64,
}

impl<V: Interpolate> KeyframeTrack<V> {
    /// Create an empty track. Duration must be positive and finite.
    pub fn new(duration_secs: f64) -> Result<Self, GlintError> {
        if !duration_secs.is_finite() || !(duration_secs > 0.0) {
            return Err(GlintError::InvalidDuration);
        }
        Ok(Self {
            keyframes: SmallVec::new(),
            duration_secs,
        })
    }

    /// Create a track from a batch of keyframes, sorted by time.
    pub fn with_keyframes(
        duration_secs: f64,
        keyframes: impl IntoIterator<Item = Keyframe<V>>,
    ) -> Result<Self, GlintError> {
        let mut track = Self::new(duration_secs)?;
        track.keyframes.extend(keyframes);
        track.sort();
        Ok(track)
    }

    /// Insert a keyframe, keeping the list sorted by time.
    ///
    /// The sort is stable: keyframes sharing a time keep their
    /// insertion order, which makes overlapping-keyframe evaluation
    /// deterministic (the later insertion wins at the shared time).
    pub fn add_keyframe(&mut self, keyframe: Keyframe<V>) {
        self.keyframes.push(keyframe);
        self.sort();
    }

    /// Remove the keyframe at `index`. Remaining times are left as
    /// they are; the caller re-normalizes if it wants to.
    pub fn remove_keyframe(&mut self, index: usize) -> Option<Keyframe<V>> {
        if index < self.keyframes.len() {
            Some(self.keyframes.remove(index))
        } else {
            None
        }
    }

    /// Evaluate at a real time in seconds.
    ///
    /// Times at or before zero resolve to the first keyframe's value;
    /// times at or past the duration resolve to the last. Returns
    /// `None` only when the track has no keyframes.
    pub fn evaluate(&self, at_secs: f64) -> Option<V> {
        self.value_at((at_secs / self.duration_secs).clamp(0.0, 1.0))
    }

    /// Evaluate at a normalized [0, 1] position (clamped), for
    /// externally-timed playback.
    pub fn sample(&self, progress: f64) -> Option<V> {
        self.value_at(progress.clamp(0.0, 1.0))
    }

    fn value_at(&self, t: f64) -> Option<V> {
        let first = self.keyframes.first()?;
        if self.keyframes.len() == 1 || t <= first.time {
            return Some(first.value.clone());
        }
        let last = self.keyframes.last()?;
        if t >= last.time {
            return Some(last.value.clone());
        }

        // Bounding pair: the last keyframe at or before t, and its
        // successor. rposition lands on the later of any keyframes
        // sharing a time, so a zero-length segment is only reachable
        // through near-equal (not identical) times.
        let hi = self.keyframes.iter().rposition(|k| k.time <= t)?;
        let prev = &self.keyframes[hi];
        let next = &self.keyframes[hi + 1];

        let span = next.time - prev.time;
        if span < f64::EPSILON {
            // Jump discontinuity: the segment has no width, so the
            // keyframe being entered wins outright.
            return Some(next.value.clone());
        }

        let segment_progress = (t - prev.time) / span;
        let eased = next.curve.progress(segment_progress);
        Some(prev.value.interpolate(&next.value, eased))
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn keyframes(&self) -> &[Keyframe<V>] {
        &self.keyframes
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    fn sort(&mut self) {
        // Stable by construction: slice::sort_by preserves the order
        // of equal times.
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    }
}
