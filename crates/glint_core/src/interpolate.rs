//! Componentwise linear interpolation
//!
//! Any value a keyframe track animates must implement [`Interpolate`].
//! The contract is linearity: `a.interpolate(&b, 0.0) == a`,
//! `a.interpolate(&b, 1.0) == b`, and intermediate progress blends each
//! component independently. Progress outside [0, 1] extrapolates along
//! the same line, which is what overshoot easing relies on.

/// Componentwise linear blending between two values.
pub trait Interpolate: Clone {
    /// Blend from `self` toward `to` by `progress`.
    fn interpolate(&self, to: &Self, progress: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, progress: f64) -> Self {
        self + (to - self) * progress
    }
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, progress: f64) -> Self {
        self + (to - self) * progress as f32
    }
}

impl<T: Interpolate, const N: usize> Interpolate for [T; N] {
    fn interpolate(&self, to: &Self, progress: f64) -> Self {
        std::array::from_fn(|i| self[i].interpolate(&to[i], progress))
    }
}

impl<A: Interpolate, B: Interpolate> Interpolate for (A, B) {
    fn interpolate(&self, to: &Self, progress: f64) -> Self {
        (
            self.0.interpolate(&to.0, progress),
            self.1.interpolate(&to.1, progress),
        )
    }
}

/// A missing side passes the present side through unchanged.
impl<T: Interpolate> Interpolate for Option<T> {
    fn interpolate(&self, to: &Self, progress: f64) -> Self {
        match (self, to) {
            (Some(a), Some(b)) => Some(a.interpolate(b, progress)),
            (Some(a), None) => Some(a.clone()),
            (None, Some(b)) => Some(b.clone()),
            (None, None) => None,
        }
    }
}
