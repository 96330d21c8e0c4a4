//! Curve presets
//!
//! Named parameter sets for the common easing requests: the CSS
//! timing-function beziers, overshooting "back" variants, spring
//! configurations, and polynomial shorthands.
//!
//! Reference for the bezier values:
//! https://developer.mozilla.org/en-US/docs/Web/CSS/animation-timing-function

use crate::curve::{CubicBezier, Curve, EaseMode, Polynomial, Spring};

/// Speeds up toward the middle, slows back down at the end.
pub const EASE: Curve = Curve::Bezier(CubicBezier {
    x1: 0.25,
    y1: 0.1,
    x2: 0.25,
    y2: 1.0,
});

/// Starts slowly, accelerates until complete.
pub const EASE_IN: Curve = Curve::Bezier(CubicBezier {
    x1: 0.42,
    y1: 0.0,
    x2: 1.0,
    y2: 1.0,
});

/// Starts quickly, decelerates to a stop.
pub const EASE_OUT: Curve = Curve::Bezier(CubicBezier {
    x1: 0.0,
    y1: 0.0,
    x2: 0.58,
    y2: 1.0,
});

/// Slow on both ends, fast in the middle.
pub const EASE_IN_OUT: Curve = Curve::Bezier(CubicBezier {
    x1: 0.42,
    y1: 0.0,
    x2: 0.58,
    y2: 1.0,
});

/// Pulls back below 0 before launching.
pub const BACK_IN: Curve = Curve::Bezier(CubicBezier {
    x1: 0.36,
    y1: 0.0,
    x2: 0.66,
    y2: -0.56,
});

/// Overshoots past 1 before settling.
pub const BACK_OUT: Curve = Curve::Bezier(CubicBezier {
    x1: 0.34,
    y1: 1.56,
    x2: 0.64,
    y2: 1.0,
});

/// Pulls back, then overshoots, then settles.
pub const BACK_IN_OUT: Curve = Curve::Bezier(CubicBezier {
    x1: 0.68,
    y1: -0.6,
    x2: 0.32,
    y2: 1.6,
});

/// Named spring configurations (unit mass, zero initial velocity).
impl Spring {
    /// Soft motion with a mild overshoot.
    pub fn gentle() -> Self {
        Self {
            stiffness: 120.0,
            damping: 14.0,
            mass: 1.0,
            initial_velocity: 0.0,
        }
    }

    /// Pronounced oscillation before settling.
    pub fn wobbly() -> Self {
        Self {
            stiffness: 180.0,
            damping: 12.0,
            mass: 1.0,
            initial_velocity: 0.0,
        }
    }

    /// Quick snap with little overshoot.
    pub fn stiff() -> Self {
        Self {
            stiffness: 210.0,
            damping: 20.0,
            mass: 1.0,
            initial_velocity: 0.0,
        }
    }

    /// Heavily damped crawl toward the target.
    pub fn slow() -> Self {
        Self {
            stiffness: 280.0,
            damping: 60.0,
            mass: 1.0,
            initial_velocity: 0.0,
        }
    }
}

pub fn quad_in() -> Curve {
    polynomial(2.0, EaseMode::In)
}

pub fn quad_out() -> Curve {
    polynomial(2.0, EaseMode::Out)
}

pub fn quad_in_out() -> Curve {
    polynomial(2.0, EaseMode::InOut)
}

pub fn cubic_in() -> Curve {
    polynomial(3.0, EaseMode::In)
}

pub fn cubic_out() -> Curve {
    polynomial(3.0, EaseMode::Out)
}

pub fn cubic_in_out() -> Curve {
    polynomial(3.0, EaseMode::InOut)
}

fn polynomial(exponent: f64, mode: EaseMode) -> Curve {
    Curve::Polynomial(Polynomial { exponent, mode })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_presets_are_valid() {
        for spring in [
            Spring::gentle(),
            Spring::wobbly(),
            Spring::stiff(),
            Spring::slow(),
        ] {
            let curve = Curve::Spring(spring);
            assert_eq!(curve.progress(0.0), 0.0);
            assert_eq!(curve.progress(1.0), 1.0);
        }
    }

    #[test]
    fn test_wobbly_overshoots_more_than_stiff() {
        fn peak(spring: Spring) -> f64 {
            (0..=1000)
                .map(|i| spring.progress(i as f64 / 1000.0))
                .fold(f64::MIN, f64::max)
        }
        assert!(peak(Spring::wobbly()) > peak(Spring::stiff()));
    }

    #[test]
    fn test_polynomial_shorthands() {
        assert!((quad_in().progress(0.5) - 0.25).abs() < 1e-12);
        assert!((cubic_in().progress(0.5) - 0.125).abs() < 1e-12);
        assert!(quad_out().progress(0.5) > 0.5);
        assert!((cubic_in_out().progress(0.5) - 0.5).abs() < 1e-12);
    }
}
