//! Timing curves
//!
//! A curve maps linear progress to perceptual progress: `progress(t)`
//! for t in [0, 1]. Every curve passes through (0, 0) and (1, 1);
//! intermediate values may leave [0, 1] (overshoot easing depends on
//! that). All math is f64 to avoid precision jitter at high frame
//! rates.
//!
//! Parameterized curves validate at construction and return
//! [`GlintError`] on malformed input rather than clamping it away. The
//! one exception is the bezier's x control components, which are
//! clamped to [0, 1] by definition (x is the time axis); y stays
//! unconstrained so "back"-style overshoot presets remain expressible.

use crate::error::GlintError;

/// A timing curve, applied to normalized progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Curve {
    /// Identity: constant speed.
    #[default]
    Linear,
    /// CSS-style cubic bezier through (0,0) and (1,1).
    Bezier(CubicBezier),
    /// Unit step response of a damped harmonic oscillator.
    Spring(Spring),
    /// Amplitude/period-controlled damped sine.
    Elastic(Elastic),
    /// Piecewise-quadratic damped bounce.
    Bounce(Bounce),
    /// `t^n` and its mirrored/blended forms.
    Polynomial(Polynomial),
}

impl Curve {
    /// Evaluate the curve at `t`.
    ///
    /// `t` is expected in [0, 1]; values outside are passed through to
    /// the underlying formula unclamped, except for the literal
    /// boundaries, which short-circuit to exact 0 and 1 for the curves
    /// whose closed forms do not hit them exactly.
    pub fn progress(&self, t: f64) -> f64 {
        match self {
            Curve::Linear => t,
            Curve::Bezier(c) => c.progress(t),
            Curve::Spring(c) => c.progress(t),
            Curve::Elastic(c) => c.progress(t),
            Curve::Bounce(c) => c.progress(t),
            Curve::Polynomial(c) => c.progress(t),
        }
    }
}

impl From<CubicBezier> for Curve {
    fn from(c: CubicBezier) -> Self {
        Curve::Bezier(c)
    }
}

impl From<Spring> for Curve {
    fn from(c: Spring) -> Self {
        Curve::Spring(c)
    }
}

impl From<Elastic> for Curve {
    fn from(c: Elastic) -> Self {
        Curve::Elastic(c)
    }
}

impl From<Bounce> for Curve {
    fn from(c: Bounce) -> Self {
        Curve::Bounce(c)
    }
}

impl From<Polynomial> for Curve {
    fn from(c: Polynomial) -> Self {
        Curve::Polynomial(c)
    }
}

// ============================================================================
// Cubic bezier
// ============================================================================

/// Cubic bezier easing with implicit anchors (0,0) and (1,1).
///
/// The x components of both control points are clamped to [0, 1] so the
/// curve stays a function of time; y is unconstrained.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub(crate) x1: f64,
    pub(crate) y1: f64,
    pub(crate) x2: f64,
    pub(crate) y2: f64,
}

impl CubicBezier {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    /// Solve x(s) == t for the bezier parameter s, then return y(s).
    ///
    /// Newton-Raphson converges in a handful of iterations on
    /// well-behaved curves; near derivative zeros (overshoot control
    /// points) it can diverge, so a bisection fallback over s in [0, 1]
    /// guarantees an answer.
    pub fn progress(&self, t: f64) -> f64 {
        // Endpoints are always exact.
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        // Newton-Raphson with the linear progress as initial guess.
        let mut s = t;
        for _ in 0..8 {
            let err = bezier_sample(s, self.x1, self.x2) - t;
            if err.abs() < 1e-7 {
                return bezier_sample(s, self.y1, self.y2);
            }
            let slope = bezier_slope(s, self.x1, self.x2);
            if slope.abs() < 1e-7 {
                break;
            }
            s -= err / slope;
        }

        // Bisection always converges: x(s) is non-decreasing on [0, 1].
        let mut lo = 0.0_f64;
        let mut hi = 1.0_f64;
        s = t;
        for _ in 0..20 {
            let val = bezier_sample(s, self.x1, self.x2);
            if (val - t).abs() < 1e-7 {
                break;
            }
            if val < t {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }

        bezier_sample(s, self.y1, self.y2)
    }
}

/// One-axis cubic bezier in Horner form:
/// B(s) = ((a·s + b)·s + c)·s with a,b,c derived from the control pair.
#[inline]
fn bezier_sample(s: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * s + b) * s + c) * s
}

/// Derivative of [`bezier_sample`] with respect to s.
#[inline]
fn bezier_slope(s: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * s + 2.0 * b) * s + c
}

// ============================================================================
// Spring
// ============================================================================

/// Damped harmonic oscillator, evaluated as the unit step response.
///
/// `t` is treated as real elapsed time scaled into the [0, 1] window;
/// the response is effectively settled at the end of the window for
/// sensible parameters, and the literal boundaries short-circuit so
/// the curve honors the (0,0)/(1,1) contract exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub(crate) stiffness: f64,
    pub(crate) damping: f64,
    pub(crate) mass: f64,
    pub(crate) initial_velocity: f64,
}

impl Spring {
    /// Build a spring curve. All physical parameters must be positive.
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> Result<Self, GlintError> {
        if !(stiffness > 0.0) {
            return Err(GlintError::InvalidStiffness(stiffness));
        }
        if !(damping > 0.0) {
            return Err(GlintError::InvalidDamping(damping));
        }
        if !(mass > 0.0) {
            return Err(GlintError::InvalidMass(mass));
        }
        Ok(Self {
            stiffness,
            damping,
            mass,
            initial_velocity: 0.0,
        })
    }

    /// Initial velocity of the progress value; any sign is allowed.
    pub fn with_initial_velocity(mut self, velocity: f64) -> Self {
        self.initial_velocity = velocity;
        self
    }

    pub fn progress(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let omega0 = (self.stiffness / self.mass).sqrt();
        let zeta = self.damping / (2.0 * (self.stiffness * self.mass).sqrt());
        let v0 = self.initial_velocity;

        // x(t) is the deviation from the target: x(0) = 1, x'(0) = -v0.
        let x = if zeta < 1.0 {
            let omega_d = omega0 * (1.0 - zeta * zeta).sqrt();
            let b = (zeta * omega0 - v0) / omega_d;
            (-zeta * omega0 * t).exp() * ((omega_d * t).cos() + b * (omega_d * t).sin())
        } else if zeta > 1.0 {
            let sq = omega0 * (zeta * zeta - 1.0).sqrt();
            let s1 = -zeta * omega0 + sq;
            let s2 = -zeta * omega0 - sq;
            let c1 = (-v0 - s2) / (s1 - s2);
            let c2 = 1.0 - c1;
            c1 * (s1 * t).exp() + c2 * (s2 * t).exp()
        } else {
            (1.0 + (omega0 - v0) * t) * (-omega0 * t).exp()
        };

        1.0 - x
    }
}

// ============================================================================
// Elastic
// ============================================================================

/// Exponentially damped sine with controllable overshoot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Elastic {
    pub(crate) amplitude: f64,
    pub(crate) period: f64,
    pub(crate) ease_in: bool,
}

impl Elastic {
    /// Build an elastic curve; `amplitude >= 1` and `period > 0`.
    pub fn new(amplitude: f64, period: f64, ease_in: bool) -> Result<Self, GlintError> {
        if !(amplitude >= 1.0) {
            return Err(GlintError::InvalidAmplitude(amplitude));
        }
        if !(period > 0.0) {
            return Err(GlintError::InvalidPeriod(period));
        }
        Ok(Self {
            amplitude,
            period,
            ease_in,
        })
    }

    pub fn progress(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        let tau = std::f64::consts::TAU;
        // Phase shift that pins the endpoint: sin(s * tau / period) == 1/a.
        let s = self.period / tau * (1.0 / self.amplitude).asin();

        if self.ease_in {
            // Negated, time-reversed ease-out.
            let t = t - 1.0;
            -(self.amplitude * (10.0 * t).exp2() * ((t - s) * tau / self.period).sin())
        } else {
            self.amplitude * (-10.0 * t).exp2() * ((t - s) * tau / self.period).sin() + 1.0
        }
    }
}

// ============================================================================
// Bounce
// ============================================================================

/// Four-segment piecewise quadratic matching a damped bounce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounce {
    pub(crate) ease_in: bool,
}

impl Bounce {
    pub fn ease_out() -> Self {
        Self { ease_in: false }
    }

    pub fn ease_in() -> Self {
        Self { ease_in: true }
    }

    pub fn progress(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        if self.ease_in {
            1.0 - bounce_out(1.0 - t)
        } else {
            bounce_out(t)
        }
    }
}

/// Segment breakpoints at 1/2.75, 2/2.75 and 2.5/2.75; the leading
/// coefficient 7.5625 makes each arc land exactly on the envelope.
fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

// ============================================================================
// Polynomial
// ============================================================================

/// Which side of the curve the acceleration sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EaseMode {
    #[default]
    In,
    Out,
    InOut,
}

/// `t^n` easing for an arbitrary positive exponent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polynomial {
    pub(crate) exponent: f64,
    pub(crate) mode: EaseMode,
}

impl Polynomial {
    pub fn new(exponent: f64, mode: EaseMode) -> Result<Self, GlintError> {
        if !(exponent > 0.0) {
            return Err(GlintError::InvalidExponent(exponent));
        }
        Ok(Self { exponent, mode })
    }

    pub fn progress(&self, t: f64) -> f64 {
        let n = self.exponent;
        match self.mode {
            EaseMode::In => t.powf(n),
            EaseMode::Out => 1.0 - (1.0 - t).powf(n),
            EaseMode::InOut => {
                if t < 0.5 {
                    0.5 * (2.0 * t).powf(n)
                } else {
                    1.0 - 0.5 * (2.0 * (1.0 - t)).powf(n)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    fn all_curves() -> Vec<(&'static str, Curve)> {
        vec![
            ("linear", Curve::Linear),
            ("ease", presets::EASE),
            ("ease_in", presets::EASE_IN),
            ("ease_out", presets::EASE_OUT),
            ("ease_in_out", presets::EASE_IN_OUT),
            ("back_in", presets::BACK_IN),
            ("back_out", presets::BACK_OUT),
            ("back_in_out", presets::BACK_IN_OUT),
            (
                "spring",
                Curve::Spring(Spring::new(100.0, 10.0, 1.0).unwrap()),
            ),
            (
                "spring_overdamped",
                Curve::Spring(Spring::new(100.0, 30.0, 1.0).unwrap()),
            ),
            (
                "spring_critical",
                Curve::Spring(Spring::new(100.0, 20.0, 1.0).unwrap()),
            ),
            (
                "elastic_out",
                Curve::Elastic(Elastic::new(1.0, 0.3, false).unwrap()),
            ),
            (
                "elastic_in",
                Curve::Elastic(Elastic::new(1.5, 0.4, true).unwrap()),
            ),
            ("bounce_out", Curve::Bounce(Bounce::ease_out())),
            ("bounce_in", Curve::Bounce(Bounce::ease_in())),
            (
                "quartic_in_out",
                Curve::Polynomial(Polynomial::new(4.0, EaseMode::InOut).unwrap()),
            ),
        ]
    }

    #[test]
    fn test_endpoints_exact_within_tolerance() {
        for (name, curve) in all_curves() {
            assert!(
                curve.progress(0.0).abs() < 1e-3,
                "{name}: progress(0) = {}",
                curve.progress(0.0)
            );
            assert!(
                (curve.progress(1.0) - 1.0).abs() < 1e-3,
                "{name}: progress(1) = {}",
                curve.progress(1.0)
            );
        }
    }

    #[test]
    fn test_bezier_midpoint_bias() {
        assert!(presets::EASE_IN.progress(0.5) < 0.5);
        assert!(presets::EASE_OUT.progress(0.5) > 0.5);
        assert!((presets::EASE_IN_OUT.progress(0.5) - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_standard_presets_monotonic() {
        let standard = [
            Curve::Linear,
            presets::EASE,
            presets::EASE_IN,
            presets::EASE_OUT,
            presets::EASE_IN_OUT,
            Curve::Polynomial(Polynomial::new(2.0, EaseMode::In).unwrap()),
            Curve::Polynomial(Polynomial::new(3.0, EaseMode::InOut).unwrap()),
        ];
        for curve in standard {
            let mut prev = curve.progress(0.0);
            for i in 1..=1000 {
                let p = curve.progress(i as f64 / 1000.0);
                // Tolerance absorbs root-solver noise near flat spots.
                assert!(
                    p >= prev - 1e-5,
                    "{curve:?} decreased at t = {}",
                    i as f64 / 1000.0
                );
                prev = p;
            }
        }
    }

    #[test]
    fn test_bezier_overshoot_leaves_unit_range() {
        let mut max = f64::MIN;
        let mut min = f64::MAX;
        for i in 0..=1000 {
            let t = i as f64 / 1000.0;
            max = max.max(presets::BACK_OUT.progress(t));
            min = min.min(presets::BACK_IN.progress(t));
        }
        assert!(max > 1.0, "back_out never overshot: max = {max}");
        assert!(min < 0.0, "back_in never undershot: min = {min}");
    }

    #[test]
    fn test_bezier_x_components_clamped() {
        let c = CubicBezier::new(-0.5, 0.2, 1.7, 0.8);
        assert_eq!(c.x1, 0.0);
        assert_eq!(c.x2, 1.0);
        assert_eq!(c.progress(0.0), 0.0);
        assert_eq!(c.progress(1.0), 1.0);
    }

    /// Settling time: the point after which progress stays >= 0.9. A
    /// more damped spring must settle no later than a loose one.
    #[test]
    fn test_spring_higher_damping_settles_no_slower() {
        fn settle_time(curve: &Curve) -> f64 {
            let mut last_below = 0.0;
            for i in 0..=2000 {
                let t = i as f64 / 2000.0;
                if curve.progress(t) < 0.9 {
                    last_below = t;
                }
            }
            last_below
        }

        let loose = Curve::Spring(Spring::new(100.0, 4.0, 1.0).unwrap());
        let damped = Curve::Spring(Spring::new(100.0, 10.0, 1.0).unwrap());
        assert!(settle_time(&damped) <= settle_time(&loose));
    }

    #[test]
    fn test_spring_underdamped_overshoots() {
        let spring = Spring::new(100.0, 4.0, 1.0).unwrap();
        let mut max = f64::MIN;
        for i in 0..=1000 {
            max = max.max(spring.progress(i as f64 / 1000.0));
        }
        assert!(max > 1.0, "underdamped spring never overshot: {max}");
    }

    #[test]
    fn test_spring_overdamped_stays_below_target() {
        let spring = Spring::new(100.0, 40.0, 1.0).unwrap();
        for i in 0..=1000 {
            let p = spring.progress(i as f64 / 1000.0);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_spring_initial_velocity_kicks_forward() {
        let still = Spring::new(100.0, 10.0, 1.0).unwrap();
        let kicked = still.with_initial_velocity(8.0);
        assert!(kicked.progress(0.05) > still.progress(0.05));
    }

    #[test]
    fn test_elastic_out_oscillates_around_target() {
        let elastic = Elastic::new(1.0, 0.3, false).unwrap();
        let mut above = false;
        let mut below = false;
        for i in 1..1000 {
            let p = elastic.progress(i as f64 / 1000.0);
            above |= p > 1.0;
            below |= p < 1.0;
        }
        assert!(above && below);
    }

    #[test]
    fn test_bounce_in_mirrors_out() {
        let bounce_in = Bounce::ease_in();
        let out = Bounce::ease_out();
        for i in 0..=100 {
            let t = i as f64 / 100.0;
            let mirrored = 1.0 - out.progress(1.0 - t);
            assert!((bounce_in.progress(t) - mirrored).abs() < 1e-12);
        }
    }

    #[test]
    fn test_polynomial_modes() {
        let quad_in = Polynomial::new(2.0, EaseMode::In).unwrap();
        let quad_out = Polynomial::new(2.0, EaseMode::Out).unwrap();
        let quad_in_out = Polynomial::new(2.0, EaseMode::InOut).unwrap();
        assert!((quad_in.progress(0.5) - 0.25).abs() < 1e-12);
        assert!((quad_out.progress(0.5) - 0.75).abs() < 1e-12);
        assert!((quad_in_out.progress(0.5) - 0.5).abs() < 1e-12);
        assert!((quad_in_out.progress(0.25) - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_construction_rejects_bad_parameters() {
        assert_eq!(
            Spring::new(-1.0, 10.0, 1.0),
            Err(GlintError::InvalidStiffness(-1.0))
        );
        assert_eq!(
            Spring::new(100.0, 0.0, 1.0),
            Err(GlintError::InvalidDamping(0.0))
        );
        assert_eq!(
            Spring::new(100.0, 10.0, -2.0),
            Err(GlintError::InvalidMass(-2.0))
        );
        assert!(Spring::new(f64::NAN, 10.0, 1.0).is_err());
        assert_eq!(
            Elastic::new(0.5, 0.3, false),
            Err(GlintError::InvalidAmplitude(0.5))
        );
        assert_eq!(
            Elastic::new(1.0, 0.0, false),
            Err(GlintError::InvalidPeriod(0.0))
        );
        assert_eq!(
            Polynomial::new(0.0, EaseMode::In),
            Err(GlintError::InvalidExponent(0.0))
        );
        assert_eq!(
            Polynomial::new(-3.0, EaseMode::Out),
            Err(GlintError::InvalidExponent(-3.0))
        );
    }
}
