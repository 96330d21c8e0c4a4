//! Construction errors
//!
//! Invalid parameters are rejected when a curve or driver is built,
//! never silently corrected. Callers that want auto-correction clamp
//! before constructing.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GlintError {
    #[error("spring stiffness must be positive, got {0}")]
    InvalidStiffness(f64),

    #[error("spring damping must be positive, got {0}")]
    InvalidDamping(f64),

    #[error("spring mass must be positive, got {0}")]
    InvalidMass(f64),

    #[error("elastic amplitude must be >= 1, got {0}")]
    InvalidAmplitude(f64),

    #[error("elastic period must be positive, got {0}")]
    InvalidPeriod(f64),

    #[error("polynomial exponent must be positive, got {0}")]
    InvalidExponent(f64),

    #[error("duration must be positive")]
    InvalidDuration,

    #[error("phase sequence requires at least one phase")]
    EmptyPhaseList,
}
