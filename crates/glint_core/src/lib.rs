//! Glint Core Contracts
//!
//! This crate provides the foundational contracts shared by every Glint
//! animation driver:
//!
//! - **Value Interpolation**: the [`Interpolate`] trait that keyframe
//!   payloads implement (componentwise linear blending)
//! - **Observers**: boxed callback types and the terminal [`Completion`]
//!   signal delivered when a driver finishes or is cancelled
//!
//! # Example
//!
//! ```rust
//! use glint_core::Interpolate;
//!
//! let a = 0.0_f64;
//! let b = 100.0_f64;
//! assert_eq!(a.interpolate(&b, 0.25), 25.0);
//! ```

pub mod interpolate;
pub mod observer;

pub use interpolate::Interpolate;
pub use observer::{Completion, CompletionFn, EventFn, ProgressFn};
