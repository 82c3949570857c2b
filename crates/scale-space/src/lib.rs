//! Umbrella crate for the `scale-space` workspace.
//!
//! This crate re-exports the image primitives, the Gaussian low-pass filter
//! and octave construction.

pub use ss_blur::*;
pub use ss_core::*;
pub use ss_octave::*;
