//! One octave of a Gaussian scale space.
//!
//! An octave starts from a seed image that already carries a blur of
//! `sigma0` and climbs the ladder `sigma0 * 2^(i / s)` for
//! `i = 0..=s + 2`, where `s` is the number of scales per octave. Each level
//! is blurred from its predecessor with the incremental sigma
//! `sqrt(sigma_i^2 - sigma_{i-1}^2)`, which keeps every kernel small.
//!
//! Adjacent levels are subtracted to give `s + 2` difference-of-Gaussian
//! images, the input of scale-space extremum detection.
//!
//! Downsampling between octaves and extremum search are left to callers.

mod builder;
mod octave;

pub use builder::{DEFAULT_INITIAL_BLUR, DEFAULT_SCALES_PER_OCTAVE, OctaveBuilder};
pub use octave::{MIN_SCALE_IMAGES, Octave, scale_sigma};
