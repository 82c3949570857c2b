//! Foundational primitives for Gaussian scale-space construction.
//!
//! ## Images
//! [`Image`] is a single-plane `f32` grid in row-major order with
//! `stride == width`. Dimensions are at least 1x1 and fixed for the lifetime
//! of the value. Pixel `(x, y)` addresses column `x` of row `y`.
//!
//! ## Border Modes
//! Filters choose how to treat samples beyond the image edge. The default,
//! renormalize, drops them and rescales the remaining kernel weights so that
//! constant images stay constant up to the border. Clamp and reflect-101
//! extend the signal instead.
//!
//! ## Errors
//! Every crate in the workspace reports failures through [`Error`];
//! [`Error::kind`] separates missing inputs from invalid ones.

mod border;
mod error;
mod image;

pub use border::{BorderMode, map_index};
pub use error::{Error, ErrorKind, Result};
pub use image::Image;
