//! Gaussian low-pass filtering for scale-space construction.
//!
//! Coordinates follow the pixel-center convention: sample `signal[i]` is
//! located at `x = i`, and kernel tap `k` sits at offset `k - radius`.
//!
//! Blur strength is a standard deviation. [`LowPassFilter::sigma_difference`]
//! turns two absolute blur levels into the incremental sigma that connects
//! them, so a caller can step an image up a blur ladder one small kernel at a
//! time.
//!
//! The `parallel` feature spreads each convolution pass over rayon's pool.
//! Results are identical with and without it.

pub mod conv1d;
mod filter;
pub mod gaussian;
pub mod kernels1d;

pub use filter::LowPassFilter;
pub use gaussian::{DEFAULT_TRUNCATE, GaussianFilter, GaussianFilterConfig};
pub use kernels1d::GaussianKernel1D;
