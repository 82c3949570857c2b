//! Separable Gaussian blur.
//!
//! The image is filtered along rows into an `f64` buffer, then along columns
//! into the `f32` output, so pixel values are rounded only once. Near the
//! border the behavior follows [`GaussianFilterConfig::border`]; the default
//! renormalizes by the kernel mass that lands inside the image.
//!
//! The kernel radius is capped at the larger image side. Under
//! [`BorderMode::Renormalize`] this changes nothing, since taps farther away
//! never land inside the image. Under [`BorderMode::Clamp`] and
//! [`BorderMode::Reflect101`] the kernel is truncated at that extent.

use log::trace;
use serde::{Deserialize, Serialize};
use ss_core::{BorderMode, Error, Image, Result};

use crate::LowPassFilter;
use crate::conv1d::{convolve_f64, taps};
use crate::kernels1d::GaussianKernel1D;

/// Kernel half-width in units of sigma. At 8 sigma the discarded tail mass is
/// below 1e-14.
pub const DEFAULT_TRUNCATE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianFilterConfig {
    /// Kernel radius is `ceil(truncate * sigma)`. Must be >= 1.
    pub truncate: f64,
    pub border: BorderMode,
}

impl Default for GaussianFilterConfig {
    fn default() -> Self {
        Self {
            truncate: DEFAULT_TRUNCATE,
            border: BorderMode::Renormalize,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GaussianFilter {
    cfg: GaussianFilterConfig,
}

impl GaussianFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: GaussianFilterConfig) -> Result<Self> {
        if !(cfg.truncate.is_finite() && cfg.truncate >= 1.0) {
            return Err(Error::InvalidConfig("truncate must be >= 1 and finite"));
        }
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &GaussianFilterConfig {
        &self.cfg
    }

    pub fn kernel(&self, sigma: f64) -> Result<GaussianKernel1D> {
        GaussianKernel1D::new(sigma, self.cfg.truncate)
    }
}

impl LowPassFilter for GaussianFilter {
    fn filter(&self, image: &Image, sigma: f64) -> Result<Image> {
        let (w, h) = image.dimensions();
        let kernel = GaussianKernel1D::with_max_radius(sigma, self.cfg.truncate, w.max(h))?;
        trace!(
            "gaussian blur sigma={sigma:.4} radius={} on {w}x{h}",
            kernel.radius()
        );

        let mut tmp = vec![0.0f64; w * h];
        let mut out = vec![0.0f32; w * h];

        #[cfg(feature = "parallel")]
        {
            horizontal_pass_parallel(image, &kernel, self.cfg.border, &mut tmp);
            vertical_pass_parallel(&tmp, w, h, &kernel, self.cfg.border, &mut out);
        }
        #[cfg(not(feature = "parallel"))]
        {
            horizontal_pass(image, &kernel, self.cfg.border, &mut tmp);
            vertical_pass(&tmp, w, h, &kernel, self.cfg.border, &mut out);
        }

        Image::from_vec(w, h, out)
    }

    fn sigma_difference(&self, sigma_from: f64, sigma_to: f64) -> Result<f64> {
        if !(sigma_from.is_finite() && sigma_from >= 0.0) {
            return Err(Error::InvalidSigma(sigma_from));
        }
        if !(sigma_to.is_finite() && sigma_to > sigma_from) {
            return Err(Error::InvalidSigma(sigma_to));
        }
        Ok((sigma_to * sigma_to - sigma_from * sigma_from).sqrt())
    }
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn horizontal_pass(src: &Image, kernel: &GaussianKernel1D, border: BorderMode, dst: &mut [f64]) {
    let w = src.width();
    for (y, dst_row) in dst.chunks_mut(w).enumerate() {
        convolve_f64(src.row(y), kernel.weights(), kernel.radius(), border, dst_row);
    }
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn vertical_pass(
    src: &[f64],
    w: usize,
    h: usize,
    kernel: &GaussianKernel1D,
    border: BorderMode,
    dst: &mut [f32],
) {
    for (y, dst_row) in dst.chunks_mut(w).enumerate() {
        vertical_row(src, w, h, y, kernel, border, dst_row);
    }
}

#[cfg(feature = "parallel")]
fn horizontal_pass_parallel(
    src: &Image,
    kernel: &GaussianKernel1D,
    border: BorderMode,
    dst: &mut [f64],
) {
    use rayon::prelude::*;

    let w = src.width();
    dst.par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst_row)| {
            convolve_f64(src.row(y), kernel.weights(), kernel.radius(), border, dst_row);
        });
}

#[cfg(feature = "parallel")]
fn vertical_pass_parallel(
    src: &[f64],
    w: usize,
    h: usize,
    kernel: &GaussianKernel1D,
    border: BorderMode,
    dst: &mut [f32],
) {
    use rayon::prelude::*;

    dst.par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst_row)| vertical_row(src, w, h, y, kernel, border, dst_row));
}

/// Output row `y` of the column pass. Every pixel of the row shares the same
/// taps, so they are resolved once.
fn vertical_row(
    src: &[f64],
    w: usize,
    h: usize,
    y: usize,
    kernel: &GaussianKernel1D,
    border: BorderMode,
    dst_row: &mut [f32],
) {
    let (row_taps, weight) = taps(y, h, kernel.weights(), kernel.radius(), border);
    for (x, dst_px) in dst_row.iter_mut().enumerate() {
        let mut acc = 0.0f64;
        for &(sy, kv) in &row_taps {
            acc += src[sy * w + x] * kv;
        }
        *dst_px = (acc / weight) as f32;
    }
}
