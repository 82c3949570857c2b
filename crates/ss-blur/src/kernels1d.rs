use ss_core::{Error, Result};

/// Sampled, unit-sum 1D Gaussian.
///
/// Conventions:
/// - `radius = ceil(truncate * sigma)`, minimum 1, optionally capped by
///   [`GaussianKernel1D::with_max_radius`].
/// - `weights[i]` is `exp(-t^2 / 2)` with `t = (i - radius) / sigma`, divided
///   by the sum over the whole support, so `sum(weights) ~= 1`.
/// - Weights are `f64`; the outer product of two kernels approximates the 2D
///   density `exp(-(x^2 + y^2) / (2 sigma^2)) / (2 pi sigma^2)` to well below
///   `f32` resolution once `sigma >= 1`.
///
/// Fields are read-only so the unit-sum invariant holds for every kernel:
///
/// ```compile_fail
/// let mut k = ss_blur::GaussianKernel1D::new(1.0, 8.0).unwrap();
/// k.weights[0] = 1.0;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel1D {
    sigma: f64,
    radius: usize,
    weights: Vec<f64>,
}

impl GaussianKernel1D {
    pub fn new(sigma: f64, truncate: f64) -> Result<Self> {
        Self::with_max_radius(sigma, truncate, usize::MAX)
    }

    /// Like [`GaussianKernel1D::new`], but the radius never exceeds
    /// `max_radius` (still at least 1). A filter over a signal of length `n`
    /// gains nothing from taps farther than `n` away.
    pub fn with_max_radius(sigma: f64, truncate: f64, max_radius: usize) -> Result<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(Error::InvalidSigma(sigma));
        }
        if !(truncate.is_finite() && truncate > 0.0) {
            return Err(Error::InvalidConfig("truncate must be > 0 and finite"));
        }

        let reach = (truncate * sigma).ceil();
        let radius = if reach >= max_radius as f64 {
            max_radius
        } else {
            reach as usize
        }
        .max(1);

        let len = radius
            .checked_mul(2)
            .and_then(|v| v.checked_add(1))
            .filter(|&len| {
                len.checked_mul(size_of::<f64>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(Error::InvalidSigma(sigma))?;

        let mut weights = vec![0.0f64; len];
        for (i, w) in weights.iter_mut().enumerate() {
            let t = (i as f64 - radius as f64) / sigma;
            *w = (-0.5 * t * t).exp();
        }

        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self {
            sigma,
            radius,
            weights,
        })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
