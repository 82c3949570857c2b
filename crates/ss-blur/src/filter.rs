use ss_core::{Image, Result};

/// A blur whose strength is expressed as a Gaussian standard deviation.
///
/// Scale-space construction only needs two things from a filter: apply a
/// blur, and tell how much additional blur moves an image from one absolute
/// level to a higher one.
pub trait LowPassFilter {
    /// Returns `image` blurred with a kernel of standard deviation `sigma`.
    fn filter(&self, image: &Image, sigma: f64) -> Result<Image>;

    /// Sigma of the additional blur that takes an image already blurred to
    /// `sigma_from` to an effective blur of `sigma_to`.
    ///
    /// Fails unless `sigma_to > sigma_from`.
    fn sigma_difference(&self, sigma_from: f64, sigma_to: f64) -> Result<f64>;
}
