use ss_blur::LowPassFilter;
use ss_core::{Error, Image, Result};

use crate::Octave;

pub const DEFAULT_SCALES_PER_OCTAVE: usize = 3;
pub const DEFAULT_INITIAL_BLUR: f64 = 1.6;

/// Collects the inputs of [`Octave::create`] one at a time.
///
/// `build` reports [`Error::MissingArgument`] when the seed image or the
/// filter was never supplied.
#[derive(Clone, Copy)]
pub struct OctaveBuilder<'a> {
    seed: Option<&'a Image>,
    scales_per_octave: usize,
    initial_blur: f64,
    filter: Option<&'a dyn LowPassFilter>,
}

impl Default for OctaveBuilder<'_> {
    fn default() -> Self {
        Self {
            seed: None,
            scales_per_octave: DEFAULT_SCALES_PER_OCTAVE,
            initial_blur: DEFAULT_INITIAL_BLUR,
            filter: None,
        }
    }
}

impl<'a> OctaveBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: &'a Image) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn scales_per_octave(mut self, scales_per_octave: usize) -> Self {
        self.scales_per_octave = scales_per_octave;
        self
    }

    pub fn initial_blur(mut self, initial_blur: f64) -> Self {
        self.initial_blur = initial_blur;
        self
    }

    pub fn filter(mut self, filter: &'a dyn LowPassFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn build(self) -> Result<Octave> {
        let seed = self.seed.ok_or(Error::MissingArgument("seed"))?;
        let filter = self.filter.ok_or(Error::MissingArgument("filter"))?;
        Octave::create(seed, self.scales_per_octave, self.initial_blur, filter)
    }
}

impl std::fmt::Debug for OctaveBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctaveBuilder")
            .field("seed", &self.seed.map(Image::dimensions))
            .field("scales_per_octave", &self.scales_per_octave)
            .field("initial_blur", &self.initial_blur)
            .field("filter", &self.filter.is_some())
            .finish()
    }
}
