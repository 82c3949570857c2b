use log::debug;
use ss_blur::LowPassFilter;
use ss_core::{Error, Image, Result};

/// Smallest number of scale images an octave can hold (`scales_per_octave = 1`).
pub const MIN_SCALE_IMAGES: usize = 4;

/// Absolute blur of scale image `index` in an octave that starts at
/// `initial_blur`: `initial_blur * 2^(index / scales_per_octave)`.
pub fn scale_sigma(initial_blur: f64, scales_per_octave: usize, index: usize) -> f64 {
    initial_blur * 2f64.powf(index as f64 / scales_per_octave as f64)
}

/// One octave of a Gaussian scale space.
///
/// Holds `scales_per_octave + 3` progressively blurred images of equal size
/// and the `scales_per_octave + 2` differences between neighbours,
/// `dog[i] = scale[i + 1] - scale[i]`. The octave is immutable; accessors
/// lend the images out as shared slices.
#[derive(Debug, Clone, PartialEq)]
pub struct Octave {
    scale_images: Vec<Image>,
    dog_images: Vec<Image>,
}

impl Octave {
    /// Wraps already computed scale and difference-of-Gaussian images.
    ///
    /// Fails if there are fewer than [`MIN_SCALE_IMAGES`] scale images, if
    /// the DoG count is not one less than the scale count, or if any image
    /// differs in size from the first scale image.
    pub fn new(scale_images: Vec<Image>, dog_images: Vec<Image>) -> Result<Self> {
        if scale_images.len() < MIN_SCALE_IMAGES {
            return Err(Error::TooFewScales(scale_images.len()));
        }
        if dog_images.len() != scale_images.len() - 1 {
            return Err(Error::DogCountMismatch {
                expected: scale_images.len() - 1,
                actual: dog_images.len(),
            });
        }

        let first = &scale_images[0];
        for img in scale_images.iter().chain(&dog_images) {
            first.check_same_dimensions(img)?;
        }

        Ok(Self {
            scale_images,
            dog_images,
        })
    }

    /// Builds an octave by blurring `seed` up a geometric sigma ladder.
    ///
    /// `seed` must already carry a blur of `initial_blur`; it becomes scale
    /// image 0 unchanged. Scale image `i` targets
    /// [`scale_sigma`]`(initial_blur, scales_per_octave, i)` and is derived
    /// from image `i - 1` with the incremental sigma reported by
    /// `filter.sigma_difference`.
    pub fn create<F: LowPassFilter + ?Sized>(
        seed: &Image,
        scales_per_octave: usize,
        initial_blur: f64,
        filter: &F,
    ) -> Result<Self> {
        if scales_per_octave < 1 {
            return Err(Error::InvalidScaleCount(scales_per_octave));
        }
        if !(initial_blur.is_finite() && initial_blur > 0.0) {
            return Err(Error::InvalidSigma(initial_blur));
        }

        let count = scales_per_octave
            .checked_add(3)
            .ok_or(Error::InvalidScaleCount(scales_per_octave))?;
        let mut scale_images = Vec::new();
        scale_images
            .try_reserve_exact(count)
            .map_err(|_| Error::InvalidScaleCount(scales_per_octave))?;
        scale_images.push(seed.clone());

        let mut sigma_prev = initial_blur;
        for i in 1..count {
            let sigma = scale_sigma(initial_blur, scales_per_octave, i);
            let increment = filter.sigma_difference(sigma_prev, sigma)?;
            debug!(
                "octave level {i}: sigma {sigma_prev:.4} -> {sigma:.4} (increment {increment:.4})"
            );

            let blurred = filter.filter(&scale_images[i - 1], increment)?;
            scale_images.push(blurred);
            sigma_prev = sigma;
        }

        let dog_images = scale_images
            .windows(2)
            .map(|pair| pair[1].subtract(&pair[0]))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "octave built: {count} scales, {} DoG images, {}x{}",
            dog_images.len(),
            seed.width(),
            seed.height()
        );

        Self::new(scale_images, dog_images)
    }

    /// Progressively blurred images, least blurred first.
    ///
    /// The slice is read-only; the octave cannot be modified through it:
    ///
    /// ```compile_fail
    /// use ss_core::Image;
    /// use ss_octave::Octave;
    ///
    /// let scales = (0..4).map(|v| Image::new_fill(1, 1, v as f32).unwrap()).collect();
    /// let dogs = (0..3).map(|_| Image::new_fill(1, 1, 1.0).unwrap()).collect();
    /// let octave = Octave::new(scales, dogs).unwrap();
    /// octave.scale_images().clear();
    /// ```
    pub fn scale_images(&self) -> &[Image] {
        &self.scale_images
    }

    /// Differences of neighbouring scale images, `dog[i] = scale[i + 1] - scale[i]`.
    ///
    /// ```compile_fail
    /// use ss_core::Image;
    /// use ss_octave::Octave;
    ///
    /// let scales = (0..4).map(|v| Image::new_fill(1, 1, v as f32).unwrap()).collect();
    /// let dogs = (0..3).map(|_| Image::new_fill(1, 1, 1.0).unwrap()).collect();
    /// let octave = Octave::new(scales, dogs).unwrap();
    /// octave.difference_of_gaussians().push(Image::new(1, 1).unwrap());
    /// ```
    pub fn difference_of_gaussians(&self) -> &[Image] {
        &self.dog_images
    }

    pub fn scales_per_octave(&self) -> usize {
        self.scale_images.len() - 3
    }

    pub fn width(&self) -> usize {
        self.scale_images[0].width()
    }

    pub fn height(&self) -> usize {
        self.scale_images[0].height()
    }

    /// Consumes the octave, returning `(scale_images, dog_images)`.
    pub fn into_parts(self) -> (Vec<Image>, Vec<Image>) {
        (self.scale_images, self.dog_images)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use ss_blur::LowPassFilter;
    use ss_core::{Error, ErrorKind, Image, Result};

    use super::{Octave, scale_sigma};

    fn px(v: f32) -> Image {
        Image::from_rows(&[[v]]).expect("valid image")
    }

    fn blank(width: usize, height: usize) -> Image {
        Image::new(width, height).expect("valid image")
    }

    fn blanks(n: usize) -> Vec<Image> {
        (0..n).map(|_| blank(20, 20)).collect()
    }

    fn value(img: &Image) -> f64 {
        img.get(0, 0).expect("at least one pixel") as f64
    }

    /// Every pixel carries the image's absolute sigma; blurs compose in
    /// quadrature.
    struct SigmaTracker;

    impl LowPassFilter for SigmaTracker {
        fn filter(&self, image: &Image, sigma: f64) -> Result<Image> {
            let current = value(image);
            let next = current.hypot(sigma);
            Image::new_fill(image.width(), image.height(), next as f32)
        }

        fn sigma_difference(&self, sigma_from: f64, sigma_to: f64) -> Result<f64> {
            Ok((sigma_to * sigma_to - sigma_from * sigma_from).sqrt())
        }
    }

    /// Deliberately non-Gaussian algebra: the octave must apply whatever
    /// increment the filter reports, and nothing else.
    struct LinearFilter;

    impl LowPassFilter for LinearFilter {
        fn filter(&self, image: &Image, sigma: f64) -> Result<Image> {
            Ok(px(((2.0 * value(image) + sigma) / 2.0) as f32))
        }

        fn sigma_difference(&self, sigma_from: f64, sigma_to: f64) -> Result<f64> {
            Ok(2.0 * (sigma_to - sigma_from))
        }
    }

    struct NeverCalled;

    impl LowPassFilter for NeverCalled {
        fn filter(&self, _: &Image, _: f64) -> Result<Image> {
            unreachable!("validation must precede filtering")
        }

        fn sigma_difference(&self, _: f64, _: f64) -> Result<f64> {
            unreachable!("validation must precede filtering")
        }
    }

    #[derive(Default)]
    struct Recording {
        increments: RefCell<Vec<f64>>,
    }

    impl LowPassFilter for Recording {
        fn filter(&self, image: &Image, sigma: f64) -> Result<Image> {
            self.increments.borrow_mut().push(sigma);
            Ok(image.clone())
        }

        fn sigma_difference(&self, sigma_from: f64, sigma_to: f64) -> Result<f64> {
            Ok(sigma_to - sigma_from)
        }
    }

    struct FailsOnThird {
        calls: RefCell<usize>,
    }

    impl LowPassFilter for FailsOnThird {
        fn filter(&self, image: &Image, _: f64) -> Result<Image> {
            let mut calls = self.calls.borrow_mut();
            *calls += 1;
            if *calls == 3 {
                return Err(Error::InvalidSigma(f64::NAN));
            }
            Ok(image.clone())
        }

        fn sigma_difference(&self, sigma_from: f64, sigma_to: f64) -> Result<f64> {
            Ok(sigma_to - sigma_from)
        }
    }

    #[test]
    fn new_rejects_wrong_dog_count() {
        let err = Octave::new(blanks(4), blanks(4)).expect_err("count mismatch");
        assert_eq!(
            err,
            Error::DogCountMismatch {
                expected: 3,
                actual: 4
            }
        );
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn new_rejects_too_few_scales() {
        let err = Octave::new(blanks(3), blanks(2)).expect_err("too few");
        assert_eq!(err, Error::TooFewScales(3));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        assert_eq!(
            Octave::new(Vec::new(), Vec::new()),
            Err(Error::TooFewScales(0))
        );
    }

    #[test]
    fn new_rejects_differing_dimensions() {
        let mut dogs = blanks(2);
        dogs.push(blank(20, 19));
        let err = Octave::new(blanks(4), dogs).expect_err("size mismatch");
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: (20, 20),
                actual: (20, 19)
            }
        );

        let mut scales = blanks(3);
        scales.push(blank(21, 20));
        assert_eq!(
            Octave::new(scales, blanks(3)).map(|_| ()).map_err(|e| e.kind()),
            Err(ErrorKind::InvalidArgument)
        );
    }

    #[test]
    fn scales_per_octave_is_derived() {
        let octave = Octave::new(blanks(4), blanks(3)).expect("valid octave");
        assert_eq!(octave.scales_per_octave(), 1);
        assert_eq!((octave.width(), octave.height()), (20, 20));

        let octave = Octave::new(blanks(6), blanks(5)).expect("valid octave");
        assert_eq!(octave.scales_per_octave(), 3);
    }

    #[test]
    fn accessors_return_images_in_order() {
        let octave = Octave::new(
            vec![px(1.0), px(2.0), px(3.0), px(4.0)],
            vec![px(5.0), px(6.0), px(7.0)],
        )
        .expect("valid octave");

        let scales: Vec<f64> = octave.scale_images().iter().map(value).collect();
        let dogs: Vec<f64> = octave.difference_of_gaussians().iter().map(value).collect();
        assert_eq!(scales, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(dogs, vec![5.0, 6.0, 7.0]);

        let (scales, dogs) = octave.into_parts();
        assert_eq!((scales.len(), dogs.len()), (4, 3));
    }

    #[test]
    fn create_rejects_zero_scales() {
        let err = Octave::create(&blank(10, 10), 0, 1.7, &NeverCalled).expect_err("zero scales");
        assert_eq!(err, Error::InvalidScaleCount(0));
    }

    #[test]
    fn create_rejects_unrepresentable_scale_counts() {
        let seed = blank(10, 10);
        for n in [usize::MAX, usize::MAX - 3] {
            assert_eq!(
                Octave::create(&seed, n, 1.7, &NeverCalled),
                Err(Error::InvalidScaleCount(n))
            );
        }
    }

    #[test]
    fn create_rejects_non_positive_blur() {
        let seed = blank(10, 10);
        assert_eq!(
            Octave::create(&seed, 3, 0.0, &NeverCalled),
            Err(Error::InvalidSigma(0.0))
        );
        assert!(Octave::create(&seed, 3, -1.0, &NeverCalled).is_err());
        assert!(Octave::create(&seed, 3, f64::NAN, &NeverCalled).is_err());
    }

    #[test]
    fn create_one_scale_doubles_sigma_per_level() {
        let octave = Octave::create(&px(1.5), 1, 1.5, &LinearFilter).expect("valid octave");

        assert_eq!(octave.scales_per_octave(), 1);
        let sigmas: Vec<f64> = octave.scale_images().iter().map(value).collect();
        for (actual, expected) in sigmas.iter().zip([1.5, 3.0, 6.0, 12.0]) {
            assert!((actual - expected).abs() < 1e-6, "{actual} vs {expected}");
        }

        let dogs: Vec<f64> = octave.difference_of_gaussians().iter().map(value).collect();
        for (actual, expected) in dogs.iter().zip([1.5, 3.0, 6.0]) {
            assert!((actual - expected).abs() < 1e-6, "{actual} vs {expected}");
        }
    }

    #[test]
    fn create_three_scales_follows_geometric_ladder() {
        let octave = Octave::create(&px(1.5), 3, 1.5, &LinearFilter).expect("valid octave");

        assert_eq!(octave.scales_per_octave(), 3);
        assert_eq!(octave.scale_images().len(), 6);
        assert_eq!(octave.difference_of_gaussians().len(), 5);

        for (i, img) in octave.scale_images().iter().enumerate() {
            let expected = 1.5 * 2f64.powf(i as f64 / 3.0);
            assert!((value(img) - expected).abs() < 1e-5, "scale {i}");
        }
        for (i, img) in octave.difference_of_gaussians().iter().enumerate() {
            let expected = 1.5 * (2f64.powf((i + 1) as f64 / 3.0) - 2f64.powf(i as f64 / 3.0));
            assert!((value(img) - expected).abs() < 1e-5, "dog {i}");
        }
    }

    #[test]
    fn create_with_quadrature_tracker_reaches_target_sigmas() {
        for scales in 1..=5 {
            let sigma0 = 1.6;
            let seed = Image::new_fill(3, 2, sigma0 as f32).expect("valid image");
            let octave = Octave::create(&seed, scales, sigma0, &SigmaTracker).expect("valid octave");

            assert_eq!(octave.scale_images().len(), scales + 3);
            assert_eq!(octave.difference_of_gaussians().len(), scales + 2);
            for (i, img) in octave.scale_images().iter().enumerate() {
                assert_eq!(img.dimensions(), (3, 2));
                let expected = scale_sigma(sigma0, scales, i);
                assert!(
                    (value(img) - expected).abs() < 1e-5,
                    "s={scales} i={i}: {} vs {expected}",
                    value(img)
                );
            }
        }
    }

    #[test]
    fn create_keeps_seed_and_filters_once_per_level() {
        let seed = Image::from_rows(&[[0.25f32, 0.75]]).expect("valid image");
        let filter = Recording::default();

        let octave = Octave::create(&seed, 2, 2.0, &filter).expect("valid octave");

        assert_eq!(octave.scale_images()[0], seed);
        let increments = filter.increments.borrow();
        assert_eq!(increments.len(), 4);
        for (i, &inc) in increments.iter().enumerate() {
            let expected = scale_sigma(2.0, 2, i + 1) - scale_sigma(2.0, 2, i);
            assert!((inc - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn create_propagates_filter_errors() {
        let filter = FailsOnThird {
            calls: RefCell::new(0),
        };
        let err = Octave::create(&blank(4, 4), 3, 1.6, &filter).expect_err("filter failed");
        assert!(matches!(err, Error::InvalidSigma(_)));
    }

    #[test]
    fn create_accepts_trait_objects() {
        let filter: &dyn LowPassFilter = &SigmaTracker;
        let octave = Octave::create(&px(1.0), 2, 1.0, filter).expect("valid octave");
        assert_eq!(octave.scales_per_octave(), 2);
    }

    #[test]
    fn scale_sigma_doubles_per_octave() {
        assert_eq!(scale_sigma(1.6, 3, 0), 1.6);
        assert!((scale_sigma(1.6, 3, 3) - 3.2).abs() < 1e-12);
        assert!((scale_sigma(1.6, 1, 2) - 6.4).abs() < 1e-12);
    }
}
