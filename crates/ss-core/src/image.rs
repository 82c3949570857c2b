use crate::{Error, Result};

/// Owned single-plane `f32` image, row-major, `stride == width`.
///
/// Both dimensions are at least 1 and never change after construction.
/// Pixel `(x, y)` is column `x` of row `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Image {
    /// Zero-initialized `width x height` image.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::new_fill(width, height, 0.0)
    }

    pub fn new_fill(width: usize, height: usize, value: f32) -> Result<Self> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds an image from a grid of rows; every row must have the same,
    /// non-zero length.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let len = checked_len(width, rows.len())?;

        let mut data = Vec::with_capacity(len);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(Error::RaggedRows {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self {
            width,
            height: rows.len(),
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Row-major pixels. Read-only; pixels change only through [`Image::set`].
    ///
    /// ```compile_fail
    /// let mut img = ss_core::Image::new(2, 2).unwrap();
    /// img.data_mut()[0] = 1.0;
    /// ```
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn row(&self, y: usize) -> &[f32] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds);
        }
        self.data[y * self.width + x] = value;
        Ok(())
    }

    /// Pixel-wise `self - subtrahend`.
    pub fn subtract(&self, subtrahend: &Image) -> Result<Image> {
        self.check_same_dimensions(subtrahend)?;

        let data = self
            .data
            .iter()
            .zip(&subtrahend.data)
            .map(|(&a, &b)| a - b)
            .collect();

        Ok(Self {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Largest absolute per-pixel difference, or `None` if the dimensions
    /// differ.
    pub fn max_abs_diff(&self, other: &Image) -> Option<f32> {
        if self.dimensions() != other.dimensions() {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(&other.data)
                .fold(0.0f32, |acc, (&a, &b)| acc.max((a - b).abs())),
        )
    }

    /// Equality with an absolute per-pixel tolerance. Meant for comparisons
    /// in tests and diagnostics.
    pub fn approx_eq(&self, other: &Image, tolerance: f32) -> bool {
        self.max_abs_diff(other).is_some_and(|d| d <= tolerance)
    }

    pub fn check_same_dimensions(&self, other: &Image) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyImage);
    }
    width.checked_mul(height).ok_or(Error::SizeMismatch {
        expected: usize::MAX,
        actual: 0,
    })
}
