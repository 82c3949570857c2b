use core::fmt;

/// Coarse classification of [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required input was never supplied.
    MissingArgument,
    /// An input is structurally inconsistent or out of domain.
    InvalidArgument,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    MissingArgument(&'static str),
    EmptyImage,
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    OutOfBounds,
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    TooFewScales(usize),
    DogCountMismatch {
        expected: usize,
        actual: usize,
    },
    InvalidScaleCount(usize),
    InvalidSigma(f64),
    InvalidConfig(&'static str),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingArgument(_) => ErrorKind::MissingArgument,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument(name) => write!(f, "missing argument: {name}"),
            Self::EmptyImage => write!(f, "image must be at least 1x1"),
            Self::RaggedRows {
                row,
                expected,
                actual,
            } => write!(f, "row {row} has {actual} pixels, expected {expected}"),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            Self::TooFewScales(n) => {
                write!(f, "an octave needs at least 4 scale images, got {n}")
            }
            Self::DogCountMismatch { expected, actual } => write!(
                f,
                "expected {expected} difference-of-Gaussian images, got {actual}"
            ),
            Self::InvalidScaleCount(n) => {
                write!(f, "scales per octave must be at least 1, got {n}")
            }
            Self::InvalidSigma(sigma) => write!(f, "invalid sigma: {sigma}"),
            Self::InvalidConfig(what) => write!(f, "invalid config: {what}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = core::result::Result<T, Error>;
