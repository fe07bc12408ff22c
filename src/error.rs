//! Error types returned by the detector stages.

use crate::model::PARAM_COUNT;

/// Reasons why a model fit can be rejected before optimisation starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RefineError {
    /// The initial guess does not hold exactly one value per model parameter.
    InvalidParameterCount { expected: usize, found: usize },
    /// The observed crop has no pixels to compare against.
    DegenerateCrop { width: usize, height: usize },
}

impl RefineError {
    pub(crate) fn parameter_count(found: usize) -> Self {
        RefineError::InvalidParameterCount {
            expected: PARAM_COUNT,
            found,
        }
    }
}

impl std::fmt::Display for RefineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefineError::InvalidParameterCount { expected, found } => {
                write!(f, "expected {expected} model parameters, got {found}")
            }
            RefineError::DegenerateCrop { width, height } => {
                write!(f, "crop has zero area ({width}x{height})")
            }
        }
    }
}

impl std::error::Error for RefineError {}

/// Errors surfaced by the coarse detector and the end-to-end detector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DetectError {
    /// Ground sampling distance must be a positive, finite number of meters.
    InvalidPixelSize(f64),
    Refine(RefineError),
}

impl std::fmt::Display for DetectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DetectError::InvalidPixelSize(v) => {
                write!(f, "pixel size must be positive and finite, got {v} m")
            }
            DetectError::Refine(err) => write!(f, "model refinement failed: {err}"),
        }
    }
}

impl std::error::Error for DetectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DetectError::Refine(err) => Some(err),
            DetectError::InvalidPixelSize(_) => None,
        }
    }
}

impl From<RefineError> for DetectError {
    fn from(err: RefineError) -> Self {
        DetectError::Refine(err)
    }
}

pub(crate) fn check_pixel_size(pixel_size_m: f64) -> Result<f64, DetectError> {
    if pixel_size_m.is_finite() && pixel_size_m > 0.0 {
        Ok(pixel_size_m)
    } else {
        Err(DetectError::InvalidPixelSize(pixel_size_m))
    }
}
