#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod types;
pub mod units;

// Stage-level modules; usable on their own for experiments.
pub mod coarse;
pub mod config;
pub mod model;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{DetectionMethod, DetectorParams, ShipDetector};
pub use crate::diagnostics::DetectionReport;
pub use crate::error::{DetectError, RefineError};
pub use crate::types::{BoundingBox, OrientedBox, PixelCoord};

// Individual stages.
pub use crate::coarse::{CoarseDetector, CoarseOptions};
pub use crate::model::{FitOptions, ModelFit, ModelOptions, ModelParams, ModelRefiner, ShipModel};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use ship_detector::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (w, h) = (512usize, 512usize);
/// let raster = ImageF32::new(w, h);
///
/// let detector = ShipDetector::new(DetectorParams::default());
/// let report = detector.process(&raster, 10.0)?;
/// println!("ships={} candidates={}", report.ships.len(), report.candidates.len());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageF32;
    pub use crate::{DetectionReport, DetectorParams, OrientedBox, ShipDetector};
}
