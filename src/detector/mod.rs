//! Ship detector orchestrating coarse clustering and model refinement.
//!
//! Overview
//! - Runs the coarse detector on the raw amplitude raster.
//! - For every coarse box: pads it by a physical margin, clips the window to
//!   the raster, log-compresses the crop (`ln(1 + a)`), derives an initial
//!   rectangle guess from the box geometry and fits the model.
//! - Moves each fit back to raster coordinates and keeps candidates whose
//!   final cost does not exceed the threshold.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and the demo.
//! - `candidate` – crop windows, compression, initial guess, per-box fit.
//! - `pipeline` – the [`ShipDetector`] implementation.

mod candidate;
pub mod params;
mod pipeline;

pub use candidate::{
    initial_guess, log_compress, refine_candidate, CropWindow, RefinedCandidate,
};
pub use params::{CandidateOptions, DetectionMethod, DetectorParams};
pub use pipeline::ShipDetector;
