//! Parameter types configuring the detector stages.
//!
//! Every group carries the reference values as `Default` and deserializes with
//! `#[serde(default)]`, so a JSON config only needs the fields it overrides.
//! The cost threshold is dataset dependent; print the sorted candidate costs
//! from a representative scene before tuning it.

use crate::coarse::CoarseOptions;
use crate::model::{FitOptions, ModelOptions};
use serde::{Deserialize, Serialize};

/// Which stages run after the coarse detector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    /// Report the coarse boxes directly, with zero rotation.
    Naive,
    /// Refine each coarse box with the rotated-rectangle model.
    #[default]
    Model,
}

/// Adaptation of a coarse box into a refinement problem, and acceptance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateOptions {
    /// Margin (meters) added around each coarse box before cropping.
    pub padding_m: f64,
    /// Fits with a final cost above this value are rejected.
    pub cost_threshold: f64,
}

impl Default for CandidateOptions {
    fn default() -> Self {
        Self {
            padding_m: 100.0,
            cost_threshold: 15000.0,
        }
    }
}

/// Detector-wide parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    pub method: DetectionMethod,
    pub coarse: CoarseOptions,
    pub model: ModelOptions,
    pub fit: FitOptions,
    pub candidate: CandidateOptions,
}
