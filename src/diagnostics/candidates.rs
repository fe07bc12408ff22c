use crate::detector::CropWindow;
use crate::model::{IterationRecord, ModelParams};
use crate::types::BoundingBox;
use serde::Serialize;

/// What happened to one coarse candidate.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateTrace {
    pub index: usize,
    pub coarse_box: BoundingBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitSummary>,
    /// Set when the candidate made it into the final ship list.
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Model fit of a candidate; positions are in raster coordinates.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitSummary {
    pub initial: ModelParams,
    pub params: ModelParams,
    pub cost: f64,
    pub iterations: usize,
    pub converged: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub iterations_trace: Vec<IterationRecord>,
}
