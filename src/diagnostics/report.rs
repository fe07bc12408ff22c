use super::candidates::CandidateTrace;
use super::timing::TimingBreakdown;
use crate::detector::DetectionMethod;
use crate::types::OrientedBox;
use serde::Serialize;

/// Result of [`ShipDetector::process`](crate::ShipDetector::process).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub input: InputDescriptor,
    /// Accepted detections in raster pixel coordinates.
    pub ships: Vec<OrientedBox>,
    /// Every coarse candidate in coarse-detector order.
    pub candidates: Vec<CandidateTrace>,
    /// Final fit costs of all refined candidates, ascending. Useful when
    /// picking a cost threshold for a new dataset.
    pub costs_sorted: Vec<f64>,
    pub timings: TimingBreakdown,
}

impl DetectionReport {
    pub fn accepted(&self) -> impl Iterator<Item = &CandidateTrace> {
        self.candidates.iter().filter(|c| c.accepted)
    }

    pub fn failed(&self) -> impl Iterator<Item = &CandidateTrace> {
        self.candidates.iter().filter(|c| c.error.is_some())
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub pixel_size_m: f64,
    pub method: DetectionMethod,
}
