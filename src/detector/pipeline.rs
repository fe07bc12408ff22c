use super::candidate::{refine_candidate, CropWindow, RefinedCandidate};
use super::params::{DetectionMethod, DetectorParams};
use crate::coarse::CoarseDetector;
use crate::diagnostics::{
    elapsed_ms, CandidateTrace, DetectionReport, FitSummary, InputDescriptor, TimingBreakdown,
};
use crate::error::{check_pixel_size, DetectError, RefineError};
use crate::image::ImageF32;
use crate::model::{ModelRefiner, ShipModel};
use crate::types::{BoundingBox, OrientedBox};
use crate::units::meters_to_pixels;
use log::{debug, warn};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// End-to-end ship detector: coarse candidates, then per-candidate model
/// refinement and cost filtering.
///
/// Candidates are refined independently; with the `parallel` feature they are
/// spread over the rayon thread pool. A candidate whose refinement fails is
/// reported in its trace and does not affect the others.
#[derive(Clone, Debug)]
pub struct ShipDetector {
    params: DetectorParams,
    coarse: CoarseDetector,
    refiner: ModelRefiner,
}

impl Default for ShipDetector {
    fn default() -> Self {
        Self::new(DetectorParams::default())
    }
}

type CandidateOutcome = Result<RefinedCandidate, RefineError>;

impl ShipDetector {
    pub fn new(params: DetectorParams) -> Self {
        let coarse = CoarseDetector::new(params.coarse.clone());
        let refiner = ModelRefiner::new(ShipModel::new(params.model.clone()), params.fit.clone());
        Self {
            params,
            coarse,
            refiner,
        }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Accepted detections only.
    pub fn detect(
        &self,
        raster: &ImageF32,
        pixel_size_m: f64,
    ) -> Result<Vec<OrientedBox>, DetectError> {
        Ok(self.process(raster, pixel_size_m)?.ships)
    }

    /// Run the configured pipeline and return the full report.
    pub fn process(
        &self,
        raster: &ImageF32,
        pixel_size_m: f64,
    ) -> Result<DetectionReport, DetectError> {
        let t0 = Instant::now();
        let pixel_size_m = check_pixel_size(pixel_size_m)?;
        let mut timings = TimingBreakdown::default();

        let coarse_start = Instant::now();
        let boxes = self.coarse.detect(raster, pixel_size_m)?;
        timings.push_since("coarse", coarse_start);
        debug!(
            "ShipDetector::process coarse candidates={} method={:?}",
            boxes.len(),
            self.params.method
        );

        let (ships, candidates, costs_sorted) = match self.params.method {
            DetectionMethod::Naive => naive_report(&boxes),
            DetectionMethod::Model => {
                let refine_start = Instant::now();
                let padding_px = meters_to_pixels(self.params.candidate.padding_m, pixel_size_m);
                let outcomes = self.refine_all(raster, &boxes, padding_px);
                let report = self.model_report(raster, &boxes, outcomes, padding_px);
                timings.push_since("refine", refine_start);
                report
            }
        };
        timings.total_ms = elapsed_ms(t0);
        debug!(
            "ShipDetector::process accepted={}/{} total_ms={:.3}",
            ships.len(),
            candidates.len(),
            timings.total_ms
        );

        Ok(DetectionReport {
            input: InputDescriptor {
                width: raster.w,
                height: raster.h,
                pixel_size_m,
                method: self.params.method,
            },
            ships,
            candidates,
            costs_sorted,
            timings,
        })
    }

    fn refine_all(
        &self,
        raster: &ImageF32,
        boxes: &[BoundingBox],
        padding_px: f64,
    ) -> Vec<CandidateOutcome> {
        #[cfg(feature = "parallel")]
        {
            boxes
                .par_iter()
                .map(|bbox| refine_candidate(&self.refiner, raster, bbox, padding_px))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            boxes
                .iter()
                .map(|bbox| refine_candidate(&self.refiner, raster, bbox, padding_px))
                .collect()
        }
    }

    fn model_report(
        &self,
        raster: &ImageF32,
        boxes: &[BoundingBox],
        outcomes: Vec<CandidateOutcome>,
        padding_px: f64,
    ) -> (Vec<OrientedBox>, Vec<CandidateTrace>, Vec<f64>) {
        let ratio = self.refiner.model().ratio();
        let threshold = self.params.candidate.cost_threshold;
        let mut ships = Vec::new();
        let mut traces = Vec::with_capacity(boxes.len());
        let mut costs = Vec::new();

        for (index, (bbox, outcome)) in boxes.iter().zip(outcomes).enumerate() {
            match outcome {
                Ok(refined) => {
                    let cost = refined.fit.cost;
                    let accepted = cost <= threshold;
                    debug!(
                        "candidate {index}: cost={cost:.2} iterations={} converged={} accepted={accepted}",
                        refined.fit.iterations, refined.fit.converged
                    );
                    if accepted {
                        ships.push(refined.params.to_oriented_box(ratio));
                    }
                    costs.push(cost);
                    let (dx, dy) = refined.window.origin();
                    traces.push(CandidateTrace {
                        index,
                        coarse_box: *bbox,
                        crop: Some(refined.window),
                        fit: Some(FitSummary {
                            initial: refined.initial.translated(dx, dy),
                            params: refined.params,
                            cost,
                            iterations: refined.fit.iterations,
                            converged: refined.fit.converged,
                            iterations_trace: refined.fit.trace,
                        }),
                        accepted,
                        error: None,
                    });
                }
                Err(err) => {
                    warn!("candidate {index} skipped: {err}");
                    traces.push(CandidateTrace {
                        index,
                        coarse_box: *bbox,
                        crop: Some(CropWindow::around(bbox, padding_px, raster.w, raster.h)),
                        fit: None,
                        accepted: false,
                        error: Some(err.to_string()),
                    });
                }
            }
        }

        costs.sort_by(|a, b| a.total_cmp(b));
        (ships, traces, costs)
    }
}

/// Coarse boxes reported as-is with zero rotation.
fn naive_report(boxes: &[BoundingBox]) -> (Vec<OrientedBox>, Vec<CandidateTrace>, Vec<f64>) {
    let ships = boxes.iter().copied().map(OrientedBox::from).collect();
    let traces = boxes
        .iter()
        .enumerate()
        .map(|(index, bbox)| CandidateTrace {
            index,
            coarse_box: *bbox,
            crop: None,
            fit: None,
            accepted: true,
            error: None,
        })
        .collect();
    (ships, traces, Vec::new())
}
