use super::options::FitOptions;
use super::params::{ModelParams, ParamVector, PARAM_COUNT};
use super::ShipModel;
use crate::error::RefineError;
use crate::image::{ImageF32, ImageView};
use serde::Serialize;
use std::ops::ControlFlow;

/// Box constraints applied after every optimizer update.
///
/// Each bound is applied as `max(lo, min(hi, v))`, so the lower bound wins
/// when a crop is too small for the scale interval to be non-empty.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FitBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
    pub scale: (f64, f64),
    pub amplitude: (f64, f64),
}

impl FitBounds {
    pub fn for_crop(observed: &ImageF32, ratio: f64) -> Self {
        let (w, h) = (observed.w as f64, observed.h as f64);
        let amplitude = observed
            .min_max()
            .map(|(lo, hi)| (f64::from(lo), f64::from(hi)))
            .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
        Self {
            x: (0.0, w),
            y: (0.0, h),
            scale: (1.0, w.max(h) / ratio),
            amplitude,
        }
    }

    /// Angle is left free.
    pub fn clamp(&self, p: ModelParams) -> ModelParams {
        let bound = |v: f64, (lo, hi): (f64, f64)| v.min(hi).max(lo);
        ModelParams {
            x: bound(p.x, self.x),
            y: bound(p.y, self.y),
            scale: bound(p.scale, self.scale),
            angle: p.angle,
            ship_amplitude: bound(p.ship_amplitude, self.amplitude),
            background_amplitude: bound(p.background_amplitude, self.amplitude),
        }
    }

    pub fn contains(&self, p: &ModelParams) -> bool {
        let inside = |v: f64, (lo, hi): (f64, f64)| v >= lo && v <= hi.max(lo);
        inside(p.x, self.x)
            && inside(p.y, self.y)
            && inside(p.scale, self.scale)
            && inside(p.ship_amplitude, self.amplitude)
            && inside(p.background_amplitude, self.amplitude)
    }
}

/// One optimizer iteration, recorded when `FitOptions::record_trace` is set.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    pub iteration: usize,
    /// Cost at the parameters the gradient was taken at.
    pub cost: f64,
    pub gradient: [f64; PARAM_COUNT],
    pub gradient_norm: f64,
    /// Parameters after the update and clamp.
    pub params: ModelParams,
}

/// Result of [`ModelRefiner::fit`].
#[derive(Clone, Debug)]
pub struct ModelFit {
    pub params: ModelParams,
    /// Cost recomputed at `params`.
    pub cost: f64,
    /// Model rendered at `params`, same shape as the observed crop.
    pub rendered: ImageF32,
    pub iterations: usize,
    /// True when the gradient norm dropped below the tolerance before the
    /// iteration cap.
    pub converged: bool,
    pub trace: Vec<IterationRecord>,
}

/// Gradient-descent fit of the rectangle model with forward-difference
/// gradients and per-parameter learning rates.
#[derive(Clone, Debug, Default)]
pub struct ModelRefiner {
    model: ShipModel,
    options: FitOptions,
}

struct Step {
    params: ModelParams,
    cost: f64,
    gradient: ParamVector,
}

#[derive(Clone, Copy)]
struct FitState {
    params: ModelParams,
    iterations: usize,
}

impl ModelRefiner {
    pub fn new(model: ShipModel, options: FitOptions) -> Self {
        Self { model, options }
    }

    pub fn model(&self) -> &ShipModel {
        &self.model
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Fit the model to `observed` starting from a flat six-value guess.
    ///
    /// The guess length is checked before anything else is computed. A crop
    /// without pixels is rejected as degenerate.
    pub fn fit(&self, observed: &ImageF32, initial: &[f64]) -> Result<ModelFit, RefineError> {
        let start = ModelParams::from_slice(initial)?;
        self.fit_params(observed, start)
    }

    /// Same as [`ModelRefiner::fit`] with an already typed guess.
    pub fn fit_params(
        &self,
        observed: &ImageF32,
        start: ModelParams,
    ) -> Result<ModelFit, RefineError> {
        if observed.is_empty() {
            return Err(RefineError::DegenerateCrop {
                width: observed.w,
                height: observed.h,
            });
        }
        let bounds = FitBounds::for_crop(observed, self.model.ratio());
        let mut trace = Vec::new();

        let outcome = (0..self.options.max_iterations).try_fold(
            FitState {
                params: start,
                iterations: 0,
            },
            |state, iteration| {
                let step = self.step(observed, &bounds, state.params);
                let gradient_norm = step.gradient.norm();
                if self.options.record_trace {
                    trace.push(IterationRecord {
                        iteration,
                        cost: step.cost,
                        gradient: step.gradient.into(),
                        gradient_norm,
                        params: step.params,
                    });
                }
                let next = FitState {
                    params: step.params,
                    iterations: state.iterations + 1,
                };
                if gradient_norm < self.options.gradient_tolerance {
                    ControlFlow::Break(next)
                } else {
                    ControlFlow::Continue(next)
                }
            },
        );
        let (state, converged) = match outcome {
            ControlFlow::Break(state) => (state, true),
            ControlFlow::Continue(state) => (state, false),
        };

        let (cost, rendered) = self.model.cost(observed, &state.params);
        Ok(ModelFit {
            params: state.params,
            cost,
            rendered,
            iterations: state.iterations,
            converged,
            trace,
        })
    }

    /// Forward-difference gradient at `params`, then a clamped descent update.
    fn step(&self, observed: &ImageF32, bounds: &FitBounds, params: ModelParams) -> Step {
        let (cost, _) = self.model.cost(observed, &params);
        let v = params.to_vector();
        let steps = ParamVector::from(self.options.finite_difference_steps);
        let rates = ParamVector::from(self.options.learning_rates);

        let gradient = ParamVector::from_fn(|p, _| {
            let eps = steps[p];
            if eps == 0.0 {
                return 0.0;
            }
            let mut shifted = v;
            shifted[p] += eps;
            let (shifted_cost, _) = self
                .model
                .cost(observed, &ModelParams::from_vector(&shifted));
            (shifted_cost - cost) / eps
        });

        let updated = ModelParams::from_vector(&(v - rates.component_mul(&gradient)));
        Step {
            params: bounds.clamp(updated),
            cost,
            gradient,
        }
    }
}
