//! Rotated-rectangle brightness model and its gradient-descent refiner.
//!
//! A ship seen in a log-compressed radar crop is approximated by a bright
//! rectangle (`scale` wide, `ratio * scale` long) on a uniform background,
//! rotated about its own center. The refiner adjusts the six parameters to
//! minimise the sum of squared differences against the observed crop.
//!
//! Modules
//! - `params` – the six-parameter model value and conversions.
//! - `render` – forward model (paint, then rotate with nearest-neighbor lookup).
//! - `cost` – sum-of-squared-error objective.
//! - `fit` – forward-difference gradients, per-parameter learning rates, clamps.
//!
//! Gradients are estimated numerically: the rotation step is piecewise
//! constant, so an analytic gradient of the rendering does not exist. Each
//! iteration costs seven renders. The optimizer is local; callers should start
//! from the coarse box geometry and filter results by final cost.

mod cost;
mod fit;
mod options;
mod params;
mod render;

pub use cost::sum_squared_error;
pub use fit::{FitBounds, IterationRecord, ModelFit, ModelRefiner};
pub use options::{FitOptions, ModelOptions};
pub use params::{ModelParams, ParamVector, PARAM_COUNT};
pub use render::{paint_rectangle, render_model, rotate_about};

use crate::error::RefineError;
use crate::image::ImageF32;

/// Forward model with a fixed length-to-width ratio.
#[derive(Clone, Debug, Default)]
pub struct ShipModel {
    options: ModelOptions,
}

impl ShipModel {
    pub fn new(options: ModelOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn ratio(&self) -> f64 {
        self.options.length_to_width_ratio
    }

    /// Synthetic `width × height` image for `params`.
    pub fn render(&self, width: usize, height: usize, params: &ModelParams) -> ImageF32 {
        render_model(width, height, params, self.ratio())
    }

    /// Sum of squared errors against `observed`, plus the rendering it was
    /// computed from.
    pub fn cost(&self, observed: &ImageF32, params: &ModelParams) -> (f64, ImageF32) {
        let rendered = self.render(observed.w, observed.h, params);
        (sum_squared_error(observed, &rendered), rendered)
    }
}

/// [`ShipModel::render`] with the default ratio.
pub fn render(width: usize, height: usize, params: &ModelParams) -> ImageF32 {
    ShipModel::default().render(width, height, params)
}

/// [`ShipModel::cost`] with the default ratio.
pub fn cost(observed: &ImageF32, params: &ModelParams) -> (f64, ImageF32) {
    ShipModel::default().cost(observed, params)
}

/// [`ModelRefiner::fit`] with default model and optimizer settings.
pub fn fit(observed: &ImageF32, initial: &[f64]) -> Result<ModelFit, RefineError> {
    ModelRefiner::default().fit(observed, initial)
}
