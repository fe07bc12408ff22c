//! Tunables of the rectangle model and its optimizer.

use super::params::PARAM_COUNT;
use serde::{Deserialize, Serialize};

/// Geometry shared by rendering, clamping and the final oriented box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelOptions {
    /// Ship length divided by ship width.
    pub length_to_width_ratio: f64,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            length_to_width_ratio: 5.0,
        }
    }
}

/// Gradient-descent settings, one entry per parameter in optimizer order
/// (`x, y, scale, angle, ship amplitude, background amplitude`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Forward-difference step per parameter. A zero step freezes the parameter.
    pub finite_difference_steps: [f64; PARAM_COUNT],
    /// Per-parameter learning rates.
    pub learning_rates: [f64; PARAM_COUNT],
    /// Stop once the gradient norm of an iteration falls below this value.
    pub gradient_tolerance: f64,
    /// Hard cap on optimizer iterations.
    pub max_iterations: usize,
    /// Keep a per-iteration record in the fit result.
    pub record_trace: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            finite_difference_steps: [1.0, 1.0, 0.01, 0.05, 0.01, 0.01],
            learning_rates: [1e-2, 1e-2, 1e-5, 1e-5, 1e-6, 1e-6],
            gradient_tolerance: 0.5,
            max_iterations: 100,
            record_trace: false,
        }
    }
}
