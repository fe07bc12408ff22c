use crate::error::RefineError;
use crate::types::OrientedBox;
use nalgebra::Vector6;
use serde::{Deserialize, Serialize};

/// Number of free parameters of the rotated-rectangle model.
pub const PARAM_COUNT: usize = 6;

/// Parameters in optimizer order:
/// `[x, y, scale, angle, ship_amplitude, background_amplitude]`.
pub type ParamVector = Vector6<f64>;

/// Rotated-rectangle brightness model.
///
/// `x`/`y` position the top-left corner of the unrotated rectangle relative
/// to the crop origin; the rectangle is `scale` wide and `ratio * scale` long
/// and is rotated by `angle` radians about its center.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub angle: f64,
    pub ship_amplitude: f64,
    pub background_amplitude: f64,
}

impl ModelParams {
    /// Build from a flat guess; anything but exactly [`PARAM_COUNT`] values is
    /// rejected.
    pub fn from_slice(values: &[f64]) -> Result<Self, RefineError> {
        match *values {
            [x, y, scale, angle, ship_amplitude, background_amplitude] => Ok(Self {
                x,
                y,
                scale,
                angle,
                ship_amplitude,
                background_amplitude,
            }),
            _ => Err(RefineError::parameter_count(values.len())),
        }
    }

    pub fn to_array(&self) -> [f64; PARAM_COUNT] {
        [
            self.x,
            self.y,
            self.scale,
            self.angle,
            self.ship_amplitude,
            self.background_amplitude,
        ]
    }

    pub fn to_vector(&self) -> ParamVector {
        ParamVector::from(self.to_array())
    }

    pub fn from_vector(v: &ParamVector) -> Self {
        Self {
            x: v[0],
            y: v[1],
            scale: v[2],
            angle: v[3],
            ship_amplitude: v[4],
            background_amplitude: v[5],
        }
    }

    /// Same model shifted by `(dx, dy)` pixels, e.g. from crop to raster space.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Rectangle length along its long axis.
    #[inline]
    pub fn length(&self, ratio: f64) -> f64 {
        ratio * self.scale
    }

    /// Rotation pivot: the center of the unrotated rectangle.
    #[inline]
    pub fn pivot(&self, ratio: f64) -> (f64, f64) {
        (
            self.x + 0.5 * self.scale,
            self.y + 0.5 * self.length(ratio),
        )
    }

    pub fn to_oriented_box(&self, ratio: f64) -> OrientedBox {
        OrientedBox {
            x: self.x,
            y: self.y,
            width: self.scale,
            height: self.length(ratio),
            angle: self.angle,
        }
    }
}
