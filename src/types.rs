use serde::{Deserialize, Serialize};

/// (row, column) position in raster space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelCoord {
    pub row: usize,
    pub col: usize,
}

impl PixelCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Axis-aligned box in pixel units.
///
/// `x`/`y` are the minimum column/row of the covered pixels and
/// `width`/`height` the `max - min` span, so a single pixel has zero extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Rotated box reported for a detected ship.
///
/// `x`/`y` locate the top-left corner of the unrotated rectangle; the box is
/// rotated by `angle` radians about its own center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrientedBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl OrientedBox {
    /// Center of the box; rotation about the center leaves it fixed.
    pub fn center(&self) -> (f64, f64) {
        (self.x + 0.5 * self.width, self.y + 0.5 * self.height)
    }
}

impl From<BoundingBox> for OrientedBox {
    fn from(b: BoundingBox) -> Self {
        Self {
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            angle: 0.0,
        }
    }
}
