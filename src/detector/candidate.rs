//! Turning a coarse box into a model-fitting problem and back.

use crate::error::RefineError;
use crate::image::{ImageF32, ImageView};
use crate::model::{ModelFit, ModelParams, ModelRefiner};
use crate::types::BoundingBox;
use serde::Serialize;

/// Clipped raster window `[x0, x1) × [y0, y1)` a candidate is refined in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CropWindow {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl CropWindow {
    /// Pad `bbox` by `padding_px` and clip to a `width × height` raster.
    ///
    /// The far edge is measured from the clipped near edge, so a box near the
    /// top/left border keeps its full padded extent where the raster allows.
    pub fn around(bbox: &BoundingBox, padding_px: f64, width: usize, height: usize) -> Self {
        let near = |v: f64, limit: usize| ((v - padding_px).floor().max(0.0) as usize).min(limit);
        let far = |start: usize, extent: f64, limit: usize| {
            ((start as f64 + extent + 2.0 * padding_px).floor().max(0.0) as usize)
                .min(limit)
                .max(start)
        };
        let x0 = near(bbox.x, width);
        let y0 = near(bbox.y, height);
        Self {
            x0,
            y0,
            x1: far(x0, bbox.width, width),
            y1: far(y0, bbox.height, height),
        }
    }

    /// Crop-to-raster offset `(dx, dy)`.
    pub fn origin(&self) -> (f64, f64) {
        (self.x0 as f64, self.y0 as f64)
    }

    pub fn extract(&self, raster: &ImageF32) -> ImageF32 {
        raster.crop(self.x0, self.y0, self.x1, self.y1)
    }
}

/// Compress the dynamic range with `ln(1 + a)`.
pub fn log_compress(crop: &ImageF32) -> ImageF32 {
    crop.map(f32::ln_1p)
}

/// Starting point derived from the coarse box geometry.
///
/// The rectangle is placed at the padding offset, sized from the longer box
/// side, tilted by `-atan(w / h) / atan(ratio)`, and given the crop's extreme
/// amplitudes. A zero-extent box starts unrotated.
pub fn initial_guess(
    bbox: &BoundingBox,
    padding_px: f64,
    crop: &ImageF32,
    ratio: f64,
) -> ModelParams {
    let (lo, hi) = crop
        .min_max()
        .map(|(lo, hi)| (f64::from(lo), f64::from(hi)))
        .unwrap_or((0.0, 0.0));
    let angle = if bbox.width == 0.0 && bbox.height == 0.0 {
        0.0
    } else {
        -(bbox.width / bbox.height).atan() / ratio.atan()
    };
    ModelParams {
        x: padding_px,
        y: padding_px,
        scale: bbox.width.max(bbox.height) / ratio,
        angle,
        ship_amplitude: hi,
        background_amplitude: lo,
    }
}

/// A coarse box refined in its crop window.
#[derive(Clone, Debug)]
pub struct RefinedCandidate {
    pub window: CropWindow,
    /// Initial guess, crop-relative.
    pub initial: ModelParams,
    /// Optimizer output, crop-relative.
    pub fit: ModelFit,
    /// Fitted parameters moved to raster coordinates.
    pub params: ModelParams,
}

/// Crop, compress, fit and translate one coarse box.
pub fn refine_candidate(
    refiner: &ModelRefiner,
    raster: &ImageF32,
    bbox: &BoundingBox,
    padding_px: f64,
) -> Result<RefinedCandidate, RefineError> {
    let window = CropWindow::around(bbox, padding_px, raster.w, raster.h);
    let crop = log_compress(&window.extract(raster));
    let initial = initial_guess(bbox, padding_px, &crop, refiner.model().ratio());
    let fit = refiner.fit_params(&crop, initial)?;
    let (dx, dy) = window.origin();
    let params = fit.params.translated(dx, dy);
    Ok(RefinedCandidate {
        window,
        initial,
        fit,
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_padded_and_clipped() {
        let b = BoundingBox::new(50.0, 40.0, 6.0, 20.0);
        let w = CropWindow::around(&b, 10.0, 200, 100);
        assert_eq!(w, CropWindow { x0: 40, y0: 30, x1: 66, y1: 70 });

        let edge = BoundingBox::new(3.0, 95.0, 4.0, 2.0);
        let w = CropWindow::around(&edge, 10.0, 200, 100);
        assert_eq!((w.x0, w.y0), (0, 85));
        assert_eq!(w.x1, 24);
        assert_eq!(w.y1, 100);
    }

    #[test]
    fn initial_guess_follows_box_geometry() {
        let crop = ImageF32::from_vec(2, 2, vec![0.5, 2.0, 1.0, 7.5]).unwrap();
        let b = BoundingBox::new(0.0, 0.0, 5.0, 5.0);
        let g = initial_guess(&b, 10.0, &crop, 5.0);
        assert_eq!((g.x, g.y, g.scale), (10.0, 10.0, 1.0));
        let expected = -(1.0f64).atan() / (5.0f64).atan();
        assert!((g.angle - expected).abs() < 1e-12);
        assert_eq!((g.ship_amplitude, g.background_amplitude), (7.5, 0.5));
    }

    #[test]
    fn single_pixel_box_starts_unrotated() {
        let crop = ImageF32::filled(3, 3, 1.0);
        let g = initial_guess(&BoundingBox::new(4.0, 4.0, 0.0, 0.0), 1.0, &crop, 5.0);
        assert_eq!(g.angle, 0.0);
        assert_eq!(g.scale, 0.0);
    }

    #[test]
    fn log_compress_is_ln_1p() {
        let crop = ImageF32::from_vec(2, 1, vec![0.0, std::f32::consts::E - 1.0]).unwrap();
        let out = log_compress(&crop);
        assert_eq!(out.get(0, 0), 0.0);
        assert!((out.get(1, 0) - 1.0).abs() < 1e-6);
    }
}
