//! Forward model: a bright rectangle on a uniform background, rotated about
//! its own center.

use super::params::ModelParams;
use crate::image::{ImageF32, ImageViewMut};

/// Paint the unrotated rectangle.
///
/// Pixel `(c, r)` takes the ship amplitude when
/// `x <= c < x + scale` and `y <= r < y + ratio * scale`.
pub fn paint_rectangle(width: usize, height: usize, params: &ModelParams, ratio: f64) -> ImageF32 {
    let bg = params.background_amplitude as f32;
    let fg = params.ship_amplitude as f32;
    let x0 = params.x;
    let x1 = params.x + params.scale;
    let y0 = params.y;
    let y1 = params.y + params.length(ratio);

    let mut canvas = ImageF32::filled(width, height, bg);
    for (r, row) in canvas.rows_mut().enumerate() {
        let rf = r as f64;
        if rf < y0 || rf >= y1 {
            continue;
        }
        for (c, px) in row.iter_mut().enumerate() {
            let cf = c as f64;
            if cf >= x0 && cf < x1 {
                *px = fg;
            }
        }
    }
    canvas
}

/// Rotate `src` by `angle` radians about `pivot` (x, y) with nearest-neighbor
/// resampling.
///
/// Each destination pixel looks up its source by inverse rotation about the
/// pivot; sources that fall outside the canvas take `fill`.
pub fn rotate_about(src: &ImageF32, angle: f64, pivot: (f64, f64), fill: f32) -> ImageF32 {
    let (w, h) = (src.w, src.h);
    let (sin, cos) = angle.sin_cos();
    let (px, py) = pivot;
    let mut out = ImageF32::filled(w, h, fill);
    for (y, row) in out.rows_mut().enumerate() {
        let dy = y as f64 - py;
        for (x, dst) in row.iter_mut().enumerate() {
            let dx = x as f64 - px;
            let sx = (px + cos * dx - sin * dy).round();
            let sy = (py + sin * dx + cos * dy).round();
            if sx >= 0.0 && sy >= 0.0 && sx < w as f64 && sy < h as f64 {
                *dst = src.get(sx as usize, sy as usize);
            }
        }
    }
    out
}

/// Render the full model onto a `width × height` canvas.
pub fn render_model(width: usize, height: usize, params: &ModelParams, ratio: f64) -> ImageF32 {
    let canvas = paint_rectangle(width, height, params, ratio);
    if params.angle == 0.0 {
        return canvas;
    }
    rotate_about(
        &canvas,
        params.angle,
        params.pivot(ratio),
        params.background_amplitude as f32,
    )
}
