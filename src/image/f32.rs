//! Owned single-channel f32 raster in row-major layout (stride == width).
//!
//! Used both for the full amplitude raster handed to the coarse detector and
//! for the crops and synthetic renderings handled by the model refiner.
use super::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF32 {
    /// Raster width in pixels
    pub w: usize,
    /// Raster height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0.0)
    }

    /// Construct a buffer of size `w × h` with every sample set to `value`.
    pub fn filled(w: usize, h: usize, value: f32) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` when the length does
    /// not match `w × h`.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Option<Self> {
        (data.len() == w * h).then_some(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the sample at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the sample at column `x`, row `y`.
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// True when the raster holds no samples.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Copy the window `[x0, x1) × [y0, y1)` into a new raster.
    ///
    /// The window is clipped to the raster bounds; a window that ends up empty
    /// yields a zero-sized raster.
    pub fn crop(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> ImageF32 {
        let x1 = x1.min(self.w);
        let y1 = y1.min(self.h);
        let x0 = x0.min(x1);
        let y0 = y0.min(y1);
        let w = x1 - x0;
        let h = y1 - y0;
        let mut data = Vec::with_capacity(w * h);
        for y in y0..y1 {
            data.extend_from_slice(&self.row(y)[x0..x1]);
        }
        ImageF32 {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Apply `f` to every sample, returning a new raster of the same shape.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> ImageF32 {
        let mut out = ImageF32::new(self.w, self.h);
        for (dst, src) in out.rows_mut().zip(self.rows()) {
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = f(s);
            }
        }
        out
    }
}

impl ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for ImageF32 {
    fn rows_mut(&mut self) -> std::slice::ChunksExactMut<'_, f32> {
        let len = self.w * self.h;
        // `chunks_exact_mut` panics on a zero chunk size; an empty raster has
        // no rows either way.
        self.data[..len].chunks_exact_mut(self.w.max(1))
    }
}
