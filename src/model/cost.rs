use crate::image::{ImageF32, ImageView};

/// Sum of squared per-pixel differences, accumulated in f64.
///
/// Both rasters must have the same shape.
pub fn sum_squared_error(observed: &ImageF32, rendered: &ImageF32) -> f64 {
    debug_assert_eq!((observed.w, observed.h), (rendered.w, rendered.h));
    observed
        .rows()
        .zip(rendered.rows())
        .flat_map(|(a, b)| a.iter().zip(b))
        .map(|(&a, &b)| {
            let d = f64::from(a) - f64::from(b);
            d * d
        })
        .sum()
}
