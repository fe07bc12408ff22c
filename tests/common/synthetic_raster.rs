use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use ship_detector::image::ImageF32;
use ship_detector::model::{self, ModelParams};

/// Sea-clutter-like raster: `level` plus seeded Gaussian noise.
pub fn sea_raster(width: usize, height: usize, level: f32, sigma: f32, seed: u64) -> ImageF32 {
    let mut img = ImageF32::filled(width, height, level);
    add_noise(&mut img, sigma, seed);
    img
}

/// Adds zero-mean Gaussian noise in place. `sigma == 0` leaves the raster untouched.
pub fn add_noise(img: &mut ImageF32, sigma: f32, seed: u64) {
    if sigma <= 0.0 {
        return;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0f32, sigma).expect("sigma must be positive");
    for v in img.data.iter_mut() {
        *v += normal.sample(&mut rng);
    }
}

/// Paints an axis-aligned block of constant amplitude, clipped to the raster.
pub fn paint_block(img: &mut ImageF32, x0: usize, y0: usize, w: usize, h: usize, value: f32) {
    for y in y0..(y0 + h).min(img.h) {
        for x in x0..(x0 + w).min(img.w) {
            img.set(x, y, value);
        }
    }
}

/// Noisy rendering of the ship model, in the same log-compressed units the
/// refiner works in.
pub fn noisy_model_crop(
    width: usize,
    height: usize,
    truth: &ModelParams,
    sigma: f32,
    seed: u64,
) -> ImageF32 {
    let mut img = model::render(width, height, truth);
    add_noise(&mut img, sigma, seed);
    img
}
