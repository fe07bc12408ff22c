use super::cluster::{ClusterStore, MergeStats};
use super::options::CoarseOptions;
use crate::error::{check_pixel_size, DetectError};
use crate::image::{ImageF32, ImageView};
use crate::types::{BoundingBox, PixelCoord};
use crate::units::meters_to_pixels;
use log::debug;

/// Threshold-and-cluster candidate detector.
#[derive(Clone, Debug, Default)]
pub struct CoarseDetector {
    options: CoarseOptions,
}

/// Clusters produced by [`CoarseDetector::cluster`] together with the merge
/// bookkeeping, for callers that want more than the boxes.
#[derive(Clone, Debug)]
pub struct CoarseClusters {
    pub store: ClusterStore,
    pub bright_pixels: usize,
    pub threshold_px: f64,
    pub stats: MergeStats,
}

impl CoarseClusters {
    /// One box per live cluster, in ascending handle order.
    pub fn boxes(&self) -> Vec<BoundingBox> {
        self.store
            .live()
            .filter_map(|(_, c)| c.bounding_box())
            .collect()
    }
}

impl CoarseDetector {
    pub fn new(options: CoarseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CoarseOptions {
        &self.options
    }

    /// Axis-aligned boxes around clusters of bright pixels.
    ///
    /// An all-dim raster yields an empty list. Fails only when `pixel_size_m`
    /// is not a positive, finite number.
    pub fn detect(
        &self,
        raster: &ImageF32,
        pixel_size_m: f64,
    ) -> Result<Vec<BoundingBox>, DetectError> {
        Ok(self.cluster(raster, pixel_size_m)?.boxes())
    }

    /// Threshold the raster and merge bright pixels to a fixed point.
    pub fn cluster(
        &self,
        raster: &ImageF32,
        pixel_size_m: f64,
    ) -> Result<CoarseClusters, DetectError> {
        let pixel_size_m = check_pixel_size(pixel_size_m)?;
        let threshold_px = meters_to_pixels(self.options.merge_distance_m, pixel_size_m);

        let seeds = bright_pixels(raster, self.options.brightness_threshold);
        let bright = seeds.len();
        let mut store = ClusterStore::from_seeds(seeds);
        let stats = if store.is_empty() {
            MergeStats::default()
        } else {
            store.merge_to_fixed_point(threshold_px)
        };
        debug!(
            "coarse: {}x{} raster, {} bright px (> {:.1}), merge radius {:.2} px -> {} clusters ({} merges, {} passes)",
            raster.w,
            raster.h,
            bright,
            self.options.brightness_threshold,
            threshold_px,
            store.live_count(),
            stats.merges,
            stats.passes
        );

        Ok(CoarseClusters {
            store,
            bright_pixels: bright,
            threshold_px,
            stats,
        })
    }
}

/// Row-major list of coordinates whose amplitude is strictly above `threshold`.
pub fn bright_pixels(raster: &ImageF32, threshold: f64) -> Vec<PixelCoord> {
    let mut out = Vec::new();
    for (row, samples) in raster.rows().enumerate() {
        for (col, &v) in samples.iter().enumerate() {
            if f64::from(v) > threshold {
                out.push(PixelCoord::new(row, col));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bright_pixels_excludes_threshold_value() {
        let mut img = ImageF32::new(4, 3);
        img.set(1, 0, 1000.0);
        img.set(2, 1, 1000.5);
        img.set(3, 2, 5000.0);
        let px = bright_pixels(&img, 1000.0);
        assert_eq!(px, vec![PixelCoord::new(1, 2), PixelCoord::new(2, 3)]);
    }

    #[test]
    fn rejects_non_positive_pixel_size() {
        let img = ImageF32::new(4, 4);
        let det = CoarseDetector::default();
        assert_eq!(
            det.detect(&img, 0.0),
            Err(DetectError::InvalidPixelSize(0.0))
        );
        assert!(det.detect(&img, f64::NAN).is_err());
    }

    #[test]
    fn empty_raster_yields_no_boxes() {
        let det = CoarseDetector::default();
        let clusters = det.cluster(&ImageF32::new(0, 0), 10.0).unwrap();
        assert_eq!(clusters.bright_pixels, 0);
        assert!(clusters.boxes().is_empty());
    }
}
