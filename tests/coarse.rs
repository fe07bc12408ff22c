mod common;

use common::synthetic_raster::{paint_block, sea_raster};
use ship_detector::coarse::{ClusterId, CoarseDetector, CoarseOptions};
use ship_detector::image::ImageF32;
use ship_detector::{BoundingBox, DetectError, PixelCoord};

fn raster_with(width: usize, height: usize, bright: &[(usize, usize)]) -> ImageF32 {
    let mut img = ImageF32::new(width, height);
    for &(row, col) in bright {
        img.set(col, row, 1500.0);
    }
    img
}

#[test]
fn small_block_forms_one_box() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut img = ImageF32::new(10, 10);
    paint_block(&mut img, 2, 2, 3, 3, 2000.0);
    let boxes = CoarseDetector::default().detect(&img, 10.0).unwrap();
    assert_eq!(boxes, vec![BoundingBox::new(2.0, 2.0, 2.0, 2.0)]);
}

#[test]
fn dim_raster_yields_no_candidates() {
    let img = sea_raster(64, 64, 200.0, 30.0, 7);
    let boxes = CoarseDetector::default().detect(&img, 10.0).unwrap();
    assert!(boxes.is_empty());
}

#[test]
fn samples_at_threshold_are_not_bright() {
    let mut img = ImageF32::new(8, 8);
    img.set(3, 3, 1000.0);
    assert!(CoarseDetector::default().detect(&img, 10.0).unwrap().is_empty());

    img.set(3, 3, 1000.01);
    let boxes = CoarseDetector::default().detect(&img, 10.0).unwrap();
    assert_eq!(boxes, vec![BoundingBox::new(3.0, 3.0, 0.0, 0.0)]);
}

#[test]
fn distant_pixels_stay_separate() {
    // 40 px merge radius at 10 m/px.
    let img = raster_with(200, 200, &[(10, 10), (150, 150)]);
    let boxes = CoarseDetector::default().detect(&img, 10.0).unwrap();
    assert_eq!(
        boxes,
        vec![
            BoundingBox::new(10.0, 10.0, 0.0, 0.0),
            BoundingBox::new(150.0, 150.0, 0.0, 0.0),
        ]
    );
}

#[test]
fn merging_follows_moving_centroids() {
    // 0 and 30 merge at once; their centroid (15) then reaches 50 on the next pass.
    let img = raster_with(60, 1, &[(0, 0), (0, 30), (0, 50)]);
    let det = CoarseDetector::default();
    let clusters = det.cluster(&img, 10.0).unwrap();
    assert_eq!(clusters.store.live_count(), 1);
    assert_eq!(clusters.stats.merges, 2);
    assert_eq!(clusters.boxes(), vec![BoundingBox::new(0.0, 0.0, 50.0, 0.0)]);
}

#[test]
fn merging_compares_centroids_not_members() {
    // 10 px radius at 40 m/px. Columns 9 and 11 are 2 px apart, but each joins
    // a partner first and the two centroids (4.5 and 15.5) stay 11 px apart.
    let img = raster_with(30, 1, &[(0, 0), (0, 9), (0, 11), (0, 20)]);
    let clusters = CoarseDetector::default().cluster(&img, 40.0).unwrap();
    assert_eq!(
        clusters.boxes(),
        vec![
            BoundingBox::new(0.0, 0.0, 9.0, 0.0),
            BoundingBox::new(11.0, 0.0, 9.0, 0.0),
        ]
    );

    let owner = |col| clusters.store.find(PixelCoord::new(0, col)).map(ClusterId::index);
    assert_eq!(owner(0), Some(0));
    assert_eq!(owner(9), Some(0));
    assert_eq!(owner(11), Some(2));
    assert_eq!(owner(20), Some(2));
    assert_eq!(owner(5), None);
}

#[test]
fn merge_radius_scales_with_pixel_size() {
    let img = raster_with(100, 1, &[(0, 0), (0, 30)]);
    let det = CoarseDetector::default();
    assert_eq!(det.detect(&img, 10.0).unwrap().len(), 1);
    // 400 m at 20 m/px is only 20 px.
    assert_eq!(det.detect(&img, 20.0).unwrap().len(), 2);
}

#[test]
fn blocks_become_boxes_in_seed_order() {
    let mut img = sea_raster(300, 300, 100.0, 20.0, 11);
    paint_block(&mut img, 200, 20, 6, 25, 3000.0);
    paint_block(&mut img, 30, 150, 20, 5, 3000.0);
    let det = CoarseDetector::new(CoarseOptions {
        brightness_threshold: 1000.0,
        merge_distance_m: 400.0,
    });
    let boxes = det.detect(&img, 10.0).unwrap();
    assert_eq!(
        boxes,
        vec![
            BoundingBox::new(200.0, 20.0, 5.0, 24.0),
            BoundingBox::new(30.0, 150.0, 19.0, 4.0),
        ]
    );
}

#[test]
fn detection_is_deterministic() {
    let mut img = sea_raster(128, 128, 300.0, 50.0, 3);
    paint_block(&mut img, 10, 10, 4, 12, 2500.0);
    paint_block(&mut img, 90, 70, 10, 3, 2500.0);
    let det = CoarseDetector::default();
    let a = det.detect(&img, 5.0).unwrap();
    let b = det.detect(&img, 5.0).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 2);
}

#[test]
fn invalid_pixel_size_is_rejected() {
    let img = raster_with(4, 4, &[(1, 1)]);
    assert_eq!(
        CoarseDetector::default().detect(&img, -3.0),
        Err(DetectError::InvalidPixelSize(-3.0))
    );
}
