mod common;

use common::synthetic_raster::{paint_block, sea_raster};
use ship_detector::image::ImageF32;
use ship_detector::{DetectError, DetectionMethod, DetectorParams, ShipDetector};

const PIXEL_SIZE_M: f64 = 10.0;

/// 300×300 scene: one ship-shaped block (5×25 px, modest contrast) and one
/// very bright 25×25 square that no 1:5 rectangle can explain.
fn scene() -> ImageF32 {
    let mut img = sea_raster(300, 300, 400.0, 20.0, 1234);
    paint_block(&mut img, 100, 50, 5, 25, 1100.0);
    paint_block(&mut img, 200, 200, 25, 25, 1.0e6);
    img
}

#[test]
fn ship_is_kept_and_square_is_rejected() {
    let _ = env_logger::builder().is_test(true).try_init();
    let detector = ShipDetector::new(DetectorParams::default());
    let report = detector.process(&scene(), PIXEL_SIZE_M).unwrap();

    assert_eq!(report.candidates.len(), 2);
    assert_eq!(report.costs_sorted.len(), 2);
    assert!(report.costs_sorted[0] <= report.costs_sorted[1]);
    assert!(report.costs_sorted[0] <= 15000.0);
    assert!(report.costs_sorted[1] > 15000.0);
    assert_eq!(report.failed().count(), 0);

    assert_eq!(report.ships.len(), 1);
    let (cx, cy) = report.ships[0].center();
    assert!((cx - 102.5).abs() < 3.0, "center x {cx}");
    assert!((cy - 62.5).abs() < 3.0, "center y {cy}");

    let accepted: Vec<_> = report.accepted().map(|c| c.index).collect();
    assert_eq!(accepted, vec![0]);
    let ship_trace = &report.candidates[0];
    let window = ship_trace.crop.unwrap();
    assert_eq!((window.x0, window.y0), (90, 40));
    let fit = ship_trace.fit.as_ref().unwrap();
    assert_eq!(fit.initial.x, 100.0);
    assert_eq!(fit.initial.y, 50.0);

    assert!(report.timings.get("coarse").is_some());
    assert!(report.timings.get("refine").is_some());
}

#[test]
fn naive_method_reports_coarse_boxes() {
    let params = DetectorParams {
        method: DetectionMethod::Naive,
        ..DetectorParams::default()
    };
    let report = ShipDetector::new(params)
        .process(&scene(), PIXEL_SIZE_M)
        .unwrap();

    assert_eq!(report.ships.len(), 2);
    assert!(report.costs_sorted.is_empty());
    assert!(report.candidates.iter().all(|c| c.accepted && c.fit.is_none()));
    let first = report.ships[0];
    assert_eq!(
        (first.x, first.y, first.width, first.height, first.angle),
        (100.0, 50.0, 4.0, 24.0, 0.0)
    );
    assert!(report.timings.get("refine").is_none());
}

#[test]
fn threshold_override_accepts_everything() {
    let mut params = DetectorParams::default();
    params.candidate.cost_threshold = f64::INFINITY;
    let ships = ShipDetector::new(params)
        .detect(&scene(), PIXEL_SIZE_M)
        .unwrap();
    assert_eq!(ships.len(), 2);
}

#[test]
fn quiet_sea_gives_empty_report() {
    let img = sea_raster(128, 96, 300.0, 25.0, 99);
    let report = ShipDetector::default().process(&img, PIXEL_SIZE_M).unwrap();
    assert!(report.ships.is_empty());
    assert!(report.candidates.is_empty());
    assert!(report.costs_sorted.is_empty());
    assert_eq!((report.input.width, report.input.height), (128, 96));
}

#[test]
fn report_serializes_to_json() {
    let report = ShipDetector::default()
        .process(&scene(), PIXEL_SIZE_M)
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["input"]["method"], "model");
    assert_eq!(json["candidates"].as_array().map(Vec::len), Some(2));
    assert!(json["costsSorted"].is_array());
}

#[test]
fn bad_pixel_size_fails_whole_run() {
    let err = ShipDetector::default().process(&scene(), 0.0).unwrap_err();
    assert_eq!(err, DetectError::InvalidPixelSize(0.0));
}
