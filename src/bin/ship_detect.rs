use ship_detector::config::detect::{load_config, RuntimeConfig};
use ship_detector::detector::log_compress;
use ship_detector::diagnostics::DetectionReport;
use ship_detector::image::io::{load_amplitude_raster, save_normalized_f32, write_json_file};
use ship_detector::image::ImageF32;
use ship_detector::model::{sum_squared_error, ShipModel};
use ship_detector::ShipDetector;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let raster = load_amplitude_raster(&config.input_path)?;
    let pixel_size_m = config.pixel_size.meters();
    let detector = ShipDetector::new(config.detector.clone());
    let report = detector
        .process(&raster, pixel_size_m)
        .map_err(|e| format!("Detection failed: {e}"))?;

    print_summary(&report);

    if let Some(dir) = &config.output.debug_dir {
        save_candidate_images(&config, &raster, &report, dir)?;
        println!("Saved candidate crops to {}", dir.display());
    }

    match &config.output.json_out {
        Some(path) => {
            write_json_file(path, &report)?;
            println!("Saved report to {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize report: {e}"))?;
            println!("{json}");
        }
    }

    Ok(())
}

fn usage() -> String {
    "Usage: ship_detect <config.json>".to_string()
}

fn print_summary(report: &DetectionReport) {
    println!(
        "Raster {}x{} @ {:.3} m/px, method={:?}",
        report.input.width, report.input.height, report.input.pixel_size_m, report.input.method
    );
    println!(
        "Candidates: {} accepted: {} failed: {} ({:.1} ms)",
        report.candidates.len(),
        report.ships.len(),
        report.failed().count(),
        report.timings.total_ms
    );
    if !report.costs_sorted.is_empty() {
        let costs: Vec<String> = report.costs_sorted.iter().map(|c| format!("{c:.1}")).collect();
        println!("Costs: [{}]", costs.join(", "));
    }
    for ship in &report.ships {
        println!(
            "  ship x={:.1} y={:.1} w={:.1} h={:.1} angle={:.3}",
            ship.x, ship.y, ship.width, ship.height, ship.angle
        );
    }
}

/// Dump the compressed crop and the fitted rendering of every refined candidate.
fn save_candidate_images(
    config: &RuntimeConfig,
    raster: &ImageF32,
    report: &DetectionReport,
    dir: &Path,
) -> Result<(), String> {
    let model = ShipModel::new(config.detector.model.clone());
    for trace in &report.candidates {
        let (Some(window), Some(fit)) = (&trace.crop, &trace.fit) else {
            continue;
        };
        let crop = log_compress(&window.extract(raster));
        let (dx, dy) = window.origin();
        let local = fit.params.translated(-dx, -dy);
        let rendered = model.render(crop.w, crop.h, &local);
        // Recomputed as a sanity check against the reported cost.
        let cost = sum_squared_error(&crop, &rendered);
        if (cost - fit.cost).abs() > 1e-6 * fit.cost.abs().max(1.0) {
            eprintln!(
                "candidate {}: recomputed cost {cost:.3} differs from reported {:.3}",
                trace.index, fit.cost
            );
        }
        save_normalized_f32(&crop, &dir.join(format!("candidate_{:03}_crop.png", trace.index)))?;
        save_normalized_f32(
            &rendered,
            &dir.join(format!("candidate_{:03}_model.png", trace.index)),
        )?;
    }
    Ok(())
}
