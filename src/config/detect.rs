use crate::detector::DetectorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the JSON report; stdout when unset.
    pub json_out: Option<PathBuf>,
    /// Directory for per-candidate crops and rendered models.
    pub debug_dir: Option<PathBuf>,
}

/// How the ground sampling distance is supplied.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelSize {
    /// Pixel edge length in meters.
    Meters(f64),
    /// North–south pixel size in degrees of latitude, as found in the `e`
    /// term of a north-up affine transform.
    LatitudeDegrees(f64),
}

impl PixelSize {
    pub fn meters(self) -> f64 {
        match self {
            PixelSize::Meters(m) => m,
            PixelSize::LatitudeDegrees(deg) => crate::units::pixel_size_from_latitude_deg(deg),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    pub pixel_size: PixelSize,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub detector: DetectorParams,
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig, String> {
    serde_json::from_str(contents).map_err(|e| format!("Failed to parse config: {e}"))
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("{} ({})", e, path.display()))
}
