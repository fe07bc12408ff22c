use serde::{Deserialize, Serialize};

/// Knobs for the threshold-and-cluster candidate detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoarseOptions {
    /// Samples strictly above this amplitude are treated as metal returns.
    pub brightness_threshold: f64,
    /// Centroid distance (meters) below which two clusters are merged.
    /// The largest container ships are roughly 400 m long.
    pub merge_distance_m: f64,
}

impl Default for CoarseOptions {
    fn default() -> Self {
        Self {
            brightness_threshold: 1000.0,
            merge_distance_m: 400.0,
        }
    }
}
