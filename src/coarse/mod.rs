//! Coarse ship candidates from bright-pixel clustering.
//!
//! Overview
//! - Selects every raster sample strictly above a brightness threshold; metal
//!   hulls return far more energy than open water.
//! - Seeds one cluster per bright pixel and repeatedly merges cluster pairs
//!   whose centroids lie closer than a physical distance (converted to pixels
//!   with the ground sampling distance) until a full pass merges nothing.
//! - Emits one axis-aligned box per surviving cluster.
//!
//! The merge loop is O(k²) per pass in the number of live clusters, which is
//! fine as long as the bright-pixel count stays small relative to the raster.

mod cluster;
mod detector;
mod options;

pub use cluster::{Cluster, ClusterId, ClusterStore, MergeStats};
pub use detector::{bright_pixels, CoarseClusters, CoarseDetector};
pub use options::CoarseOptions;
