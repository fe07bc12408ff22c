//! Arena of pixel clusters with stable handles.
//!
//! Merging moves every member of the absorbed cluster into the surviving one
//! and retires the absorbed slot instead of removing it, so handles taken
//! before a merge pass stay valid for the whole pass.

use crate::types::{BoundingBox, PixelCoord};
use nalgebra::Vector2;

/// Stable handle into a [`ClusterStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(usize);

impl ClusterId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A set of pixel coordinates believed to belong to one object.
#[derive(Clone, Debug)]
pub struct Cluster {
    members: Vec<PixelCoord>,
    /// Running (row, col) sum so the centroid is O(1).
    sum: Vector2<f64>,
    live: bool,
}

impl Cluster {
    fn singleton(p: PixelCoord) -> Self {
        Self {
            members: vec![p],
            sum: Vector2::new(p.row as f64, p.col as f64),
            live: true,
        }
    }

    pub fn members(&self) -> &[PixelCoord] {
        &self.members
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Mean (row, col) of the members.
    pub fn centroid(&self) -> Vector2<f64> {
        self.sum / self.members.len().max(1) as f64
    }

    /// Min/max row and column of the members, as an inclusive-span box.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = self.members.first()?;
        let (mut r0, mut r1, mut c0, mut c1) = (first.row, first.row, first.col, first.col);
        for p in &self.members[1..] {
            r0 = r0.min(p.row);
            r1 = r1.max(p.row);
            c0 = c0.min(p.col);
            c1 = c1.max(p.col);
        }
        Some(BoundingBox::new(
            c0 as f64,
            r0 as f64,
            (c1 - c0) as f64,
            (r1 - r0) as f64,
        ))
    }
}

/// Outcome of [`ClusterStore::merge_to_fixed_point`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Full pairwise passes, including the final pass without merges.
    pub passes: usize,
    pub merges: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ClusterStore {
    clusters: Vec<Cluster>,
}

impl ClusterStore {
    /// One singleton cluster per seed, in seed order.
    pub fn from_seeds(seeds: impl IntoIterator<Item = PixelCoord>) -> Self {
        Self {
            clusters: seeds.into_iter().map(Cluster::singleton).collect(),
        }
    }

    /// Number of slots, live or retired.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.clusters.iter().filter(|c| c.live).count()
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(id.0)
    }

    /// Live clusters in ascending handle order.
    pub fn live(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> {
        self.clusters
            .iter()
            .enumerate()
            .filter(|(_, c)| c.live)
            .map(|(i, c)| (ClusterId(i), c))
    }

    /// Handle of the live cluster holding `p`, if any.
    pub fn find(&self, p: PixelCoord) -> Option<ClusterId> {
        self.live()
            .find(|(_, c)| c.members.contains(&p))
            .map(|(id, _)| id)
    }

    /// Move every member of `from` into `into` and retire `from`.
    fn absorb(&mut self, into: usize, from: usize) {
        debug_assert_ne!(into, from);
        let moved = std::mem::take(&mut self.clusters[from].members);
        let sum = std::mem::replace(&mut self.clusters[from].sum, Vector2::zeros());
        self.clusters[from].live = false;
        let target = &mut self.clusters[into];
        target.members.extend(moved);
        target.sum += sum;
    }

    /// Merge clusters whose centroids are closer than `threshold_px` until a
    /// full pass performs no merge.
    ///
    /// Pairs are visited with `i` ascending, then `j > i` ascending. The
    /// centroid of `i` is taken once per row of the scan, while `j` always
    /// uses its current centroid.
    pub fn merge_to_fixed_point(&mut self, threshold_px: f64) -> MergeStats {
        let n = self.clusters.len();
        let mut stats = MergeStats::default();
        loop {
            stats.passes += 1;
            let mut merged = false;
            for i in 0..n {
                if !self.clusters[i].live {
                    continue;
                }
                let ci = self.clusters[i].centroid();
                for j in (i + 1)..n {
                    if !self.clusters[j].live {
                        continue;
                    }
                    let cj = self.clusters[j].centroid();
                    if (ci - cj).norm() < threshold_px {
                        self.absorb(i, j);
                        stats.merges += 1;
                        merged = true;
                    }
                }
            }
            if !merged {
                return stats;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(points: &[(usize, usize)]) -> ClusterStore {
        ClusterStore::from_seeds(points.iter().map(|&(r, c)| PixelCoord::new(r, c)))
    }

    #[test]
    fn absorbed_slots_stay_addressable() {
        let mut s = store(&[(0, 0), (0, 1), (50, 50)]);
        let stats = s.merge_to_fixed_point(2.0);
        assert_eq!(s.len(), 3);
        assert_eq!(s.live_count(), 2);
        assert_eq!(stats.merges, 1);
        let retired = s.get(ClusterId(1)).unwrap();
        assert!(!retired.is_live());
        assert!(retired.members().is_empty());
        assert_eq!(s.get(ClusterId(0)).unwrap().members().len(), 2);
    }

    #[test]
    fn centroid_tracks_merged_members() {
        let mut s = store(&[(0, 0), (0, 2), (2, 1)]);
        s.merge_to_fixed_point(3.0);
        let (_, c) = s.live().next().unwrap();
        let centroid = c.centroid();
        assert!((centroid[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((centroid[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn later_pass_catches_shifted_centroid() {
        // (0,0)+(0,3) merge into a centroid at col 1.5, which brings (0,5)
        // within reach only once the second pass recomputes the row centroid.
        let mut s = store(&[(0, 0), (0, 3), (0, 5)]);
        let stats = s.merge_to_fixed_point(3.6);
        assert_eq!(s.live_count(), 1);
        assert!(stats.passes >= 2);
    }

    #[test]
    fn threshold_is_strict() {
        let mut s = store(&[(0, 0), (0, 4)]);
        s.merge_to_fixed_point(4.0);
        assert_eq!(s.live_count(), 2);
    }

    #[test]
    fn bounding_box_uses_inclusive_span() {
        let s = store(&[(7, 3)]);
        let (_, c) = s.live().next().unwrap();
        assert_eq!(c.bounding_box(), Some(BoundingBox::new(3.0, 7.0, 0.0, 0.0)));
    }
}
