//! Compressed sparse row (CSR) storage of corner incidences.
//!
//! A registered corner `k` owns the contiguous slice
//! `ctt_offset[k] .. ctt_offset[k + 1]` of the two parallel arrays
//! `corner_to_tree` and `corner_to_corner`. One flat buffer holds every
//! incidence, so the layout matches the on-disk format directly.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::connectivity::TopIdx;

/// A `(tree, tree corner)` pair meeting at a registered corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CornerTransform {
    /// The neighboring tree.
    pub ntree: TopIdx,
    /// The corner number within `ntree`.
    pub ncorner: i8,
}

/// Corner → incident tree corners, stored as CSR.
///
/// Empty (all three arrays) when the connectivity has no registered corners.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CornerIncidence {
    /// Offsets into the incidence arrays, `num_corners + 1` entries.
    pub ctt_offset: Vec<TopIdx>,
    /// Tree of each incidence.
    pub corner_to_tree: Vec<TopIdx>,
    /// Tree-local corner of each incidence.
    pub corner_to_corner: Vec<i8>,
}

impl CornerIncidence {
    /// Number of corners described by the offsets.
    pub fn num_corners(&self) -> usize {
        self.ctt_offset.len().saturating_sub(1)
    }

    /// Total number of incidences, `ctt_offset[num_corners]`.
    pub fn num_ctt(&self) -> TopIdx {
        self.ctt_offset.last().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.ctt_offset.is_empty()
    }

    /// Slot range of corner `k`. Panics if `k` is out of range.
    #[inline]
    pub fn range(&self, k: usize) -> Range<usize> {
        let lo = self.ctt_offset[k] as usize;
        let hi = self.ctt_offset[k + 1] as usize;
        lo..hi
    }

    /// Iterate the incidences of corner `k` in storage order.
    pub fn incidences(&self, k: usize) -> impl Iterator<Item = CornerTransform> + '_ {
        let r = self.range(k);
        self.corner_to_tree[r.clone()]
            .iter()
            .zip(&self.corner_to_corner[r])
            .map(|(&ntree, &ncorner)| CornerTransform { ntree, ncorner })
    }

    /// Iterate `(corner, incidence)` over every registered corner.
    pub fn iter(&self) -> impl Iterator<Item = (usize, CornerTransform)> + '_ {
        (0..self.num_corners()).flat_map(move |k| self.incidences(k).map(move |ct| (k, ct)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_corners() -> CornerIncidence {
        CornerIncidence {
            ctt_offset: vec![0, 2, 5],
            corner_to_tree: vec![0, 4, 1, 2, 3],
            corner_to_corner: vec![0, 3, 1, 2, 0],
        }
    }

    #[test]
    fn slices_follow_offsets() {
        let csr = two_corners();
        assert_eq!(csr.num_corners(), 2);
        assert_eq!(csr.num_ctt(), 5);
        assert_eq!(csr.range(1), 2..5);
        let second: Vec<_> = csr.incidences(1).map(|c| (c.ntree, c.ncorner)).collect();
        assert_eq!(second, vec![(1, 1), (2, 2), (3, 0)]);
        assert_eq!(csr.iter().count(), 5);
    }

    #[test]
    fn empty_csr_has_no_corners() {
        let csr = CornerIncidence::default();
        assert!(csr.is_empty());
        assert_eq!(csr.num_corners(), 0);
        assert_eq!(csr.num_ctt(), 0);
        assert_eq!(csr.iter().count(), 0);
    }
}
