//! Structural validation of a [`Connectivity`].
//!
//! Checks run in a fixed order and stop at the first violation:
//! array shapes, index ranges, face symmetry, corner cross-consistency.
//! The pass is read-only and linear in `num_trees + num_ctt`.

use itertools::Itertools;

use super::connectivity::{Connectivity, TopIdx, slot};
use super::tables::{CHILDREN, FACES};
use crate::connectivity_error::ConnectivityError;

fn expect_len(field: &'static str, expected: usize, found: usize) -> Result<(), ConnectivityError> {
    if expected == found {
        Ok(())
    } else {
        Err(ConnectivityError::ShapeMismatch {
            field,
            expected,
            found,
        })
    }
}

fn nonneg(what: &'static str, value: TopIdx) -> Result<usize, ConnectivityError> {
    usize::try_from(value).map_err(|_| ConnectivityError::InvalidCount {
        what,
        value: i64::from(value),
    })
}

impl Connectivity {
    /// Examine the connectivity and report the first violation found.
    pub fn validate(&self) -> Result<(), ConnectivityError> {
        self.check_shapes()?;
        self.check_ranges()?;
        self.check_face_symmetry()?;
        self.check_corners()
    }

    /// `true` if the structure is valid.
    pub fn is_valid(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(e) => {
                log::debug!("invalid connectivity: {e}");
                false
            }
        }
    }

    fn check_shapes(&self) -> Result<(), ConnectivityError> {
        let nv = nonneg("num_vertices", self.num_vertices)?;
        let nt = nonneg("num_trees", self.num_trees)?;
        let nc = nonneg("num_corners", self.num_corners)?;
        let slots = nt * CHILDREN;

        expect_len("vertices", nv, self.vertices.len())?;
        expect_len(
            "tree_to_vertex",
            if nv > 0 { slots } else { 0 },
            self.tree_to_vertex.len(),
        )?;
        expect_len("tree_to_tree", slots, self.tree_to_tree.len())?;
        expect_len("tree_to_face", slots, self.tree_to_face.len())?;

        if nc == 0 {
            expect_len("tree_to_corner", 0, self.tree_to_corner.len())?;
            expect_len("ctt_offset", 0, self.corners.ctt_offset.len())?;
            expect_len("corner_to_tree", 0, self.corners.corner_to_tree.len())?;
            return expect_len("corner_to_corner", 0, self.corners.corner_to_corner.len());
        }

        expect_len("tree_to_corner", slots, self.tree_to_corner.len())?;
        expect_len("ctt_offset", nc + 1, self.corners.ctt_offset.len())?;
        if self.corners.ctt_offset[0] != 0 {
            return Err(ConnectivityError::CornerOffsets { corner: 0 });
        }
        for (k, (lo, hi)) in self.corners.ctt_offset.iter().tuple_windows().enumerate() {
            if hi < lo {
                return Err(ConnectivityError::CornerOffsets {
                    corner: k as TopIdx,
                });
            }
        }
        let num_ctt = nonneg("num_ctt", self.num_ctt())?;
        expect_len("corner_to_tree", num_ctt, self.corners.corner_to_tree.len())?;
        expect_len("corner_to_corner", num_ctt, self.corners.corner_to_corner.len())
    }

    fn check_ranges(&self) -> Result<(), ConnectivityError> {
        let in_range = |v: TopIdx, n: TopIdx| 0 <= v && v < n;

        for (i, &vertex) in self.tree_to_vertex.iter().enumerate() {
            if !in_range(vertex, self.num_vertices) {
                return Err(ConnectivityError::VertexOutOfRange {
                    tree: (i / CHILDREN) as TopIdx,
                    corner: i % CHILDREN,
                    vertex,
                });
            }
        }

        for (i, (&neighbor, &code)) in self.tree_to_tree.iter().zip(&self.tree_to_face).enumerate() {
            let (tree, face) = ((i / FACES) as TopIdx, i % FACES);
            if !in_range(neighbor, self.num_trees) {
                return Err(ConnectivityError::FaceTreeOutOfRange {
                    tree,
                    face,
                    neighbor,
                });
            }
            if !(0..2 * FACES as i8).contains(&code) {
                return Err(ConnectivityError::FaceCodeOutOfRange { tree, face, code });
            }
        }

        for (i, &index) in self.tree_to_corner.iter().enumerate() {
            if index != -1 && !in_range(index, self.num_corners) {
                return Err(ConnectivityError::CornerIndexOutOfRange {
                    tree: (i / CHILDREN) as TopIdx,
                    corner: i % CHILDREN,
                    index,
                });
            }
        }

        for k in 0..self.corners.num_corners() {
            for s in self.corners.range(k) {
                let (tree, tree_corner) = (self.corners.corner_to_tree[s], self.corners.corner_to_corner[s]);
                if !in_range(tree, self.num_trees) || !(0..CHILDREN as i8).contains(&tree_corner) {
                    return Err(ConnectivityError::IncidenceOutOfRange {
                        corner: k as TopIdx,
                        slot: s,
                        tree,
                        tree_corner,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_face_symmetry(&self) -> Result<(), ConnectivityError> {
        for tree in 0..self.num_trees {
            for face in 0..FACES {
                let n = self.face_neighbor(tree, face);
                if n.ntree == tree && n.nface == face {
                    if n.orientation.is_reversed() {
                        return Err(ConnectivityError::BoundaryOrientation { tree, face });
                    }
                    continue;
                }
                let back = self.face_neighbor(n.ntree, n.nface);
                if back.ntree != tree || back.nface != face || back.orientation != n.orientation {
                    return Err(ConnectivityError::FaceAsymmetry {
                        tree,
                        face,
                        neighbor: n.ntree,
                        neighbor_face: n.nface,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_corners(&self) -> Result<(), ConnectivityError> {
        if self.num_corners == 0 {
            return Ok(());
        }
        // every listed incidence points back at its corner
        let mut listed = vec![0usize; self.tree_to_corner.len()];
        for (k, ct) in self.corners.iter() {
            let s = slot(ct.ntree, ct.ncorner as usize);
            let recorded = self.tree_to_corner[s];
            if recorded != k as TopIdx {
                return Err(ConnectivityError::IncidenceMismatch {
                    corner: k as TopIdx,
                    tree: ct.ntree,
                    tree_corner: ct.ncorner,
                    recorded,
                });
            }
            listed[s] += 1;
        }
        // every registered tree corner is listed exactly once
        for (s, &index) in self.tree_to_corner.iter().enumerate() {
            if index >= 0 && listed[s] != 1 {
                return Err(ConnectivityError::IncidenceMissing {
                    corner: index,
                    tree: (s / CHILDREN) as TopIdx,
                    tree_corner: s % CHILDREN,
                    found: listed[s],
                });
            }
        }
        Ok(())
    }
}
