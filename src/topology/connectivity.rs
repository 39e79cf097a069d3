//! The inter-tree connectivity record.
//!
//! All `tree_to_*` arrays are stored in z-order per tree: entry `4 * t + i`
//! belongs to face or corner `i` of tree `t`. Corners are ordered `yx` =
//! 00, 01, 10, 11 and faces −x, +x, −y, +y.
//!
//! `tree_to_face` holds `face + 4 * orientation`: `ttf % 4` is the neighbor's
//! face and `ttf / 4` the orientation bit, 0 when the shared edge runs the same
//! z-order direction on both sides and 1 when it runs opposite. A face that
//! points back to itself with orientation 0 is a domain boundary.
//!
//! Vertices are optional: with `num_vertices == 0` both `vertices` and
//! `tree_to_vertex` are empty. Corners are only stored when they connect
//! trees; other `tree_to_corner` entries are -1, and with `num_corners == 0`
//! `tree_to_corner` and the CSR arrays are empty.

use serde::{Deserialize, Serialize};

use super::corner_csr::{CornerIncidence, CornerTransform};
use super::orientation::EdgeFlip;
use super::tables::{CHILDREN, FACES};
use crate::connectivity_error::ConnectivityError;

/// Signed index type for trees, vertices and corners.
pub type TopIdx = i32;

/// Decoded `tree_to_tree` / `tree_to_face` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceNeighbor {
    pub ntree: TopIdx,
    pub nface: usize,
    pub orientation: EdgeFlip,
}

/// Adjacency of the trees of a quadtree forest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connectivity {
    pub num_vertices: TopIdx,
    pub num_trees: TopIdx,
    pub num_corners: TopIdx,

    /// Vertex coordinates, `num_vertices` entries.
    pub vertices: Vec<[f64; 3]>,
    /// Vertex of each tree corner, `4 * num_trees` entries or empty.
    pub tree_to_vertex: Vec<TopIdx>,

    /// Neighbor tree across each face, `4 * num_trees` entries.
    pub tree_to_tree: Vec<TopIdx>,
    /// Neighbor face and orientation across each face, `4 * num_trees` entries.
    pub tree_to_face: Vec<i8>,

    /// Registered corner of each tree corner or -1, `4 * num_trees` entries or empty.
    pub tree_to_corner: Vec<TopIdx>,
    /// Incidences of every registered corner.
    pub corners: CornerIncidence,
}

fn count(what: &'static str, value: TopIdx) -> Result<usize, ConnectivityError> {
    usize::try_from(value).map_err(|_| ConnectivityError::InvalidCount {
        what,
        value: i64::from(value),
    })
}

fn alloc_filled<T: Clone>(
    field: &'static str,
    len: usize,
    value: T,
) -> Result<Vec<T>, ConnectivityError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| ConnectivityError::Allocation { field, len })?;
    v.resize(len, value);
    Ok(v)
}

fn copy_into<T: Copy>(field: &'static str, dst: &mut [T], src: &[T]) -> Result<(), ConnectivityError> {
    if dst.len() != src.len() {
        return Err(ConnectivityError::ShapeMismatch {
            field,
            expected: dst.len(),
            found: src.len(),
        });
    }
    dst.copy_from_slice(src);
    Ok(())
}

#[inline]
pub(crate) fn slot(tree: TopIdx, local: usize) -> usize {
    tree as usize * FACES + local
}

impl Connectivity {
    /// Allocate a connectivity with fixed counts.
    ///
    /// Every tree starts out with four boundary faces and no registered
    /// corners; vertex data is zeroed. `ctt_offset` is zeroed except for its
    /// last entry, which is set to `num_ctt`, so the caller only fills the
    /// interior offsets.
    ///
    /// # Errors
    /// [`ConnectivityError::InvalidCount`] for negative counts or incidences
    /// without corners, [`ConnectivityError::Allocation`] when memory cannot
    /// be reserved.
    pub fn new(
        num_vertices: TopIdx,
        num_trees: TopIdx,
        num_corners: TopIdx,
        num_ctt: TopIdx,
    ) -> Result<Self, ConnectivityError> {
        let nv = count("num_vertices", num_vertices)?;
        let nt = count("num_trees", num_trees)?;
        let nc = count("num_corners", num_corners)?;
        let nctt = count("num_ctt", num_ctt)?;
        if nc == 0 && nctt > 0 {
            return Err(ConnectivityError::InvalidCount {
                what: "num_ctt",
                value: i64::from(num_ctt),
            });
        }
        let slots = nt
            .checked_mul(CHILDREN)
            .ok_or(ConnectivityError::Allocation {
                field: "tree_to_tree",
                len: usize::MAX,
            })?;

        let vertices = alloc_filled("vertices", nv, [0.0; 3])?;
        let tree_to_vertex = alloc_filled("tree_to_vertex", if nv > 0 { slots } else { 0 }, 0)?;

        let mut tree_to_tree = alloc_filled("tree_to_tree", slots, 0)?;
        let mut tree_to_face = alloc_filled("tree_to_face", slots, 0i8)?;
        for (i, (tt, tf)) in tree_to_tree.iter_mut().zip(&mut tree_to_face).enumerate() {
            *tt = (i / FACES) as TopIdx;
            *tf = (i % FACES) as i8;
        }

        let (tree_to_corner, corners) = if nc > 0 {
            let mut ctt_offset = alloc_filled("ctt_offset", nc + 1, 0)?;
            ctt_offset[nc] = num_ctt;
            (
                alloc_filled("tree_to_corner", slots, -1)?,
                CornerIncidence {
                    ctt_offset,
                    corner_to_tree: alloc_filled("corner_to_tree", nctt, 0)?,
                    corner_to_corner: alloc_filled("corner_to_corner", nctt, 0i8)?,
                },
            )
        } else {
            (Vec::new(), CornerIncidence::default())
        };

        Ok(Self {
            num_vertices,
            num_trees,
            num_corners,
            vertices,
            tree_to_vertex,
            tree_to_tree,
            tree_to_face,
            tree_to_corner,
            corners,
        })
    }

    /// Allocate a connectivity and copy borrowed tables into it.
    ///
    /// Slices for absent arrays (no vertices, no corners) must be empty.
    /// The result is not validated.
    #[allow(clippy::too_many_arguments)]
    pub fn new_copy(
        num_vertices: TopIdx,
        num_trees: TopIdx,
        num_corners: TopIdx,
        vertices: &[[f64; 3]],
        tree_to_vertex: &[TopIdx],
        tree_to_tree: &[TopIdx],
        tree_to_face: &[i8],
        tree_to_corner: &[TopIdx],
        ctt_offset: &[TopIdx],
        corner_to_tree: &[TopIdx],
        corner_to_corner: &[i8],
    ) -> Result<Self, ConnectivityError> {
        let num_ctt = match usize::try_from(num_corners) {
            Ok(nc) if nc > 0 => *ctt_offset.get(nc).ok_or(ConnectivityError::ShapeMismatch {
                field: "ctt_offset",
                expected: nc + 1,
                found: ctt_offset.len(),
            })?,
            _ => 0,
        };
        let mut conn = Self::new(num_vertices, num_trees, num_corners, num_ctt)?;
        copy_into("vertices", &mut conn.vertices, vertices)?;
        copy_into("tree_to_vertex", &mut conn.tree_to_vertex, tree_to_vertex)?;
        copy_into("tree_to_tree", &mut conn.tree_to_tree, tree_to_tree)?;
        copy_into("tree_to_face", &mut conn.tree_to_face, tree_to_face)?;
        copy_into("tree_to_corner", &mut conn.tree_to_corner, tree_to_corner)?;
        copy_into("ctt_offset", &mut conn.corners.ctt_offset, ctt_offset)?;
        copy_into("corner_to_tree", &mut conn.corners.corner_to_tree, corner_to_tree)?;
        copy_into("corner_to_corner", &mut conn.corners.corner_to_corner, corner_to_corner)?;
        Ok(conn)
    }

    /// Total number of corner incidences.
    pub fn num_ctt(&self) -> TopIdx {
        self.corners.num_ctt()
    }

    /// Decode the face connection of `(tree, face)`.
    #[inline]
    pub fn face_neighbor(&self, tree: TopIdx, face: usize) -> FaceNeighbor {
        let s = slot(tree, face);
        let code = self.tree_to_face[s] as u8;
        FaceNeighbor {
            ntree: self.tree_to_tree[s],
            nface: usize::from(code) % FACES,
            orientation: EdgeFlip::from_code(code / FACES as u8),
        }
    }

    /// Whether `(tree, face)` lies on the domain boundary.
    #[inline]
    pub fn is_boundary_face(&self, tree: TopIdx, face: usize) -> bool {
        let n = self.face_neighbor(tree, face);
        n.ntree == tree && n.nface == face
    }

    /// Registered corner index of `(tree, corner)`, if any.
    #[inline]
    pub fn tree_corner(&self, tree: TopIdx, corner: usize) -> Option<usize> {
        if self.num_corners == 0 {
            return None;
        }
        usize::try_from(self.tree_to_corner[slot(tree, corner)]).ok()
    }

    /// Incidences of registered corner `k`.
    pub fn corner_incidences(&self, k: usize) -> impl Iterator<Item = CornerTransform> + '_ {
        self.corners.incidences(k)
    }

    /// The four vertex indices of `tree`, if vertices are stored.
    pub fn tree_vertices(&self, tree: TopIdx) -> Option<&[TopIdx]> {
        if self.num_vertices == 0 {
            return None;
        }
        let s = slot(tree, 0);
        self.tree_to_vertex.get(s..s + CHILDREN)
    }

    /// Value equality of two connectivities.
    ///
    /// Coordinates are compared by bit pattern: they are construction-time
    /// literals, not computed results.
    pub fn is_equal(&self, other: &Self) -> bool {
        self.num_vertices == other.num_vertices
            && self.num_trees == other.num_trees
            && self.num_corners == other.num_corners
            && self.vertices.len() == other.vertices.len()
            && self
                .vertices
                .iter()
                .flatten()
                .zip(other.vertices.iter().flatten())
                .all(|(a, b)| a.to_bits() == b.to_bits())
            && self.tree_to_vertex == other.tree_to_vertex
            && self.tree_to_tree == other.tree_to_tree
            && self.tree_to_face == other.tree_to_face
            && self.tree_to_corner == other.tree_to_corner
            && self.corners.ctt_offset == other.corners.ctt_offset
            && self.corners.corner_to_tree == other.corners.corner_to_tree
            && self.corners.corner_to_corner == other.corners.corner_to_corner
    }
}

impl PartialEq for Connectivity {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

/// Release a connectivity. `None` is accepted and ignored.
pub fn destroy(connectivity: Option<Connectivity>) {
    if let Some(conn) = connectivity {
        log::trace!(
            "destroying connectivity with {} trees, {} corners",
            conn.num_trees,
            conn.num_corners
        );
        drop(conn);
    }
}
