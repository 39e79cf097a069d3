//! Face and corner transforms between neighboring trees.
//!
//! Nothing is cached: every query decodes the adjacency tables on the spot.
//! Face transforms are pure table lookups. Corner transforms read the CSR
//! list of a registered corner, or rotate around the corner face by face when
//! the corner is not registered.
//!
//! All queries assume a valid connectivity and in-range arguments.

use hashbrown::HashSet;

use super::connectivity::{Connectivity, TopIdx};
use super::corner_csr::CornerTransform;
use super::orientation::EdgeFlip;
use super::tables::{
    CORNER_FACES, FACE_CORNERS, FACE_NORMAL_AXIS, FACE_TANGENT_AXIS, FTRANSFORM, ROOT_LEN,
    corner_position_on_face, other_corner_face,
};

/// Axis combination mapping coordinates across one tree face.
///
/// Layout of `ftransform`:
///
/// | index | meaning |
/// |-------|---------|
/// | 0, 2  | tangential and normal axis of the origin face |
/// | 3, 5  | tangential and normal axis of the target face |
/// | 6     | edge reversal flag, equal to the orientation bit |
/// | 8     | face code `2 * (origin face % 2) + target face % 2` |
/// | 1, 4, 7 | reserved, always 0 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceTransform {
    /// Tree on the other side of the face.
    pub ntree: TopIdx,
    pub ftransform: [i32; FTRANSFORM],
}

impl FaceTransform {
    /// `(tangential, normal)` axes of the origin face.
    pub fn origin_axes(&self) -> (usize, usize) {
        (self.ftransform[0] as usize, self.ftransform[2] as usize)
    }

    /// `(tangential, normal)` axes of the target face.
    pub fn target_axes(&self) -> (usize, usize) {
        (self.ftransform[3] as usize, self.ftransform[5] as usize)
    }

    pub fn orientation(&self) -> EdgeFlip {
        EdgeFlip(self.ftransform[6] != 0)
    }

    pub fn face_code(&self) -> i32 {
        self.ftransform[8]
    }

    /// Transform of the same face seen from the neighbor, pointing at `origin`.
    pub fn inverse(&self, origin: TopIdx) -> Self {
        let f = &self.ftransform;
        let code = f[8];
        Self {
            ntree: origin,
            ftransform: [f[3], f[4], f[5], f[0], f[1], f[2], f[6], f[7], ((code & 1) << 1) | (code >> 1)],
        }
    }

    /// Map a point from origin-tree coordinates into the neighbor tree.
    ///
    /// `coords` is given in integer tree coordinates with side [`ROOT_LEN`];
    /// the point may lie outside the origin tree, but no further than one
    /// root length beyond the shared face.
    pub fn transform_point(&self, coords: [i32; 2]) -> [i32; 2] {
        let (t_axis, n_axis) = self.origin_axes();
        let (nt_axis, nn_axis) = self.target_axes();
        let origin_upper = self.ftransform[8] >> 1 == 1;
        let target_upper = self.ftransform[8] & 1 == 1;

        let tangent = coords[t_axis];
        let normal = coords[n_axis];
        // signed distance past the origin face, positive outside the origin tree
        let depth = if origin_upper { normal - ROOT_LEN } else { -normal };

        let mut out = [0; 2];
        out[nt_axis] = if self.orientation().is_reversed() {
            ROOT_LEN - tangent
        } else {
            tangent
        };
        out[nn_axis] = if target_upper { ROOT_LEN - depth } else { depth };
        out
    }
}

/// Result set of a corner query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CornerInfo {
    /// The originating corner of the last query.
    pub icorner: i8,
    /// Distinct tree corners meeting the originating one, sorted.
    pub transforms: Vec<CornerTransform>,
}

impl CornerInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Connectivity {
    /// Transform across face `iface` of `itree`, or `None` on the domain boundary.
    pub fn find_face_transform(&self, itree: TopIdx, iface: usize) -> Option<FaceTransform> {
        let n = self.face_neighbor(itree, iface);
        if n.ntree == itree && n.nface == iface {
            debug_assert!(!n.orientation.is_reversed());
            return None;
        }
        Some(FaceTransform {
            ntree: n.ntree,
            ftransform: [
                FACE_TANGENT_AXIS[iface] as i32,
                0,
                FACE_NORMAL_AXIS[iface] as i32,
                FACE_TANGENT_AXIS[n.nface] as i32,
                0,
                FACE_NORMAL_AXIS[n.nface] as i32,
                i32::from(n.orientation.code()),
                0,
                (2 * (iface % 2) + n.nface % 2) as i32,
            ],
        })
    }

    /// Array form of [`find_face_transform`](Self::find_face_transform).
    ///
    /// Returns the neighbor tree, or -1 on the boundary, in which case
    /// `ftransform` is left untouched.
    pub fn find_face_transform_raw(
        &self,
        itree: TopIdx,
        iface: usize,
        ftransform: &mut [i32; FTRANSFORM],
    ) -> TopIdx {
        match self.find_face_transform(itree, iface) {
            Some(ft) => {
                *ftransform = ft.ftransform;
                ft.ntree
            }
            None => -1,
        }
    }

    /// Collect every distinct tree corner touching corner `icorner` of `itree`.
    ///
    /// `info` is cleared first. The originating pair is excluded and the
    /// result is sorted by tree, then corner.
    pub fn find_corner_transform(&self, itree: TopIdx, icorner: usize, info: &mut CornerInfo) {
        info.icorner = icorner as i8;
        info.transforms.clear();
        if !self.corner_neighbors_registered(itree, icorner, &mut info.transforms) {
            self.corner_neighbors_by_faces(itree, icorner, &mut info.transforms);
        }
    }

    /// Read the neighbors of a registered corner from the CSR tables.
    ///
    /// Returns `false` and leaves `out` alone when the corner is not registered.
    pub fn corner_neighbors_registered(
        &self,
        itree: TopIdx,
        icorner: usize,
        out: &mut Vec<CornerTransform>,
    ) -> bool {
        let Some(k) = self.tree_corner(itree, icorner) else {
            return false;
        };
        out.clear();
        out.extend(
            self.corner_incidences(k)
                .filter(|ct| !(ct.ntree == itree && ct.ncorner as usize == icorner)),
        );
        out.sort_unstable();
        out.dedup();
        true
    }

    /// Infer the neighbors of a corner by walking around it across faces.
    ///
    /// Starting at `(itree, icorner)` the walk crosses one of the two faces at
    /// the corner, maps the corner through the face orientation, and leaves
    /// the neighbor through its other face at that corner. It stops when it
    /// returns to the start or reaches the boundary; in the latter case it
    /// walks the other way as well.
    pub fn corner_neighbors_by_faces(
        &self,
        itree: TopIdx,
        icorner: usize,
        out: &mut Vec<CornerTransform>,
    ) {
        let start = CornerTransform {
            ntree: itree,
            ncorner: icorner as i8,
        };
        let mut seen: HashSet<CornerTransform> = HashSet::new();
        seen.insert(start);

        for exit_face in CORNER_FACES[icorner] {
            let (mut tree, mut corner, mut face) = (itree, icorner, exit_face);
            let closed = loop {
                let Some((next, entry_face)) = self.corner_across_face(tree, corner, face) else {
                    break false;
                };
                if !seen.insert(next) {
                    if next != start {
                        log::warn!(
                            "corner walk from tree {itree} corner {icorner} revisited tree {} corner {}",
                            next.ntree,
                            next.ncorner
                        );
                    }
                    break next == start;
                }
                tree = next.ntree;
                corner = next.ncorner as usize;
                face = other_corner_face(corner, entry_face);
            };
            if closed {
                break;
            }
        }

        seen.remove(&start);
        out.clear();
        out.extend(seen);
        out.sort_unstable();
    }

    /// The corner reached by crossing `face` at `corner` of `tree`, with the
    /// face it is entered through. `None` on the boundary.
    fn corner_across_face(
        &self,
        tree: TopIdx,
        corner: usize,
        face: usize,
    ) -> Option<(CornerTransform, usize)> {
        if self.is_boundary_face(tree, face) {
            return None;
        }
        let n = self.face_neighbor(tree, face);
        let pos = corner_position_on_face(corner, face)?;
        let ncorner = FACE_CORNERS[n.nface][n.orientation.apply(pos)];
        Some((
            CornerTransform {
                ntree: n.ntree,
                ncorner: ncorner as i8,
            },
            n.nface,
        ))
    }
}
