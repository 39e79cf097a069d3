//! Fixed lookup tables for the 2D tree numbering conventions.
//!
//! Corners are numbered in z-order (`yx` = 00, 01, 10, 11), faces as
//! −x, +x, −y, +y. Every table is a flat constant indexed by small integers,
//! so the transform engine only ever does lookups.

use static_assertions::const_assert_eq;

/// Spatial dimension.
pub const DIM: usize = 2;
/// Faces per tree.
pub const FACES: usize = 2 * DIM;
/// Corners (and children) per tree.
pub const CHILDREN: usize = 4;
/// Children touching one face.
pub const HALF: usize = CHILDREN / 2;
/// Length of a face transform encoding.
pub const FTRANSFORM: usize = 9;

/// Maximum refinement level representable in tree coordinates.
pub const MAXLEVEL: u8 = 30;
/// Side length of a tree in integer coordinates.
pub const ROOT_LEN: i32 = 1 << MAXLEVEL;

const_assert_eq!(FACES, 4);
const_assert_eq!(CHILDREN, 1 << DIM);
const_assert_eq!(FTRANSFORM, 9);

/// Right-hand rule corner sequence in z-order, closed by the wrap-around entry.
pub const CORNER_TO_ZORDER: [usize; 5] = [0, 1, 3, 2, 4];

/// z-order face number to right-hand face number.
pub const ZFACE_TO_RFACE: [usize; FACES] = [3, 1, 0, 2];

/// Right-hand face number to z-order face number.
pub const RFACE_TO_ZFACE: [usize; FACES] = [2, 1, 3, 0];

/// The two corners of each face, in increasing z-order.
pub const FACE_CORNERS: [[usize; 2]; FACES] = [[0, 2], [1, 3], [0, 1], [2, 3]];

/// The face opposite to each face within the same tree.
pub const FACE_DUAL: [usize; FACES] = [1, 0, 3, 2];

/// For a face and a child id, which half of the face the child covers (-1: none).
pub const FACE_CHILD_HANG: [[i8; CHILDREN]; FACES] = [
    [0, -1, 1, -1],
    [-1, 0, -1, 1],
    [0, 1, -1, -1],
    [-1, -1, 0, 1],
];

/// Corners of a child that may hang on the parent's faces, indexed by child id.
pub const HANGING_CORNER: [[usize; 2]; CHILDREN] = [[1, 2], [0, 3], [3, 0], [2, 1]];

/// Parent faces carrying the corresponding [`HANGING_CORNER`] entry.
pub const HANGING_FACE: [[usize; 2]; CHILDREN] = [[2, 0], [2, 1], [3, 0], [3, 1]];

/// The two faces meeting at each corner, x-face first.
pub const CORNER_FACES: [[usize; 2]; CHILDREN] = [[0, 2], [1, 2], [0, 3], [1, 3]];

/// Position of a corner within each face's corner pair (-1: corner not on face).
pub const CORNER_FACE_CORNERS: [[i8; FACES]; CHILDREN] = [
    [0, -1, 0, -1],
    [-1, 0, 1, -1],
    [1, -1, -1, 0],
    [-1, 1, -1, 1],
];

/// Coordinate axis running along each face.
pub const FACE_TANGENT_AXIS: [usize; FACES] = [1, 1, 0, 0];

/// Coordinate axis normal to each face.
pub const FACE_NORMAL_AXIS: [usize; FACES] = [0, 0, 1, 1];

/// Sign of the outward normal of each face.
pub const FACE_NORMAL_SIGN: [i8; FACES] = [-1, 1, -1, 1];

/// Position of `corner` on `face`, if the corner lies on it.
#[inline]
pub fn corner_position_on_face(corner: usize, face: usize) -> Option<usize> {
    usize::try_from(CORNER_FACE_CORNERS[corner][face]).ok()
}

/// The face at `corner` other than `face`.
#[inline]
pub fn other_corner_face(corner: usize, face: usize) -> usize {
    let [a, b] = CORNER_FACES[corner];
    if a == face { b } else { a }
}
