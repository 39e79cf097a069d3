//! Canonical connectivities.
//!
//! Each constructor returns a fully populated, valid record for a fixed
//! topology. They double as regression fixtures.
//!
//! | constructor | vertices | trees | corners | incidences |
//! |-------------|---------:|------:|--------:|-----------:|
//! | [`unitsquare`](Connectivity::unitsquare) | 4 | 1 | 0 | 0 |
//! | [`periodic`](Connectivity::periodic) | 4 | 1 | 1 | 4 |
//! | [`rotwrap`](Connectivity::rotwrap) | 4 | 1 | 1 | 4 |
//! | [`corner`](Connectivity::corner) | 7 | 3 | 1 | 3 |
//! | [`moebius`](Connectivity::moebius) | 10 | 5 | 2 | 4 |
//! | [`star`](Connectivity::star) | 13 | 6 | 1 | 6 |

use super::connectivity::{Connectivity, TopIdx};
use super::corner_csr::CornerIncidence;
#[allow(unused_imports)]
use crate::debug_invariants::DebugInvariants;

const UNIT_SQUARE_VERTICES: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
];

/// Build a record from literal tables known to be consistent.
#[allow(clippy::too_many_arguments)]
fn assemble(
    vertices: &[[f64; 3]],
    tree_to_vertex: &[TopIdx],
    tree_to_tree: &[TopIdx],
    tree_to_face: &[i8],
    tree_to_corner: &[TopIdx],
    ctt_offset: &[TopIdx],
    corner_to_tree: &[TopIdx],
    corner_to_corner: &[i8],
) -> Connectivity {
    let conn = Connectivity {
        num_vertices: vertices.len() as TopIdx,
        num_trees: (tree_to_tree.len() / 4) as TopIdx,
        num_corners: ctt_offset.len().saturating_sub(1) as TopIdx,
        vertices: vertices.to_vec(),
        tree_to_vertex: tree_to_vertex.to_vec(),
        tree_to_tree: tree_to_tree.to_vec(),
        tree_to_face: tree_to_face.to_vec(),
        tree_to_corner: tree_to_corner.to_vec(),
        corners: CornerIncidence {
            ctt_offset: ctt_offset.to_vec(),
            corner_to_tree: corner_to_tree.to_vec(),
            corner_to_corner: corner_to_corner.to_vec(),
        },
    };
    crate::debug_invariants!(conn.validate_invariants(), "canonical connectivity");
    conn
}

impl Connectivity {
    /// The unit square: one tree, every face on the boundary.
    pub fn unitsquare() -> Self {
        assemble(
            &UNIT_SQUARE_VERTICES,
            &[0, 1, 2, 3],
            &[0, 0, 0, 0],
            &[0, 1, 2, 3],
            &[],
            &[],
            &[],
            &[],
        )
    }

    /// The all-periodic unit square (a torus): −x meets +x and −y meets +y.
    pub fn periodic() -> Self {
        assemble(
            &UNIT_SQUARE_VERTICES,
            &[0, 1, 2, 3],
            &[0, 0, 0, 0],
            &[1, 0, 3, 2],
            &[0, 0, 0, 0],
            &[0, 4],
            &[0, 0, 0, 0],
            &[0, 1, 2, 3],
        )
    }

    /// A periodic unit square where −x meets +x directly and −y meets +y
    /// reversed.
    pub fn rotwrap() -> Self {
        assemble(
            &UNIT_SQUARE_VERTICES,
            &[0, 1, 2, 3],
            &[0, 0, 0, 0],
            &[1, 0, 7, 6],
            &[0, 0, 0, 0],
            &[0, 4],
            &[0, 0, 0, 0],
            &[0, 1, 2, 3],
        )
    }

    /// Three trees around a corner, laid out on the faces of a cube corner.
    /// Every pair of trees shares a face; corner 0 of each tree is the
    /// common corner.
    pub fn corner() -> Self {
        assemble(
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
                [0.0, 1.0, 1.0],
            ],
            &[0, 1, 2, 3, 0, 2, 4, 6, 0, 4, 1, 5],
            &[1, 0, 2, 0, 2, 1, 0, 1, 0, 2, 1, 2],
            &[2, 1, 0, 3, 2, 1, 0, 3, 2, 1, 0, 3],
            &[0, -1, -1, -1, 0, -1, -1, -1, 0, -1, -1, -1],
            &[0, 3],
            &[0, 1, 2],
            &[0, 0, 0],
        )
    }

    /// A five-tree Möbius band.
    ///
    /// Tree `i` meets tree `i + 1` across its +x face; the last gluing, from
    /// tree 4 back to tree 0, is reversed. The two corners on that seam are
    /// registered.
    pub fn moebius() -> Self {
        assemble(
            &[
                [0.75, 0.0, 0.0],
                [0.246516994374947, 0.7587012952217, -0.146946313073118],
                [-0.746516994374947, 0.542376344292138, -0.237764129073788],
                [-0.871516994374948, -0.633194160292808, -0.237764129073788],
                [0.371516994374947, -1.143411737368607, -0.146946313073118],
                [1.25, 0.0, 0.0],
                [0.371516994374947, 1.143411737368607, 0.146946313073118],
                [-0.871516994374947, 0.633194160292808, 0.237764129073788],
                [-0.746516994374948, -0.542376344292138, 0.237764129073788],
                [0.246516994374947, -0.7587012952217, 0.146946313073118],
            ],
            &[
                0, 1, 5, 6, //
                1, 2, 6, 7, //
                2, 3, 7, 8, //
                3, 4, 8, 9, //
                4, 5, 9, 0,
            ],
            &[
                4, 1, 0, 0, //
                0, 2, 1, 1, //
                1, 3, 2, 2, //
                2, 4, 3, 3, //
                3, 0, 4, 4,
            ],
            &[
                5, 0, 2, 3, //
                1, 0, 2, 3, //
                1, 0, 2, 3, //
                1, 0, 2, 3, //
                1, 4, 2, 3,
            ],
            &[
                0, -1, 1, -1, //
                -1, -1, -1, -1, //
                -1, -1, -1, -1, //
                -1, -1, -1, -1, //
                -1, 1, -1, 0,
            ],
            &[0, 2, 4],
            &[0, 4, 0, 4],
            &[0, 3, 2, 1],
        )
    }

    /// Six trees around one center corner (corner 0 of every tree).
    pub fn star() -> Self {
        assemble(
            &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.5, 0.866025403784439, 0.0],
                [-0.5, 0.866025403784439, 0.0],
                [-1.0, 0.0, 0.0],
                [-0.5, -0.866025403784439, 0.0],
                [0.5, -0.866025403784439, 0.0],
                [1.5, 0.866025403784439, 0.0],
                [0.0, 1.732050807568877, 0.0],
                [-1.5, 0.866025403784439, 0.0],
                [-1.5, -0.866025403784439, 0.0],
                [0.0, -1.732050807568877, 0.0],
                [1.5, -0.866025403784439, 0.0],
            ],
            &[
                0, 1, 2, 7, //
                0, 2, 3, 8, //
                0, 3, 4, 9, //
                0, 4, 5, 10, //
                0, 5, 6, 11, //
                0, 6, 1, 12,
            ],
            &[
                1, 0, 5, 0, //
                2, 1, 0, 1, //
                3, 2, 1, 2, //
                4, 3, 2, 3, //
                5, 4, 3, 4, //
                0, 5, 4, 5,
            ],
            &[
                2, 1, 0, 3, //
                2, 1, 0, 3, //
                2, 1, 0, 3, //
                2, 1, 0, 3, //
                2, 1, 0, 3, //
                2, 1, 0, 3,
            ],
            &[
                0, -1, -1, -1, //
                0, -1, -1, -1, //
                0, -1, -1, -1, //
                0, -1, -1, -1, //
                0, -1, -1, -1, //
                0, -1, -1, -1,
            ],
            &[0, 6],
            &[0, 1, 2, 3, 4, 5],
            &[0, 0, 0, 0, 0, 0],
        )
    }

    /// Every canonical connectivity with its name.
    pub fn catalog() -> Vec<(&'static str, Self)> {
        vec![
            ("unitsquare", Self::unitsquare()),
            ("periodic", Self::periodic()),
            ("rotwrap", Self::rotwrap()),
            ("corner", Self::corner()),
            ("moebius", Self::moebius()),
            ("star", Self::star()),
        ]
    }
}
