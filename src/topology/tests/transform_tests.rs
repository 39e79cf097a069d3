use proptest::prelude::*;

use crate::topology::connectivity::{Connectivity, TopIdx};
use crate::topology::corner_csr::CornerTransform;
use crate::topology::orientation::{EdgeFlip, Orientation, compose_all};
use crate::topology::tables::{CHILDREN, FACE_DUAL, FACES, FTRANSFORM, ROOT_LEN};
use crate::topology::transform::CornerInfo;

fn ct(ntree: TopIdx, ncorner: i8) -> CornerTransform {
    CornerTransform { ntree, ncorner }
}

#[test]
fn unitsquare_has_no_face_neighbors() {
    let conn = Connectivity::unitsquare();
    let mut ftransform = [0; FTRANSFORM];
    for face in 0..FACES {
        assert_eq!(conn.find_face_transform(0, face), None);
        assert_eq!(conn.find_face_transform_raw(0, face, &mut ftransform), -1);
    }
}

#[test]
fn periodic_faces_wrap_to_the_same_tree() {
    for conn in [Connectivity::periodic(), Connectivity::rotwrap()] {
        for face in 0..FACES {
            let ft = conn.find_face_transform(0, face).unwrap();
            assert_eq!(ft.ntree, 0);
            assert_eq!(ft.origin_axes(), ft.target_axes());
        }
    }
}

#[test]
fn face_transforms_are_symmetric() {
    for (name, conn) in Connectivity::catalog() {
        for tree in 0..conn.num_trees {
            for face in 0..FACES {
                let Some(ft) = conn.find_face_transform(tree, face) else {
                    assert!(conn.is_boundary_face(tree, face));
                    continue;
                };
                let n = conn.face_neighbor(tree, face);
                let back = conn
                    .find_face_transform(ft.ntree, n.nface)
                    .unwrap_or_else(|| panic!("{name}: tree {tree} face {face} has no way back"));
                assert_eq!(back.ntree, tree, "{name}");
                assert_eq!(conn.face_neighbor(ft.ntree, n.nface).nface, face, "{name}");
                assert_eq!(&back.ftransform[0..3], &ft.ftransform[3..6], "{name}");
                assert_eq!(&back.ftransform[3..6], &ft.ftransform[0..3], "{name}");
                assert_eq!(back.ftransform[6], ft.ftransform[6], "{name}");
                assert_eq!(back, ft.inverse(tree), "{name}");
            }
        }
    }
}

#[test]
fn reversal_flag_is_the_orientation_bit_and_reserved_slots_are_zero() {
    for (_, conn) in Connectivity::catalog() {
        for tree in 0..conn.num_trees {
            for face in 0..FACES {
                if let Some(ft) = conn.find_face_transform(tree, face) {
                    let n = conn.face_neighbor(tree, face);
                    assert_eq!(ft.ftransform[6], i32::from(n.orientation.code()));
                    assert_eq!(ft.orientation(), n.orientation);
                    assert_eq!([ft.ftransform[1], ft.ftransform[4], ft.ftransform[7]], [0, 0, 0]);
                    assert_eq!(ft.face_code(), (2 * (face % 2) + n.nface % 2) as i32);
                }
            }
        }
    }
}

#[test]
fn star_corner_paths_agree() {
    let conn = Connectivity::star();
    for tree in 0..conn.num_trees {
        let mut registered = Vec::new();
        let mut walked = Vec::new();
        assert!(conn.corner_neighbors_registered(tree, 0, &mut registered));
        conn.corner_neighbors_by_faces(tree, 0, &mut walked);
        assert_eq!(registered, walked);
        assert_eq!(registered.len(), 5);
        assert!(!registered.contains(&ct(tree, 0)));
    }
}

#[test]
fn moebius_corner_paths_agree() {
    let conn = Connectivity::moebius();
    let mut info = CornerInfo::new();
    conn.find_corner_transform(0, 0, &mut info);
    assert_eq!(info.transforms, vec![ct(4, 3)]);
    conn.find_corner_transform(4, 1, &mut info);
    assert_eq!(info.transforms, vec![ct(0, 2)]);

    for k in 0..conn.num_corners as usize {
        for inc in conn.corner_incidences(k) {
            let mut registered = Vec::new();
            let mut walked = Vec::new();
            assert!(conn.corner_neighbors_registered(inc.ntree, inc.ncorner as usize, &mut registered));
            conn.corner_neighbors_by_faces(inc.ntree, inc.ncorner as usize, &mut walked);
            assert_eq!(registered, walked);
        }
    }
}

#[test]
fn registered_corners_agree_with_face_walk_everywhere() {
    for (name, conn) in Connectivity::catalog() {
        for tree in 0..conn.num_trees {
            for corner in 0..CHILDREN {
                let mut registered = Vec::new();
                if !conn.corner_neighbors_registered(tree, corner, &mut registered) {
                    continue;
                }
                let mut walked = Vec::new();
                conn.corner_neighbors_by_faces(tree, corner, &mut walked);
                assert_eq!(registered, walked, "{name} tree {tree} corner {corner}");
            }
        }
    }
}

#[test]
fn face_walk_matches_shared_vertices() {
    // with distinct vertex ids per physical point, the walk must find exactly
    // the tree corners carrying the same vertex
    for conn in [
        Connectivity::corner(),
        Connectivity::moebius(),
        Connectivity::star(),
    ] {
        let mut info = CornerInfo::new();
        for tree in 0..conn.num_trees {
            let verts = conn.tree_vertices(tree).unwrap();
            for corner in 0..CHILDREN {
                conn.find_corner_transform(tree, corner, &mut info);
                let mut expected = Vec::new();
                for t in 0..conn.num_trees {
                    for (c, &v) in conn.tree_vertices(t).unwrap().iter().enumerate() {
                        if v == verts[corner] && (t, c) != (tree, corner) {
                            expected.push(ct(t, c as i8));
                        }
                    }
                }
                assert_eq!(info.transforms, expected, "tree {tree} corner {corner}");
            }
        }
    }
}

#[test]
fn periodic_square_meets_itself_at_one_corner() {
    for conn in [Connectivity::periodic(), Connectivity::rotwrap()] {
        let mut info = CornerInfo::new();
        for corner in 0..CHILDREN {
            let mut walked = Vec::new();
            conn.corner_neighbors_by_faces(0, corner, &mut walked);
            conn.find_corner_transform(0, corner, &mut info);
            assert_eq!(info.transforms, walked);
            assert_eq!(walked.len(), 3);
        }
    }
}

#[test]
fn corner_without_registration_uses_faces() {
    let conn = Connectivity::corner();
    let mut info = CornerInfo::new();
    // far end of the edge shared by trees 0 and 2
    conn.find_corner_transform(0, 1, &mut info);
    assert_eq!(info.icorner, 1);
    assert_eq!(info.transforms, vec![ct(2, 2)]);
    // opposite corner of tree 0 touches nothing
    conn.find_corner_transform(0, 3, &mut info);
    assert!(info.is_empty());
}

/// Walk once around the band through the +x faces, tracking a point.
fn walk_band(conn: &Connectivity, mut point: [i32; 2], laps: usize) -> ([i32; 2], Vec<EdgeFlip>) {
    let mut flips = Vec::new();
    let (mut tree, mut face) = (0, 1);
    for _ in 0..laps * conn.num_trees as usize {
        let ft = conn.find_face_transform(tree, face).unwrap();
        flips.push(ft.orientation());
        point = ft.transform_point(point);
        let entry = conn.face_neighbor(tree, face).nface;
        tree = ft.ntree;
        face = FACE_DUAL[entry];
        // move to the face we leave through
        point[0] = if face == 1 { ROOT_LEN } else { 0 };
    }
    assert_eq!(tree, 0);
    (point, flips)
}

#[test]
fn moebius_lap_flips_an_odd_number_of_times() {
    let conn = Connectivity::moebius();
    let y = ROOT_LEN / 4;
    let (p1, flips1) = walk_band(&conn, [ROOT_LEN, y], 1);
    let reversed = flips1.iter().filter(|f| f.is_reversed()).count();
    assert_eq!(reversed % 2, 1);
    assert_eq!(compose_all::<EdgeFlip, _>(flips1.iter().copied()), EdgeFlip::REVERSED);
    // one lap mirrors the strip
    assert_eq!(p1, [ROOT_LEN, ROOT_LEN - y]);

    let (p2, flips2) = walk_band(&conn, [ROOT_LEN, y], 2);
    let total = compose_all::<EdgeFlip, _>(flips2.iter().copied());
    assert_eq!(total, EdgeFlip::compose(EdgeFlip::REVERSED, EdgeFlip::REVERSED));
    assert_eq!(p2, [ROOT_LEN, y]);
}

proptest! {
    #[test]
    fn face_points_cross_and_return(
        fixture in 0usize..6,
        tree_sel in 0i32..6,
        face in 0usize..FACES,
        along in 0i32..=ROOT_LEN,
        depth in 0i32..ROOT_LEN,
    ) {
        let (_, conn) = Connectivity::catalog().swap_remove(fixture);
        let tree = tree_sel % conn.num_trees;
        if let Some(ft) = conn.find_face_transform(tree, face) {
            let n = conn.face_neighbor(tree, face);
            let back = conn.find_face_transform(ft.ntree, n.nface).unwrap();
            // a point `depth` beyond the origin face, at `along` on its tangent
            let (t_axis, n_axis) = ft.origin_axes();
            let mut p = [0; 2];
            p[t_axis] = along;
            p[n_axis] = if face % 2 == 1 { ROOT_LEN + depth } else { -depth };
            let q = ft.transform_point(p);
            // inside the neighbor, `depth` away from its face
            let (_, nn_axis) = ft.target_axes();
            let expect_n = if n.nface % 2 == 1 { ROOT_LEN - depth } else { depth };
            prop_assert_eq!(q[nn_axis], expect_n);
            // mirror the depth to the outside of the neighbor and cross back
            let mut q_out = q;
            q_out[nn_axis] = if n.nface % 2 == 1 { ROOT_LEN + depth } else { -depth };
            let r = back.transform_point(q_out);
            let mut expected = p;
            expected[n_axis] = if face % 2 == 1 { ROOT_LEN - depth } else { depth };
            prop_assert_eq!(r, expected);
        }
    }
}
