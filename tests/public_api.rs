use forest_connectivity::prelude::*;
use forest_connectivity::topology::destroy;

/// Glue two trees side by side along tree 0 +x and tree 1 -x.
fn two_by_one() -> Connectivity {
    let vertices = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
        [2.0, 1.0, 0.0],
    ];
    Connectivity::new_copy(
        6,
        2,
        0,
        &vertices,
        &[0, 1, 3, 4, 1, 2, 4, 5],
        &[0, 1, 0, 0, 0, 1, 1, 1],
        &[0, 0, 2, 3, 1, 1, 2, 3],
        &[],
        &[],
        &[],
        &[],
    )
    .unwrap()
}

#[test]
fn build_validate_and_query() {
    let conn = two_by_one();
    assert!(conn.is_valid());
    assert_eq!(conn.num_ctt(), 0);

    let ft = conn.find_face_transform(0, 1).unwrap();
    assert_eq!(ft.ntree, 1);
    assert_eq!(ft.ftransform, [1, 0, 0, 1, 0, 0, 0, 0, 2]);
    assert!(conn.find_face_transform(0, 0).is_none());

    let mut raw = [0; FTRANSFORM];
    assert_eq!(conn.find_face_transform_raw(1, 0, &mut raw), 0);
    assert_eq!(raw, [1, 0, 0, 1, 0, 0, 0, 0, 1]);

    let mut info = CornerInfo::new();
    conn.find_corner_transform(0, 3, &mut info);
    assert_eq!(info.transforms, vec![CornerTransform { ntree: 1, ncorner: 2 }]);
    conn.find_corner_transform(1, 1, &mut info);
    assert!(info.is_empty());

    destroy(Some(conn));
    destroy(None);
}

#[test]
fn interior_point_crosses_into_the_neighbor() {
    let conn = two_by_one();
    let ft = conn.find_face_transform(0, 1).unwrap();
    assert_eq!(ft.transform_point([ROOT_LEN + 5, 7]), [5, 7]);
}

#[test]
fn validation_errors_are_descriptive() {
    let mut conn = two_by_one();
    conn.tree_to_face[4] = 5;
    let err = conn.validate().unwrap_err();
    assert!(matches!(err, ConnectivityError::FaceAsymmetry { tree: 0, face: 1, .. }));
    assert!(!err.to_string().is_empty());
}

#[test]
fn debug_invariants_agree_with_validate() {
    for (_, conn) in Connectivity::catalog() {
        assert_eq!(conn.validate_invariants(), conn.validate());
    }
}
