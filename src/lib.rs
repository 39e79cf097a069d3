#![cfg_attr(docsrs, feature(doc_cfg))]
//! # forest-connectivity
//!
//! forest-connectivity manages the coarse topology of a forest of quadtrees:
//! logical quadrilateral trees glued along faces and corners into an
//! arbitrary macro-mesh, including periodic and non-orientable gluings.
//!
//! ## Features
//! - A compact [`Connectivity`](topology::Connectivity) record with
//!   face codes, orientation bits and CSR corner incidences
//! - Structural validation and value equality
//! - Constant-time face transforms and corner neighbor queries
//! - A versioned little-endian binary format
//! - Canonical topologies: unit square, periodic and rotated wraps,
//!   a three-tree corner, a Möbius band and a six-tree star
//!
//! ## Invariant checking
//! Debug builds check the canonical constructors against the validator.
//! Enable `strict-invariants` or `check-invariants` to keep these checks in
//! release builds.
//!
//! ## Usage
//! ```
//! use forest_connectivity::prelude::*;
//!
//! let conn = Connectivity::moebius();
//! assert!(conn.is_valid());
//! let ft = conn.find_face_transform(4, 1).expect("interior face");
//! assert_eq!(ft.ntree, 0);
//! assert!(ft.orientation().is_reversed());
//! ```

pub mod connectivity_error;
pub mod debug_invariants;
pub mod io;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::connectivity_error::{ConnectivityError, PersistError};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::io::{ONDISK_FORMAT, load, save, try_load, try_save};
    pub use crate::topology::tables::{CHILDREN, FACES, FTRANSFORM, ROOT_LEN};
    pub use crate::topology::{
        Connectivity, CornerInfo, CornerTransform, EdgeFlip, FaceTransform, Orientation, TopIdx,
    };
}
