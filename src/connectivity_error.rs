//! Error types for forest-connectivity public APIs.
//!
//! [`ConnectivityError`] covers construction failures and structural
//! violations reported by the validator. [`PersistError`] covers the on-disk
//! codec; the aborting `save`/`load` entry points log it and stop the process,
//! the `try_*` variants hand it back to the caller.

use thiserror::Error;

use crate::topology::connectivity::TopIdx;

/// Construction and validation errors for a [`Connectivity`](crate::topology::Connectivity).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    /// A count passed to a constructor is negative or inconsistent.
    #[error("invalid count for `{what}`: {value}")]
    InvalidCount { what: &'static str, value: i64 },
    /// Memory for an array could not be reserved.
    #[error("allocation of {len} entries for `{field}` failed")]
    Allocation { field: &'static str, len: usize },
    /// An array length disagrees with the declared counts.
    #[error("array `{field}` has length {found}, expected {expected}")]
    ShapeMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    /// `tree_to_vertex` names a vertex outside `0..num_vertices`.
    #[error("tree {tree} corner {corner}: vertex index {vertex} out of range")]
    VertexOutOfRange {
        tree: TopIdx,
        corner: usize,
        vertex: TopIdx,
    },
    /// `tree_to_tree` names a tree outside `0..num_trees`.
    #[error("tree {tree} face {face}: neighbor tree {neighbor} out of range")]
    FaceTreeOutOfRange {
        tree: TopIdx,
        face: usize,
        neighbor: TopIdx,
    },
    /// `tree_to_face` holds a code outside `0..8`.
    #[error("tree {tree} face {face}: face code {code} out of range")]
    FaceCodeOutOfRange { tree: TopIdx, face: usize, code: i8 },
    /// A boundary face (self-reference onto the same face) carries orientation 1.
    #[error("tree {tree} face {face}: boundary face with reversed orientation")]
    BoundaryOrientation { tree: TopIdx, face: usize },
    /// The neighbor across a face does not point back with the same orientation.
    #[error("tree {tree} face {face}: neighbor {neighbor} face {neighbor_face} does not reciprocate")]
    FaceAsymmetry {
        tree: TopIdx,
        face: usize,
        neighbor: TopIdx,
        neighbor_face: usize,
    },
    /// `tree_to_corner` names a corner outside `0..num_corners` (other than -1).
    #[error("tree {tree} corner {corner}: corner index {index} out of range")]
    CornerIndexOutOfRange {
        tree: TopIdx,
        corner: usize,
        index: TopIdx,
    },
    /// `ctt_offset` does not start at zero, decreases, or disagrees with `num_ctt`.
    #[error("corner offsets malformed at corner {corner}")]
    CornerOffsets { corner: TopIdx },
    /// An incidence entry names a tree or tree corner out of range.
    #[error("corner {corner} incidence {slot}: tree {tree} corner {tree_corner} out of range")]
    IncidenceOutOfRange {
        corner: TopIdx,
        slot: usize,
        tree: TopIdx,
        tree_corner: i8,
    },
    /// An incidence entry disagrees with the tree's own `tree_to_corner` entry.
    #[error("corner {corner}: tree {tree} corner {tree_corner} records corner {recorded}")]
    IncidenceMismatch {
        corner: TopIdx,
        tree: TopIdx,
        tree_corner: i8,
        recorded: TopIdx,
    },
    /// A tree corner names a registered corner but is not listed exactly once there.
    #[error("tree {tree} corner {tree_corner} appears {found} times in corner {corner}")]
    IncidenceMissing {
        corner: TopIdx,
        tree: TopIdx,
        tree_corner: usize,
        found: usize,
    },
}

/// Errors of the binary persistence codec.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying file I/O failed.
    #[error("connectivity file I/O: {0}")]
    Io(#[from] std::io::Error),
    /// The file was written by an engine with a different on-disk format.
    #[error("on-disk format {found:#x} does not match expected {expected:#x}")]
    FormatVersion { expected: u32, found: u32 },
    /// Input ended before `field` could be read.
    #[error("truncated input while reading `{field}`: need {needed} bytes, have {remaining}")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },
    /// Bytes remain after the last array.
    #[error("{0} trailing bytes after connectivity data")]
    TrailingBytes(usize),
    /// The decoded counts or tables do not form a valid connectivity.
    #[error("decoded connectivity is invalid: {0}")]
    Invalid(#[from] ConnectivityError),
}
