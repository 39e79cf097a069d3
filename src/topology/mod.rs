//! Top-level module for the inter-tree topology of a quadtree forest.
//!
//! It includes:
//! - fixed lookup tables for the corner/face numbering conventions
//! - the [`Connectivity`] record with its CSR corner incidences
//! - validation, equality and the canonical catalog
//! - face and corner transforms between neighboring trees
//!
//! Most users build a connectivity from the catalog or with
//! [`Connectivity::new`], check it with [`Connectivity::is_valid`], and then
//! query [`Connectivity::find_face_transform`] and
//! [`Connectivity::find_corner_transform`].

pub mod catalog;
pub mod connectivity;
pub mod corner_csr;
pub mod orientation;
pub mod tables;
pub mod transform;
pub mod validation;

pub use connectivity::{Connectivity, FaceNeighbor, TopIdx, destroy};
pub use corner_csr::{CornerIncidence, CornerTransform};
pub use orientation::{EdgeFlip, Orientation};
pub use transform::{CornerInfo, FaceTransform};

#[cfg(test)]
mod tests;
