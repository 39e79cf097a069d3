//! Persistence of connectivities.
//!
//! [`ondisk`] implements the versioned binary file format on top of the
//! fixed little-endian header in [`wire`].

pub mod ondisk;
pub mod wire;

pub use ondisk::{decode, encode, load, save, try_load, try_save};
pub use wire::ONDISK_FORMAT;
