//! Fixed, versioned, little-endian header of the connectivity file format.

use bytemuck::{Pod, Zeroable};
use static_assertions::assert_eq_size;

use crate::topology::connectivity::TopIdx;

/// Bump whenever the on-disk layout or meaning of any field changes.
/// Readers reject every other value.
pub const ONDISK_FORMAT: u32 = 0x0200_0007;

/// All multi-byte integers are **little-endian** on disk.
/// We store them pre-LE with `.to_le()` and decode with `.from_le()`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct WireHeader {
    pub format_le: u32,
    pub num_vertices_le: i32,
    pub num_trees_le: i32,
    pub num_corners_le: i32,
    pub num_ctt_le: i32,
}

assert_eq_size!(WireHeader, [u8; 20]);

impl WireHeader {
    pub const SIZE: usize = size_of::<WireHeader>();

    pub fn new(num_vertices: TopIdx, num_trees: TopIdx, num_corners: TopIdx, num_ctt: TopIdx) -> Self {
        Self {
            format_le: ONDISK_FORMAT.to_le(),
            num_vertices_le: num_vertices.to_le(),
            num_trees_le: num_trees.to_le(),
            num_corners_le: num_corners.to_le(),
            num_ctt_le: num_ctt.to_le(),
        }
    }

    /// Read a header from the first [`WireHeader::SIZE`] bytes of `bytes`.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        bytes
            .get(..Self::SIZE)
            .map(bytemuck::pod_read_unaligned::<WireHeader>)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    pub fn format(&self) -> u32 {
        u32::from_le(self.format_le)
    }
    pub fn num_vertices(&self) -> TopIdx {
        i32::from_le(self.num_vertices_le)
    }
    pub fn num_trees(&self) -> TopIdx {
        i32::from_le(self.num_trees_le)
    }
    pub fn num_corners(&self) -> TopIdx {
        i32::from_le(self.num_corners_le)
    }
    pub fn num_ctt(&self) -> TopIdx {
        i32::from_le(self.num_ctt_le)
    }
}
