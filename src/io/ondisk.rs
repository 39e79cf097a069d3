//! Binary persistence of a [`Connectivity`].
//!
//! # Layout
//! All values little-endian, in this order:
//! - [`WireHeader`]: format version, `num_vertices`, `num_trees`,
//!   `num_corners`, `num_ctt`
//! - `vertices` as f64 triples (absent without vertices)
//! - `tree_to_vertex` as i32 (absent without vertices)
//! - `tree_to_tree` as i32, `tree_to_face` as i8
//! - `tree_to_corner`, `ctt_offset`, `corner_to_tree` as i32 and
//!   `corner_to_corner` as i8 (absent without corners)
//!
//! There is no format negotiation: files carrying another
//! [`ONDISK_FORMAT`] are rejected.
//!
//! # Failure policy
//! [`save`] and [`load`] treat every failure as unrecoverable: they log the
//! error and abort the process. A partially written file is not usable.
//! [`try_save`] and [`try_load`] return the same failures as [`PersistError`]
//! for callers that can handle them.

use std::path::Path;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::wire::{ONDISK_FORMAT, WireHeader};
use crate::connectivity_error::PersistError;
use crate::topology::connectivity::{Connectivity, TopIdx};
use crate::topology::tables::CHILDREN;

const VERTEX_BYTES: u64 = 3 * size_of::<f64>() as u64;
const IDX_BYTES: u64 = size_of::<TopIdx>() as u64;

/// Number of bytes following the header for the given counts.
fn payload_len(hdr: &WireHeader) -> Option<u64> {
    let nv = u64::try_from(hdr.num_vertices()).ok()?;
    let nt = u64::try_from(hdr.num_trees()).ok()?;
    let nc = u64::try_from(hdr.num_corners()).ok()?;
    let nctt = u64::try_from(hdr.num_ctt()).ok()?;
    let slots = nt.checked_mul(CHILDREN as u64)?;

    let mut len = slots.checked_mul(IDX_BYTES + 1)?;
    if nv > 0 {
        len = len
            .checked_add(nv.checked_mul(VERTEX_BYTES)?)?
            .checked_add(slots.checked_mul(IDX_BYTES)?)?;
    }
    if nc > 0 {
        len = len
            .checked_add(slots.checked_mul(IDX_BYTES)?)?
            .checked_add((nc + 1).checked_mul(IDX_BYTES)?)?
            .checked_add(nctt.checked_mul(IDX_BYTES + 1)?)?;
    }
    Some(len)
}

fn ensure(rd: &[u8], field: &'static str, needed: usize) -> Result<(), PersistError> {
    if rd.remaining() < needed {
        return Err(PersistError::Truncated {
            field,
            needed,
            remaining: rd.remaining(),
        });
    }
    Ok(())
}

fn get_idx(rd: &mut &[u8], field: &'static str, dst: &mut [TopIdx]) -> Result<(), PersistError> {
    ensure(rd, field, dst.len() * size_of::<TopIdx>())?;
    for v in dst {
        *v = rd.get_i32_le();
    }
    Ok(())
}

fn get_codes(rd: &mut &[u8], field: &'static str, dst: &mut [i8]) -> Result<(), PersistError> {
    ensure(rd, field, dst.len())?;
    for v in dst {
        *v = rd.get_i8();
    }
    Ok(())
}

fn put_idx(buf: &mut BytesMut, src: &[TopIdx]) {
    for &v in src {
        buf.put_i32_le(v);
    }
}

fn put_codes(buf: &mut BytesMut, src: &[i8]) {
    for &v in src {
        buf.put_i8(v);
    }
}

/// Serialize a connectivity into its on-disk byte representation.
pub fn encode(conn: &Connectivity) -> Bytes {
    let hdr = WireHeader::new(
        conn.num_vertices,
        conn.num_trees,
        conn.num_corners,
        conn.num_ctt(),
    );
    let len = payload_len(&hdr).unwrap_or(0) as usize;
    let mut buf = BytesMut::with_capacity(WireHeader::SIZE + len);
    buf.put_slice(hdr.as_bytes());
    for &x in conn.vertices.iter().flatten() {
        buf.put_f64_le(x);
    }
    put_idx(&mut buf, &conn.tree_to_vertex);
    put_idx(&mut buf, &conn.tree_to_tree);
    put_codes(&mut buf, &conn.tree_to_face);
    put_idx(&mut buf, &conn.tree_to_corner);
    put_idx(&mut buf, &conn.corners.ctt_offset);
    put_idx(&mut buf, &conn.corners.corner_to_tree);
    put_codes(&mut buf, &conn.corners.corner_to_corner);
    buf.freeze()
}

/// Deserialize a connectivity, returning it with the number of bytes consumed.
///
/// The input must hold exactly one connectivity and the result must validate.
pub fn decode(bytes: &[u8]) -> Result<(Connectivity, usize), PersistError> {
    let hdr = WireHeader::read(bytes).ok_or(PersistError::Truncated {
        field: "header",
        needed: WireHeader::SIZE,
        remaining: bytes.len(),
    })?;
    if hdr.format() != ONDISK_FORMAT {
        return Err(PersistError::FormatVersion {
            expected: ONDISK_FORMAT,
            found: hdr.format(),
        });
    }

    let mut rd = &bytes[WireHeader::SIZE..];
    // refuse to allocate for counts the input cannot hold
    match payload_len(&hdr).and_then(|n| usize::try_from(n).ok()) {
        Some(needed) if needed <= rd.len() => {}
        Some(needed) => {
            return Err(PersistError::Truncated {
                field: "arrays",
                needed,
                remaining: rd.len(),
            });
        }
        None => {
            // negative counts surface as InvalidCount, overflow as truncation
            Connectivity::new(
                hdr.num_vertices(),
                hdr.num_trees(),
                hdr.num_corners(),
                hdr.num_ctt(),
            )?;
            return Err(PersistError::Truncated {
                field: "arrays",
                needed: usize::MAX,
                remaining: rd.len(),
            });
        }
    }

    let mut conn = Connectivity::new(
        hdr.num_vertices(),
        hdr.num_trees(),
        hdr.num_corners(),
        hdr.num_ctt(),
    )?;

    ensure(rd, "vertices", conn.vertices.len() * VERTEX_BYTES as usize)?;
    for v in &mut conn.vertices {
        *v = [rd.get_f64_le(), rd.get_f64_le(), rd.get_f64_le()];
    }
    get_idx(&mut rd, "tree_to_vertex", &mut conn.tree_to_vertex)?;
    get_idx(&mut rd, "tree_to_tree", &mut conn.tree_to_tree)?;
    get_codes(&mut rd, "tree_to_face", &mut conn.tree_to_face)?;
    get_idx(&mut rd, "tree_to_corner", &mut conn.tree_to_corner)?;
    get_idx(&mut rd, "ctt_offset", &mut conn.corners.ctt_offset)?;
    get_idx(&mut rd, "corner_to_tree", &mut conn.corners.corner_to_tree)?;
    get_codes(&mut rd, "corner_to_corner", &mut conn.corners.corner_to_corner)?;

    if rd.has_remaining() {
        return Err(PersistError::TrailingBytes(rd.remaining()));
    }
    conn.validate()?;
    Ok((conn, bytes.len()))
}

/// Write `conn` to `path`, reporting failures to the caller.
///
/// The connectivity must be valid; an invalid one is refused before the file
/// is touched.
pub fn try_save(path: impl AsRef<Path>, conn: &Connectivity) -> Result<(), PersistError> {
    conn.validate()?;
    let bytes = encode(conn);
    std::fs::write(path.as_ref(), &bytes)?;
    log::debug!(
        "saved connectivity ({} trees) to {}: {} bytes",
        conn.num_trees,
        path.as_ref().display(),
        bytes.len()
    );
    Ok(())
}

/// Read a connectivity from `path`, with its size in bytes on disk.
pub fn try_load(path: impl AsRef<Path>) -> Result<(Connectivity, u64), PersistError> {
    let bytes = std::fs::read(path.as_ref())?;
    let (conn, len) = decode(&bytes)?;
    log::debug!(
        "loaded connectivity ({} trees) from {}: {len} bytes",
        conn.num_trees,
        path.as_ref().display()
    );
    Ok((conn, len as u64))
}

fn abort_on(action: &str, path: &Path, err: PersistError) -> ! {
    log::error!("{action} connectivity {}: {err}", path.display());
    eprintln!("fatal: {action} connectivity {}: {err}", path.display());
    std::process::abort()
}

/// Write `conn` to `path`.
///
/// Aborts the process on any failure; see the module docs.
pub fn save(path: impl AsRef<Path>, conn: &Connectivity) {
    if let Err(err) = try_save(path.as_ref(), conn) {
        abort_on("saving", path.as_ref(), err);
    }
}

/// Read a connectivity from `path`, with its size in bytes on disk.
///
/// Aborts the process on I/O errors, a format version mismatch, or data that
/// does not decode into a valid connectivity.
pub fn load(path: impl AsRef<Path>) -> (Connectivity, u64) {
    match try_load(path.as_ref()) {
        Ok(loaded) => loaded,
        Err(err) => abort_on("loading", path.as_ref(), err),
    }
}
