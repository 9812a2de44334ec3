//! The 16-byte chunk header and the `bstarts` block-offset table.
//!
//! Layout (little-endian), corresponding to the non-extended v1 header
//! written by `blosc_compress` in src/blosc.c:
//!
//! ```text
//! offset  size  field
//! 0       1     version
//! 1       1     version_lz
//! 2       1     flags
//! 3       1     typesize (0 means 256, version 1 only)
//! 4       4     nbytes
//! 8       4     blocksize
//! 12      4     cbytes
//! 16      4*n   bstarts[nblocks]
//! ```

use crate::internal_codes::{FLAG_SHUFFLE, HEADER_LENGTH, VERSION_FORMAT};

/// A parsed chunk header, not including the `bstarts` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub version_lz: u8,
    pub flags: u8,
    pub typesize: usize,
    pub nbytes: usize,
    pub blocksize: usize,
    pub cbytes: usize,
}

impl Header {
    pub fn shuffled(&self) -> bool {
        self.flags & FLAG_SHUFFLE != 0
    }

    /// Number of full-size blocks plus a possible leftover block.
    pub fn nblocks(&self) -> usize {
        if self.blocksize == 0 {
            return 0;
        }
        let mut n = self.nbytes / self.blocksize;
        if self.nbytes % self.blocksize != 0 {
            n += 1;
        }
        n
    }

    pub fn leftover(&self) -> usize {
        if self.blocksize == 0 {
            0
        } else {
            self.nbytes % self.blocksize
        }
    }
}

/// Write the fixed header fields into `dest[0..16]`. Does not write
/// `bstarts`; callers fill that table in once block offsets are known.
pub fn write_header(
    dest: &mut [u8],
    typesize: usize,
    shuffle: bool,
    nbytes: usize,
    blocksize: usize,
) {
    debug_assert!(dest.len() >= HEADER_LENGTH);
    dest[0] = VERSION_FORMAT;
    dest[1] = crate::internal_codes::BLOSCLZ_VERSION_FORMAT;
    dest[2] = if shuffle { FLAG_SHUFFLE } else { 0 };
    dest[3] = if typesize >= 256 { 0 } else { typesize as u8 };
    dest[4..8].copy_from_slice(&(nbytes as u32).to_le_bytes());
    dest[8..12].copy_from_slice(&(blocksize as u32).to_le_bytes());
    // cbytes is patched in once the true compressed size is known.
    dest[12..16].copy_from_slice(&0u32.to_le_bytes());
}

pub fn patch_cbytes(dest: &mut [u8], cbytes: usize) {
    dest[12..16].copy_from_slice(&(cbytes as u32).to_le_bytes());
}

pub fn write_bstart(dest: &mut [u8], index: usize, offset: usize) {
    let at = HEADER_LENGTH + index * 4;
    dest[at..at + 4].copy_from_slice(&(offset as u32).to_le_bytes());
}

pub fn read_bstart(src: &[u8], index: usize) -> usize {
    let at = HEADER_LENGTH + index * 4;
    u32::from_le_bytes(src[at..at + 4].try_into().unwrap()) as usize
}

/// Parse the 16-byte fixed header. Returns `None` on a too-short or
/// structurally invalid buffer; callers turn that into `HeaderCorrupt`.
pub fn read_header(src: &[u8]) -> Option<Header> {
    if src.len() < HEADER_LENGTH {
        return None;
    }
    let version = src[0];
    let version_lz = src[1];
    let flags = src[2];
    let mut typesize = src[3] as usize;
    let nbytes = u32::from_le_bytes(src[4..8].try_into().unwrap()) as usize;
    let blocksize = u32::from_le_bytes(src[8..12].try_into().unwrap()) as usize;
    let cbytes = u32::from_le_bytes(src[12..16].try_into().unwrap()) as usize;

    if version == 0 || version > VERSION_FORMAT {
        return None;
    }
    if version == 1 && typesize == 0 {
        typesize = 256;
    }
    if cbytes != 0 && cbytes < HEADER_LENGTH {
        return None;
    }
    if nbytes > 0 && (blocksize == 0 || blocksize > nbytes) {
        return None;
    }

    Some(Header {
        version,
        version_lz,
        flags,
        typesize,
        nbytes,
        blocksize,
        cbytes,
    })
}

/// `(nbytes, cbytes, blocksize)`, corresponding to `blosc_cbuffer_sizes`.
pub fn cbuffer_sizes(cbuffer: &[u8]) -> Option<(usize, usize, usize)> {
    read_header(cbuffer).map(|h| (h.nbytes, h.cbytes, h.blocksize))
}

/// `(typesize, shuffled)`, corresponding to `blosc_cbuffer_metainfo`.
pub fn cbuffer_metainfo(cbuffer: &[u8]) -> Option<(usize, bool)> {
    read_header(cbuffer).map(|h| (h.typesize, h.shuffled()))
}

/// `(version, version_lz)`, corresponding to `blosc_cbuffer_versions`.
pub fn cbuffer_versions(cbuffer: &[u8]) -> Option<(u8, u8)> {
    read_header(cbuffer).map(|h| (h.version, h.version_lz))
}
