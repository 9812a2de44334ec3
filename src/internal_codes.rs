//! Wire-level constants shared by the header, block engine and codec.
//!
//! A trimmed-down version of the constants in src/blosc2.h and
//! src/blosc-export.h: just the values this crate's non-extended
//! v1-header format actually depends on, dropping the multi-codec
//! registry, bitshuffle/delta/trunc-prec flag bits, and schunk/frame
//! offsets that go with c-blosc2's extended header.

/// Format version for the 16-byte baseline header.
pub const VERSION_FORMAT: u8 = 1;

/// Entropy back-end sub-format version for blosclz.
pub const BLOSCLZ_VERSION_FORMAT: u8 = 1;

/// Header flag bit: the shuffle filter was applied to this buffer.
pub const FLAG_SHUFFLE: u8 = 0x1;

/// Fixed 16-byte header length.
pub const HEADER_LENGTH: usize = 16;

/// Caller-visible minimum buffer size worth attempting to compress.
pub const MIN_BUFFERSIZE: usize = 128;

/// Maximum typesize before a buffer is treated as an opaque byte stream.
pub const MAX_TYPESIZE: usize = 255;

/// Typesize threshold (inclusive) below which blocks may be split.
pub const MAX_SPLITS: usize = 16;

/// L1 cache size assumption driving the default blocksize.
pub const L1: usize = 32 * 1024;

/// Negative sentinel: generic engine failure.
pub const ERR_FAILURE: i32 = -1;
/// Negative sentinel: entropy decoder produced an unexpected byte count.
pub const ERR_CODEC_MISMATCH: i32 = -2;
/// Negative sentinel: destination capacity smaller than decompressed size.
pub const ERR_OUTPUT_TOO_SMALL: i32 = -5;
/// Negative sentinel: malformed header.
pub const ERR_INVALID_HEADER: i32 = -11;
/// Negative sentinel: invalid parameter supplied to a public entry point.
pub const ERR_INVALID_PARAM: i32 = -12;
