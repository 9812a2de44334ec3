//! Entropy back-end interface and the default `blosclz` implementation.

pub mod blosclz;

#[cfg(feature = "lz4")]
pub mod lz4;
#[cfg(feature = "snappy")]
pub mod snappy;
#[cfg(feature = "zlib")]
pub mod zlib;
#[cfg(feature = "zstd-backend")]
pub mod zstd_backend;

/// A single-split entropy back end: LZ77-style compressor/decompressor
/// operating on one contiguous byte range, with no internal threading.
pub trait EntropyCodec {
    /// One-byte sub-format version written into the header's
    /// `version_lz` field.
    fn version(&self) -> u8;

    /// Compress `input` into `output`. Returns the number of bytes
    /// written, `0` if the codec gave up (caller should store raw),
    /// or a negative code on error.
    fn encode(&self, clevel: i32, input: &[u8], output: &mut [u8]) -> i32;

    /// Decompress `input` into `output`. Returns the number of bytes
    /// written, `0` on corrupt input, or a negative code on error.
    fn decode(&self, input: &[u8], output: &mut [u8]) -> i32;
}

/// The default entropy back end used by the block engine.
pub struct BloscLz;

impl EntropyCodec for BloscLz {
    fn version(&self) -> u8 {
        crate::internal_codes::BLOSCLZ_VERSION_FORMAT
    }

    fn encode(&self, clevel: i32, input: &[u8], output: &mut [u8]) -> i32 {
        blosclz::compress(clevel, input, output)
    }

    fn decode(&self, input: &[u8], output: &mut [u8]) -> i32 {
        blosclz::decompress(input, output)
    }
}

/// Resolve a codec by name for [`crate::Context::from_env`]
/// (`BLOCKLZ_CODEC`). Unknown names fall back to `None` so the
/// caller keeps its current codec. Matching is case-insensitive.
pub fn by_name(name: &str) -> Option<Box<dyn EntropyCodec + Send + Sync>> {
    match name.to_ascii_lowercase().as_str() {
        "blosclz" => Some(Box::new(BloscLz)),
        #[cfg(feature = "lz4")]
        "lz4" => Some(Box::new(lz4::Lz4)),
        #[cfg(feature = "zstd-backend")]
        "zstd" => Some(Box::new(zstd_backend::Zstd)),
        #[cfg(feature = "zlib")]
        "zlib" => Some(Box::new(zlib::Zlib)),
        #[cfg(feature = "snappy")]
        "snappy" => Some(Box::new(snappy::Snappy)),
        _ => None,
    }
}

/// The canonical (lowercase, `'static`) name for a codec name accepted
/// by [`by_name`], for [`crate::Context::get_compressor`] to report
/// back without allocating.
pub fn canonical_name(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "blosclz" => Some("blosclz"),
        #[cfg(feature = "lz4")]
        "lz4" => Some("lz4"),
        #[cfg(feature = "zstd-backend")]
        "zstd" => Some("zstd"),
        #[cfg(feature = "zlib")]
        "zlib" => Some("zlib"),
        #[cfg(feature = "snappy")]
        "snappy" => Some("snappy"),
        _ => None,
    }
}
