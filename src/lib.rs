//! A block-oriented compressor: a byte-shuffle filter over a fast
//! LZ77 entropy back end, with a self-describing chunk header and a
//! scoped-thread worker pool.
//!
//! This crate is a from-scratch reimplementation of the ideas in
//! c-blosc, following that project's module layout (header, blocking
//! policy, shuffle filter, entropy codec, scheduler) and idioms.
//!
//! ```
//! let src = vec![0u8; 1 << 16];
//! let mut compressed = vec![0u8; src.len() + 1024];
//! let cbytes = blocklz::compress(5, true, 4, &src, &mut compressed).unwrap();
//! let mut decompressed = vec![0u8; src.len()];
//! blocklz::decompress(&compressed[..cbytes.max(1)], &mut decompressed).unwrap();
//! ```

pub mod block;
pub mod blocking;
pub mod codecs;
pub mod context;
pub mod error;
pub mod header;
pub mod internal_codes;
pub mod memcpy;
pub mod scheduler;
pub mod shuffle;

pub use context::Context;
pub use error::BloscError;
pub use header::{cbuffer_metainfo, cbuffer_sizes, cbuffer_versions};

use std::sync::{Mutex, OnceLock};

/// Per-process default context backing the free functions below,
/// mirroring src/blosc.c's global `g_nthreads`/`g_force_blocksize`
/// state but behind a `Mutex` instead of bare statics.
fn default_context() -> &'static Mutex<Context> {
    static CTX: OnceLock<Mutex<Context>> = OnceLock::new();
    CTX.get_or_init(|| Mutex::new(Context::from_env()))
}

/// Compress `src` into `dest` using the process-wide default context.
/// Returns the chunk's total size, or `0` if the caller should store
/// `src` verbatim (see [`Context::compress`]).
pub fn compress(
    clevel: i32,
    shuffle: bool,
    typesize: usize,
    src: &[u8],
    dest: &mut [u8],
) -> Result<usize, BloscError> {
    default_context().lock().unwrap().compress(clevel, shuffle, typesize, src, dest)
}

/// Decompress a chunk produced by [`compress`] into `dest`.
pub fn decompress(src: &[u8], dest: &mut [u8]) -> Result<usize, BloscError> {
    default_context().lock().unwrap().decompress(src, dest)
}

/// Set the default context's worker thread count. Returns the
/// previous value.
pub fn set_nthreads(nthreads: usize) -> usize {
    default_context().lock().unwrap().set_nthreads(nthreads)
}

/// Force the default context's blocksize, or pass `0` to restore the
/// automatic heuristic.
pub fn set_blocksize(size: usize) {
    default_context().lock().unwrap().set_blocksize(size);
}

/// Select the default context's entropy back end by name; see
/// [`Context::set_compressor`] for accepted names.
pub fn set_compressor(name: &str) -> Result<(), BloscError> {
    default_context().lock().unwrap().set_compressor(name)
}

/// The name of the default context's current entropy back end.
pub fn get_compressor() -> &'static str {
    default_context().lock().unwrap().get_compressor()
}

/// No persistent state to release; kept for API parity with the
/// original's `blosc_free_resources`.
pub fn free_resources() {
    default_context().lock().unwrap().free_resources();
}

/// No process-wide setup beyond the default context's lazy
/// initialization; kept for API parity with the original's
/// `blosc_init`.
pub fn init() {
    let _ = default_context();
}

/// Resets the default context to its defaults (1 thread, automatic
/// blocksize, `blosclz`); kept for API parity with the original's
/// `blosc_destroy`.
pub fn destroy() {
    *default_context().lock().unwrap() = Context::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_function_round_trip() {
        let src: Vec<u8> = (0..50_000u32).map(|i| (i % 200) as u8).collect();
        let mut compressed = vec![0u8; src.len() + 1024];
        let cbytes = compress(5, true, 4, &src, &mut compressed).unwrap();
        assert!(cbytes > 0);

        let mut out = vec![0u8; src.len()];
        let nbytes = decompress(&compressed[..cbytes], &mut out).unwrap();
        assert_eq!(nbytes, src.len());
        assert_eq!(out, src);
    }

    #[test]
    fn metainfo_helpers_agree_with_compress() {
        let src: Vec<u8> = (0..20_000u32).map(|i| (i % 97) as u8).collect();
        let mut compressed = vec![0u8; src.len() + 1024];
        let cbytes = compress(7, true, 8, &src, &mut compressed).unwrap();

        let (nbytes, cbytes_reported, _blocksize) =
            cbuffer_sizes(&compressed[..cbytes]).unwrap();
        assert_eq!(nbytes, src.len());
        assert_eq!(cbytes_reported, cbytes);

        let (typesize, shuffled) = cbuffer_metainfo(&compressed[..cbytes]).unwrap();
        assert_eq!(typesize, 8);
        assert!(shuffled);

        let (version, _version_lz) = cbuffer_versions(&compressed[..cbytes]).unwrap();
        assert_eq!(version, internal_codes::VERSION_FORMAT);
    }

    #[test]
    fn set_nthreads_returns_previous_value() {
        let prev = set_nthreads(3);
        let prev2 = set_nthreads(prev);
        assert_eq!(prev2, 3);
    }

    #[test]
    fn set_compressor_rejects_unknown_names_and_leaves_codec_unchanged() {
        let before = get_compressor();
        assert!(set_compressor("not-a-real-codec").is_err());
        assert_eq!(get_compressor(), before);
    }

    #[test]
    fn init_is_idempotent() {
        init();
        init();
    }
}
