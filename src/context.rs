//! `Context`: an explicit engine object in place of the global mutable
//! state (`nthreads`, `force_blocksize`, a thread pool) that src/blosc.c
//! keeps at file scope.
//!
//! There is no persistent pool to initialize or tear down: each
//! `compress`/`decompress` call spins up its own `std::thread::scope`
//! workers (see `scheduler`), so `free_resources` is a no-op kept only
//! for API parity with the C original's `blosc_free_resources`.

use crate::blocking::compute_blocksize;
use crate::codecs::{self, BloscLz, EntropyCodec};
use crate::error::BloscError;
use crate::header::{patch_cbytes, read_bstart, read_header, write_bstart, write_header};
use crate::internal_codes::{HEADER_LENGTH, MAX_TYPESIZE, MIN_BUFFERSIZE};
use crate::scheduler::{compress_chunk, decompress_chunk, ChunkLayout};

/// An engine instance: thread count, forced blocksize and entropy
/// codec choice, all of which used to be process-wide globals.
pub struct Context {
    nthreads: usize,
    forced_blocksize: usize,
    codec: Box<dyn EntropyCodec + Send + Sync>,
    codec_name: &'static str,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Context {
            nthreads: 1,
            forced_blocksize: 0,
            codec: Box::new(BloscLz),
            codec_name: "blosclz",
        }
    }

    /// Build a `Context` honoring the `BLOCKLZ_CODEC` environment
    /// variable, falling back to blosclz when unset or unrecognized.
    pub fn from_env() -> Self {
        let mut ctx = Self::new();
        if let Ok(name) = std::env::var("BLOCKLZ_CODEC") {
            let _ = ctx.set_compressor(&name);
        }
        ctx
    }

    /// Set the number of worker threads used by subsequent calls.
    /// Returns the previous value.
    pub fn set_nthreads(&mut self, nthreads: usize) -> usize {
        let old = self.nthreads;
        self.nthreads = nthreads.max(1);
        old
    }

    pub fn nthreads(&self) -> usize {
        self.nthreads
    }

    /// Force a specific blocksize for subsequent compressions, or pass
    /// `0` to restore the automatic heuristic.
    pub fn set_blocksize(&mut self, size: usize) {
        self.forced_blocksize = size;
    }

    /// Select the entropy back end used by subsequent compressions
    /// and decompressions. Unknown names are rejected rather than
    /// silently ignored, unlike `from_env`'s lenient fallback.
    pub fn set_compressor(&mut self, name: &str) -> Result<(), BloscError> {
        let canonical = codecs::canonical_name(name).ok_or(BloscError::ParameterOutOfRange {
            what: "compressor name",
            value: 0,
        })?;
        self.codec = codecs::by_name(name).expect("canonical_name implies by_name succeeds");
        self.codec_name = canonical;
        Ok(())
    }

    /// The name of the entropy back end currently in use.
    pub fn get_compressor(&self) -> &'static str {
        self.codec_name
    }

    /// No persistent state to release; kept for API parity with the
    /// original's `blosc_free_resources`.
    pub fn free_resources(&mut self) {}

    /// Compress `src` into `dest`, returning the total chunk size
    /// (header + bstarts + payload), or `0` if `clevel == 0`, `src` is
    /// smaller than the minimum buffer size, or the data proved
    /// incompressible. In all three cases the caller is expected to
    /// store `src` verbatim.
    pub fn compress(
        &self,
        clevel: i32,
        shuffle: bool,
        typesize: usize,
        src: &[u8],
        dest: &mut [u8],
    ) -> Result<usize, BloscError> {
        if !(0..=9).contains(&clevel) {
            return Err(BloscError::ParameterOutOfRange {
                what: "clevel",
                value: clevel as i64,
            });
        }
        if clevel == 0 {
            return Ok(0);
        }

        let nbytes = src.len();
        if nbytes < MIN_BUFFERSIZE {
            return Ok(0);
        }

        let typesize = if typesize == 0 || typesize > MAX_TYPESIZE {
            1
        } else {
            typesize
        };

        let blocksize = compute_blocksize(clevel, typesize, nbytes, self.forced_blocksize);
        if blocksize == 0 {
            // typesize larger than nbytes rounds the block size down to
            // zero; nothing usable to split or shuffle, store raw.
            return Ok(0);
        }
        let layout = ChunkLayout::new(nbytes, blocksize);

        let header_len = HEADER_LENGTH + 4 * layout.nblocks;
        if dest.len() < header_len {
            return Err(BloscError::OutputTooSmall {
                needed: header_len,
                have: dest.len(),
            });
        }

        let outcome = compress_chunk(
            self.codec.as_ref(),
            clevel,
            typesize,
            shuffle,
            &layout,
            self.nthreads,
            src,
        )?;
        let Some((payload, bstarts)) = outcome else {
            return Ok(0);
        };

        let total = header_len + payload.len();
        if total >= nbytes || total > dest.len() {
            return Ok(0);
        }

        write_header(dest, typesize, shuffle, nbytes, blocksize);
        for (i, &offset) in bstarts.iter().enumerate() {
            write_bstart(dest, i, header_len + offset);
        }
        dest[header_len..total].copy_from_slice(&payload);
        patch_cbytes(dest, total);

        Ok(total)
    }

    /// Decompress a chunk produced by [`Context::compress`] into
    /// `dest`, which must be at least as large as the chunk's
    /// original (uncompressed) size.
    pub fn decompress(&self, src: &[u8], dest: &mut [u8]) -> Result<usize, BloscError> {
        let header = read_header(src).ok_or(BloscError::HeaderCorrupt {
            reason: "malformed or truncated chunk header",
        })?;
        if header.nbytes > dest.len() {
            return Err(BloscError::OutputTooSmall {
                needed: header.nbytes,
                have: dest.len(),
            });
        }

        let layout = ChunkLayout::new(header.nbytes, header.blocksize);
        let header_len = HEADER_LENGTH + 4 * layout.nblocks;
        if src.len() < header_len {
            return Err(BloscError::HeaderCorrupt {
                reason: "truncated bstarts table",
            });
        }
        if header.cbytes != 0 && src.len() < header.cbytes {
            return Err(BloscError::HeaderCorrupt {
                reason: "buffer shorter than cbytes claims",
            });
        }

        let bstarts: Vec<usize> = (0..layout.nblocks).map(|i| read_bstart(src, i)).collect();
        let cbytes_bound = if header.cbytes != 0 { header.cbytes } else { src.len() };
        for &b in &bstarts {
            if b > src.len() || b > cbytes_bound {
                return Err(BloscError::HeaderCorrupt {
                    reason: "bstarts entry out of range",
                });
            }
        }
        for w in bstarts.windows(2) {
            if w[0] > w[1] {
                return Err(BloscError::HeaderCorrupt {
                    reason: "bstarts entries are not non-decreasing",
                });
            }
        }

        let dest_slice = &mut dest[..header.nbytes];
        decompress_chunk(
            self.codec.as_ref(),
            header.typesize,
            header.shuffled(),
            &layout,
            self.nthreads,
            src,
            &bstarts,
            dest_slice,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_compressor_is_blosclz() {
        let ctx = Context::new();
        assert_eq!(ctx.get_compressor(), "blosclz");
    }

    #[test]
    fn set_compressor_rejects_unknown_names() {
        let mut ctx = Context::new();
        let err = ctx.set_compressor("not-a-real-codec").unwrap_err();
        assert!(matches!(err, BloscError::ParameterOutOfRange { .. }));
        assert_eq!(ctx.get_compressor(), "blosclz");
    }

    #[test]
    fn env_override_is_case_insensitive() {
        // BloscLz is always available, so this only checks that a
        // differently-cased name for the default codec still resolves.
        let mut ctx = Context::new();
        assert!(ctx.set_compressor("BLOSCLZ").is_ok());
        assert_eq!(ctx.get_compressor(), "blosclz");
    }

    #[test]
    fn round_trips_with_default_context() {
        let ctx = Context::new();
        let src: Vec<u8> = (0..200_000u32).map(|i| (i % 250) as u8).collect();
        let mut compressed = vec![0u8; src.len() + 4096];
        let cbytes = ctx.compress(5, true, 4, &src, &mut compressed).unwrap();
        assert!(cbytes > 0 && cbytes < src.len());

        let mut out = vec![0u8; src.len()];
        let nbytes = ctx.decompress(&compressed[..cbytes], &mut out).unwrap();
        assert_eq!(nbytes, src.len());
        assert_eq!(out, src);
    }

    #[test]
    fn typesize_larger_than_nbytes_is_reported_incompressible() {
        // typesize=200, nbytes=150: rounding the block size down to a
        // multiple of typesize would otherwise yield zero.
        let ctx = Context::new();
        let src = vec![7u8; 150];
        let mut dest = vec![0u8; 256];
        assert_eq!(ctx.compress(5, true, 200, &src, &mut dest).unwrap(), 0);
    }

    #[test]
    fn tiny_buffer_is_reported_incompressible() {
        let ctx = Context::new();
        let src = vec![1u8, 2, 3, 4];
        let mut dest = vec![0u8; 64];
        assert_eq!(ctx.compress(5, true, 4, &src, &mut dest).unwrap(), 0);
    }

    #[test]
    fn clevel_zero_means_store_verbatim() {
        let ctx = Context::new();
        let src = vec![7u8; 10_000];
        let mut dest = vec![0u8; 20_000];
        assert_eq!(ctx.compress(0, true, 4, &src, &mut dest).unwrap(), 0);
    }

    #[test]
    fn rejects_out_of_range_clevel() {
        let ctx = Context::new();
        let src = vec![7u8; 10_000];
        let mut dest = vec![0u8; 20_000];
        let err = ctx.compress(10, true, 4, &src, &mut dest).unwrap_err();
        assert!(matches!(err, BloscError::ParameterOutOfRange { .. }));
    }

    #[test]
    fn decompress_rejects_corrupt_header() {
        let ctx = Context::new();
        let mut out = vec![0u8; 64];
        let err = ctx.decompress(&[0xFF; 4], &mut out).unwrap_err();
        assert!(matches!(err, BloscError::HeaderCorrupt { .. }));
    }

    #[test]
    fn forced_nthreads_does_not_affect_result() {
        let mut ctx = Context::new();
        let src: Vec<u8> = (0..300_000u32).map(|i| (i * 7 % 256) as u8).collect();
        let mut compressed = vec![0u8; src.len() + 4096];

        ctx.set_nthreads(4);
        let cbytes = ctx.compress(6, true, 8, &src, &mut compressed).unwrap();
        let mut out = vec![0u8; src.len()];
        ctx.decompress(&compressed[..cbytes], &mut out).unwrap();
        assert_eq!(out, src);
    }
}
