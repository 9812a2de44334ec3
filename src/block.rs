//! Per-block shuffle + split + entropy-code engine.
//! Corresponds to `blosc_c`/`blosc_d` in src/blosc.c.
//!
//! Unlike the original, there is no `tmp2` alignment scratch buffer:
//! that existed only to give an SSE2 unshuffle an aligned destination,
//! and this crate has no SIMD path (see the `shuffle` module).

use crate::codecs::EntropyCodec;
use crate::error::BloscError;
use crate::internal_codes::{MAX_SPLITS, MIN_BUFFERSIZE};
use crate::shuffle;

/// Shuffle (if requested) and entropy-code one block of `src`,
/// writing length-prefixed splits into `dest`. `tmp` is scratch space
/// at least `src.len()` bytes. Returns the number of bytes written to
/// `dest`, or `0` if the block doesn't fit/compress (caller should
/// store it raw), or an error if the codec reports one.
pub fn compress_block(
    codec: &dyn EntropyCodec,
    clevel: i32,
    typesize: usize,
    do_shuffle: bool,
    leftoverblock: bool,
    src: &[u8],
    dest: &mut [u8],
    tmp: &mut [u8],
) -> Result<usize, BloscError> {
    let blocksize = src.len();

    let shuffled: &[u8] = if do_shuffle && typesize > 1 {
        shuffle::shuffle(typesize, blocksize, src, &mut tmp[..blocksize]);
        &tmp[..blocksize]
    } else {
        src
    };

    let nsplits = if typesize > 0
        && typesize <= MAX_SPLITS
        && blocksize / typesize >= MIN_BUFFERSIZE
        && !leftoverblock
    {
        typesize
    } else {
        1
    };
    let neblock = blocksize / nsplits;

    let mut op = 0usize;

    for j in 0..nsplits {
        let chunk = &shuffled[j * neblock..(j + 1) * neblock];

        if op + 4 > dest.len() {
            return Ok(0);
        }
        let avail = dest.len() - op - 4;
        if avail < neblock {
            return Ok(0);
        }
        // Bound the codec's output one byte short of `neblock` so a
        // successful encode can never produce a `split_len` equal to
        // the raw-store sentinel.
        let maxout = neblock.saturating_sub(1);

        let mut cbytes = codec.encode(clevel, chunk, &mut dest[op + 4..op + 4 + maxout]);
        if cbytes < 0 {
            return Err(BloscError::from_code(cbytes));
        } else if cbytes == 0 || cbytes as usize >= neblock {
            dest[op + 4..op + 4 + neblock].copy_from_slice(chunk);
            cbytes = neblock as i32;
        }

        dest[op..op + 4].copy_from_slice(&(cbytes as u32).to_le_bytes());
        op += 4 + cbytes as usize;
    }

    Ok(op)
}

/// Inverse of [`compress_block`]: reads `nsplits` length-prefixed
/// entropy-coded (or raw-stored) splits from `src`, decodes each into
/// `tmp` (or directly into `dest` when unshuffled), then unshuffles
/// into `dest`. `dest.len()` is the block's original (pre-compression)
/// size. Returns the number of decompressed bytes, which must equal
/// `dest.len()`, or an error if a split is corrupt.
pub fn decompress_block(
    codec: &dyn EntropyCodec,
    typesize: usize,
    do_shuffle: bool,
    leftoverblock: bool,
    src: &[u8],
    dest: &mut [u8],
    tmp: &mut [u8],
) -> Result<usize, BloscError> {
    let blocksize = dest.len();
    let use_tmp = do_shuffle && typesize > 1;

    let nsplits = if typesize > 0
        && typesize <= MAX_SPLITS
        && blocksize / typesize >= MIN_BUFFERSIZE
        && !leftoverblock
    {
        typesize
    } else {
        1
    };
    let neblock = blocksize / nsplits;

    let mut ip = 0usize;
    let mut ntbytes = 0usize;

    for j in 0..nsplits {
        if ip + 4 > src.len() {
            return Err(BloscError::HeaderCorrupt {
                reason: "truncated split length prefix",
            });
        }
        let cbytes = u32::from_le_bytes(src[ip..ip + 4].try_into().unwrap()) as usize;
        ip += 4;
        if ip + cbytes > src.len() {
            return Err(BloscError::HeaderCorrupt {
                reason: "split length exceeds buffer",
            });
        }
        let piece = &src[ip..ip + cbytes];

        let nbytes = if use_tmp {
            let out = &mut tmp[j * neblock..(j + 1) * neblock];
            if cbytes == neblock {
                out.copy_from_slice(piece);
                neblock as i32
            } else {
                codec.decode(piece, out)
            }
        } else {
            let out = &mut dest[j * neblock..(j + 1) * neblock];
            if cbytes == neblock {
                out.copy_from_slice(piece);
                neblock as i32
            } else {
                codec.decode(piece, out)
            }
        };

        if nbytes < 0 {
            return Err(BloscError::from_code(nbytes));
        }
        if nbytes as usize != neblock {
            return Err(BloscError::CodecFailure {
                reason: "decoded split size mismatch",
            });
        }

        ip += cbytes;
        ntbytes += nbytes as usize;
    }

    if use_tmp {
        shuffle::unshuffle(typesize, blocksize, tmp, dest);
    }

    Ok(ntbytes)
}
