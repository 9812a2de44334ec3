//! Blocksize policy. Corresponds to `compute_blocksize` in src/blosc.c.

use crate::internal_codes::{L1, MIN_BUFFERSIZE};

/// Compute the blocksize for a `(clevel, typesize, nbytes)` triple,
/// optionally overridden by a caller-forced value (`Context::set_blocksize`).
pub fn compute_blocksize(clevel: i32, typesize: usize, nbytes: usize, forced: usize) -> usize {
    let mut blocksize = nbytes;

    if forced != 0 {
        blocksize = forced.max(MIN_BUFFERSIZE);
    } else if nbytes >= L1 * typesize {
        blocksize = L1 * typesize;
        blocksize = match clevel {
            1 => blocksize / 8,
            2 | 3 => blocksize / 4,
            4..=6 => blocksize / 2,
            9 => blocksize * 2,
            _ => blocksize,
        };
    }

    if blocksize > nbytes {
        blocksize = nbytes;
    }
    if typesize > 0 {
        blocksize = blocksize / typesize * typesize;
    }
    blocksize
}
