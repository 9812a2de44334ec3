//! Shuffle filter dispatch.
//!
//! Follows the dispatch *shape* of blosc/shuffle.c's runtime CPU
//! feature detection. A full port would add SSE2/AVX2 `ShuffleImpl`
//! variants here selected by `is_x86_feature_detected!`; only
//! `Generic` exists in this crate.

mod generic;

use std::sync::OnceLock;

/// A shuffle/unshuffle implementation, picked once per process.
struct ShuffleImpl {
    name: &'static str,
    shuffle: fn(usize, usize, &[u8], &mut [u8]),
    unshuffle: fn(usize, usize, &[u8], &mut [u8]),
}

const GENERIC: ShuffleImpl = ShuffleImpl {
    name: "generic",
    shuffle: generic::shuffle,
    unshuffle: generic::unshuffle,
};

static HOST_IMPL: OnceLock<ShuffleImpl> = OnceLock::new();

fn host_impl() -> &'static ShuffleImpl {
    HOST_IMPL.get_or_init(|| GENERIC)
}

/// Name of the dispatched implementation (diagnostic only).
pub fn active_implementation() -> &'static str {
    host_impl().name
}

/// Transpose `blocksize` bytes of `typesize`-byte elements from AOS to
/// SOA layout. Never fails.
pub fn shuffle(typesize: usize, blocksize: usize, src: &[u8], dest: &mut [u8]) {
    (host_impl().shuffle)(typesize, blocksize, src, dest)
}

/// Inverse of [`shuffle`]. Never fails.
pub fn unshuffle(typesize: usize, blocksize: usize, src: &[u8], dest: &mut [u8]) {
    (host_impl().unshuffle)(typesize, blocksize, src, dest)
}
