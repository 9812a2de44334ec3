//! Worker-pool scheduler for whole-chunk compress/decompress, grounded
//! in `serial_blosc`/`parallel_blosc`/`t_blosc` in src/blosc.c.
//!
//! The original pins a persistent pthread pool behind three barriers
//! (init/inter/finish) guarded by raw pointers into `params`. This
//! crate uses `std::thread::scope` instead, dispatching worker
//! closures per call and joining them; scoped threads let block
//! buffers be borrowed directly with no `unsafe impl Send` wrapper.
//!
//! Compression still claims blocks from a shared counter the way
//! `t_blosc` does, but each worker's result goes into its own heap
//! buffer rather than a shared `dest` at a mutex-arbitrated offset.
//! Rust's aliasing rules make concurrent writes to unknown, possibly
//! overlapping offsets of one `&mut [u8]` require unsafe pointer
//! arithmetic, which this crate avoids. A short sequential merge pass
//! after the scope joins assembles the final payload and `bstarts`
//! table; the actual compression work still runs in parallel.
//!
//! Decompression block sizes and offsets are known up front from the
//! header, so `dest` is split into disjoint mutable slices ahead of
//! time and handed one contiguous range per worker: safe, and closer
//! to `t_blosc`'s per-thread contiguous block ranges for decompression.

use std::sync::Mutex;

use crate::block::{compress_block, decompress_block};
use crate::codecs::EntropyCodec;
use crate::error::BloscError;

/// Block geometry for one chunk, derived from `blocksize` and the
/// chunk's total size.
pub struct ChunkLayout {
    pub nbytes: usize,
    pub blocksize: usize,
    pub nblocks: usize,
    pub leftover: usize,
}

impl ChunkLayout {
    pub fn new(nbytes: usize, blocksize: usize) -> Self {
        if blocksize == 0 {
            return ChunkLayout { nbytes, blocksize, nblocks: 0, leftover: 0 };
        }
        let mut nblocks = nbytes / blocksize;
        let leftover = nbytes % blocksize;
        if leftover > 0 {
            nblocks += 1;
        }
        ChunkLayout { nbytes, blocksize, nblocks, leftover }
    }

    pub fn block_len(&self, index: usize) -> usize {
        if index == self.nblocks - 1 && self.leftover > 0 {
            self.leftover
        } else {
            self.blocksize
        }
    }

    fn is_leftover(&self, index: usize) -> bool {
        index == self.nblocks - 1 && self.leftover > 0
    }
}

/// Compress every block of `src` across up to `nthreads` workers.
/// Returns `Ok(None)` if any block turned out incompressible (caller
/// should store the chunk raw), or `Ok(Some((payload, bstarts)))` with
/// the concatenated split data and each block's offset into it.
pub fn compress_chunk(
    codec: &dyn EntropyCodec,
    clevel: i32,
    typesize: usize,
    do_shuffle: bool,
    layout: &ChunkLayout,
    nthreads: usize,
    src: &[u8],
) -> Result<Option<(Vec<u8>, Vec<usize>)>, BloscError> {
    let nblocks = layout.nblocks;
    if nblocks == 0 {
        return Ok(Some((Vec::new(), Vec::new())));
    }

    let next = Mutex::new(0usize);
    let results: Vec<Mutex<Option<Result<Vec<u8>, BloscError>>>> =
        (0..nblocks).map(|_| Mutex::new(None)).collect();
    let giveup = Mutex::new(false);
    let nthreads = nthreads.max(1).min(nblocks);

    std::thread::scope(|scope| {
        for _ in 0..nthreads {
            scope.spawn(|| loop {
                if *giveup.lock().unwrap() {
                    return;
                }
                let idx = {
                    let mut n = next.lock().unwrap();
                    if *n >= nblocks {
                        return;
                    }
                    let i = *n;
                    *n += 1;
                    i
                };

                let block_len = layout.block_len(idx);
                let leftoverblock = layout.is_leftover(idx);
                let start = idx * layout.blocksize;
                let block_src = &src[start..start + block_len];

                let mut tmp = vec![0u8; block_len];
                let headroom = 4 * typesize.max(1) + 64;
                let mut dest_buf = vec![0u8; block_len + headroom];

                let outcome = compress_block(
                    codec,
                    clevel,
                    typesize,
                    do_shuffle,
                    leftoverblock,
                    block_src,
                    &mut dest_buf,
                    &mut tmp,
                );

                match outcome {
                    Ok(0) => {
                        *giveup.lock().unwrap() = true;
                    }
                    Ok(n) => {
                        dest_buf.truncate(n);
                        *results[idx].lock().unwrap() = Some(Ok(dest_buf));
                    }
                    Err(e) => {
                        *results[idx].lock().unwrap() = Some(Err(e));
                        *giveup.lock().unwrap() = true;
                    }
                }
            });
        }
    });

    for slot in &results {
        let mut guard = slot.lock().unwrap();
        if matches!(&*guard, Some(Err(_))) {
            if let Some(Err(e)) = guard.take() {
                return Err(e);
            }
        }
    }

    if *giveup.lock().unwrap() {
        return Ok(None);
    }

    let mut bstarts = Vec::with_capacity(nblocks);
    let mut payload = Vec::new();
    for slot in &results {
        let block = slot
            .lock()
            .unwrap()
            .take()
            .expect("every block index is claimed and compressed exactly once")
            .expect("errors are returned above before reaching the merge pass");
        bstarts.push(payload.len());
        payload.extend_from_slice(&block);
    }

    Ok(Some((payload, bstarts)))
}

/// Decompress every block described by `bstarts` across up to
/// `nthreads` workers, writing directly into `dest`. Returns the
/// total number of decompressed bytes (always `layout.nbytes` on
/// success).
pub fn decompress_chunk(
    codec: &dyn EntropyCodec,
    typesize: usize,
    do_shuffle: bool,
    layout: &ChunkLayout,
    nthreads: usize,
    src_blocks: &[u8],
    bstarts: &[usize],
    dest: &mut [u8],
) -> Result<usize, BloscError> {
    let nblocks = layout.nblocks;
    if nblocks == 0 {
        return Ok(0);
    }
    assert_eq!(bstarts.len(), nblocks);
    assert_eq!(dest.len(), layout.nbytes);

    let nthreads = nthreads.max(1).min(nblocks);
    let tblocks = nblocks.div_ceil(nthreads);

    let mut dest_chunks: Vec<&mut [u8]> = Vec::with_capacity(nblocks);
    let mut rest = dest;
    for idx in 0..nblocks {
        let len = layout.block_len(idx);
        let (chunk, remainder) = rest.split_at_mut(len);
        dest_chunks.push(chunk);
        rest = remainder;
    }

    let mut per_thread: Vec<Vec<&mut [u8]>> = Vec::with_capacity(nthreads);
    let mut iter = dest_chunks.into_iter();
    for t in 0..nthreads {
        let start = t * tblocks;
        let end = ((t + 1) * tblocks).min(nblocks);
        let count = end.saturating_sub(start);
        per_thread.push((0..count).filter_map(|_| iter.next()).collect());
    }

    let error_slot: Mutex<Option<BloscError>> = Mutex::new(None);

    std::thread::scope(|scope| {
        for (t, group) in per_thread.into_iter().enumerate() {
            let start = t * tblocks;
            let error_slot = &error_slot;
            scope.spawn(move || {
                let mut tmp = vec![0u8; layout.blocksize];
                for (offset, dest_block) in group.into_iter().enumerate() {
                    if error_slot.lock().unwrap().is_some() {
                        return;
                    }
                    let idx = start + offset;
                    let bstart = bstarts[idx];
                    let bend = if idx + 1 < nblocks { bstarts[idx + 1] } else { src_blocks.len() };
                    let block_src = &src_blocks[bstart..bend];
                    let leftoverblock = layout.is_leftover(idx);
                    let tmp_slice = &mut tmp[..dest_block.len()];

                    if let Err(e) = decompress_block(
                        codec,
                        typesize,
                        do_shuffle,
                        leftoverblock,
                        block_src,
                        dest_block,
                        tmp_slice,
                    ) {
                        *error_slot.lock().unwrap() = Some(e);
                        return;
                    }
                }
            });
        }
    });

    if let Some(e) = error_slot.lock().unwrap().take() {
        return Err(e);
    }

    Ok(layout.nbytes)
}
