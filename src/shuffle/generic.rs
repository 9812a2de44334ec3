//! Scalar shuffle/unshuffle transpose. Corresponds to
//! blosc/shuffle-generic.c.

/// Transpose `blocksize` bytes of `typesize`-byte elements from AOS
/// (`src`) into SOA (`dest`): `dest[j*neblock + i] = src[i*typesize + j]`.
/// Trailing bytes (`blocksize % typesize`) are copied verbatim. Never
/// fails, for any `typesize` and any `blocksize`.
pub fn shuffle(typesize: usize, blocksize: usize, src: &[u8], dest: &mut [u8]) {
    if typesize <= 1 {
        dest[..blocksize].copy_from_slice(&src[..blocksize]);
        return;
    }
    let neblock = blocksize / typesize;
    let rem = blocksize % typesize;

    for j in 0..typesize {
        for i in 0..neblock {
            dest[j * neblock + i] = src[i * typesize + j];
        }
    }

    if rem > 0 {
        let start = blocksize - rem;
        dest[start..blocksize].copy_from_slice(&src[start..blocksize]);
    }
}

/// Inverse of [`shuffle`]: `dest[i*typesize + j] = src[j*neblock + i]`.
pub fn unshuffle(typesize: usize, blocksize: usize, src: &[u8], dest: &mut [u8]) {
    if typesize <= 1 {
        dest[..blocksize].copy_from_slice(&src[..blocksize]);
        return;
    }
    let neblock = blocksize / typesize;
    let rem = blocksize % typesize;

    for i in 0..neblock {
        for j in 0..typesize {
            dest[i * typesize + j] = src[j * neblock + i];
        }
    }

    if rem > 0 {
        let start = blocksize - rem;
        dest[start..blocksize].copy_from_slice(&src[start..blocksize]);
    }
}
