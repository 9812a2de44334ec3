//! `snap`-backed (Snappy) [`EntropyCodec`](super::EntropyCodec), gated
//! behind the `snappy` feature. See `codecs::lz4` for why this isn't
//! wired into the block engine's split framing.

use snap::raw::{Decoder, Encoder};

use super::EntropyCodec;

pub struct Snappy;

impl EntropyCodec for Snappy {
    fn version(&self) -> u8 {
        1
    }

    fn encode(&self, _clevel: i32, input: &[u8], output: &mut [u8]) -> i32 {
        match Encoder::new().compress(input, output) {
            Ok(n) if n < output.len() => n as i32,
            Ok(_) => 0,
            Err(_) => 0,
        }
    }

    fn decode(&self, input: &[u8], output: &mut [u8]) -> i32 {
        match Decoder::new().decompress(input, output) {
            Ok(n) if n == output.len() => n as i32,
            _ => -2,
        }
    }
}
