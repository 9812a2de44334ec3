//! `lz4_flex`-backed [`EntropyCodec`](super::EntropyCodec), gated
//! behind the `lz4` feature. Demonstrates the trait boundary; the
//! block engine's split/raw-store framing is blosclz-specific and
//! does not route through this codec.

use super::EntropyCodec;

pub struct Lz4;

impl EntropyCodec for Lz4 {
    fn version(&self) -> u8 {
        1
    }

    fn encode(&self, _clevel: i32, input: &[u8], output: &mut [u8]) -> i32 {
        match lz4_flex::block::compress_into(input, output) {
            Ok(n) if n < output.len() => n as i32,
            Ok(_) => 0,
            Err(_) => 0,
        }
    }

    fn decode(&self, input: &[u8], output: &mut [u8]) -> i32 {
        match lz4_flex::block::decompress_into(input, output) {
            Ok(n) if n == output.len() => n as i32,
            _ => -2,
        }
    }
}
