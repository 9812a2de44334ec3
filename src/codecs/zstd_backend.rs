//! `zstd`-backed [`EntropyCodec`](super::EntropyCodec), gated behind
//! the `zstd-backend` feature. See `codecs::lz4` for why this isn't
//! wired into the block engine's split framing.

use super::EntropyCodec;

pub struct Zstd;

impl EntropyCodec for Zstd {
    fn version(&self) -> u8 {
        1
    }

    fn encode(&self, clevel: i32, input: &[u8], output: &mut [u8]) -> i32 {
        let level = clevel.clamp(1, 22);
        match zstd::encode_all(input, level) {
            Ok(buf) if buf.len() < output.len() => {
                output[..buf.len()].copy_from_slice(&buf);
                buf.len() as i32
            }
            Ok(_) => 0,
            Err(_) => 0,
        }
    }

    fn decode(&self, input: &[u8], output: &mut [u8]) -> i32 {
        match zstd::decode_all(input) {
            Ok(buf) if buf.len() == output.len() => {
                output.copy_from_slice(&buf);
                buf.len() as i32
            }
            _ => -2,
        }
    }
}
