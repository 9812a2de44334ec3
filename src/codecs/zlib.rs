//! `flate2`-backed (zlib) [`EntropyCodec`](super::EntropyCodec), gated
//! behind the `zlib` feature. See `codecs::lz4` for why this isn't
//! wired into the block engine's split framing.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use super::EntropyCodec;

pub struct Zlib;

impl EntropyCodec for Zlib {
    fn version(&self) -> u8 {
        1
    }

    fn encode(&self, clevel: i32, input: &[u8], output: &mut [u8]) -> i32 {
        let level = Compression::new(clevel.clamp(0, 9) as u32);
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(output.len()), level);
        if encoder.write_all(input).is_err() {
            return 0;
        }
        match encoder.finish() {
            Ok(buf) if buf.len() < output.len() => {
                output[..buf.len()].copy_from_slice(&buf);
                buf.len() as i32
            }
            Ok(_) => 0,
            Err(_) => 0,
        }
    }

    fn decode(&self, input: &[u8], output: &mut [u8]) -> i32 {
        let mut decoder = ZlibDecoder::new(input);
        let mut buf = Vec::with_capacity(output.len());
        if decoder.read_to_end(&mut buf).is_err() {
            return -2;
        }
        if buf.len() != output.len() {
            return -2;
        }
        output.copy_from_slice(&buf);
        buf.len() as i32
    }
}
