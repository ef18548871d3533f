use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::GremlinResult;

/// The four-octet trailer RFC 7692 says a permessage-deflate sender must
/// append after each compressed message and a receiver must strip before
/// inflating (`0x00 0x00 0xff 0xff`, an empty deflate block marker that
/// lets `flate2`'s raw-deflate reader terminate).
const TRAIL: [u8; 4] = [0x00, 0x00, 0xff, 0xff];

/// Compresses one message payload for a permessage-deflate-negotiated
/// connection.
pub fn compress(payload: &[u8]) -> GremlinResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload)?;
    let mut compressed = encoder.finish()?;
    if compressed.ends_with(&TRAIL) {
        compressed.truncate(compressed.len() - TRAIL.len());
    }
    Ok(compressed)
}

/// Reverses [`compress`]: re-appends the trailer, then raw-inflates.
pub fn decompress(payload: &[u8]) -> GremlinResult<Vec<u8>> {
    let mut framed = Vec::with_capacity(payload.len() + TRAIL.len());
    framed.extend_from_slice(payload);
    framed.extend_from_slice(&TRAIL);

    let mut decoder = DeflateDecoder::new(&framed[..]);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_text_frame_payload() {
        let payload = br#"{"requestId":"r","op":"eval"}"#;
        let compressed = compress(payload).unwrap();
        let restored = decompress(&compressed).unwrap();
        assert_eq!(payload.to_vec(), restored);
    }

    #[test]
    fn round_trips_an_empty_payload() {
        let compressed = compress(b"").unwrap();
        let restored = decompress(&compressed).unwrap();
        assert_eq!(Vec::<u8>::new(), restored);
    }
}
