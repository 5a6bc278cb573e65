//! Lossless credential compression
//!
//! Raw deflate via flate2, with a decompressed-size ceiling so a
//! tampered-with cookie cannot act as a deflate bomb.

use crate::error::{CodecResult, SessionCodecError};
use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::write::DeflateEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::Write;

/// Maximum decompressed credential size (256 KB).
const MAX_DECOMPRESSED_SIZE: u64 = 256 * 1024;

/// Compress a raw credential. Deterministic and lossless;
/// `decompress(compress(x)) == x` for every byte sequence including the
/// empty one.
pub fn compress(data: &[u8]) -> CodecResult<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| SessionCodecError::Encode(format!("deflate encode failed: {e}")))?;
    encoder
        .finish()
        .map_err(|e| SessionCodecError::Encode(format!("deflate encode failed: {e}")))
}

/// Decompress a credential previously produced by [`compress`].
///
/// Malformed, truncated, or trailing-garbage input fails with
/// [`SessionCodecError::Decode`]; partial or garbage output is never
/// returned, so callers can distinguish "credential unreadable" from
/// "credential absent". The stream must reach its end marker: a cookie
/// cut off mid-slot decodes to an incomplete stream and is rejected
/// rather than yielding a shortened credential.
pub fn decompress(data: &[u8]) -> CodecResult<Vec<u8>> {
    let mut decoder = Decompress::new(false);
    let mut out = Vec::new();
    let mut buf = [0u8; 16 * 1024];

    loop {
        let consumed = decoder.total_in() as usize;
        let status = decoder
            .decompress(&data[consumed..], &mut buf, FlushDecompress::Finish)
            .map_err(|e| SessionCodecError::Decode(format!("deflate decode failed: {e}")))?;

        let produced = decoder.total_out() as usize - out.len();
        out.extend_from_slice(&buf[..produced]);
        if out.len() as u64 > MAX_DECOMPRESSED_SIZE {
            return Err(SessionCodecError::Decode(format!(
                "decompressed credential exceeds maximum size ({MAX_DECOMPRESSED_SIZE} bytes)"
            )));
        }

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                // No forward progress and no end marker: the stream was
                // cut off before its final block.
                let advanced = decoder.total_in() as usize > consumed || produced > 0;
                if !advanced {
                    return Err(SessionCodecError::Decode(
                        "incomplete deflate stream".to_string(),
                    ));
                }
            }
        }
    }

    if (decoder.total_in() as usize) < data.len() {
        return Err(SessionCodecError::Decode(
            "trailing bytes after deflate stream".to_string(),
        ));
    }

    Ok(out)
}

/// Base64-encode a compressed blob for cookie transport.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode the base64 text reassembled from cookie slots.
pub fn decode_base64(text: &str) -> CodecResult<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| SessionCodecError::Decode(format!("base64 decode failed: {e}")))
}
