//! Zstandard compression and decompression.
//!
//! The compressed form is the uncompressed length as a little-endian `u64`,
//! followed by a single Zstd frame. The header lets the decoder pre-size its
//! buffer and verify the result. This module is a safe, panic-free wrapper
//! around the `zstd` crate.

use std::io::Write;

use super::MAX_DECODED_LEN;
use crate::error::DecodexError;

const LEN_HEADER_SIZE: usize = 8;

//==================================================================================
// 1. Public API
//==================================================================================

/// Empty input encodes to empty output.
pub fn encode(
    input_bytes: &[u8],
    output_buf: &mut Vec<u8>,
    level: i32,
) -> Result<(), DecodexError> {
    output_buf.clear();
    if input_bytes.is_empty() {
        return Ok(());
    }

    output_buf.extend_from_slice(&(input_bytes.len() as u64).to_le_bytes());

    let mut encoder = zstd::stream::Encoder::new(&mut *output_buf, level)
        .map_err(|e| DecodexError::ZstdError(e.to_string()))?;
    encoder
        .write_all(input_bytes)
        .map_err(|e| DecodexError::ZstdError(e.to_string()))?;
    // `finish` is essential to finalize the Zstd frame.
    encoder
        .finish()
        .map_err(|e| DecodexError::ZstdError(e.to_string()))?;

    Ok(())
}

pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();
    if input_bytes.is_empty() {
        return Ok(());
    }

    let (header, compressed) = input_bytes
        .split_first_chunk::<LEN_HEADER_SIZE>()
        .ok_or_else(|| {
            DecodexError::ZstdError("input too short to contain size header".to_string())
        })?;
    let uncompressed_len = usize::try_from(u64::from_le_bytes(*header))
        .ok()
        .filter(|&len| len <= MAX_DECODED_LEN)
        .ok_or_else(|| DecodexError::ZstdError("size header exceeds decode limit".to_string()))?;

    // The header length is the hard capacity: a frame that inflates past it
    // fails instead of growing the buffer.
    let decoded = zstd::bulk::decompress(compressed, uncompressed_len)
        .map_err(|e| DecodexError::ZstdError(e.to_string()))?;

    if decoded.len() != uncompressed_len {
        return Err(DecodexError::ZstdError(format!(
            "decompressed size does not match header: expected {}, got {}",
            uncompressed_len,
            decoded.len()
        )));
    }

    output_buf.extend_from_slice(&decoded);
    Ok(())
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
