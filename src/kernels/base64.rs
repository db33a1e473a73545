//! Base64 (RFC 4648, standard alphabet, padded) encoding and decoding.
//! A thin, panic-free wrapper around the `base64` crate.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::strip_whitespace;
use crate::error::DecodexError;

pub fn encode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();
    let encoded = STANDARD.encode(input_bytes);
    output_buf.extend_from_slice(encoded.as_bytes());
    Ok(())
}

pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();
    let cleaned = strip_whitespace(input_bytes);
    STANDARD.decode_vec(cleaned, output_buf)?;
    Ok(())
}
