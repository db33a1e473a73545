//! Hexadecimal encoding (lowercase) and decoding (either case).

use super::strip_whitespace;
use crate::error::DecodexError;

pub fn encode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();
    output_buf.extend_from_slice(hex::encode(input_bytes).as_bytes());
    Ok(())
}

pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();
    let decoded = hex::decode(strip_whitespace(input_bytes))?;
    output_buf.extend_from_slice(&decoded);
    Ok(())
}
