//! Byte-level Run-Length Encoding.
//!
//! The encoded form is a sequence of `(byte, run_length)` pairs where the run
//! length is itself LEB128-encoded, so short runs cost two bytes and long runs
//! stay compact. Effective on data with long runs of identical bytes.

use super::{leb128, MAX_DECODED_LEN};
use crate::error::DecodexError;

//==================================================================================
// 1. Public API
//==================================================================================

pub fn encode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();

    let Some((&first, rest)) = input_bytes.split_first() else {
        return Ok(());
    };

    let mut current = first;
    let mut run: u64 = 1;
    for &byte in rest {
        if byte == current {
            run += 1;
        } else {
            output_buf.push(current);
            leb128::encode_one(run, output_buf)?;
            current = byte;
            run = 1;
        }
    }
    output_buf.push(current);
    leb128::encode_one(run, output_buf)?;

    Ok(())
}

pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();

    let mut pos = 0usize;
    while pos < input_bytes.len() {
        let value = input_bytes[pos];
        pos += 1;

        let run: u64 = leb128::decode_one(input_bytes, &mut pos)
            .map_err(|e| {
                DecodexError::RleDecodeError(format!(
                    "bad run length for byte at {}: {}",
                    pos - 1,
                    e
                ))
            })?;
        if run == 0 {
            return Err(DecodexError::RleDecodeError(format!(
                "zero-length run at position {}",
                pos
            )));
        }

        let run = usize::try_from(run)
            .ok()
            .filter(|&r| output_buf.len().saturating_add(r) <= MAX_DECODED_LEN)
            .ok_or_else(|| {
                DecodexError::RleDecodeError(format!(
                    "decoded size exceeds limit of {} bytes",
                    MAX_DECODED_LEN
                ))
            })?;
        output_buf.resize(output_buf.len() + run, value);
    }

    Ok(())
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
