//! Base-2 text encoding: every byte becomes eight `0`/`1` digits, groups are
//! separated by a single space.

use crate::error::DecodexError;

const BITS_PER_BYTE: usize = 8;

pub fn encode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();
    output_buf.reserve(input_bytes.len() * (BITS_PER_BYTE + 1));

    for (i, &byte) in input_bytes.iter().enumerate() {
        if i > 0 {
            output_buf.push(b' ');
        }
        for shift in (0..BITS_PER_BYTE).rev() {
            output_buf.push(if (byte >> shift) & 1 == 1 { b'1' } else { b'0' });
        }
    }
    Ok(())
}

/// Whitespace is ignored, so grouping on input is free-form; only the total
/// digit count must be a multiple of eight.
pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();

    let mut current: u8 = 0;
    let mut digits = 0usize;

    for (pos, &ch) in input_bytes.iter().enumerate() {
        let bit = match ch {
            b'0' => 0,
            b'1' => 1,
            c if c.is_ascii_whitespace() => continue,
            c => {
                return Err(DecodexError::BinaryDecode(format!(
                    "unexpected character '{}' at position {}",
                    char::from(c).escape_default(),
                    pos
                )))
            }
        };
        current = (current << 1) | bit;
        digits += 1;
        if digits % BITS_PER_BYTE == 0 {
            output_buf.push(current);
            current = 0;
        }
    }

    if digits % BITS_PER_BYTE != 0 {
        return Err(DecodexError::BinaryDecode(format!(
            "expected a multiple of {} digits, got {}",
            BITS_PER_BYTE, digits
        )));
    }
    Ok(())
}
