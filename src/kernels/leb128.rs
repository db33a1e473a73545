//! LEB128 (Little-Endian Base 128) variable-length encoding for unsigned
//! integers. Used by the RLE kernel for its run lengths; values below 128 take a
//! single byte. Fully panic-free on malformed input.

use num_traits::{PrimInt, Unsigned};

use crate::error::DecodexError;

const PAYLOAD_MASK: u8 = 0x7F;
const CONTINUATION_BIT: u8 = 0x80;

/// Appends the LEB128 encoding of `value` to `buffer`.
pub fn encode_one<T>(value: T, buffer: &mut Vec<u8>) -> Result<(), DecodexError>
where
    T: PrimInt + Unsigned,
{
    let mask = T::from(PAYLOAD_MASK).ok_or_else(|| {
        DecodexError::Leb128DecodeError("type cannot hold a 7-bit mask".to_string())
    })?;

    let mut remaining = value;
    loop {
        let low = (remaining & mask)
            .to_u8()
            .ok_or_else(|| {
                DecodexError::Leb128DecodeError("payload does not fit in u8".to_string())
            })?;
        remaining = remaining >> 7;
        if remaining.is_zero() {
            buffer.push(low);
            return Ok(());
        }
        buffer.push(low | CONTINUATION_BIT);
    }
}

/// Decodes one value starting at `*pos`, advancing `*pos` past it.
pub fn decode_one<T>(bytes: &[u8], pos: &mut usize) -> Result<T, DecodexError>
where
    T: PrimInt + Unsigned,
{
    let total_bits = std::mem::size_of::<T>() * 8;
    let mut result = T::zero();
    let mut shift = 0usize;

    loop {
        let byte = *bytes
            .get(*pos)
            .ok_or_else(|| {
                DecodexError::Leb128DecodeError("unexpected end of buffer".to_string())
            })?;
        *pos += 1;

        if shift >= total_bits {
            return Err(DecodexError::Leb128DecodeError("integer overflow".to_string()));
        }
        let payload = byte & PAYLOAD_MASK;
        // The last group may only use the bits the type has left.
        if shift + 7 > total_bits && (payload >> (total_bits - shift)) != 0 {
            return Err(DecodexError::Leb128DecodeError("integer overflow".to_string()));
        }
        let payload = T::from(payload)
            .ok_or_else(|| {
                DecodexError::Leb128DecodeError("payload does not fit type".to_string())
            })?;
        result = result | (payload << shift);

        if byte & CONTINUATION_BIT == 0 {
            return Ok(result);
        }
        shift += 7;
    }
}
