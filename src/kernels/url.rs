//! Percent-encoding for URL components, using the `urlencoding` crate.
//!
//! Everything except ASCII alphanumerics and `-_.~` is escaped, so any byte
//! sequence (not only UTF-8) survives a round trip.

use crate::error::DecodexError;

pub fn encode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();
    output_buf.extend_from_slice(urlencoding::encode_binary(input_bytes).as_bytes());
    Ok(())
}

/// `urlencoding::decode_binary` passes malformed escapes through untouched, so
/// every `%` is validated first and a bad escape is reported instead.
pub fn decode(input_bytes: &[u8], output_buf: &mut Vec<u8>) -> Result<(), DecodexError> {
    output_buf.clear();

    for (pos, _) in input_bytes.iter().enumerate().filter(|&(_, &b)| b == b'%') {
        let escape = input_bytes.get(pos + 1..pos + 3);
        let valid = matches!(
            escape,
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
        );
        if !valid {
            return Err(DecodexError::UrlDecode(format!(
                "malformed escape sequence at position {}",
                pos
            )));
        }
    }

    output_buf.extend_from_slice(&urlencoding::decode_binary(input_bytes));
    Ok(())
}
