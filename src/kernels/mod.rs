//! This module serves as the public API and dispatcher for the collection of all
//! pure, stateless byte kernels.
//!
//! It declares all kernel sub-modules and provides the `dispatch_encode`,
//! `dispatch_decode` and `dispatch_neutral` functions. These dispatchers are the
//! sole entry point used by `modules::BuiltinModule`: a module names an operation
//! and the dispatcher calls the matching kernel.
//!
//! Kernel contract: input is never mutated, `output_buf` is cleared before being
//! written, and every fallible path returns a `DecodexError` instead of panicking.

use crate::error::DecodexError;

//==================================================================================
// 1. Module Declarations
//==================================================================================

/// Text encodings
pub mod base64;
pub mod binary;
pub mod hex;
pub mod url;

/// Ciphers
pub mod rot13;

/// Compression
pub mod leb128;
pub mod rle;
pub mod zstd;

/// Upper bound on the size of any decoded buffer. Length fields read from
/// untrusted input are checked against this before allocating.
pub(crate) const MAX_DECODED_LEN: usize = 256 * 1024 * 1024;

//==================================================================================
// 2. Operation Definitions
//==================================================================================

/// A reversible byte transform with an encode and a decode direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Base64,
    Hex,
    Binary,
    Url,
    Rle,
    Zstd { level: i32 },
}

/// A transform that is its own inverse and has no direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neutral {
    Rot13,
    Reverse,
}

//==================================================================================
// 3. Public API (Unified Dispatchers)
//==================================================================================

/// The single, unified dispatcher for all ENCODE operations.
pub fn dispatch_encode(
    codec: Codec,
    input_bytes: &[u8],
    output_buf: &mut Vec<u8>,
) -> Result<(), DecodexError> {
    match codec {
        Codec::Base64 => base64::encode(input_bytes, output_buf),
        Codec::Hex => hex::encode(input_bytes, output_buf),
        Codec::Binary => binary::encode(input_bytes, output_buf),
        Codec::Url => url::encode(input_bytes, output_buf),
        Codec::Rle => rle::encode(input_bytes, output_buf),
        Codec::Zstd { level } => zstd::encode(input_bytes, output_buf, level),
    }
}

/// The single, unified dispatcher for all DECODE operations.
pub fn dispatch_decode(
    codec: Codec,
    input_bytes: &[u8],
    output_buf: &mut Vec<u8>,
) -> Result<(), DecodexError> {
    match codec {
        Codec::Base64 => base64::decode(input_bytes, output_buf),
        Codec::Hex => hex::decode(input_bytes, output_buf),
        Codec::Binary => binary::decode(input_bytes, output_buf),
        Codec::Url => url::decode(input_bytes, output_buf),
        Codec::Rle => rle::decode(input_bytes, output_buf),
        Codec::Zstd { .. } => zstd::decode(input_bytes, output_buf),
    }
}

/// Dispatcher for the self-inverse transforms. These cannot fail.
pub fn dispatch_neutral(op: Neutral, input_bytes: &[u8], output_buf: &mut Vec<u8>) {
    match op {
        Neutral::Rot13 => rot13::apply(input_bytes, output_buf),
        Neutral::Reverse => {
            output_buf.clear();
            output_buf.extend(input_bytes.iter().rev());
        }
    }
}

/// Removes ASCII whitespace. Text decoders accept line-wrapped or spaced input.
pub(crate) fn strip_whitespace(input_bytes: &[u8]) -> Vec<u8> {
    input_bytes
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect()
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
