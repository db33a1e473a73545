//! Modules are the named, stateless units a recipe is built from.
//!
//! The `Module` trait is the single application contract: a name, a direction,
//! and a pure `apply` that returns a new `Data` or fails with
//! `DecodexError::ModuleExecution`. The built-in set is a table of
//! `BuiltinModule` values, each of which forwards to a kernel dispatcher.

mod registry;

pub use registry::ModuleRegistry;

use std::fmt;

use crate::data::Data;
use crate::error::DecodexError;
use crate::kernels::{self, Codec, Neutral};

/// Which way a module transforms its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encode,
    Decode,
    Neutral,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Encode => "encode",
            Direction::Decode => "decode",
            Direction::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// A named, deterministic byte transform.
///
/// Implementations must be free of side effects and must not retain state
/// between calls: the registry shares one instance for the whole process.
pub trait Module: Send + Sync + fmt::Debug {
    /// Unique name. Lookups compare it case-insensitively.
    fn name(&self) -> &str;

    fn direction(&self) -> Direction;

    /// One-line description for listings.
    fn description(&self) -> &str {
        ""
    }

    /// Name of the module that undoes this one, if there is one.
    fn counterpart(&self) -> Option<&str> {
        None
    }

    /// Transforms `data` into a new value. The input is never modified.
    fn apply(&self, data: &Data) -> Result<Data, DecodexError>;
}

//==================================================================================
// Built-in modules
//==================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transform {
    Encode(Codec),
    Decode(Codec),
    Neutral(Neutral),
}

/// A module backed by one of the crate's kernels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinModule {
    name: &'static str,
    description: &'static str,
    counterpart: Option<&'static str>,
    transform: Transform,
}

impl BuiltinModule {
    /// The fixed built-in set, in registration order. These names are written
    /// into saved recipe files, so renaming one breaks existing recipes.
    pub fn all(zstd_level: i32) -> Vec<BuiltinModule> {
        let zstd = Codec::Zstd { level: zstd_level };
        let mut modules = Vec::with_capacity(14);
        modules.extend(Self::pair(
            ("base64encode", "Encodes to Base64 (standard alphabet, padded)"),
            ("base64decode", "Decodes Base64 (standard alphabet, padded)"),
            Codec::Base64,
        ));
        modules.extend(Self::pair(
            ("hexencode", "Encodes to lowercase hexadecimal"),
            ("hexdecode", "Decodes hexadecimal"),
            Codec::Hex,
        ));
        modules.extend(Self::pair(
            ("binaryencode", "Encodes each byte as 8 binary digits"),
            ("binarydecode", "Decodes groups of 8 binary digits"),
            Codec::Binary,
        ));
        modules.extend(Self::pair(
            ("urlencode", "Applies URL percent-encoding"),
            ("urldecode", "Reverses URL percent-encoding"),
            Codec::Url,
        ));
        modules.extend(Self::pair(
            ("rleencode", "Run-length encodes bytes"),
            ("rledecode", "Expands run-length encoded bytes"),
            Codec::Rle,
        ));
        modules.extend(Self::pair(
            ("zstdcompress", "Compresses with Zstandard"),
            ("zstddecompress", "Decompresses Zstandard output"),
            zstd,
        ));
        modules.push(Self::neutral("rot13", Neutral::Rot13, "Rotates ASCII letters by 13 places"));
        modules.push(Self::neutral("reverse", Neutral::Reverse, "Reverses the byte order"));
        modules
    }

    fn pair(
        (encode_name, encode_desc): (&'static str, &'static str),
        (decode_name, decode_desc): (&'static str, &'static str),
        codec: Codec,
    ) -> [BuiltinModule; 2] {
        [
            BuiltinModule {
                name: encode_name,
                description: encode_desc,
                counterpart: Some(decode_name),
                transform: Transform::Encode(codec),
            },
            BuiltinModule {
                name: decode_name,
                description: decode_desc,
                counterpart: Some(encode_name),
                transform: Transform::Decode(codec),
            },
        ]
    }

    /// Self-inverse modules name themselves as their counterpart.
    fn neutral(name: &'static str, op: Neutral, description: &'static str) -> BuiltinModule {
        BuiltinModule {
            name,
            description,
            counterpart: Some(name),
            transform: Transform::Neutral(op),
        }
    }
}

impl Module for BuiltinModule {
    fn name(&self) -> &str {
        self.name
    }

    fn direction(&self) -> Direction {
        match self.transform {
            Transform::Encode(_) => Direction::Encode,
            Transform::Decode(_) => Direction::Decode,
            Transform::Neutral(_) => Direction::Neutral,
        }
    }

    fn description(&self) -> &str {
        self.description
    }

    fn counterpart(&self) -> Option<&str> {
        self.counterpart
    }

    fn apply(&self, data: &Data) -> Result<Data, DecodexError> {
        let input = data.as_bytes();
        let mut output = Vec::with_capacity(input.len());
        match self.transform {
            Transform::Encode(codec) => kernels::dispatch_encode(codec, input, &mut output),
            Transform::Decode(codec) => kernels::dispatch_decode(codec, input, &mut output),
            Transform::Neutral(op) => {
                kernels::dispatch_neutral(op, input, &mut output);
                Ok(())
            }
        }
        .map_err(|e| DecodexError::module_failed(self.name, e))?;
        Ok(Data::new(output))
    }
}
