//! The data container that flows through every module, and the manager that
//! tracks the session's original input and current pipeline result.

mod manager;

pub use manager::DataManager;

use std::fmt;

/// An immutable snapshot of a byte payload.
///
/// The string view is computed once, at construction, from exactly the bytes
/// held; invalid UTF-8 sequences are shown as U+FFFD. Every transform produces a
/// new `Data` rather than mutating an existing one.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Data {
    bytes: Vec<u8>,
    text: String,
}

impl Data {
    pub fn new(bytes: Vec<u8>) -> Self {
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Self { bytes, text }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the payload is valid UTF-8, i.e. the string view is lossless.
    pub fn is_utf8(&self) -> bool {
        self.text.as_bytes() == self.bytes.as_slice()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<&str> for Data {
    fn from(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
            text: text.to_string(),
        }
    }
}

impl From<String> for Data {
    fn from(text: String) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
            text,
        }
    }
}

impl From<Vec<u8>> for Data {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("len", &self.bytes.len())
            .field("text", &self.text)
            .finish()
    }
}
