use super::Data;

/// Holds the session's original input and the current pipeline result.
///
/// `current` is only ever written by the recipe executor (through
/// `replace_current`) or reset to `original`; there is no public setter.
#[derive(Debug, Clone, Default)]
pub struct DataManager {
    original: Data,
    current: Data,
}

impl DataManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the original input and resets `current` to it.
    pub fn set_original(&mut self, data: Data) {
        log::debug!("New original data ({} bytes)", data.len());
        self.current = data.clone();
        self.original = data;
    }

    pub fn original(&self) -> &Data {
        &self.original
    }

    pub fn current(&self) -> &Data {
        &self.current
    }

    pub fn reset_current(&mut self) {
        self.current = self.original.clone();
    }

    pub(crate) fn replace_current(&mut self, data: Data) {
        self.current = data;
    }
}
