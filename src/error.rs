//! This module defines the single, unified error type for the entire decodex
//! library.
//!
//! Every kernel, module, recipe operation and storage call returns this type, so
//! a failure anywhere can be propagated with `?` up to the session loop, where it
//! is reported to the user without ending the session. The `thiserror` crate is
//! used to reduce boilerplate.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, DecodexError>;

#[derive(Error, Debug)]
pub enum DecodexError {
    // =========================================================================
    // === Command & Lookup Errors
    // =========================================================================
    #[error("Could not parse command: {0}")]
    Parse(String),

    #[error("Unknown module: '{0}'")]
    UnknownModule(String),

    #[error("A module named '{0}' is already registered")]
    DuplicateModule(String),

    #[error("The {0} must not be blank")]
    BlankInput(&'static str),

    // =========================================================================
    // === Recipe State Errors
    // =========================================================================
    #[error("No recipe is being edited")]
    NoEditingRecipe,

    #[error("The recipe has no steps")]
    EmptyRecipe,

    #[error("A saved recipe named '{0}' already exists")]
    DuplicateRecipeName(String),

    #[error("No saved recipe named '{0}'")]
    UnknownRecipe(String),

    #[error("Invalid recipe name '{0}': use letters, digits, '-' or '_'")]
    InvalidRecipeName(String),

    #[error("Recipe '{0}' is being edited; save or discard it first")]
    RecipeInProgress(String),

    // =========================================================================
    // === Execution Errors
    // =========================================================================
    #[error("Module '{module}' failed: {source}")]
    ModuleExecution {
        module: String,
        #[source]
        source: Box<DecodexError>,
    },

    #[error("Pipeline execution failed at step {position} ('{stage}'): {source}")]
    PipelineError {
        stage: String,
        /// 1-based position of the failing step within the recipe.
        position: usize,
        #[source]
        source: Box<DecodexError>,
    },

    // =========================================================================
    // === Low-Level Kernel Errors
    // =========================================================================
    #[error("Invalid base64 input: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    #[error("Invalid hex input: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("Invalid binary input: {0}")]
    BinaryDecode(String),

    #[error("Invalid percent-encoded input: {0}")]
    UrlDecode(String),

    #[error("RLE decoding error: {0}")]
    RleDecodeError(String),

    #[error("LEB128 decoding error: {0}")]
    Leb128DecodeError(String),

    #[error("Zstd operation failed: {0}")]
    ZstdError(String),

    // =========================================================================
    // === Storage & Configuration Errors
    // =========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl DecodexError {
    /// Wraps a kernel failure with the name of the module that raised it.
    pub fn module_failed(module: &str, source: DecodexError) -> Self {
        DecodexError::ModuleExecution {
            module: module.to_string(),
            source: Box::new(source),
        }
    }

    /// Returns the innermost cause, skipping module and pipeline wrappers.
    pub fn root_cause(&self) -> &DecodexError {
        match self {
            DecodexError::ModuleExecution { source, .. }
            | DecodexError::PipelineError { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_error_message_names_step_and_module() {
        let err = DecodexError::PipelineError {
            stage: "hexdecode".to_string(),
            position: 2,
            source: Box::new(DecodexError::module_failed(
                "hexdecode",
                DecodexError::HexDecode(hex::FromHexError::OddLength),
            )),
        };
        let msg = err.to_string();
        assert!(msg.contains("step 2"));
        assert!(msg.contains("hexdecode"));
        assert!(matches!(err.root_cause(), DecodexError::HexDecode(_)));
    }
}
