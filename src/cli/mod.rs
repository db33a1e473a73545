//! The interactive front end: command grammar, presentation, and the session
//! that owns all runtime state.

mod parser;
mod session;
pub mod ui;


pub use parser::{parse_command, Command, ListTarget};
pub use session::Session;

/// What a handled command wants shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Plain text.
    Text(String),
    Success(String),
    /// The command succeeded, but something the user should know went wrong.
    Warning(String),
    /// Nothing to show.
    None,
    /// Leave the session.
    Quit,
}

impl Output {
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self::Success(msg.into())
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self::Warning(msg.into())
    }
}
