//! Error type of the fallible library boundary (file access and runtime configuration).

use thiserror::Error;

/// Errors surfaced when loading graphs or interpreting user input
#[derive(Debug, Error)]
pub enum GraphError {
    /// Reading or writing a graph failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A backend name did not match any representation
    #[error("unknown backend `{0}` (expected `sparse` or `dense`)")]
    UnknownBackend(String),
}
