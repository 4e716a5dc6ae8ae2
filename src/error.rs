//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Failures surfaced by icon generation, colour parsing and path parsing.
///
/// Generation is pure computation, so every error is reported immediately
/// and no partial output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The caller supplied input that cannot be turned into an icon,
    /// e.g. an empty hash or a malformed colour string.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A style value or palette is outside what the generator supports.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An internal computation produced a value that must be impossible.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    /// A vector path string could not be parsed.
    #[error("path syntax error at byte {offset}: {message}")]
    PathSyntax { offset: usize, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
