//! Fatal, programmer-facing errors the engine can raise.
//!
//! Ordinary parse failure is never an `Err` — it is the `done == true` state
//! with a populated `errors` set described in the crate's module docs. The
//! variants here are reserved for conditions a caller should treat as a bug
//! in the grammar or in how the engine is being driven.

use thiserror::Error;

/// Fatal errors raised by grammar construction or by misuse of the engine API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `Reference` rule named a key absent from the grammar.
    #[error("unknown rule referenced: {0}")]
    UnknownRule(String),

    /// A regex pattern failed to compile.
    #[error("invalid regular expression pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// `advance` was called on a `State` that had already finished.
    #[error("advance called on a completed parse")]
    AlreadyDone,
}
