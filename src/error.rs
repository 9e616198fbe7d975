use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised while reading or writing JSON.
///
/// Every variant is fatal for the current operation: the reader or writer
/// that produced it must not be used to continue the same document.
pub enum JsonError {
    /// A structural token (`{`, `}`, `[`, `]`, `:`, `,`) was required but
    /// something else was found, or the input ended early.
    #[error("Grammar: {0}")]
    Grammar(String),

    /// The call sequence is invalid for the current scope stack.
    #[error("Sequencing: {0}")]
    Sequencing(String),

    /// A string or number literal is malformed.
    #[error("Lexical: {0}")]
    Lexical(String),

    /// A required construction argument is missing or invalid.
    #[error("Argument: {0}")]
    Argument(String),

    /// The builder was handed something that is not a JSON value kind.
    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("Nesting depth limit of {0} exceeded")]
    DepthLimitExceeded(usize),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type JsonResult<T> = Result<T, JsonError>;
