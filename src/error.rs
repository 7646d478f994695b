//! Error types for the Xiphos library.
//!
//! All fallible operations in Xiphos return [`Result`], whose error type is
//! the [`XiphosError`] enum. The variants follow the failure taxonomy of the
//! scoring core: recoverable lookup failures, degenerate numeric inputs,
//! numeric domain violations inside the ranking formula, and malformed
//! evaluation records.
//!
//! # Examples
//!
//! ```
//! use xiphos::error::{Result, XiphosError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(XiphosError::degenerate_input("empty vector"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Xiphos operations.
#[derive(Error, Debug)]
pub enum XiphosError {
    /// I/O errors (stopword files, evaluation files, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A document or term could not be resolved by the index. Recoverable:
    /// callers may skip the item and continue.
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// A computation received degenerate input (empty vectors, zero
    /// collection totals, zero-weight expansion sets). Reported explicitly
    /// rather than silently producing NaN or infinity.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// The ranking formula hit a numeric domain violation (log of a
    /// non-positive probability). Indicates a misconfigured estimator
    /// upstream; not locally recoverable.
    #[error("Numeric domain error: {0}")]
    NumericDomain(String),

    /// An evaluation record (judgment or batch-result line) had the wrong
    /// shape.
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// A failure reported by the external document index.
    #[error("Index error: {0}")]
    Index(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with [`XiphosError`].
pub type Result<T> = std::result::Result<T, XiphosError>;

impl XiphosError {
    /// Create a new lookup error.
    pub fn lookup<S: Into<String>>(msg: S) -> Self {
        XiphosError::Lookup(msg.into())
    }

    /// Create a new degenerate-input error.
    pub fn degenerate_input<S: Into<String>>(msg: S) -> Self {
        XiphosError::DegenerateInput(msg.into())
    }

    /// Create a new numeric domain error.
    pub fn numeric_domain<S: Into<String>>(msg: S) -> Self {
        XiphosError::NumericDomain(msg.into())
    }

    /// Create a new malformed-record error.
    pub fn malformed_record<S: Into<String>>(msg: S) -> Self {
        XiphosError::MalformedRecord(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        XiphosError::Index(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        XiphosError::Other(msg.into())
    }
}
