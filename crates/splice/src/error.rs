//! Error types for Splice operations.
//!
//! This module provides the main error type [`SpliceError`]. Template
//! problems carry the parser's diagnostics together with the template text;
//! the remaining variants are raised while formatting.

use thiserror::Error;

use splice_parser::error::{ErrorCode, ParseError};

/// The main error type for Splice operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant contains structured diagnostics with spans into the
/// template source, suitable for rich error reporting. Mixing identifier
/// kinds in one template is reported this way with code `E005`.
///
/// Argument validation errors are raised before the template is modified.
#[derive(Debug, Error)]
pub enum SpliceError {
    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("positional argument {index} follows named argument `{name}`")]
    ArgumentOrder { index: usize, name: String },

    #[error("named argument `{0}` is given more than once")]
    DuplicateNamedArgument(String),

    #[error("argument `{name}` cannot be used here: {reason}")]
    ReservedArgumentMisuse { name: String, reason: &'static str },

    #[error("{} placeholder(s) left unresolved: {}", .pending.len(), .pending.join(", "))]
    UnresolvedPlaceholder { pending: Vec<String> },

    #[error("output size overflow while formatting")]
    NumericOverflow,

    #[error("formatter for `{type_name}` reserved {reserved} bytes but wrote {written}")]
    FormatterContract {
        type_name: &'static str,
        reserved: usize,
        written: usize,
    },
}

impl SpliceError {
    /// Create a new `Parse` error with the associated template source.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }

    /// Returns `true` if the template mixed identifier kinds.
    pub fn is_homogeneity_error(&self) -> bool {
        match self {
            Self::Parse { err, .. } => err
                .errors()
                .any(|diagnostic| diagnostic.code() == Some(ErrorCode::E005)),
            _ => false,
        }
    }
}
