//! Error codes for the Splice template diagnostics.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Template structure errors
//! - `E1xx` - Specification warnings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Template Structure Errors (E0xx)
    // =========================================================================
    /// Unterminated placeholder.
    ///
    /// A `{` was not followed by a closing `}` before the end of the template.
    E001,

    /// Unmatched closing brace.
    ///
    /// A `}` appeared outside a placeholder. Literal braces are written `}}`.
    E002,

    /// Invalid identifier character.
    ///
    /// The placeholder body contains a character that is neither a Unicode
    /// letter or digit, `_`, nor the `:` or `}` that ends the identifier.
    E003,

    /// Positional index out of range.
    ///
    /// A positional identifier has more digits than fit in a `usize`.
    E004,

    /// Mixed identifier kinds.
    ///
    /// Auto-numbered placeholders were mixed with explicit ones, or (unless
    /// allowed by configuration) positional placeholders with named ones.
    E005,

    // =========================================================================
    // Specification Warnings (E1xx)
    // =========================================================================
    /// Malformed specification.
    ///
    /// The text after `:` could not be parsed. The placeholder is kept with
    /// an empty specification.
    E100,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E004 => "E004",
            ErrorCode::E005 => "E005",
            ErrorCode::E100 => "E100",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated placeholder",
            ErrorCode::E002 => "unmatched closing brace",
            ErrorCode::E003 => "invalid identifier character",
            ErrorCode::E004 => "positional index out of range",
            ErrorCode::E005 => "mixed identifier kinds",
            ErrorCode::E100 => "malformed specification",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E002.description(), "unmatched closing brace");
        assert_eq!(ErrorCode::E005.description(), "mixed identifier kinds");
    }
}
