//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a span of the template source.
///
/// A diagnostic usually has one primary label marking where the problem
/// is, plus secondary labels for related locations such as the placeholder
/// that fixed the template's identifier kind.
///
/// ```text
/// error[E005]: cannot mix positional and named placeholders
///   |
/// 1 | {0} and {name}
///   | ---     ^^^^^^ named placeholder
///   | |
///   | positional placeholder here
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Creates a primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Creates a secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
