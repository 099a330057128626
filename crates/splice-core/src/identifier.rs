//! Placeholder identifiers.
//!
//! An [`Identifier`] is the part of a placeholder before the optional `:`
//! that decides which argument the placeholder binds to:
//!
//! | Placeholder | Identifier |
//! |-------------|------------|
//! | `{}` | [`Identifier::Auto`] |
//! | `{2}` | [`Identifier::Position`] |
//! | `{user}` | [`Identifier::Name`] |

use std::fmt;

/// The argument reference of a placeholder.
///
/// Equality is structural, so two `{user}` placeholders share one identifier
/// in a template's identifier table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Empty placeholder body, bound by encounter order.
    Auto,
    /// Explicit zero-based index into the positional arguments.
    Position(usize),
    /// Explicit case-sensitive argument name.
    Name(String),
}

impl Identifier {
    /// Creates a name identifier.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Returns the kind of this identifier.
    pub fn kind(&self) -> IdentifierKind {
        match self {
            Self::Auto => IdentifierKind::Auto,
            Self::Position(_) => IdentifierKind::Position,
            Self::Name(_) => IdentifierKind::Name,
        }
    }

    /// Returns the positional index, if this is a [`Identifier::Position`].
    pub fn as_position(&self) -> Option<usize> {
        match self {
            Self::Position(index) => Some(*index),
            _ => None,
        }
    }

    /// Returns the argument name, if this is a [`Identifier::Name`].
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => Ok(()),
            Self::Position(index) => write!(f, "{index}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

/// The tag of an [`Identifier`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    Auto,
    Position,
    Name,
}

impl IdentifierKind {
    /// Returns `true` for positional and named identifiers.
    pub fn is_explicit(&self) -> bool {
        !matches!(self, Self::Auto)
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto-numbered"),
            Self::Position => write!(f, "positional"),
            Self::Name => write!(f, "named"),
        }
    }
}
