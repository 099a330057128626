//! Parsed format specifications.
//!
//! The text after the `:` of a placeholder is parsed into a
//! [`Specification`]. Scalar values use a flat list of [`Specifier`]s
//! (`width=8, fill=*`), while containers may use a list of bracketed groups
//! (`[width=20],[representation=hexadecimal]`) where group 0 configures the
//! container itself and groups 1..N configure its element types.
//!
//! # Example
//!
//! ```
//! # use splice_core::specification::{Specification, Specifier};
//! let spec = Specification::Groups(vec![
//!     Specification::Specifiers(vec![Specifier::new("width", "20")]),
//!     Specification::Specifiers(vec![Specifier::new("digits", "4")]),
//! ]);
//!
//! assert_eq!(spec.shell().get("WIDTH"), Some("20"));
//! assert_eq!(spec.element(1).get("digits"), Some("4"));
//! assert!(spec.element(2).is_empty());
//! ```

static EMPTY: Specification = Specification::Specifiers(Vec::new());

/// A single `key=value` pair.
///
/// Keys are compared case-insensitively through [`Specifier::is`]; values
/// are kept verbatim so formatters can decide how to compare them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Specifier {
    key: String,
    value: String,
}

impl Specifier {
    /// Creates a new specifier.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Returns the key as written in the template.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the value as written in the template (trimmed, unquoted).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if the key matches any of `names`, ignoring ASCII case.
    pub fn is(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.key.eq_ignore_ascii_case(name))
    }
}

/// The parsed specification of a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Specification {
    /// A flat, ordered list of specifiers.
    Specifiers(Vec<Specifier>),
    /// An ordered list of nested specifications.
    Groups(Vec<Specification>),
}

impl Default for Specification {
    fn default() -> Self {
        Self::empty()
    }
}

impl Specification {
    /// Creates an empty specifier list.
    pub fn empty() -> Self {
        Self::Specifiers(Vec::new())
    }

    /// Returns `true` if this specification configures nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Specifiers(specifiers) => specifiers.is_empty(),
            Self::Groups(groups) => groups.iter().all(Specification::is_empty),
        }
    }

    /// Returns `true` if this is a list of groups.
    pub fn is_group_list(&self) -> bool {
        matches!(self, Self::Groups(_))
    }

    /// Returns the flat specifiers; a group list has none.
    pub fn specifiers(&self) -> &[Specifier] {
        match self {
            Self::Specifiers(specifiers) => specifiers,
            Self::Groups(_) => &[],
        }
    }

    /// Returns the nested groups; a specifier list has none.
    pub fn groups(&self) -> &[Specification] {
        match self {
            Self::Specifiers(_) => &[],
            Self::Groups(groups) => groups,
        }
    }

    /// Returns the value of the last specifier whose key matches `key`,
    /// ignoring ASCII case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.specifiers()
            .iter()
            .rev()
            .find(|specifier| specifier.is(&[key]))
            .map(Specifier::value)
    }

    /// Returns the specification of a container's shell.
    ///
    /// A flat list applies to the whole container, so it is returned as is.
    /// For a group list this is group 0.
    pub fn shell(&self) -> &Specification {
        match self {
            Self::Specifiers(_) => self,
            Self::Groups(groups) => groups.first().unwrap_or(&EMPTY),
        }
    }

    /// Returns the specification of a container's `index`-th element type,
    /// counting from 1.
    ///
    /// A flat list is shared with every element. Missing groups are empty.
    pub fn element(&self, index: usize) -> &Specification {
        match self {
            Self::Specifiers(_) => self,
            Self::Groups(groups) => groups.get(index).unwrap_or(&EMPTY),
        }
    }
}
