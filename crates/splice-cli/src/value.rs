//! Dynamically typed command-line values.
//!
//! Values are typed by their text: integers, then floats, then booleans,
//! else strings. A `str:` prefix keeps the rest of the value as a string.

use splice::Arg;

/// Prefix forcing a value to be a string.
pub const STRING_PREFIX: &str = "str:";

/// A value given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

impl Value {
    /// Types a raw command-line value.
    pub fn parse(raw: &str) -> Self {
        if let Some(text) = raw.strip_prefix(STRING_PREFIX) {
            return Self::Text(text.to_string());
        }
        if let Ok(value) = raw.parse::<i64>() {
            return Self::Integer(value);
        }
        if let Ok(value) = raw.parse::<u64>() {
            return Self::Unsigned(value);
        }
        if looks_numeric(raw) {
            if let Ok(value) = raw.parse::<f64>() {
                return Self::Float(value);
            }
        }
        match raw {
            "true" => Self::Boolean(true),
            "false" => Self::Boolean(false),
            _ => Self::Text(raw.to_string()),
        }
    }

    /// Borrows the value as an unnamed argument.
    pub fn to_arg(&self) -> Arg<'_> {
        match self {
            Self::Integer(value) => Arg::new(*value),
            Self::Unsigned(value) => Arg::new(*value),
            Self::Float(value) => Arg::new(*value),
            Self::Boolean(value) => Arg::new(*value),
            Self::Text(value) => Arg::new(value.as_str()),
        }
    }

    /// Borrows the value as a named argument.
    pub fn to_named_arg<'a>(&'a self, name: &'a str) -> Arg<'a> {
        match self {
            Self::Integer(value) => Arg::named(name, *value),
            Self::Unsigned(value) => Arg::named(name, *value),
            Self::Float(value) => Arg::named(name, *value),
            Self::Boolean(value) => Arg::named(name, *value),
            Self::Text(value) => Arg::named(name, value.as_str()),
        }
    }
}

/// Rejects words like `inf` and `nan` that `f64` would otherwise accept.
fn looks_numeric(raw: &str) -> bool {
    raw.trim_start_matches(['+', '-'])
        .starts_with(|ch: char| ch.is_ascii_digit() || ch == '.')
}
