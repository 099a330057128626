//! Specifier value parsing shared by the built-in formatters.

use std::str::FromStr;

use crate::{
    diagnostics::{DiagnosticSink, Warning, WarningKind},
    formatter::{FormatContext, Justification},
    specification::Specifier,
};

pub(crate) const JUSTIFICATION_KEYS: &[&str] = &["justification", "justify", "alignment", "align"];
pub(crate) const WIDTH_KEYS: &[&str] = &["width"];
pub(crate) const FILL_KEYS: &[&str] = &["fill", "fill_character"];

/// Width, fill character and justification of a padded field.
///
/// Every built-in formatter lays its content out inside a `Field`. The width
/// is a minimum in characters: content longer than the width is never cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    width: usize,
    fill: char,
    justification: Justification,
}

impl Default for Field {
    fn default() -> Self {
        Self::new(Justification::Left)
    }
}

impl Field {
    /// Creates a field of width 0 filled with spaces.
    pub fn new(justification: Justification) -> Self {
        Self {
            width: 0,
            fill: ' ',
            justification,
        }
    }

    /// Returns the minimum width in characters.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the fill character.
    pub fn fill(&self) -> char {
        self.fill
    }

    /// Returns the justification.
    pub fn justification(&self) -> Justification {
        self.justification
    }

    /// Applies `specifier` if it is a field key.
    ///
    /// Returns `false` if the key is not a field key; the caller decides
    /// whether that is worth a warning.
    pub fn apply(&mut self, specifier: &Specifier, sink: &dyn DiagnosticSink) -> bool {
        if specifier.is(WIDTH_KEYS) {
            if let Some(width) = parse_value(specifier, sink) {
                self.width = width;
            }
        } else if specifier.is(FILL_KEYS) {
            if let Some(fill) = parse_char(specifier, sink) {
                self.fill = fill;
            }
        } else if specifier.is(JUSTIFICATION_KEYS) {
            if let Some(justification) = parse_value(specifier, sink) {
                self.justification = justification;
            }
        } else {
            return false;
        }
        true
    }

    /// Returns the `(leading, trailing)` fill counts around content of
    /// `chars` characters.
    pub fn padding(&self, chars: usize) -> (usize, usize) {
        self.justification.split(self.width, chars)
    }

    /// Returns the byte length of the field around content of `bytes` bytes
    /// and `chars` characters, saturating at `usize::MAX`.
    pub fn reserve(&self, bytes: usize, chars: usize) -> usize {
        let (leading, trailing) = self.padding(chars);
        bytes.saturating_add(
            leading
                .saturating_add(trailing)
                .saturating_mul(self.fill.len_utf8()),
        )
    }

    /// Returns the character count of the field around content of `chars`
    /// characters.
    pub fn char_count(&self, chars: usize) -> usize {
        chars.max(self.width)
    }

    /// Writes the padded field, calling `content` between the pads.
    pub fn write(
        &self,
        chars: usize,
        context: &mut FormatContext<'_>,
        content: impl FnOnce(&mut FormatContext<'_>),
    ) {
        let (leading, trailing) = self.padding(chars);
        context.fill(self.fill, leading);
        content(context);
        context.fill(self.fill, trailing);
    }
}

/// Parses the value of `specifier` with [`FromStr`], warning on failure.
pub(crate) fn parse_value<V>(specifier: &Specifier, sink: &dyn DiagnosticSink) -> Option<V>
where
    V: FromStr,
{
    match specifier.value().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            invalid_value(specifier, sink, None);
            None
        }
    }
}

/// Parses a boolean specifier value.
pub(crate) fn parse_flag(specifier: &Specifier, sink: &dyn DiagnosticSink) -> Option<bool> {
    match specifier.value().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => {
            invalid_value(specifier, sink, Some("expected true or false"));
            None
        }
    }
}

/// Parses a single-character specifier value.
pub(crate) fn parse_char(specifier: &Specifier, sink: &dyn DiagnosticSink) -> Option<char> {
    let mut chars = specifier.value().chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => {
            invalid_value(specifier, sink, Some("expected a single character"));
            None
        }
    }
}

/// Parses a strictly positive count.
pub(crate) fn parse_count(specifier: &Specifier, sink: &dyn DiagnosticSink) -> Option<usize> {
    match specifier.value().parse::<usize>() {
        Ok(count) if count > 0 => Some(count),
        _ => {
            invalid_value(specifier, sink, Some("expected a positive number"));
            None
        }
    }
}

pub(crate) fn invalid_value(specifier: &Specifier, sink: &dyn DiagnosticSink, hint: Option<&str>) {
    let mut message = format!(
        "invalid value `{}` for specifier `{}`",
        specifier.value(),
        specifier.key()
    );
    if let Some(hint) = hint {
        message.push_str(": ");
        message.push_str(hint);
    }
    sink.warn(Warning::new(WarningKind::InvalidSpecifierValue, message));
}

pub(crate) fn unknown_key(specifier: &Specifier, sink: &dyn DiagnosticSink, formatter: &str) {
    sink.warn(Warning::new(
        WarningKind::UnknownSpecifier,
        format!(
            "specifier `{}` is not supported by the {formatter} formatter",
            specifier.key()
        ),
    ));
}

/// Number of group separators inside `digits` digits grouped by `group`.
pub(crate) fn separator_count(digits: usize, group: usize) -> usize {
    if digits == 0 || group == 0 {
        0
    } else {
        (digits - 1) / group
    }
}

/// Returns `true` if a separator goes before the digit at `index`, counting
/// from the most significant of `digits` digits.
pub(crate) fn separator_before(index: usize, digits: usize, group: usize) -> bool {
    group > 0 && index > 0 && (digits - index) % group == 0
}
