//! Formatting of strings, characters and booleans.

use std::borrow::Cow;

use crate::{
    diagnostics::DiagnosticSink,
    formatter::{
        FormatContext, FormatTo, Formattable, Formatter, format_in_place,
        options::{Field, unknown_key},
    },
    specification::Specification,
};

/// Values that are formatted as their text.
pub trait Textual {
    /// Calls `f` with the text of the value.
    fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R;
}

impl Textual for str {
    fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(self)
    }
}

impl Textual for String {
    fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(self)
    }
}

impl Textual for Cow<'_, str> {
    fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(self)
    }
}

impl Textual for char {
    fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let mut encoded = [0; 4];
        f(self.encode_utf8(&mut encoded))
    }
}

impl Textual for bool {
    fn with_text<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(if *self { "true" } else { "false" })
    }
}

impl Formattable for str {
    type Formatter = TextFormatter;
}

impl Formattable for String {
    type Formatter = TextFormatter;
}

impl Formattable for Cow<'_, str> {
    type Formatter = TextFormatter;
}

impl Formattable for char {
    type Formatter = TextFormatter;
}

impl Formattable for bool {
    type Formatter = TextFormatter;
}

/// Formatter for [`Textual`] values.
///
/// Supports `width`, `fill` and `justification` (left by default). Width is
/// counted in characters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextFormatter {
    field: Field,
}

impl<T: Textual + ?Sized> Formatter<T> for TextFormatter {
    fn parse(&mut self, specification: &Specification, sink: &dyn DiagnosticSink) {
        for specifier in specification.shell().specifiers() {
            if !self.field.apply(specifier, sink) {
                unknown_key(specifier, sink, "text");
            }
        }
    }

    fn format(&self, value: &T) -> String {
        format_in_place(self, value)
    }

    fn in_place(&self) -> Option<&dyn FormatTo<T>> {
        Some(self)
    }
}

impl<T: Textual + ?Sized> FormatTo<T> for TextFormatter {
    fn reserve(&self, value: &T) -> usize {
        value.with_text(|text| self.field.reserve(text.len(), text.chars().count()))
    }

    fn char_count(&self, value: &T) -> usize {
        value.with_text(|text| self.field.char_count(text.chars().count()))
    }

    fn format_to(&self, value: &T, context: &mut FormatContext<'_>) {
        value.with_text(|text| {
            self.field
                .write(text.chars().count(), context, |context| context.write_str(text));
        });
    }
}
