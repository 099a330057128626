//! The per-type formatter protocol and the built-in formatters.
//!
//! This module defines how a value turns into text for a placeholder.
//!
//! # Overview
//!
//! - [`Formattable`]: Implemented by value types; names the [`Formatter`] for the type.
//! - [`Formatter`]: Parses a [`Specification`] once and produces whole strings.
//! - [`FormatTo`]: The optional fast path. Reports the exact byte length of
//!   the output ([`FormatTo::reserve`]) and writes it into a pre-sized
//!   window ([`FormatTo::format_to`]) without an intermediate allocation.
//! - [`Argument`]: Type-erased view of a [`Formattable`] value, used by the
//!   engine to hold heterogeneous argument lists.
//!
//! # Capability Dispatch
//!
//! A value can only be used as an argument if its type implements
//! [`Formattable`], so a type without a formatter is rejected at compile
//! time. Every formatter provides [`Formatter::format`]; formatters that also
//! implement [`FormatTo`] advertise it by returning `Some(self)` from
//! [`Formatter::in_place`], and the engine then prefers the fast path.
//!
//! # Purity
//!
//! Formatters must be pure: the same value formatted with the same parsed
//! specification must always produce the same text. The engine relies on
//! this to copy the output of an earlier placeholder instead of formatting
//! the same argument twice.
//!
//! # Example
//!
//! ```
//! # use splice_core::diagnostics::NullSink;
//! # use splice_core::formatter::{Formattable, Formatter};
//! # use splice_core::specification::{Specification, Specifier};
//! let spec = Specification::Specifiers(vec![
//!     Specifier::new("use_separator", "true"),
//! ]);
//!
//! let mut formatter = <i64 as Formattable>::Formatter::default();
//! Formatter::<i64>::parse(&mut formatter, &spec, &NullSink);
//!
//! assert_eq!(Formatter::<i64>::format(&formatter, &1234567), "1,234,567");
//! ```

mod argument;
mod composite;
mod context;
mod float;
mod integer;
mod justification;
mod list;
mod map;
mod options;
mod text;
mod tuple;

pub use argument::{Argument, BoundFormatter};
pub use context::FormatContext;
pub use float::{Float, FloatFormatter, FloatRepresentation};
pub use integer::{HexCase, Integer, IntegerFormatter, IntegerRepresentation, Sign};
pub use justification::Justification;
pub use list::{Sequence, SequenceFormatter, Set, SetFormatter};
pub use map::{Map, MapEntry, MapEntryFormatter, MapFormatter};
pub use options::Field;
pub use text::{Textual, TextFormatter};
pub use tuple::TupleFormatter;

use crate::{diagnostics::DiagnosticSink, specification::Specification};

/// A value type that can be formatted into a placeholder.
///
/// Formatter types are generic over nested formatters rather than over the
/// value types they format, so a formatter never borrows from the value and
/// is always `'static`.
pub trait Formattable {
    /// The formatter used for values of this type.
    type Formatter: Formatter<Self> + 'static;
}

/// Formats values of type `T`.
///
/// A formatter is created with [`Default::default`], configured once through
/// [`Formatter::parse`] and can then format any number of values.
pub trait Formatter<T: ?Sized>: Default {
    /// Applies a parsed specification.
    ///
    /// Unknown keys and unusable values are reported to `sink` and leave the
    /// affected setting unchanged.
    fn parse(&mut self, specification: &Specification, sink: &dyn DiagnosticSink);

    /// Formats `value` into a new string.
    fn format(&self, value: &T) -> String;

    /// Returns the in-place fast path, if this formatter supports one.
    fn in_place(&self) -> Option<&dyn FormatTo<T>> {
        None
    }
}

/// The reserve-then-write fast path of a [`Formatter`].
pub trait FormatTo<T: ?Sized> {
    /// Returns the exact number of bytes [`FormatTo::format_to`] will write.
    fn reserve(&self, value: &T) -> usize;

    /// Returns the number of characters of the output, used by enclosing
    /// formatters to compute padding.
    ///
    /// The default assumes ASCII output.
    fn char_count(&self, value: &T) -> usize {
        self.reserve(value)
    }

    /// Writes exactly [`FormatTo::reserve`] bytes into `context`.
    fn format_to(&self, value: &T, context: &mut FormatContext<'_>);
}

/// Formats `value` through the in-place path of `formatter` into a new string.
///
/// Formatters implementing [`FormatTo`] use this as their
/// [`Formatter::format`].
pub fn format_in_place<T, F>(formatter: &F, value: &T) -> String
where
    T: ?Sized,
    F: FormatTo<T> + ?Sized,
{
    let mut bytes = vec![b' '; formatter.reserve(value)];
    let mut context = FormatContext::new(&mut bytes);
    formatter.format_to(value, &mut context);

    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

/// Returns the output length of a nested formatter in bytes and characters,
/// whichever path it supports.
pub(crate) fn measure<T, F>(formatter: &F, value: &T) -> (usize, usize)
where
    T: ?Sized,
    F: Formatter<T>,
{
    match formatter.in_place() {
        Some(fast) => (fast.reserve(value), fast.char_count(value)),
        None => {
            let text = formatter.format(value);
            (text.len(), text.chars().count())
        }
    }
}

/// Writes the output of a nested formatter, whichever path it supports.
pub(crate) fn write_nested<T, F>(formatter: &F, value: &T, context: &mut FormatContext<'_>)
where
    T: ?Sized,
    F: Formatter<T>,
{
    match formatter.in_place() {
        Some(fast) => fast.format_to(value, context),
        None => context.write_str(&formatter.format(value)),
    }
}

/// Formatter for references, delegating to the referenced type's formatter.
#[derive(Debug, Default, Clone)]
pub struct Borrowed<F>(F);

impl<T: Formattable + ?Sized> Formattable for &T {
    type Formatter = Borrowed<T::Formatter>;
}

impl<'a, T, F> Formatter<&'a T> for Borrowed<F>
where
    T: ?Sized,
    F: Formatter<T>,
{
    fn parse(&mut self, specification: &Specification, sink: &dyn DiagnosticSink) {
        self.0.parse(specification, sink);
    }

    fn format(&self, value: &&'a T) -> String {
        self.0.format(*value)
    }

    fn in_place(&self) -> Option<&dyn FormatTo<&'a T>> {
        self.0.in_place().map(|_| self as &dyn FormatTo<&'a T>)
    }
}

impl<'a, T, F> FormatTo<&'a T> for Borrowed<F>
where
    T: ?Sized,
    F: Formatter<T>,
{
    fn reserve(&self, value: &&'a T) -> usize {
        measure(&self.0, *value).0
    }

    fn char_count(&self, value: &&'a T) -> usize {
        measure(&self.0, *value).1
    }

    fn format_to(&self, value: &&'a T, context: &mut FormatContext<'_>) {
        write_nested(&self.0, *value, context);
    }
}
