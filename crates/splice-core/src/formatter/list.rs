//! Sequence and set formatters.
//!
//! Sequences render as `[ a, b ]` and sets as `{ a, b }`. Group 0 of a group
//! list configures the padded shell and group 1 the element formatter.

use std::collections::{BTreeSet, HashSet, VecDeque};

use indexmap::IndexSet;

use crate::{
    diagnostics::DiagnosticSink,
    formatter::{
        FormatContext, FormatTo, Formattable, Formatter,
        composite::{BRACES, BRACKETS, Delimiters, add, parse_shell},
        format_in_place, measure,
        options::Field,
        write_nested,
    },
    specification::Specification,
};

/// Ordered collections rendered with brackets.
pub trait Sequence {
    type Item;

    /// Returns the elements in order.
    fn items(&self) -> impl Iterator<Item = &Self::Item>;
}

/// Unordered collections rendered with braces, in iteration order.
pub trait Set {
    type Item;

    fn items(&self) -> impl Iterator<Item = &Self::Item>;
}

impl<T> Sequence for [T] {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> Sequence for Vec<T> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> Sequence for VecDeque<T> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T, S> Set for HashSet<T, S> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T> Set for BTreeSet<T> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T, S> Set for IndexSet<T, S> {
    type Item = T;

    fn items(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}

impl<T: Formattable> Formattable for [T] {
    type Formatter = SequenceFormatter<T::Formatter>;
}

impl<T: Formattable, const N: usize> Formattable for [T; N] {
    type Formatter = SequenceFormatter<T::Formatter>;
}

impl<T: Formattable> Formattable for Vec<T> {
    type Formatter = SequenceFormatter<T::Formatter>;
}

impl<T: Formattable> Formattable for VecDeque<T> {
    type Formatter = SequenceFormatter<T::Formatter>;
}

impl<T: Formattable, S> Formattable for HashSet<T, S> {
    type Formatter = SetFormatter<T::Formatter>;
}

impl<T: Formattable> Formattable for BTreeSet<T> {
    type Formatter = SetFormatter<T::Formatter>;
}

impl<T: Formattable, S> Formattable for IndexSet<T, S> {
    type Formatter = SetFormatter<T::Formatter>;
}

/// Shell field and element formatter shared by both collection kinds.
#[derive(Debug, Default, Clone)]
struct Collection<F> {
    field: Field,
    element: F,
}

impl<F> Collection<F> {
    fn parse<T>(&mut self, specification: &Specification, sink: &dyn DiagnosticSink, name: &str)
    where
        T: ?Sized,
        F: Formatter<T>,
    {
        parse_shell(&mut self.field, specification, sink, name);
        self.element.parse(specification.element(1), sink);
    }

    fn content<'v, T, I>(&self, delimiters: &Delimiters, items: I) -> (usize, usize)
    where
        T: ?Sized + 'v,
        F: Formatter<T>,
        I: Iterator<Item = &'v T>,
    {
        let mut count = 0;
        let mut total = (0, 0);
        for item in items {
            count += 1;
            total = add(total, measure(&self.element, item));
        }
        delimiters.measure(count, total)
    }

    fn write<'v, T, I>(
        &self,
        delimiters: &Delimiters,
        chars: usize,
        items: I,
        context: &mut FormatContext<'_>,
    ) where
        T: ?Sized + 'v,
        F: Formatter<T>,
        I: Iterator<Item = &'v T>,
    {
        self.field.write(chars, context, |context| {
            delimiters.write(items, context, |item, context| {
                write_nested(&self.element, item, context);
            });
        });
    }
}

/// Formatter for [`Sequence`] values: `[ a, b ]`.
#[derive(Debug, Default, Clone)]
pub struct SequenceFormatter<F> {
    inner: Collection<F>,
}

impl<S, F> Formatter<S> for SequenceFormatter<F>
where
    S: Sequence + ?Sized,
    F: Formatter<S::Item>,
{
    fn parse(&mut self, specification: &Specification, sink: &dyn DiagnosticSink) {
        self.inner
            .parse::<S::Item>(specification, sink, "sequence");
    }

    fn format(&self, value: &S) -> String {
        format_in_place(self, value)
    }

    fn in_place(&self) -> Option<&dyn FormatTo<S>> {
        self.inner
            .element
            .in_place()
            .map(|_| self as &dyn FormatTo<S>)
    }
}

impl<S, F> FormatTo<S> for SequenceFormatter<F>
where
    S: Sequence + ?Sized,
    F: Formatter<S::Item>,
{
    fn reserve(&self, value: &S) -> usize {
        let (bytes, chars) = self.inner.content(&BRACKETS, value.items());
        self.inner.field.reserve(bytes, chars)
    }

    fn char_count(&self, value: &S) -> usize {
        let (_, chars) = self.inner.content(&BRACKETS, value.items());
        self.inner.field.char_count(chars)
    }

    fn format_to(&self, value: &S, context: &mut FormatContext<'_>) {
        let (_, chars) = self.inner.content(&BRACKETS, value.items());
        self.inner.write(&BRACKETS, chars, value.items(), context);
    }
}

/// Formatter for [`Set`] values: `{ a, b }`.
#[derive(Debug, Default, Clone)]
pub struct SetFormatter<F> {
    inner: Collection<F>,
}

impl<S, F> Formatter<S> for SetFormatter<F>
where
    S: Set + ?Sized,
    F: Formatter<S::Item>,
{
    fn parse(&mut self, specification: &Specification, sink: &dyn DiagnosticSink) {
        self.inner.parse::<S::Item>(specification, sink, "set");
    }

    fn format(&self, value: &S) -> String {
        format_in_place(self, value)
    }

    fn in_place(&self) -> Option<&dyn FormatTo<S>> {
        self.inner
            .element
            .in_place()
            .map(|_| self as &dyn FormatTo<S>)
    }
}

impl<S, F> FormatTo<S> for SetFormatter<F>
where
    S: Set + ?Sized,
    F: Formatter<S::Item>,
{
    fn reserve(&self, value: &S) -> usize {
        let (bytes, chars) = self.inner.content(&BRACES, value.items());
        self.inner.field.reserve(bytes, chars)
    }

    fn char_count(&self, value: &S) -> usize {
        let (_, chars) = self.inner.content(&BRACES, value.items());
        self.inner.field.char_count(chars)
    }

    fn format_to(&self, value: &S, context: &mut FormatContext<'_>) {
        let (_, chars) = self.inner.content(&BRACES, value.items());
        self.inner.write(&BRACES, chars, value.items(), context);
    }
}
