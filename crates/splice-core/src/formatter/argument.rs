//! Type-erased arguments.
//!
//! The engine holds arguments of different types in one list. [`Argument`]
//! erases the value type, and [`BoundFormatter`] erases a formatter that has
//! been configured for one specification and bound to one value.

use std::any::type_name;

use crate::{
    diagnostics::DiagnosticSink,
    formatter::{FormatContext, Formattable, Formatter, write_nested},
    specification::Specification,
};

/// A value that can be bound to a formatter at run time.
///
/// Implemented for every [`Formattable`] type.
pub trait Argument {
    /// Creates the value's formatter, applies `specification` to it and binds
    /// it to the value.
    fn bind<'a>(
        &'a self,
        specification: &Specification,
        sink: &dyn DiagnosticSink,
    ) -> Box<dyn BoundFormatter + 'a>;

    /// Returns the name of the value type, for diagnostics.
    fn type_name(&self) -> &'static str;
}

impl<T: Formattable + ?Sized> Argument for T {
    fn bind<'a>(
        &'a self,
        specification: &Specification,
        sink: &dyn DiagnosticSink,
    ) -> Box<dyn BoundFormatter + 'a> {
        let mut formatter = T::Formatter::default();
        formatter.parse(specification, sink);
        Box::new(Bound {
            value: self,
            formatter,
        })
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// A configured formatter bound to a single value.
pub trait BoundFormatter {
    /// Returns the exact output length in bytes, or `None` if the formatter
    /// only supports whole-string formatting.
    fn reserve(&self) -> Option<usize>;

    /// Writes the output into `context`.
    ///
    /// Only meaningful after [`BoundFormatter::reserve`] returned a length.
    fn format_to(&self, context: &mut FormatContext<'_>);

    /// Formats the value into a new string.
    fn format(&self) -> String;
}

struct Bound<'a, T: Formattable + ?Sized> {
    value: &'a T,
    formatter: T::Formatter,
}

impl<T: Formattable + ?Sized> BoundFormatter for Bound<'_, T> {
    fn reserve(&self) -> Option<usize> {
        self.formatter
            .in_place()
            .map(|fast| fast.reserve(self.value))
    }

    fn format_to(&self, context: &mut FormatContext<'_>) {
        write_nested(&self.formatter, self.value, context);
    }

    fn format(&self) -> String {
        self.formatter.format(self.value)
    }
}
