//! Shell layout shared by the container formatters.

use crate::{
    diagnostics::DiagnosticSink,
    formatter::{FormatContext, options::{Field, unknown_key}},
    specification::Specification,
};

pub(crate) const ITEM_SEPARATOR: &str = ", ";
pub(crate) const KEY_SEPARATOR: &str = ": ";

/// Opening and closing text of a container.
pub(crate) struct Delimiters {
    open: &'static str,
    close: &'static str,
    empty: &'static str,
}

pub(crate) const BRACKETS: Delimiters = Delimiters {
    open: "[ ",
    close: " ]",
    empty: "[ ]",
};

pub(crate) const BRACES: Delimiters = Delimiters {
    open: "{ ",
    close: " }",
    empty: "{ }",
};

impl Delimiters {
    pub(crate) fn open(&self) -> &'static str {
        self.open
    }

    pub(crate) fn close(&self) -> &'static str {
        self.close
    }

    /// Returns the `(bytes, chars)` of a container holding `count` items whose
    /// own lengths add up to `content`.
    pub(crate) fn measure(&self, count: usize, content: (usize, usize)) -> (usize, usize) {
        if count == 0 {
            return (self.empty.len(), self.empty.len());
        }
        let shell = (self.open.len() + self.close.len())
            .saturating_add(ITEM_SEPARATOR.len().saturating_mul(count - 1));
        add(content, (shell, shell))
    }

    /// Writes the container, calling `write_item` for each item.
    pub(crate) fn write<I, W>(&self, items: I, context: &mut FormatContext<'_>, mut write_item: W)
    where
        I: IntoIterator,
        W: FnMut(I::Item, &mut FormatContext<'_>),
    {
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            context.write_str(self.empty);
            return;
        }

        context.write_str(self.open);
        for (index, item) in items.enumerate() {
            if index > 0 {
                context.write_str(ITEM_SEPARATOR);
            }
            write_item(item, context);
        }
        context.write_str(self.close);
    }
}

/// Applies the shell part of a container specification to `field`.
///
/// A flat list is shared with the element formatters, so keys other than
/// the field keys are left to them. Group 0 of a group list belongs to the
/// shell alone and anything else in it is unknown.
pub(crate) fn parse_shell(
    field: &mut Field,
    specification: &Specification,
    sink: &dyn DiagnosticSink,
    formatter: &str,
) {
    let shared = !specification.is_group_list();
    for specifier in specification.shell().specifiers() {
        if !field.apply(specifier, sink) && !shared {
            unknown_key(specifier, sink, formatter);
        }
    }
}

/// Adds two `(bytes, chars)` measurements.
pub(crate) fn add(a: (usize, usize), b: (usize, usize)) -> (usize, usize) {
    (a.0.saturating_add(b.0), a.1.saturating_add(b.1))
}
