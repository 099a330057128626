//! Pair and tuple formatting: `{ a, b }`.
//!
//! Group `k` of a group list configures element `k`, counting from 1.

use crate::{
    diagnostics::DiagnosticSink,
    formatter::{
        FormatContext, FormatTo, Formattable, Formatter,
        composite::{BRACES, ITEM_SEPARATOR, add, parse_shell},
        format_in_place, measure,
        options::Field,
        write_nested,
    },
    specification::Specification,
};

/// Formatter for tuples; `F` is the tuple of element formatters.
#[derive(Debug, Default, Clone)]
pub struct TupleFormatter<F> {
    field: Field,
    elements: F,
}

macro_rules! impl_tuple {
    ($len:expr; $(($T:ident, $F:ident, $index:tt)),+) => {
        impl<$($T: Formattable),+> Formattable for ($($T,)+) {
            type Formatter = TupleFormatter<($($T::Formatter,)+)>;
        }

        impl<$($T, $F: Formatter<$T>),+> Formatter<($($T,)+)> for TupleFormatter<($($F,)+)> {
            fn parse(&mut self, specification: &Specification, sink: &dyn DiagnosticSink) {
                parse_shell(&mut self.field, specification, sink, "tuple");
                $(
                    self.elements.$index.parse(specification.element($index + 1), sink);
                )+
            }

            fn format(&self, value: &($($T,)+)) -> String {
                format_in_place(self, value)
            }

            fn in_place(&self) -> Option<&dyn FormatTo<($($T,)+)>> {
                if true $(&& self.elements.$index.in_place().is_some())+ {
                    Some(self)
                } else {
                    None
                }
            }
        }

        impl<$($T, $F: Formatter<$T>),+> FormatTo<($($T,)+)> for TupleFormatter<($($F,)+)> {
            fn reserve(&self, value: &($($T,)+)) -> usize {
                let (bytes, chars) = self.content(value);
                self.field.reserve(bytes, chars)
            }

            fn char_count(&self, value: &($($T,)+)) -> usize {
                self.field.char_count(self.content(value).1)
            }

            fn format_to(&self, value: &($($T,)+), context: &mut FormatContext<'_>) {
                let (_, chars) = self.content(value);
                self.field.write(chars, context, |context| {
                    context.write_str(BRACES.open());
                    $(
                        if $index > 0 {
                            context.write_str(ITEM_SEPARATOR);
                        }
                        write_nested(&self.elements.$index, &value.$index, context);
                    )+
                    context.write_str(BRACES.close());
                });
            }
        }

        impl<$($F),+> TupleFormatter<($($F,)+)> {
            fn content<$($T),+>(&self, value: &($($T,)+)) -> (usize, usize)
            where
                $($F: Formatter<$T>),+
            {
                let mut total = (0, 0);
                $(
                    total = add(total, measure(&self.elements.$index, &value.$index));
                )+
                BRACES.measure($len, total)
            }
        }
    };
}

impl_tuple!(1; (A, FA, 0));
impl_tuple!(2; (A, FA, 0), (B, FB, 1));
impl_tuple!(3; (A, FA, 0), (B, FB, 1), (C, FC, 2));
impl_tuple!(4; (A, FA, 0), (B, FB, 1), (C, FC, 2), (D, FD, 3));
impl_tuple!(5; (A, FA, 0), (B, FB, 1), (C, FC, 2), (D, FD, 3), (E, FE, 4));
impl_tuple!(6; (A, FA, 0), (B, FB, 1), (C, FC, 2), (D, FD, 3), (E, FE, 4), (G, FG, 5));
impl_tuple!(7; (A, FA, 0), (B, FB, 1), (C, FC, 2), (D, FD, 3), (E, FE, 4), (G, FG, 5), (H, FH, 6));
impl_tuple!(8; (A, FA, 0), (B, FB, 1), (C, FC, 2), (D, FD, 3), (E, FE, 4), (G, FG, 5), (H, FH, 6), (I, FI, 7));

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        diagnostics::{CollectingSink, NullSink, WarningKind},
        specification::Specifier,
    };

    fn flat(pairs: &[(&str, &str)]) -> Specification {
        Specification::Specifiers(pairs.iter().map(|(k, v)| Specifier::new(*k, *v)).collect())
    }

    fn render<T: Formattable>(value: &T, spec: &Specification) -> String {
        let mut formatter = T::Formatter::default();
        formatter.parse(spec, &NullSink);
        let text = formatter.format(value);
        if let Some(fast) = formatter.in_place() {
            assert_eq!(fast.reserve(value), text.len());
        }
        text
    }

    #[test]
    fn test_pair() {
        assert_eq!(render(&(1, "one"), &Specification::empty()), "{ 1, one }");
        assert_eq!(render(&('x',), &Specification::empty()), "{ x }");
    }

    #[test]
    fn test_wide_tuple() {
        let value = (1u8, 2i16, 3u32, 4i64, 5u128, 6usize, 'g', "h");
        assert_eq!(
            render(&value, &Specification::empty()),
            "{ 1, 2, 3, 4, 5, 6, g, h }"
        );
    }

    #[test]
    fn test_groups_address_elements() {
        let spec = Specification::Groups(vec![
            flat(&[("width", "22"), ("justification", "center"), ("fill", "~")]),
            flat(&[("representation", "binary")]),
            Specification::empty(),
            flat(&[("precision", "2")]),
        ]);
        assert_eq!(render(&(5u8, true, 0.25f32), &spec), "~{ 101, true, 0.25 }~~");
    }

    #[test]
    fn test_flat_specification_is_shared() {
        let spec = flat(&[("sign", "both")]);
        assert_eq!(render(&(1, 2.5f64), &spec), "{ +1, +2.500000000000000 }");
    }

    #[test]
    fn test_shared_flat_key_unknown_to_element_warns() {
        let sink = CollectingSink::new();
        let mut formatter = <(i32, &str) as Formattable>::Formatter::default();
        Formatter::<(i32, &str)>::parse(&mut formatter, &flat(&[("digits", "2")]), &sink);
        assert_eq!(sink.count(WarningKind::UnknownSpecifier), 1);
        assert_eq!(
            Formatter::<(i32, &str)>::format(&formatter, &(3, "x")),
            "{ 03, x }"
        );
    }
}
