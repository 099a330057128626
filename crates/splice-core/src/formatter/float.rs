//! Floating-point formatting in fixed and scientific notation.
//!
//! Digits are produced by the standard library's correctly rounded decimal
//! conversion into a stack buffer, so no heap allocation happens on the
//! in-place path.

use std::{
    fmt::{self, Write as _},
    str::FromStr,
};

use crate::{
    diagnostics::DiagnosticSink,
    formatter::{
        FormatContext, FormatTo, Formattable, Formatter, HexCase, Justification, Sign,
        format_in_place,
        options::{
            Field, parse_char, parse_count, parse_flag, parse_value, separator_before,
            separator_count, unknown_key,
        },
    },
    specification::Specification,
};

/// Largest fixed rendering: 309 integer digits of `f64::MAX`, the point
/// and 17 fraction digits.
const DIGIT_BUFFER: usize = 384;

/// Primitive floating-point types.
pub trait Float: Copy + fmt::Display + fmt::LowerExp {
    /// Decimal digits the type always represents exactly.
    const DIGITS: usize;

    /// Decimal digits needed to round-trip any value.
    const MAX_DIGITS10: usize;

    fn is_nan(self) -> bool;

    fn is_infinite(self) -> bool;

    fn is_sign_negative(self) -> bool;

    fn abs(self) -> Self;
}

macro_rules! impl_float {
    ($t:ty, $max_digits10:expr) => {
        impl Float for $t {
            const DIGITS: usize = <$t>::DIGITS as usize;
            const MAX_DIGITS10: usize = $max_digits10;

            fn is_nan(self) -> bool {
                <$t>::is_nan(self)
            }

            fn is_infinite(self) -> bool {
                <$t>::is_infinite(self)
            }

            fn is_sign_negative(self) -> bool {
                <$t>::is_sign_negative(self)
            }

            fn abs(self) -> Self {
                <$t>::abs(self)
            }
        }

        impl Formattable for $t {
            type Formatter = FloatFormatter;
        }
    };
}

impl_float!(f32, 9);
impl_float!(f64, 17);

/// The notation a float is written in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatRepresentation {
    #[default]
    Fixed,
    Scientific,
}

impl FromStr for FloatRepresentation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "scientific" | "exponent" => Ok(Self::Scientific),
            _ => Err(format!(
                "invalid representation `{s}`, valid values: fixed, scientific"
            )),
        }
    }
}

/// Formatter for `f32` and `f64`.
///
/// # Specifiers
///
/// | Key | Values | Default |
/// |-----|--------|---------|
/// | `representation` | `fixed`, `scientific` | `fixed` |
/// | `precision` | digits after the point | 6 (`f32`), 15 (`f64`) |
/// | `sign` | `negative_only`, `aligned`, `both` | `negative_only` |
/// | `width`, `fill`, `justification` | see [`Field`] | right-justified |
/// | `use_separator`, `group_size`, `separator` | integer part grouping (fixed only) | off, 3, `,` |
/// | `case` | `lower`, `upper` (`e`/`E`, `nan`/`NAN`, `inf`/`INF`) | `lower` |
///
/// Precision beyond the round-trip digit count of the type (9 for `f32`, 17
/// for `f64`) is written as trailing zeros instead of conversion noise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatFormatter {
    representation: FloatRepresentation,
    precision: Option<usize>,
    sign: Sign,
    field: Field,
    use_separator: bool,
    group_size: usize,
    separator: char,
    case: HexCase,
}

impl Default for FloatFormatter {
    fn default() -> Self {
        Self {
            representation: FloatRepresentation::default(),
            precision: None,
            sign: Sign::default(),
            field: Field::new(Justification::Right),
            use_separator: false,
            group_size: 3,
            separator: ',',
            case: HexCase::default(),
        }
    }
}

impl FloatFormatter {
    /// Returns the active representation.
    pub fn representation(&self) -> FloatRepresentation {
        self.representation
    }

    fn render<T: Float>(&self, value: T) -> Rendered {
        let negative = value.is_sign_negative() && !value.is_nan();
        let sign = if value.is_nan() {
            None
        } else {
            self.sign.character(negative)
        };

        let mut digits = DigitBuffer::default();
        if value.is_nan() || value.is_infinite() {
            let special = match (value.is_nan(), self.case) {
                (true, HexCase::Lower) => "nan",
                (true, HexCase::Upper) => "NAN",
                (false, HexCase::Lower) => "inf",
                (false, HexCase::Upper) => "INF",
            };
            digits.push(special);
            return Rendered {
                sign,
                digits,
                integer_len: 0,
                extra_zeros: 0,
                exponent: None,
            };
        }

        let requested = self.precision.unwrap_or(T::DIGITS);
        let precision = requested.min(T::MAX_DIGITS10);
        let magnitude = value.abs();

        let exponent = match self.representation {
            FloatRepresentation::Fixed => {
                // Fits DIGIT_BUFFER for every finite value.
                let _ = write!(digits, "{magnitude:.precision$}");
                None
            }
            FloatRepresentation::Scientific => {
                let _ = write!(digits, "{magnitude:.precision$e}");
                digits.split_exponent()
            }
        };

        let integer_len = match self.representation {
            FloatRepresentation::Fixed if self.use_separator => digits
                .as_str()
                .find('.')
                .unwrap_or(digits.as_str().len()),
            _ => 0,
        };

        Rendered {
            sign,
            digits,
            integer_len,
            extra_zeros: requested - precision,
            exponent,
        }
    }
}

impl<T: Float> Formatter<T> for FloatFormatter {
    fn parse(&mut self, specification: &Specification, sink: &dyn DiagnosticSink) {
        for specifier in specification.shell().specifiers() {
            if self.field.apply(specifier, sink) {
                continue;
            }

            if specifier.is(&["representation"]) {
                if let Some(representation) = parse_value(specifier, sink) {
                    self.representation = representation;
                }
            } else if specifier.is(&["precision"]) {
                if let Some(precision) = parse_value(specifier, sink) {
                    self.precision = Some(precision);
                }
            } else if specifier.is(&["sign"]) {
                if let Some(sign) = parse_value(specifier, sink) {
                    self.sign = sign;
                }
            } else if specifier.is(&["use_separator", "use_separator_character"]) {
                if let Some(flag) = parse_flag(specifier, sink) {
                    self.use_separator = flag;
                }
            } else if specifier.is(&["group_size"]) {
                if let Some(size) = parse_count(specifier, sink) {
                    self.group_size = size;
                }
            } else if specifier.is(&["separator", "separator_character"]) {
                if let Some(separator) = parse_char(specifier, sink) {
                    self.separator = separator;
                }
            } else if specifier.is(&["case"]) {
                if let Some(case) = parse_value(specifier, sink) {
                    self.case = case;
                }
            } else {
                unknown_key(specifier, sink, "float");
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

impl<T: Float> FormatTo<T> for FloatFormatter {
    fn reserve(&self, value: &T) -> usize {
        let rendered = self.render(*value);
        let separators = separator_count(rendered.integer_len, self.group_size);
        self.field.reserve(
            rendered.bytes(separators, self.separator),
            rendered.chars(separators),
        )
    }

    fn char_count(&self, value: &T) -> usize {
        let rendered = self.render(*value);
        let separators = separator_count(rendered.integer_len, self.group_size);
        self.field.char_count(rendered.chars(separators))
    }

    fn format_to(&self, value: &T, context: &mut FormatContext<'_>) {
        let rendered = self.render(*value);
        let separators = separator_count(rendered.integer_len, self.group_size);
        let group = if rendered.integer_len > 0 {
            self.group_size
        } else {
            0
        };

        self.field
            .write(rendered.chars(separators), context, |context| {
                if let Some(sign) = rendered.sign {
                    context.write_char(sign);
                }

                let text = rendered.digits.as_str();
                let (integer, rest) = text.split_at(rendered.integer_len);
                for (index, digit) in integer.chars().enumerate() {
                    if separator_before(index, rendered.integer_len, group) {
                        context.write_char(self.separator);
                    }
                    context.write_char(digit);
                }
                context.write_str(rest);
                context.fill('0', rendered.extra_zeros);

                if let Some(exponent) = rendered.exponent {
                    context.write_char(match self.case {
                        HexCase::Lower => 'e',
                        HexCase::Upper => 'E',
                    });
                    context.write_char(if exponent < 0 { '-' } else { '+' });
                    let magnitude = exponent.unsigned_abs();
                    if magnitude < 10 {
                        context.write_char('0');
                    }
                    let mut buffer = DigitBuffer::default();
                    let _ = write!(buffer, "{magnitude}");
                    context.write_str(buffer.as_str());
                }
            });
    }
}

/// The pieces of one rendered value.
struct Rendered {
    sign: Option<char>,
    /// Integer digits, point and fraction digits (or the mantissa in
    /// scientific notation), without sign or exponent.
    digits: DigitBuffer,
    /// Length of the integer part when grouping applies, else 0.
    integer_len: usize,
    extra_zeros: usize,
    exponent: Option<i32>,
}

impl Rendered {
    fn chars(&self, separators: usize) -> usize {
        usize::from(self.sign.is_some())
            .saturating_add(self.digits.as_str().len())
            .saturating_add(separators)
            .saturating_add(self.extra_zeros)
            .saturating_add(self.exponent.map_or(0, exponent_len))
    }

    fn bytes(&self, separators: usize, separator: char) -> usize {
        self.sign
            .map_or(0, char::len_utf8)
            .saturating_add(self.digits.as_str().len())
            .saturating_add(separators.saturating_mul(separator.len_utf8()))
            .saturating_add(self.extra_zeros)
            .saturating_add(self.exponent.map_or(0, exponent_len))
    }
}

/// Length of `e±DD`, with at least two exponent digits.
fn exponent_len(exponent: i32) -> usize {
    let digits = match exponent.unsigned_abs().checked_ilog10() {
        Some(log) => log as usize + 1,
        None => 1,
    };
    2 + digits.max(2)
}

/// Fixed-capacity ASCII buffer implementing [`fmt::Write`].
struct DigitBuffer {
    bytes: [u8; DIGIT_BUFFER],
    len: usize,
}

impl Default for DigitBuffer {
    fn default() -> Self {
        Self {
            bytes: [0; DIGIT_BUFFER],
            len: 0,
        }
    }
}

impl DigitBuffer {
    fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len]).unwrap_or_default()
    }

    fn push(&mut self, text: &str) {
        let _ = self.write_str(text);
    }

    /// Cuts a trailing `e<exponent>` off and returns the exponent.
    fn split_exponent(&mut self) -> Option<i32> {
        let text = self.as_str();
        let position = text.find('e')?;
        let exponent = text[position + 1..].parse().ok()?;
        self.len = position;
        Some(exponent)
    }
}

impl fmt::Write for DigitBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let target = self.bytes.get_mut(self.len..end).ok_or(fmt::Error)?;
        target.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::*;
    use crate::{
        diagnostics::{CollectingSink, NullSink, WarningKind},
        specification::Specifier,
    };

    fn formatter(pairs: &[(&str, &str)]) -> FloatFormatter {
        let spec =
            Specification::Specifiers(pairs.iter().map(|(k, v)| Specifier::new(*k, *v)).collect());
        let mut formatter = FloatFormatter::default();
        Formatter::<f64>::parse(&mut formatter, &spec, &NullSink);
        formatter
    }

    #[test]
    fn test_huge_precision_saturates_reserve() {
        let max = usize::MAX.to_string();
        for representation in ["fixed", "scientific"] {
            let formatter = formatter(&[
                ("precision", max.as_str()),
                ("representation", representation),
                ("use_separator", "true"),
            ]);
            assert_eq!(FormatTo::<f64>::reserve(&formatter, &1234.5), usize::MAX);
        }
    }

    fn render<T: Float>(value: T, pairs: &[(&str, &str)]) -> String {
        let formatter = formatter(pairs);
        let text = Formatter::<T>::format(&formatter, &value);
        assert_eq!(
            FormatTo::<T>::reserve(&formatter, &value),
            text.len(),
            "reserve must match output of `{text}`"
        );
        text
    }

    #[test]
    fn test_default_precision_follows_type() {
        assert_eq!(render(1.5f32, &[]), "1.500000");
        assert_eq!(render(1.5f64, &[]), "1.500000000000000");
    }

    #[test]
    fn test_fixed_precision() {
        assert_eq!(render(3.14159f64, &[("precision", "2")]), "3.14");
        assert_eq!(render(2.4f64, &[("precision", "0")]), "2");
        assert_eq!(render(-0.125f64, &[("precision", "3")]), "-0.125");
    }

    #[test]
    fn test_precision_beyond_round_trip_pads_with_zeros() {
        let text = render(0.1f32, &[("precision", "12")]);
        assert_eq!(text, "0.100000001000");
        assert_eq!(text.len(), 2 + 12);

        let text = render(0.1f64, &[("precision", "20")]);
        assert_eq!(text, "0.10000000000000001000");
    }

    #[test]
    fn test_scientific() {
        let scientific = [("representation", "scientific"), ("precision", "3")];
        assert_eq!(render(1234.56f64, &scientific), "1.235e+03");
        assert_eq!(render(0.00012f64, &scientific), "1.200e-04");
        assert_eq!(render(0.0f64, &scientific), "0.000e+00");
        assert_eq!(render(1e300f64, &scientific), "1.000e+300");
        assert_eq!(
            render(
                -1234.5f64,
                &[("representation", "scientific"), ("precision", "1"), ("case", "upper")]
            ),
            "-1.2E+03"
        );
    }

    #[test]
    fn test_grouping_integer_part() {
        let grouped = [("use_separator", "true"), ("precision", "2")];
        assert_eq!(render(1234567.891f64, &grouped), "1,234,567.89");
        assert_eq!(render(-999.5f64, &grouped), "-999.50");
        assert_eq!(render(12.0f64, &[("use_separator", "true"), ("precision", "0")]), "12");
    }

    #[test]
    fn test_special_values() {
        assert_eq!(render(f64::NAN, &[]), "nan");
        assert_eq!(render(f64::NAN, &[("sign", "both")]), "nan");
        assert_eq!(render(f64::INFINITY, &[]), "inf");
        assert_eq!(render(f64::NEG_INFINITY, &[]), "-inf");
        assert_eq!(render(f32::INFINITY, &[("sign", "both")]), "+inf");
        assert_eq!(render(f64::NAN, &[("case", "upper"), ("width", "5")]), "  NAN");
    }

    #[test]
    fn test_sign_and_field() {
        assert_eq!(render(1.0f64, &[("precision", "1"), ("sign", "aligned")]), " 1.0");
        assert_eq!(render(1.0f64, &[("precision", "1"), ("sign", "both")]), "+1.0");
        assert_eq!(
            render(1.0f64, &[("precision", "1"), ("width", "6"), ("fill", "0")]),
            "0001.0"
        );
        assert_eq!(
            render(1.0f64, &[("precision", "1"), ("width", "6"), ("justify", "left")]),
            "1.0   "
        );
    }

    #[test]
    fn test_extreme_magnitudes() {
        let text = render(f64::MAX, &[("precision", "17")]);
        assert_eq!(text.find('.'), Some(309));
        assert_eq!(text.len(), 309 + 1 + 17);

        let text = render(f64::MIN_POSITIVE, &[]);
        assert_eq!(text, "0.000000000000000");
    }

    #[test]
    fn test_output_parses_back() {
        for value in [0.1f64, 2.0 / 3.0, 123456.789, -98.7654321] {
            let text = render(value, &[("precision", "17")]);
            let parsed: f64 = text.parse().expect("fixed output is a valid float");
            assert!(approx_eq!(f64, parsed, value, ulps = 2));
        }
    }

    #[test]
    fn test_invalid_specifiers_warn() {
        let sink = CollectingSink::new();
        let spec = Specification::Specifiers(vec![
            Specifier::new("representation", "hexadecimal"),
            Specifier::new("precision", "many"),
            Specifier::new("digits", "4"),
        ]);
        let mut formatter = FloatFormatter::default();
        Formatter::<f32>::parse(&mut formatter, &spec, &sink);

        assert_eq!(sink.count(WarningKind::InvalidSpecifierValue), 2);
        assert_eq!(sink.count(WarningKind::UnknownSpecifier), 1);
        assert_eq!(formatter.representation(), FloatRepresentation::Fixed);
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{diagnostics::NullSink, specification::Specifier};

    // ===================
    // Strategies
    // ===================

    fn float_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![
            8 => -1e12f64..1e12,
            1 => any::<f64>(),
            1 => Just(f64::NAN),
        ]
    }

    fn configured(representation: &str, precision: usize, separator: bool) -> FloatFormatter {
        let spec = Specification::Specifiers(vec![
            Specifier::new("representation", representation),
            Specifier::new("precision", precision.to_string()),
            Specifier::new("use_separator", separator.to_string()),
            Specifier::new("sign", "aligned"),
        ]);
        let mut formatter = FloatFormatter::default();
        Formatter::<f64>::parse(&mut formatter, &spec, &NullSink);
        formatter
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Reserved length always equals the written length.
    fn check_reserve_matches_output(
        value: f64,
        representation: &str,
        precision: usize,
        separator: bool,
    ) -> Result<(), TestCaseError> {
        let formatter = configured(representation, precision, separator);
        let text = Formatter::<f64>::format(&formatter, &value);
        prop_assert_eq!(FormatTo::<f64>::reserve(&formatter, &value), text.len());
        prop_assert_eq!(
            FormatTo::<f64>::char_count(&formatter, &value),
            text.chars().count()
        );
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn reserve_matches_output(
            value in float_strategy(),
            representation in prop_oneof![Just("fixed"), Just("scientific")],
            precision in 0usize..24,
            separator in any::<bool>(),
        ) {
            check_reserve_matches_output(value, representation, precision, separator)?;
        }
    }
}
