//! Integer formatting in decimal, binary and hexadecimal.
//!
//! The output length is computed arithmetically from the digit count, sign,
//! prefix and separators, so integers always take the in-place fast path.
//!
//! Negative values in binary and hexadecimal are written in two's complement
//! over the full bit width of the storage type (`-1i8` is `11111111`), while
//! non-negative values use their minimal bit length (`5u32` is `101`). The
//! decimal representation writes an explicit sign instead.

use std::str::FromStr;

use crate::{
    diagnostics::DiagnosticSink,
    formatter::{
        FormatContext, FormatTo, Formattable, Formatter, Justification, format_in_place,
        options::{
            Field, parse_char, parse_count, parse_flag, parse_value, separator_before,
            separator_count, unknown_key,
        },
    },
    specification::Specification,
};

/// Longest decimal expansion of a `u128`.
const MAX_DECIMAL_DIGITS: usize = 39;

/// Primitive integer types.
pub trait Integer: Copy {
    /// Bit width of the storage type.
    const BITS: u32;

    /// Returns `true` for values below zero.
    fn is_negative(self) -> bool;

    /// Returns the absolute value.
    fn magnitude(self) -> u128;

    /// Returns the two's complement bit pattern in the low [`Integer::BITS`] bits.
    fn bit_pattern(self) -> u128;
}

fn low_bits_mask(bits: u32) -> u128 {
    if bits >= u128::BITS {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

macro_rules! impl_signed_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl Integer for $t {
                const BITS: u32 = <$t>::BITS;

                fn is_negative(self) -> bool {
                    self < 0
                }

                fn magnitude(self) -> u128 {
                    self.unsigned_abs() as u128
                }

                fn bit_pattern(self) -> u128 {
                    (self as i128 as u128) & low_bits_mask(Self::BITS)
                }
            }

            impl Formattable for $t {
                type Formatter = IntegerFormatter;
            }
        )*
    };
}

macro_rules! impl_unsigned_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl Integer for $t {
                const BITS: u32 = <$t>::BITS;

                fn is_negative(self) -> bool {
                    false
                }

                fn magnitude(self) -> u128 {
                    self as u128
                }

                fn bit_pattern(self) -> u128 {
                    self as u128
                }
            }

            impl Formattable for $t {
                type Formatter = IntegerFormatter;
            }
        )*
    };
}

impl_signed_integer!(i8, i16, i32, i64, i128, isize);
impl_unsigned_integer!(u8, u16, u32, u64, u128, usize);

/// The base an integer is written in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerRepresentation {
    #[default]
    Decimal,
    Binary,
    Hexadecimal,
}

impl IntegerRepresentation {
    fn default_group_size(self) -> usize {
        match self {
            Self::Decimal => 3,
            Self::Binary | Self::Hexadecimal => 4,
        }
    }
}

impl FromStr for IntegerRepresentation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "decimal" | "dec" => Ok(Self::Decimal),
            "binary" | "bin" => Ok(Self::Binary),
            "hexadecimal" | "hex" => Ok(Self::Hexadecimal),
            _ => Err(format!(
                "invalid representation `{s}`, valid values: decimal, binary, hexadecimal"
            )),
        }
    }
}

/// When a sign character is written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// `-` for negative values only.
    #[default]
    NegativeOnly,
    /// `-` for negative values, a space for the rest.
    Aligned,
    /// `-` for negative values, `+` for the rest.
    Both,
}

impl Sign {
    /// Returns the sign character for a value with the given sign.
    pub fn character(self, negative: bool) -> Option<char> {
        match (negative, self) {
            (true, _) => Some('-'),
            (false, Self::NegativeOnly) => None,
            (false, Self::Aligned) => Some(' '),
            (false, Self::Both) => Some('+'),
        }
    }
}

impl FromStr for Sign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "negative_only" | "negative" => Ok(Self::NegativeOnly),
            "aligned" | "space" => Ok(Self::Aligned),
            "both" | "always" => Ok(Self::Both),
            _ => Err(format!(
                "invalid sign `{s}`, valid values: negative_only, aligned, both"
            )),
        }
    }
}

/// Letter case of hexadecimal digits, including the `f` sign-extension nibble.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexCase {
    #[default]
    Lower,
    Upper,
}

impl FromStr for HexCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lower" | "lowercase" => Ok(Self::Lower),
            "upper" | "uppercase" => Ok(Self::Upper),
            _ => Err(format!("invalid case `{s}`, valid values: lower, upper")),
        }
    }
}

/// Formatter for all primitive integer types.
///
/// # Specifiers
///
/// | Key | Values | Default |
/// |-----|--------|---------|
/// | `representation` | `decimal`, `binary`, `hexadecimal` | `decimal` |
/// | `sign` | `negative_only`, `aligned`, `both` | `negative_only` |
/// | `width`, `fill`, `justification` | see [`Field`] | right-justified |
/// | `use_separator` | boolean | `false` |
/// | `group_size` | positive number | 3 (decimal), 4 (binary, hexadecimal) |
/// | `separator` | character | `,` |
/// | `use_base_prefix` | boolean (`0b`, `0x`) | `false` |
/// | `digits` | positive number | natural digit count |
/// | `case` | `lower`, `upper` | `lower` |
///
/// `sign` only affects decimal output; binary and hexadecimal encode the
/// sign in the bits. In decimal `digits` is a minimum, padded with `0`. In
/// binary and hexadecimal it is exact: extra digits are sign-extended (`0`
/// for non-negative values, `1`/`f` for negative ones) and missing digits
/// drop the most significant ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerFormatter {
    representation: IntegerRepresentation,
    sign: Sign,
    field: Field,
    use_separator: bool,
    group_size: Option<usize>,
    separator: char,
    use_base_prefix: bool,
    digits: Option<usize>,
    case: HexCase,
}

impl Default for IntegerFormatter {
    fn default() -> Self {
        Self {
            representation: IntegerRepresentation::default(),
            sign: Sign::default(),
            field: Field::new(Justification::Right),
            use_separator: false,
            group_size: None,
            separator: ',',
            use_base_prefix: false,
            digits: None,
            case: HexCase::default(),
        }
    }
}

impl IntegerFormatter {
    /// Returns the active representation.
    pub fn representation(&self) -> IntegerRepresentation {
        self.representation
    }

    fn group_size(&self) -> usize {
        self.group_size
            .unwrap_or_else(|| self.representation.default_group_size())
    }

    fn layout<T: Integer>(&self, value: T) -> Layout {
        let digits = Digits::new(value, self.representation);
        let count = match (self.representation, self.digits) {
            (IntegerRepresentation::Decimal, Some(minimum)) => digits.natural.max(minimum),
            (_, Some(exact)) => exact,
            (_, None) => digits.natural,
        };

        let sign = match self.representation {
            IntegerRepresentation::Decimal => self.sign.character(digits.negative),
            IntegerRepresentation::Binary | IntegerRepresentation::Hexadecimal => None,
        };

        let prefix = match (self.use_base_prefix, self.representation) {
            (true, IntegerRepresentation::Binary) => "0b",
            (true, IntegerRepresentation::Hexadecimal) => "0x",
            _ => "",
        };

        let separators = if self.use_separator {
            separator_count(count, self.group_size())
        } else {
            0
        };

        Layout {
            digits,
            count,
            sign,
            prefix,
            separators,
        }
    }
}

impl<T: Integer> Formatter<T> for IntegerFormatter {
    fn parse(&mut self, specification: &Specification, sink: &dyn DiagnosticSink) {
        for specifier in specification.shell().specifiers() {
            if self.field.apply(specifier, sink) {
                continue;
            }

            if specifier.is(&["representation"]) {
                if let Some(representation) = parse_value(specifier, sink) {
                    self.representation = representation;
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
                    self.group_size = Some(size);
                }
            } else if specifier.is(&["separator", "separator_character"]) {
                if let Some(separator) = parse_char(specifier, sink) {
                    self.separator = separator;
                }
            } else if specifier.is(&["use_base_prefix", "base_prefix"]) {
                if let Some(flag) = parse_flag(specifier, sink) {
                    self.use_base_prefix = flag;
                }
            } else if specifier.is(&["digits"]) {
                if let Some(digits) = parse_count(specifier, sink) {
                    self.digits = Some(digits);
                }
            } else if specifier.is(&["case"]) {
                if let Some(case) = parse_value(specifier, sink) {
                    self.case = case;
                }
            } else {
                unknown_key(specifier, sink, "integer");
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

impl<T: Integer> FormatTo<T> for IntegerFormatter {
    fn reserve(&self, value: &T) -> usize {
        let layout = self.layout(*value);
        self.field
            .reserve(layout.bytes(self.separator), layout.chars())
    }

    fn char_count(&self, value: &T) -> usize {
        self.field.char_count(self.layout(*value).chars())
    }

    fn format_to(&self, value: &T, context: &mut FormatContext<'_>) {
        let layout = self.layout(*value);
        let group = if self.use_separator {
            self.group_size()
        } else {
            0
        };

        self.field.write(layout.chars(), context, |context| {
            if let Some(sign) = layout.sign {
                context.write_char(sign);
            }
            context.write_str(layout.prefix);

            for index in 0..layout.count {
                if separator_before(index, layout.count, group) {
                    context.write_char(self.separator);
                }
                context.write_char(layout.digits.digit(layout.count - 1 - index, self.case));
            }
        });
    }
}

/// Computed text layout of one value.
struct Layout {
    digits: Digits,
    count: usize,
    sign: Option<char>,
    prefix: &'static str,
    separators: usize,
}

impl Layout {
    fn chars(&self) -> usize {
        usize::from(self.sign.is_some())
            .saturating_add(self.prefix.len())
            .saturating_add(self.count)
            .saturating_add(self.separators)
    }

    /// Saturates, so an unrepresentable length fails when the buffer grows.
    fn bytes(&self, separator: char) -> usize {
        self.sign
            .map_or(0, char::len_utf8)
            .saturating_add(self.prefix.len())
            .saturating_add(self.count)
            .saturating_add(self.separators.saturating_mul(separator.len_utf8()))
    }
}

/// Digit source of one value in one representation.
struct Digits {
    representation: IntegerRepresentation,
    negative: bool,
    bits: u32,
    pattern: u128,
    decimal: [u8; MAX_DECIMAL_DIGITS],
    natural: usize,
}

impl Digits {
    fn new<T: Integer>(value: T, representation: IntegerRepresentation) -> Self {
        let negative = value.is_negative();
        let mut decimal = [b'0'; MAX_DECIMAL_DIGITS];

        let natural = match representation {
            IntegerRepresentation::Decimal => {
                let magnitude = value.magnitude();
                let count = match magnitude.checked_ilog10() {
                    Some(log) => log as usize + 1,
                    None => 1,
                };
                let mut rest = magnitude;
                for slot in decimal[..count].iter_mut().rev() {
                    *slot = b'0' + (rest % 10) as u8;
                    rest /= 10;
                }
                count
            }
            IntegerRepresentation::Binary => Self::bit_length(value),
            IntegerRepresentation::Hexadecimal => Self::bit_length(value).div_ceil(4),
        };

        Self {
            representation,
            negative,
            bits: T::BITS,
            pattern: value.bit_pattern(),
            decimal,
            natural,
        }
    }

    /// Full storage width for negative values, minimal length otherwise.
    fn bit_length<T: Integer>(value: T) -> usize {
        if value.is_negative() {
            T::BITS as usize
        } else {
            let pattern = value.bit_pattern();
            (u128::BITS - pattern.leading_zeros()).max(1) as usize
        }
    }

    /// Returns the bit at `position`, sign-extended past the storage width.
    fn bit(&self, position: usize) -> u8 {
        if position >= self.bits as usize {
            u8::from(self.negative)
        } else {
            ((self.pattern >> position) & 1) as u8
        }
    }

    /// Returns the digit at `position`, counting from the least significant.
    fn digit(&self, position: usize, case: HexCase) -> char {
        match self.representation {
            IntegerRepresentation::Decimal => {
                if position >= self.natural {
                    '0'
                } else {
                    char::from(self.decimal[self.natural - 1 - position])
                }
            }
            IntegerRepresentation::Binary => char::from(b'0' + self.bit(position)),
            IntegerRepresentation::Hexadecimal => {
                let base = position.saturating_mul(4);
                let nibble = (0..4).fold(0u8, |acc, offset| {
                    acc | (self.bit(base.saturating_add(offset)) << offset)
                });
                let digit = char::from_digit(u32::from(nibble), 16).unwrap_or('0');
                match case {
                    HexCase::Lower => digit,
                    HexCase::Upper => digit.to_ascii_uppercase(),
                }
            }
        }
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

    fn representation_strategy() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just("decimal"), Just("binary"), Just("hexadecimal")]
    }

    fn configured(representation: &str, separator: bool, width: usize) -> IntegerFormatter {
        let spec = Specification::Specifiers(vec![
            Specifier::new("representation", representation),
            Specifier::new("use_separator", separator.to_string()),
            Specifier::new("width", width.to_string()),
        ]);
        let mut formatter = IntegerFormatter::default();
        Formatter::<i64>::parse(&mut formatter, &spec, &NullSink);
        formatter
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Reserved length always equals the written length.
    fn check_reserve_matches_output(
        value: i64,
        representation: &str,
        separator: bool,
        width: usize,
    ) -> Result<(), TestCaseError> {
        let formatter = configured(representation, separator, width);
        let text = Formatter::<i64>::format(&formatter, &value);
        prop_assert_eq!(FormatTo::<i64>::reserve(&formatter, &value), text.len());
        prop_assert!(text.len() >= width);
        Ok(())
    }

    /// Plain decimal output agrees with the standard library.
    fn check_decimal_matches_std(value: i64) -> Result<(), TestCaseError> {
        let formatter = IntegerFormatter::default();
        prop_assert_eq!(Formatter::<i64>::format(&formatter, &value), value.to_string());
        Ok(())
    }

    /// Binary and hexadecimal output agree with the standard library, which
    /// also uses two's complement for signed values.
    fn check_radix_matches_std(value: i32) -> Result<(), TestCaseError> {
        let binary = configured("binary", false, 0);
        let hex = configured("hexadecimal", false, 0);
        prop_assert_eq!(Formatter::<i32>::format(&binary, &value), format!("{value:b}"));
        prop_assert_eq!(Formatter::<i32>::format(&hex, &value), format!("{value:x}"));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn reserve_matches_output(
            value in any::<i64>(),
            representation in representation_strategy(),
            separator in any::<bool>(),
            width in 0usize..40,
        ) {
            check_reserve_matches_output(value, representation, separator, width)?;
        }

        #[test]
        fn decimal_matches_std(value in any::<i64>()) {
            check_decimal_matches_std(value)?;
        }

        #[test]
        fn radix_matches_std(value in any::<i32>()) {
            check_radix_matches_std(value)?;
        }
    }
}
