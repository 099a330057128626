//! Alignment of content inside a padded field.

use std::str::FromStr;

/// Where content sits inside a field wider than the content.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Justification {
    /// Content first, padding after.
    #[default]
    Left,
    /// Padding first, content after.
    Right,
    /// Padding split around the content; an odd leftover goes after it.
    Center,
}

impl Justification {
    /// Splits the padding of a field into `(leading, trailing)` counts.
    ///
    /// `width` and `length` are in characters. A field never truncates, so
    /// content at least as long as `width` gets no padding.
    ///
    /// ```
    /// # use splice_core::formatter::Justification;
    /// assert_eq!(Justification::Left.split(5, 2), (0, 3));
    /// assert_eq!(Justification::Right.split(5, 2), (3, 0));
    /// assert_eq!(Justification::Center.split(5, 2), (1, 2));
    /// assert_eq!(Justification::Center.split(5, 4), (0, 1));
    /// assert_eq!(Justification::Center.split(3, 7), (0, 0));
    /// ```
    pub fn split(self, width: usize, length: usize) -> (usize, usize) {
        let padding = width.saturating_sub(length);
        match self {
            Self::Left => (0, padding),
            Self::Right => (padding, 0),
            Self::Center => {
                let leading = padding / 2;
                (leading, padding - leading)
            }
        }
    }
}

impl FromStr for Justification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" | "centre" => Ok(Self::Center),
            _ => Err(format!(
                "invalid justification `{s}`, valid values: left, right, center"
            )),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn justification_strategy() -> impl Strategy<Value = Justification> {
        prop_oneof![
            Just(Justification::Left),
            Just(Justification::Right),
            Just(Justification::Center),
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Content plus padding always equals `max(width, length)`.
    fn check_split_fills_field(
        justification: Justification,
        width: usize,
        length: usize,
    ) -> Result<(), TestCaseError> {
        let (leading, trailing) = justification.split(width, length);
        prop_assert_eq!(leading + length + trailing, width.max(length));
        Ok(())
    }

    /// Centered content never has more leading than trailing padding.
    fn check_center_leading_not_larger(width: usize, length: usize) -> Result<(), TestCaseError> {
        let (leading, trailing) = Justification::Center.split(width, length);
        prop_assert!(leading <= trailing);
        prop_assert!(trailing - leading <= 1);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn split_fills_field(justification in justification_strategy(), width in 0usize..200, length in 0usize..200) {
            check_split_fills_field(justification, width, length)?;
        }

        #[test]
        fn center_leading_not_larger(width in 0usize..200, length in 0usize..200) {
            check_center_leading_not_larger(width, length)?;
        }
    }
}
