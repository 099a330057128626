//! Parser for the identifier part of a placeholder.
//!
//! The identifier is everything between the opening `{` and the first `:`
//! or `}`:
//!
//! - empty body ⇒ [`Identifier::Auto`]
//! - ASCII decimal digits only ⇒ [`Identifier::Position`]
//! - any other run of Unicode letters, digits and `_` ⇒ [`Identifier::Name`]

use thiserror::Error;

use splice_core::identifier::Identifier;

/// Failure to read a placeholder identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The input ended before the `:` or `}` that closes the identifier.
    #[error("placeholder is not terminated")]
    Unterminated,

    /// A character that cannot appear in an identifier.
    #[error("invalid character {ch:?} in placeholder identifier")]
    InvalidCharacter {
        /// Byte offset of the character, relative to the identifier start.
        offset: usize,
        ch: char,
    },

    /// A positional index that does not fit in a `usize`.
    #[error("positional index `{digits}` is out of range")]
    PositionOverflow { digits: String },
}

/// Returns `true` for characters allowed in a named identifier.
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Parses the identifier at the start of `text`, which is the template text
/// right after an opening `{`.
///
/// On success returns the identifier and the number of bytes it occupies.
/// The byte at that offset is the `:` or `}` that ended the identifier.
///
/// # Example
///
/// ```
/// # use splice_core::identifier::Identifier;
/// # use splice_parser::identifier::parse_identifier;
/// assert_eq!(parse_identifier("12:width=3}"), Ok((Identifier::Position(12), 2)));
/// assert_eq!(parse_identifier("}"), Ok((Identifier::Auto, 0)));
/// ```
pub fn parse_identifier(text: &str) -> Result<(Identifier, usize), IdentifierError> {
    let end = text
        .char_indices()
        .find(|(_, ch)| !is_identifier_char(*ch))
        .map(|(offset, _)| offset)
        .unwrap_or(text.len());

    match text[end..].chars().next() {
        Some(':' | '}') => {}
        Some(ch) => return Err(IdentifierError::InvalidCharacter { offset: end, ch }),
        None => return Err(IdentifierError::Unterminated),
    }

    let body = &text[..end];
    let identifier = if body.is_empty() {
        Identifier::Auto
    } else if body.bytes().all(|byte| byte.is_ascii_digit()) {
        let index = body
            .parse()
            .map_err(|_| IdentifierError::PositionOverflow {
                digits: body.to_string(),
            })?;
        Identifier::Position(index)
    } else {
        Identifier::Name(body.to_string())
    };

    Ok((identifier, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto() {
        assert_eq!(parse_identifier("}"), Ok((Identifier::Auto, 0)));
        assert_eq!(parse_identifier(":digits=2}"), Ok((Identifier::Auto, 0)));
    }

    #[test]
    fn test_position() {
        assert_eq!(parse_identifier("0}"), Ok((Identifier::Position(0), 1)));
        assert_eq!(parse_identifier("007:x=1}"), Ok((Identifier::Position(7), 3)));
    }

    #[test]
    fn test_name() {
        assert_eq!(parse_identifier("user}"), Ok((Identifier::name("user"), 4)));
        assert_eq!(parse_identifier("_1}"), Ok((Identifier::name("_1"), 2)));
        assert_eq!(parse_identifier("2nd}"), Ok((Identifier::name("2nd"), 3)));
        assert_eq!(parse_identifier("größe}"), Ok((Identifier::name("größe"), 7)));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let (lower, _) = parse_identifier("name}").unwrap();
        let (upper, _) = parse_identifier("Name}").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            parse_identifier("a-b}"),
            Err(IdentifierError::InvalidCharacter { offset: 1, ch: '-' })
        );
        assert_eq!(
            parse_identifier(" x}"),
            Err(IdentifierError::InvalidCharacter { offset: 0, ch: ' ' })
        );
        assert_eq!(
            parse_identifier("{"),
            Err(IdentifierError::InvalidCharacter { offset: 0, ch: '{' })
        );
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(parse_identifier(""), Err(IdentifierError::Unterminated));
        assert_eq!(parse_identifier("name"), Err(IdentifierError::Unterminated));
    }

    #[test]
    fn test_position_overflow() {
        let digits = "99999999999999999999999999";
        assert_eq!(
            parse_identifier(&format!("{digits}}}")),
            Err(IdentifierError::PositionOverflow {
                digits: digits.to_string()
            })
        );
    }
}
