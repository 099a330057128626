//! Parser for the specification part of a placeholder.
//!
//! The grammar, with whitespace allowed around every token:
//!
//! ```text
//! specification  = group_list | specifier_list
//! group_list     = group ( [ "," | ";" ] group )*
//! group          = "[" specification "]"
//! specifier_list = [ specifier ( ( "," | ";" ) specifier )* [ "," | ";" ] ]
//! specifier      = key "=" value
//! value          = quoted | bare
//! ```
//!
//! Keys are runs of letters, digits, `_` and `-`. A bare value runs up to
//! the next `,`, `;`, `[`, `]` or quote and is trimmed; a quoted value keeps
//! everything between its quotes verbatim.

use thiserror::Error;
use winnow::{
    Parser as _,
    combinator::{cut_err, opt, peek, terminated},
    error::{ContextError, ErrMode},
    stream::Stream,
    token::{any, one_of, take_till, take_while},
};

use splice_core::specification::{Specification, Specifier};

type Input<'a> = &'a str;
type IResult<O> = Result<O, ErrMode<ContextError<&'static str>>>;

/// Specification text that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed specification at byte {offset}: expected {expected}")]
pub struct SpecificationError {
    offset: usize,
    expected: &'static str,
}

impl SpecificationError {
    /// Returns the byte index of the first invalid character.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns a description of what was expected at the offset.
    pub fn expected(&self) -> &'static str {
        self.expected
    }
}

/// Skip whitespace
fn ws(input: &mut Input<'_>) -> IResult<()> {
    take_while(0.., |ch: char| ch.is_whitespace())
        .void()
        .parse_next(input)
}

/// Look at the next character without consuming it
fn next_char(input: &mut Input<'_>) -> IResult<Option<char>> {
    peek(opt(any)).parse_next(input)
}

/// Consume `ch`
fn symbol(input: &mut Input<'_>, mut ch: char) -> IResult<char> {
    ch.parse_next(input)
}

/// Require `ch`, committing to the current branch
fn expect(input: &mut Input<'_>, ch: char, label: &'static str) -> IResult<char> {
    cut_err(ch).context(label).parse_next(input)
}

/// Consume an optional `,` or `;`
fn separator(input: &mut Input<'_>) -> IResult<bool> {
    opt(one_of([',', ';']))
        .map(|separator| separator.is_some())
        .parse_next(input)
}

fn key<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., |ch: char| ch.is_alphanumeric() || ch == '_' || ch == '-')
        .context("specifier key")
        .parse_next(input)
}

fn quote(input: &mut Input<'_>) -> IResult<char> {
    one_of(['\'', '"']).parse_next(input)
}

/// Parse a value enclosed in `'` or `"`
fn quoted<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    let delimiter = quote(input)?;
    cut_err(terminated(take_till(0.., move |ch: char| ch == delimiter), delimiter))
        .context("closing quote")
        .parse_next(input)
}

fn bare<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_till(0.., [',', ';', '[', ']', '\'', '"'])
        .map(|value: &'a str| value.trim_end())
        .parse_next(input)
}

fn specifier(input: &mut Input<'_>) -> IResult<Specifier> {
    let key = key(input)?;
    ws(input)?;
    expect(input, '=', "`=`")?;
    ws(input)?;

    let value = match next_char(input)? {
        Some('\'' | '"') => quoted(input)?,
        _ => bare(input)?,
    };

    Ok(Specifier::new(key, value))
}

/// Parse specifiers up to the end of input or a closing `]`
fn specifier_list(input: &mut Input<'_>) -> IResult<Vec<Specifier>> {
    let mut specifiers = Vec::new();
    loop {
        ws(input)?;
        if matches!(next_char(input)?, None | Some(']')) {
            return Ok(specifiers);
        }

        specifiers.push(specifier(input)?);

        ws(input)?;
        if !separator(input)? {
            return Ok(specifiers);
        }
    }
}

fn group(input: &mut Input<'_>) -> IResult<Specification> {
    symbol(input, '[')?;
    let specification = specification(input)?;
    ws(input)?;
    expect(input, ']', "`]`")?;
    Ok(specification)
}

fn group_list(input: &mut Input<'_>) -> IResult<Vec<Specification>> {
    let mut groups = Vec::new();
    loop {
        groups.push(group(input)?);

        ws(input)?;
        separator(input)?;
        ws(input)?;
        if next_char(input)? != Some('[') {
            return Ok(groups);
        }
    }
}

fn specification(input: &mut Input<'_>) -> IResult<Specification> {
    ws(input)?;
    if next_char(input)? == Some('[') {
        group_list(input).map(Specification::Groups)
    } else {
        specifier_list(input).map(Specification::Specifiers)
    }
}

/// Parses specification text, the part of a placeholder between `:` and the
/// closing `}`.
///
/// Empty text is an empty specifier list.
///
/// # Example
///
/// ```
/// # use splice_parser::specification::parse_specification;
/// let spec = parse_specification("[width=20], [digits=4]").unwrap();
/// assert_eq!(spec.shell().get("width"), Some("20"));
/// assert_eq!(spec.element(1).get("digits"), Some("4"));
///
/// let err = parse_specification("width").unwrap_err();
/// assert_eq!(err.offset(), 5);
/// ```
pub fn parse_specification(text: &str) -> Result<Specification, SpecificationError> {
    let mut input = text;

    match specification(&mut input) {
        Ok(specification) if input.is_empty() => Ok(specification),
        Ok(_) => Err(SpecificationError {
            offset: text.len() - input.eof_offset(),
            expected: "`,`, `;` or end of specification",
        }),
        Err(err) => {
            let expected = match &err {
                ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.context().next().copied(),
                ErrMode::Incomplete(_) => None,
            };
            Err(SpecificationError {
                offset: text.len() - input.eof_offset(),
                expected: expected.unwrap_or("specifier"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(pairs: &[(&str, &str)]) -> Specification {
        Specification::Specifiers(pairs.iter().map(|(k, v)| Specifier::new(*k, *v)).collect())
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse_specification(""), Ok(Specification::empty()));
        assert_eq!(parse_specification("   "), Ok(Specification::empty()));
    }

    #[test]
    fn test_specifier_list() {
        assert_eq!(
            parse_specification("width=8, fill=*; justification = center"),
            Ok(flat(&[
                ("width", "8"),
                ("fill", "*"),
                ("justification", "center")
            ]))
        );
    }

    #[test]
    fn test_trailing_separator() {
        assert_eq!(parse_specification("digits=4,"), Ok(flat(&[("digits", "4")])));
    }

    #[test]
    fn test_values_are_trimmed_but_keep_inner_spaces() {
        assert_eq!(
            parse_specification("  key =  two words  "),
            Ok(flat(&[("key", "two words")]))
        );
    }

    #[test]
    fn test_quoted_values() {
        assert_eq!(
            parse_specification("fill=' ', separator=\",\""),
            Ok(flat(&[("fill", " "), ("separator", ",")]))
        );
        assert_eq!(
            parse_specification("fill='\"'"),
            Ok(flat(&[("fill", "\"")]))
        );
    }

    #[test]
    fn test_group_list() {
        assert_eq!(
            parse_specification("[width=20][representation=hexadecimal]"),
            Ok(Specification::Groups(vec![
                flat(&[("width", "20")]),
                flat(&[("representation", "hexadecimal")]),
            ]))
        );
        assert_eq!(
            parse_specification(" [] ; [digits=2] "),
            Ok(Specification::Groups(vec![
                Specification::empty(),
                flat(&[("digits", "2")]),
            ]))
        );
    }

    #[test]
    fn test_nested_groups() {
        assert_eq!(
            parse_specification("[], [[width=3], [sign=both]]"),
            Ok(Specification::Groups(vec![
                Specification::empty(),
                Specification::Groups(vec![
                    flat(&[("width", "3")]),
                    flat(&[("sign", "both")]),
                ]),
            ]))
        );
    }

    #[test]
    fn test_missing_equals() {
        let err = parse_specification("width").unwrap_err();
        assert_eq!(err.offset(), 5);
        assert_eq!(err.expected(), "`=`");

        let err = parse_specification("width=2, fill").unwrap_err();
        assert_eq!(err.offset(), 13);
    }

    #[test]
    fn test_missing_key() {
        let err = parse_specification("=3").unwrap_err();
        assert_eq!(err.offset(), 0);
        assert_eq!(err.expected(), "specifier key");

        let err = parse_specification("a=1,,b=2").unwrap_err();
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn test_unclosed_group() {
        let err = parse_specification("[width=3").unwrap_err();
        assert_eq!(err.offset(), 8);
        assert_eq!(err.expected(), "`]`");
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse_specification("fill='x").unwrap_err();
        assert_eq!(err.offset(), 7);
        assert_eq!(err.expected(), "closing quote");
    }

    #[test]
    fn test_trailing_garbage() {
        let err = parse_specification("a=1]").unwrap_err();
        assert_eq!(err.offset(), 3);

        let err = parse_specification("[a=1] b=2").unwrap_err();
        assert_eq!(err.offset(), 6);
    }

    #[test]
    fn test_error_display() {
        let err = parse_specification("width").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed specification at byte 5: expected `=`"
        );
    }
}
