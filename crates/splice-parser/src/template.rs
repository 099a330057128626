//! Template scanner.
//!
//! [`parse_template`] walks a template once and produces a [`ParsedTemplate`]:
//! the literal text with escapes collapsed and placeholders removed, plus one
//! [`PlaceholderSite`] per placeholder occurrence. Structural problems are
//! collected so a single pass reports every malformed spot.

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};

use splice_core::{
    identifier::{Identifier, IdentifierKind},
    specification::Specification,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    identifier::{IdentifierError, parse_identifier},
    span::Span,
    specification::parse_specification,
};

/// Options controlling template validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept positional and named placeholders in the same template.
    pub allow_mixed_explicit: bool,
}

/// How a template's placeholders bind to arguments, fixed by the first
/// placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateMode {
    /// `{}` placeholders, bound by encounter order.
    Auto,
    /// `{0}` and `{name}` placeholders, bound by index or name.
    Explicit,
}

impl TemplateMode {
    fn of(kind: IdentifierKind) -> Self {
        if kind.is_explicit() {
            Self::Explicit
        } else {
            Self::Auto
        }
    }
}

/// One placeholder occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSite {
    /// Byte offset into [`ParsedTemplate::text`] where the output goes.
    pub position: usize,
    /// Index into [`ParsedTemplate::identifiers`].
    pub identifier: usize,
    /// Index into [`ParsedTemplate::specifications`].
    pub specification: usize,
    /// The placeholder in the original template, braces included.
    pub span: Span,
}

/// The result of scanning a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    /// Literal text, with `{{`/`}}` collapsed and placeholders removed.
    pub text: String,
    /// Placeholders in template order.
    pub placeholders: Vec<PlaceholderSite>,
    /// Unique identifiers in order of first appearance.
    pub identifiers: IndexSet<Identifier>,
    /// Unique specifications keyed by their source text.
    pub specifications: IndexMap<String, Specification>,
    /// `None` for a template without placeholders.
    pub mode: Option<TemplateMode>,
    /// Recoverable problems, such as malformed specifications.
    pub warnings: Vec<Diagnostic>,
}

impl ParsedTemplate {
    /// Returns the identifier of a placeholder.
    pub fn identifier(&self, site: &PlaceholderSite) -> Option<&Identifier> {
        self.identifiers.get_index(site.identifier)
    }

    /// Returns the specification of a placeholder.
    pub fn specification(&self, site: &PlaceholderSite) -> Option<&Specification> {
        self.specifications
            .get_index(site.specification)
            .map(|(_, specification)| specification)
    }

    /// Returns the source text of a placeholder's specification.
    pub fn specification_text(&self, site: &PlaceholderSite) -> Option<&str> {
        self.specifications
            .get_index(site.specification)
            .map(|(text, _)| text.as_str())
    }
}

/// The kind and location of the placeholder that fixed the template mode.
struct FirstPlaceholder {
    kind: IdentifierKind,
    span: Span,
}

/// Scanner that accumulates the template model and diagnostics.
struct Scanner<'a> {
    source: &'a str,
    options: ParseOptions,
    text: String,
    placeholders: Vec<PlaceholderSite>,
    identifiers: IndexSet<Identifier>,
    specifications: IndexMap<String, Specification>,
    first: Option<FirstPlaceholder>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str, options: ParseOptions) -> Self {
        Self {
            source,
            options,
            text: String::with_capacity(source.len()),
            placeholders: Vec::new(),
            identifiers: IndexSet::new(),
            specifications: IndexMap::new(),
            first: None,
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Scan the whole source.
    fn scan(&mut self) {
        let source = self.source;
        let mut cursor = 0;
        while let Some(found) = source[cursor..].find(['{', '}']) {
            let brace = cursor + found;
            self.text.push_str(&source[cursor..brace]);

            let rest = &source[brace..];
            cursor = if rest.starts_with("{{") {
                self.text.push('{');
                brace + 2
            } else if rest.starts_with("}}") {
                self.text.push('}');
                brace + 2
            } else if rest.starts_with('{') {
                match self.placeholder(brace) {
                    Some(end) => end,
                    None => return,
                }
            } else {
                self.diagnostics.emit(
                    Diagnostic::error("unmatched `}` in template")
                        .with_code(ErrorCode::E002)
                        .with_label(Span::new(brace..brace + 1), "unmatched closing brace")
                        .with_help("write `}}` for a literal `}`"),
                );
                brace + 1
            };
        }
        self.text.push_str(&source[cursor..]);
    }

    /// Scan the placeholder opening at `start`.
    ///
    /// Returns the offset after it, or `None` if the rest of the source
    /// cannot be scanned.
    fn placeholder(&mut self, start: usize) -> Option<usize> {
        let source = self.source;
        let body_start = start + 1;
        let (identifier, length) = match parse_identifier(&source[body_start..]) {
            Ok(parsed) => parsed,
            Err(err) => return self.recover(start, err),
        };

        let terminator = body_start + length;
        let (specification_text, end) = if source[terminator..].starts_with(':') {
            let specification_start = terminator + 1;
            let Some(close) = closing_brace(&source[specification_start..]) else {
                self.unterminated(start);
                return None;
            };
            let close = specification_start + close;
            (&source[specification_start..close], close + 1)
        } else {
            ("", terminator + 1)
        };

        let span = Span::new(start..end);
        self.check_mode(identifier.kind(), span);

        let specification = self.specification(specification_text, terminator + 1);
        let (identifier, _) = self.identifiers.insert_full(identifier);
        trace!(position = self.text.len(), identifier, specification; "Placeholder found");
        self.placeholders.push(PlaceholderSite {
            position: self.text.len(),
            identifier,
            specification,
            span,
        });

        Some(end)
    }

    /// Returns the table index of the specification written at `offset`.
    fn specification(&mut self, text: &str, offset: usize) -> usize {
        if let Some(index) = self.specifications.get_index_of(text) {
            return index;
        }

        let specification = parse_specification(text).unwrap_or_else(|err| {
            let width = text[err.offset()..].chars().next().map_or(1, char::len_utf8);
            let at = offset + err.offset();
            self.diagnostics.emit(
                Diagnostic::warning(format!("malformed specification `{text}`"))
                    .with_code(ErrorCode::E100)
                    .with_label(Span::new(at..at + width), format!("expected {}", err.expected()))
                    .with_help("the placeholder is formatted with default settings"),
            );
            Specification::empty()
        });
        let (index, _) = self
            .specifications
            .insert_full(text.to_string(), specification);
        index
    }

    /// Report an identifier error and skip past the broken placeholder.
    fn recover(&mut self, start: usize, err: IdentifierError) -> Option<usize> {
        let body_start = start + 1;
        match &err {
            IdentifierError::Unterminated => {
                self.unterminated(start);
                return None;
            }
            IdentifierError::InvalidCharacter { offset, ch } => {
                let at = body_start + offset;
                self.diagnostics.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(ErrorCode::E003)
                        .with_label(Span::new(at..at + ch.len_utf8()), "not allowed here")
                        .with_help(
                            "identifiers are letters, digits and `_`; write `{{` for a literal `{`",
                        ),
                );
            }
            IdentifierError::PositionOverflow { digits } => {
                self.diagnostics.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(ErrorCode::E004)
                        .with_label(
                            Span::new(body_start..body_start + digits.len()),
                            "does not fit in usize",
                        ),
                );
            }
        }

        let source = self.source;
        match closing_brace(&source[body_start..]) {
            Some(close) => Some(body_start + close + 1),
            None => {
                self.unterminated(start);
                None
            }
        }
    }

    fn unterminated(&mut self, start: usize) {
        self.diagnostics.emit(
            Diagnostic::error("unterminated placeholder")
                .with_code(ErrorCode::E001)
                .with_label(Span::new(start..self.source.len()), "placeholder starts here")
                .with_help("add a closing `}`, or write `{{` for a literal `{`"),
        );
    }

    /// Check that a placeholder's identifier kind agrees with the template.
    fn check_mode(&mut self, kind: IdentifierKind, span: Span) {
        let Some(first) = &self.first else {
            self.first = Some(FirstPlaceholder { kind, span });
            return;
        };

        let same_mode = TemplateMode::of(kind) == TemplateMode::of(first.kind);
        if kind == first.kind || (same_mode && self.options.allow_mixed_explicit) {
            return;
        }

        let help = if same_mode {
            "enable `identifiers.allow_mixed_explicit` to allow this"
        } else {
            "number every placeholder explicitly, or none of them"
        };
        let diagnostic = Diagnostic::error(format!(
            "cannot mix {} and {kind} placeholders",
            first.kind
        ))
        .with_code(ErrorCode::E005)
        .with_secondary_label(first.span, format!("{} placeholder here", first.kind))
        .with_label(span, format!("{kind} placeholder"))
        .with_help(help);
        self.diagnostics.emit(diagnostic);
    }

    fn finish(self) -> Result<ParsedTemplate, ParseError> {
        let warnings = self.diagnostics.finish()?;
        let mode = self.first.map(|first| TemplateMode::of(first.kind));

        debug!(
            placeholders = self.placeholders.len(),
            identifiers = self.identifiers.len(),
            specifications = self.specifications.len(),
            warnings = warnings.len(),
            mode:?;
            "Template parsed"
        );

        Ok(ParsedTemplate {
            text: self.text,
            placeholders: self.placeholders,
            identifiers: self.identifiers,
            specifications: self.specifications,
            mode,
            warnings,
        })
    }
}

/// Returns the offset of the first `}` outside a quoted value.
fn closing_brace(text: &str) -> Option<usize> {
    let mut quote = None;
    for (offset, ch) in text.char_indices() {
        match (quote, ch) {
            (None, '}') => return Some(offset),
            (None, '\'' | '"') => quote = Some(ch),
            (Some(open), _) if open == ch => quote = None,
            _ => {}
        }
    }
    None
}

/// Scans a template.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying every structural problem: unterminated
/// placeholders (E001), unmatched `}` (E002), invalid identifier characters
/// (E003), positional indices out of range (E004) and mixed identifier kinds
/// (E005). Malformed specifications are warnings (E100).
///
/// # Example
///
/// ```
/// # use splice_parser::template::{ParseOptions, TemplateMode, parse_template};
/// let parsed = parse_template("{{{0}}} and {1:width=3}", ParseOptions::default()).unwrap();
///
/// assert_eq!(parsed.text, "{} and ");
/// assert_eq!(parsed.mode, Some(TemplateMode::Explicit));
/// assert_eq!(parsed.placeholders[0].position, 1);
/// assert_eq!(parsed.placeholders[1].position, 7);
/// ```
pub fn parse_template(source: &str, options: ParseOptions) -> Result<ParsedTemplate, ParseError> {
    let mut scanner = Scanner::new(source, options);
    scanner.scan();
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> ParsedTemplate {
        parse_template(source, ParseOptions::default()).expect("template should parse")
    }

    fn codes(source: &str) -> Vec<ErrorCode> {
        parse_template(source, ParseOptions::default())
            .unwrap_err()
            .diagnostics()
            .iter()
            .filter_map(Diagnostic::code)
            .collect()
    }

    #[test]
    fn test_literal_only() {
        let parsed = parse("plain text");
        assert_eq!(parsed.text, "plain text");
        assert!(parsed.placeholders.is_empty());
        assert_eq!(parsed.mode, None);
    }

    #[test]
    fn test_escapes_collapse() {
        let parsed = parse("{{a}} }}{{");
        assert_eq!(parsed.text, "{a} }{");
        assert!(parsed.placeholders.is_empty());
    }

    #[test]
    fn test_auto_placeholders() {
        let parsed = parse("{}-{}");
        assert_eq!(parsed.text, "-");
        assert_eq!(parsed.mode, Some(TemplateMode::Auto));
        assert_eq!(parsed.identifiers.len(), 1);
        let positions: Vec<usize> = parsed.placeholders.iter().map(|p| p.position).collect();
        assert_eq!(positions, [0, 1]);
    }

    #[test]
    fn test_named_placeholders_share_identifier() {
        let parsed = parse("{x}, {y}, {x}");
        assert_eq!(parsed.text, ", , ");
        assert_eq!(parsed.identifiers.len(), 2);
        assert_eq!(parsed.placeholders[0].identifier, parsed.placeholders[2].identifier);
        assert_eq!(parsed.identifier(&parsed.placeholders[1]), Some(&Identifier::name("y")));
    }

    #[test]
    fn test_specifications_are_deduplicated_by_text() {
        let parsed = parse("{0:digits=4} {0:digits=4} {0:digits = 4} {0}");
        assert_eq!(parsed.specifications.len(), 3);
        let indices: Vec<usize> = parsed.placeholders.iter().map(|p| p.specification).collect();
        assert_eq!(indices, [0, 0, 1, 2]);
        assert_eq!(
            parsed.specification(&parsed.placeholders[2]).and_then(|s| s.get("digits")),
            Some("4")
        );
        assert_eq!(parsed.specification_text(&parsed.placeholders[3]), Some(""));
    }

    #[test]
    fn test_spans_cover_braces() {
        let parsed = parse("ab{name:width=2}c");
        assert_eq!(parsed.placeholders[0].span, Span::new(2..16));
        assert_eq!(parsed.placeholders[0].position, 2);
    }

    #[test]
    fn test_specification_may_contain_quoted_brace() {
        let parsed = parse("{:fill='}', width=3}!");
        assert_eq!(parsed.text, "!");
        let spec = parsed.specification(&parsed.placeholders[0]).unwrap();
        assert_eq!(spec.get("fill"), Some("}"));
    }

    #[test]
    fn test_malformed_specification_is_a_warning() {
        let parsed = parse("{0:width}");
        assert_eq!(parsed.placeholders.len(), 1);
        assert!(parsed.specification(&parsed.placeholders[0]).unwrap().is_empty());
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].code(), Some(ErrorCode::E100));
        assert_eq!(parsed.warnings[0].primary_span(), Some(Span::new(8..9)));
    }

    #[test]
    fn test_unmatched_closing_brace() {
        assert_eq!(codes("a } b"), [ErrorCode::E002]);
    }

    #[test]
    fn test_unterminated_placeholder() {
        assert_eq!(codes("abc {"), [ErrorCode::E001]);
        assert_eq!(codes("abc {0"), [ErrorCode::E001]);
        assert_eq!(codes("{0:width=3"), [ErrorCode::E001]);
    }

    #[test]
    fn test_invalid_identifier_recovers() {
        assert_eq!(codes("{a-b} and } {c d}"), [
            ErrorCode::E003,
            ErrorCode::E002,
            ErrorCode::E003
        ]);
    }

    #[test]
    fn test_position_overflow() {
        assert_eq!(codes("{99999999999999999999999999}"), [ErrorCode::E004]);
    }

    #[test]
    fn test_mixed_auto_and_explicit() {
        let err = parse_template("{} {0}", ParseOptions::default()).unwrap_err();
        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E005));
        assert_eq!(diagnostic.primary_span(), Some(Span::new(3..6)));
        assert!(diagnostic.labels().iter().any(|l| l.is_secondary() && l.span() == Span::new(0..2)));
    }

    #[test]
    fn test_mixed_positional_and_named() {
        assert_eq!(codes("{0} {name}"), [ErrorCode::E005]);

        let options = ParseOptions {
            allow_mixed_explicit: true,
        };
        let parsed = parse_template("{0} {name}", options).unwrap();
        assert_eq!(parsed.mode, Some(TemplateMode::Explicit));
    }

    #[test]
    fn test_unicode_literal_positions_are_bytes() {
        let parsed = parse("é{}");
        assert_eq!(parsed.placeholders[0].position, 2);
    }
}
