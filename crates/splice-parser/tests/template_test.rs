use splice_core::{identifier::Identifier, specification::Specification};
use splice_parser::{
    ParseOptions, Span, TemplateMode,
    error::{ErrorCode, Severity},
    parse_template,
};

#[test]
fn test_every_structural_error_is_reported() {
    let err = parse_template("} {a b} {0} {99999999999999999999999} {", ParseOptions::default())
        .unwrap_err();

    let codes: Vec<_> = err.diagnostics().iter().filter_map(|d| d.code()).collect();
    assert_eq!(
        codes,
        [ErrorCode::E002, ErrorCode::E003, ErrorCode::E004, ErrorCode::E001]
    );
    assert!(err.errors().all(|d| d.severity() == Severity::Error));
    assert_eq!(err.to_string(), "error[E002]: unmatched `}` in template (+3 more)");
}

#[test]
fn test_warnings_travel_with_errors() {
    let err = parse_template("{0:width} }", ParseOptions::default()).unwrap_err();
    let severities: Vec<_> = err.diagnostics().iter().map(|d| d.severity()).collect();
    assert_eq!(severities, [Severity::Warning, Severity::Error]);
}

#[test]
fn test_group_specification_through_template() {
    let parsed = parse_template(
        "{0:[width=20, justification=right], [digits=3]}",
        ParseOptions::default(),
    )
    .unwrap();

    let spec = parsed.specification(&parsed.placeholders[0]).unwrap();
    assert!(spec.is_group_list());
    assert_eq!(spec.shell().get("justification"), Some("right"));
    assert_eq!(spec.element(1).get("digits"), Some("3"));
    assert_eq!(spec.element(2), &Specification::empty());
}

#[test]
fn test_identifier_table_order() {
    let parsed = parse_template("{b}{a}{b}{c}", ParseOptions::default()).unwrap();
    let identifiers: Vec<_> = parsed.identifiers.iter().cloned().collect();
    assert_eq!(
        identifiers,
        [Identifier::name("b"), Identifier::name("a"), Identifier::name("c")]
    );
    assert_eq!(parsed.mode, Some(TemplateMode::Explicit));
}

#[test]
fn test_mixed_explicit_points_at_both_placeholders() {
    let err = parse_template("{0} then {later}", ParseOptions::default()).unwrap_err();
    let diagnostic = &err.diagnostics()[0];

    assert_eq!(diagnostic.code(), Some(ErrorCode::E005));
    assert_eq!(diagnostic.primary_span(), Some(Span::new(9..16)));
    let secondary: Vec<_> = diagnostic
        .labels()
        .iter()
        .filter(|label| label.is_secondary())
        .map(|label| label.span())
        .collect();
    assert_eq!(secondary, [Span::new(0..3)]);
}
