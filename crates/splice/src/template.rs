//! Parsed templates that can be formatted incrementally.

use std::{borrow::Cow, fmt, sync::Arc};

use indexmap::IndexSet;
use log::{debug, warn};

use splice_core::{
    diagnostics::{DiagnosticSink, LogSink, SourcedSink, Warning, WarningKind},
    identifier::Identifier,
    specification::Specification,
};
use splice_parser::{TemplateMode, error::Diagnostic, parse_template};

use crate::{
    arguments::{Arg, CallArguments},
    config::FormatConfig,
    engine::{Placeholder, Substitution},
    error::SpliceError,
};

/// A parsed format template.
///
/// Parsing happens once. Each [`Template::format`] call substitutes the
/// placeholders its arguments resolve and leaves the others live, so a
/// template can be filled in over several calls.
///
/// # Examples
///
/// ```
/// use splice::{Template, args};
///
/// let mut template = Template::parse("{user} has {count:width=3} new messages")?;
///
/// template.format(&args![user = "ada"])?;
/// assert!(!template.is_complete());
/// assert_eq!(template.text(), "ada has {count:width=3} new messages");
///
/// template.format(&args![count = 7])?;
/// assert_eq!(template.finish()?, "ada has   7 new messages");
/// # Ok::<(), splice::SpliceError>(())
/// ```
#[derive(Clone)]
pub struct Template {
    source: String,
    buffer: Vec<u8>,
    placeholders: Vec<Placeholder>,
    identifiers: IndexSet<Identifier>,
    specifications: Vec<Specification>,
    mode: Option<TemplateMode>,
    warnings: Vec<Diagnostic>,
    warnings_reported: bool,
    config: FormatConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl Template {
    /// Parses a template with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::Parse`] for malformed templates, including
    /// templates that mix identifier kinds.
    pub fn parse(source: &str) -> Result<Self, SpliceError> {
        Self::with_config(source, FormatConfig::default())
    }

    /// Parses a template with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::Parse`] for malformed templates.
    ///
    /// # Examples
    ///
    /// ```
    /// use splice::{Template, config::{FormatConfig, IdentifierConfig, DiagnosticsConfig}};
    ///
    /// assert!(Template::parse("{0} {name}").is_err());
    ///
    /// let config = FormatConfig::new(IdentifierConfig::new(true), DiagnosticsConfig::default());
    /// assert!(Template::with_config("{0} {name}", config).is_ok());
    /// ```
    pub fn with_config(source: &str, config: FormatConfig) -> Result<Self, SpliceError> {
        let parsed = parse_template(source, config.parse_options())
            .map_err(|err| SpliceError::new_parse_error(err, source))?;

        debug!(
            placeholders = parsed.placeholders.len(),
            mode:? = parsed.mode;
            "Template ready"
        );

        Ok(Self {
            source: source.to_string(),
            buffer: parsed.text.into_bytes(),
            placeholders: parsed
                .placeholders
                .into_iter()
                .map(|site| Placeholder {
                    position: site.position,
                    identifier: site.identifier,
                    specification: site.specification,
                    formatted: false,
                    span: site.span,
                })
                .collect(),
            identifiers: parsed.identifiers,
            specifications: parsed.specifications.into_values().collect(),
            mode: parsed.mode,
            warnings: parsed.warnings,
            warnings_reported: false,
            config,
            sink: Arc::new(LogSink),
        })
    }

    /// Replaces the sink receiving warnings. The default is [`LogSink`].
    ///
    /// Parse warnings are reported to the sink on the first call to
    /// [`Template::format`].
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Returns the warnings found while parsing.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Returns how placeholders bind to arguments, or `None` if the template
    /// has no placeholders.
    pub fn mode(&self) -> Option<TemplateMode> {
        self.mode
    }

    /// Substitutes every placeholder the arguments resolve.
    ///
    /// In an auto-numbered template the n-th live placeholder takes the n-th
    /// unnamed argument; extra arguments are ignored. In an explicit template
    /// positions index the unnamed arguments and names match named ones.
    /// Placeholders without an argument stay live for a later call.
    ///
    /// # Errors
    ///
    /// Argument list errors are reported before anything is modified:
    /// [`SpliceError::ArgumentOrder`], [`SpliceError::DuplicateNamedArgument`]
    /// and [`SpliceError::ReservedArgumentMisuse`]. Formatting errors
    /// ([`SpliceError::FormatterContract`], [`SpliceError::NumericOverflow`])
    /// can leave the template partially formatted.
    pub fn format(&mut self, args: &[Arg<'_>]) -> Result<&mut Self, SpliceError> {
        self.report_warnings();

        let Some(mode) = self.mode else {
            return Ok(self);
        };
        if self.placeholders.is_empty() || args.is_empty() {
            return Ok(self);
        }

        let call = CallArguments::validate(args, mode)?;
        let sink = SourcedSink::new(self.sink.as_ref(), call.source.as_deref());
        let summary = Substitution {
            buffer: &mut self.buffer,
            placeholders: &mut self.placeholders,
            identifiers: &self.identifiers,
            specifications: &self.specifications,
            sink: &sink,
            slow_path_warnings: self.config.diagnostics().slow_path_warnings(),
        }
        .run(&call)?;

        debug!(
            arguments = args.len(),
            formatted = summary.formatted,
            reused = summary.reused,
            pending = self.placeholders.len();
            "Format call completed"
        );
        Ok(self)
    }

    /// Returns `true` once every placeholder has been substituted.
    pub fn is_complete(&self) -> bool {
        self.placeholders.is_empty()
    }

    /// Returns the identifier of each live placeholder, in template order.
    ///
    /// An identifier used by several live placeholders appears once per
    /// placeholder.
    pub fn pending(&self) -> impl Iterator<Item = &Identifier> {
        self.placeholders
            .iter()
            .filter_map(|placeholder| self.identifiers.get_index(placeholder.identifier))
    }

    /// Renders the template, writing live placeholders back as they appear
    /// in the source.
    pub fn text(&self) -> String {
        let buffer = self.buffer_text();
        let mut text = String::with_capacity(buffer.len());
        let mut cursor = 0;
        for placeholder in &self.placeholders {
            text.push_str(&buffer[cursor..placeholder.position]);
            text.push_str(self.placeholder_source(placeholder));
            cursor = placeholder.position;
        }
        text.push_str(&buffer[cursor..]);
        text
    }

    /// Returns the formatted string.
    ///
    /// # Errors
    ///
    /// Returns [`SpliceError::UnresolvedPlaceholder`] if placeholders are
    /// still live.
    pub fn finish(self) -> Result<String, SpliceError> {
        if !self.placeholders.is_empty() {
            let pending = self
                .placeholders
                .iter()
                .map(|placeholder| self.placeholder_source(placeholder).to_string())
                .collect();
            return Err(SpliceError::UnresolvedPlaceholder { pending });
        }

        debug!(len = self.buffer.len(); "Template finished");
        Ok(String::from_utf8(self.buffer)
            .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
    }

    fn buffer_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    fn placeholder_source(&self, placeholder: &Placeholder) -> &str {
        self.source
            .get(placeholder.span.range())
            .unwrap_or_default()
    }

    /// Forward parse warnings to the sink once.
    fn report_warnings(&mut self) {
        if self.warnings_reported {
            return;
        }
        self.warnings_reported = true;

        for diagnostic in &self.warnings {
            if let Some(span) = diagnostic.primary_span() {
                warn!(start = span.start(), end = span.end(); "{diagnostic}");
            }
            self.sink.warn(Warning::new(
                WarningKind::MalformedSpecification,
                diagnostic.message(),
            ));
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source)
            .field("text", &self.buffer_text())
            .field("pending", &self.placeholders.len())
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
