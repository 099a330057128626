//! Recoverable diagnostics emitted while formatting.
//!
//! Formatters never fail on a bad specifier: they keep their previous
//! setting and report a [`Warning`] to the [`DiagnosticSink`] they were
//! handed. The sink is injected by the caller, so tests can capture warnings
//! with a [`CollectingSink`] instead of scraping process-wide log output.

use std::{
    fmt,
    sync::{Mutex, PoisonError},
};

use log::warn;

/// The category of a [`Warning`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A specifier key the formatter does not recognize.
    UnknownSpecifier,
    /// A recognized specifier key with a value that cannot be used.
    InvalidSpecifierValue,
    /// Specification text that could not be parsed at all.
    MalformedSpecification,
    /// A formatter without the in-place fast path was used.
    SlowPath,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSpecifier => write!(f, "unknown specifier"),
            Self::InvalidSpecifierValue => write!(f, "invalid specifier value"),
            Self::MalformedSpecification => write!(f, "malformed specification"),
            Self::SlowPath => write!(f, "slow path"),
        }
    }
}

/// A recoverable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    kind: WarningKind,
    message: String,
    source: Option<String>,
}

impl Warning {
    /// Creates a warning without source information.
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches source-location metadata.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the warning category.
    pub fn kind(&self) -> WarningKind {
        self.kind
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the source-location metadata, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "{source}: ")?;
        }
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Receiver of recoverable diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Reports a warning. Processing always continues afterwards.
    fn warn(&self, warning: Warning);
}

/// Forwards warnings to the [`log`] facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&self, warning: Warning) {
        warn!(
            kind:% = warning.kind(),
            source = warning.source().unwrap_or("<unknown>");
            "{}", warning.message()
        );
    }
}

/// Discards every warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&self, _warning: Warning) {}
}

/// Stores warnings in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    warnings: Mutex<Vec<Warning>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every warning received so far.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns every warning received so far.
    pub fn take(&self) -> Vec<Warning> {
        std::mem::take(&mut *self.warnings.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns the number of warnings of the given kind.
    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|warning| warning.kind() == kind)
            .count()
    }
}

impl DiagnosticSink for CollectingSink {
    fn warn(&self, warning: Warning) {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(warning);
    }
}

/// Attaches a fixed source location to every warning before forwarding it.
pub struct SourcedSink<'a> {
    inner: &'a dyn DiagnosticSink,
    source: Option<&'a str>,
}

impl<'a> SourcedSink<'a> {
    /// Wraps `inner`; warnings that already carry a source keep it.
    pub fn new(inner: &'a dyn DiagnosticSink, source: Option<&'a str>) -> Self {
        Self { inner, source }
    }
}

impl DiagnosticSink for SourcedSink<'_> {
    fn warn(&self, warning: Warning) {
        match self.source {
            Some(source) if warning.source().is_none() => {
                self.inner.warn(warning.with_source(source));
            }
            _ => self.inner.warn(warning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let warning = Warning::new(WarningKind::UnknownSpecifier, "`colour` is not recognized");
        assert_eq!(
            warning.to_string(),
            "unknown specifier: `colour` is not recognized"
        );

        let warning = warning.with_source("main.rs:4");
        assert_eq!(
            warning.to_string(),
            "main.rs:4: unknown specifier: `colour` is not recognized"
        );
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        sink.warn(Warning::new(WarningKind::SlowPath, "a"));
        sink.warn(Warning::new(WarningKind::UnknownSpecifier, "b"));
        sink.warn(Warning::new(WarningKind::SlowPath, "c"));

        assert_eq!(sink.count(WarningKind::SlowPath), 2);
        assert_eq!(sink.warnings().len(), 3);
        assert_eq!(sink.take().len(), 3);
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_sourced_sink_attaches_source() {
        let sink = CollectingSink::new();
        let sourced = SourcedSink::new(&sink, Some("lib.rs:10"));

        sourced.warn(Warning::new(WarningKind::SlowPath, "first"));
        sourced.warn(Warning::new(WarningKind::SlowPath, "second").with_source("kept"));

        let warnings = sink.warnings();
        assert_eq!(warnings[0].source(), Some("lib.rs:10"));
        assert_eq!(warnings[1].source(), Some("kept"));
    }

    #[test]
    fn test_sourced_sink_without_source() {
        let sink = CollectingSink::new();
        SourcedSink::new(&sink, None).warn(Warning::new(WarningKind::SlowPath, "x"));
        assert_eq!(sink.warnings()[0].source(), None);
    }
}
