//! Collector for accumulating diagnostics during a parse.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so one parse can report every problem it finds.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a diagnostic; an error marks the collector as failed.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Finishes collection.
    ///
    /// - With errors: `Err(ParseError)` holding every diagnostic, warnings included.
    /// - Without errors: `Ok` with the warnings.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
