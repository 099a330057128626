//! Configuration types for Splice templates.
//!
//! All types implement [`serde::Deserialize`] so a configuration can be
//! loaded from any serde format. Missing sections and keys fall back to
//! their defaults.
//!
//! # Overview
//!
//! - [`FormatConfig`] - Top-level configuration.
//! - [`IdentifierConfig`] - Template validation rules.
//! - [`DiagnosticsConfig`] - Which warnings are reported.
//!
//! # Example
//!
//! ```
//! # use splice::config::FormatConfig;
//! let config = FormatConfig::default();
//! assert!(!config.identifiers().allow_mixed_explicit());
//! assert!(config.diagnostics().slow_path_warnings());
//! ```

use serde::Deserialize;

use splice_parser::ParseOptions;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormatConfig {
    /// Identifier rules section.
    #[serde(default)]
    identifiers: IdentifierConfig,

    /// Diagnostics section.
    #[serde(default)]
    diagnostics: DiagnosticsConfig,
}

impl FormatConfig {
    /// Creates a new [`FormatConfig`] from its sections.
    pub fn new(identifiers: IdentifierConfig, diagnostics: DiagnosticsConfig) -> Self {
        Self {
            identifiers,
            diagnostics,
        }
    }

    /// Returns the identifier rules.
    pub fn identifiers(&self) -> &IdentifierConfig {
        &self.identifiers
    }

    /// Returns the diagnostics settings.
    pub fn diagnostics(&self) -> &DiagnosticsConfig {
        &self.diagnostics
    }

    pub(crate) fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            allow_mixed_explicit: self.identifiers.allow_mixed_explicit,
        }
    }
}

/// Template validation rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct IdentifierConfig {
    /// Accept `{0}` and `{name}` placeholders in the same template.
    #[serde(default)]
    allow_mixed_explicit: bool,
}

impl IdentifierConfig {
    pub fn new(allow_mixed_explicit: bool) -> Self {
        Self {
            allow_mixed_explicit,
        }
    }

    pub fn allow_mixed_explicit(&self) -> bool {
        self.allow_mixed_explicit
    }
}

/// Which recoverable diagnostics are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DiagnosticsConfig {
    /// Warn when a formatter without the in-place fast path is used.
    #[serde(default = "default_true")]
    slow_path_warnings: bool,
}

impl DiagnosticsConfig {
    pub fn new(slow_path_warnings: bool) -> Self {
        Self { slow_path_warnings }
    }

    pub fn slow_path_warnings(&self) -> bool {
        self.slow_path_warnings
    }
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            slow_path_warnings: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: FormatConfig = toml::from_str("").unwrap();
        assert_eq!(config, FormatConfig::default());
    }

    #[test]
    fn test_sections() {
        let config: FormatConfig = toml::from_str(
            r#"
            [identifiers]
            allow_mixed_explicit = true

            [diagnostics]
            slow_path_warnings = false
            "#,
        )
        .unwrap();

        assert!(config.identifiers().allow_mixed_explicit());
        assert!(!config.diagnostics().slow_path_warnings());
        assert!(config.parse_options().allow_mixed_explicit);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: FormatConfig = toml::from_str("[diagnostics]\n").unwrap();
        assert!(config.diagnostics().slow_path_warnings());
        assert!(!config.identifiers().allow_mixed_explicit());
    }
}
