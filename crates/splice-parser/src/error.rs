//! Error and diagnostic system for the Splice template parser.
//!
//! This module provides:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the template source
//! - Severity levels
//! - A diagnostic collector for reporting every malformed spot in one pass
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error or warning with an optional error code, labeled source
//! locations and help text. Fatal diagnostics are wrapped in [`ParseError`];
//! warnings travel alongside a successfully parsed template.
//!
//! # Example
//!
//! ```
//! # use splice_parser::error::{Diagnostic, ErrorCode};
//! # use splice_parser::Span;
//! let diag = Diagnostic::error("cannot mix positional and named placeholders")
//!     .with_code(ErrorCode::E005)
//!     .with_label(Span::new(12..18), "named placeholder")
//!     .with_secondary_label(Span::new(0..3), "positional placeholder here")
//!     .with_help("use only one kind of identifier in a template");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
