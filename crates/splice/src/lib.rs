//! Splice: incremental, extensible text formatting.
//!
//! A template is literal text with placeholders in braces. Placeholders are
//! auto-numbered (`{}`), positional (`{0}`) or named (`{user}`), optionally
//! followed by a specification (`{0:width=8,justification=right}`). A template
//! uses a single identifier kind.
//!
//! # Quick Start
//!
//! ```
//! let text = splice::format("{} + {} = {}", &splice::args![1, 2, 3])?;
//! assert_eq!(text, "1 + 2 = 3");
//! # Ok::<(), splice::SpliceError>(())
//! ```
//!
//! # Incremental Formatting
//!
//! A [`Template`] can be formatted over several calls. Placeholders that a
//! call cannot resolve stay in place for the next one:
//!
//! ```
//! use splice::{Template, args};
//!
//! let mut template = Template::parse("{greeting}, {name}!")?;
//! template.format(&args![greeting = "Hello"])?;
//! assert_eq!(template.text(), "Hello, {name}!");
//!
//! template.format(&args![name = "world"])?;
//! assert_eq!(template.finish()?, "Hello, world!");
//! # Ok::<(), splice::SpliceError>(())
//! ```
//!
//! # Custom Types
//!
//! Any type implementing [`formatter::Formattable`] can be passed as an
//! argument. Its formatter parses the placeholder's specification once and
//! either writes into a pre-sized window of the output
//! ([`formatter::FormatTo`]) or returns a whole string.

pub mod config;

mod arguments;
mod engine;
mod error;
mod template;

pub use arguments::{Arg, RESERVED_PREFIX, SOURCE_ARGUMENT};
pub use error::SpliceError;
pub use template::Template;

pub use splice_core::{diagnostics, formatter, identifier, specification};
pub use splice_parser::{
    Span, TemplateMode,
    error::{Diagnostic, ErrorCode, ParseError, Severity},
};

/// Formats `template` with `args` in one step.
///
/// # Errors
///
/// Returns an error if the template is malformed, the arguments are invalid
/// or a placeholder is left without an argument.
pub fn format(template: &str, args: &[Arg<'_>]) -> Result<String, SpliceError> {
    let mut template = Template::parse(template)?;
    template.format(args)?;
    template.finish()
}
