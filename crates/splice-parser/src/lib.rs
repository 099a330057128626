//! # Splice Parser
//!
//! Parser for Splice format templates. It turns template text into the
//! model the formatting engine works on:
//!
//! 1. **Scan** - split the template into literal text and placeholders,
//!    collapsing `{{` and `}}`
//! 2. **Identify** - classify each placeholder as auto-numbered, positional
//!    or named
//! 3. **Specify** - parse each distinct specification once
//! 4. **Validate** - check that every placeholder uses the same kind of
//!    identifier
//!
//! ## Usage
//!
//! ```
//! # use splice_parser::{ParseOptions, parse_template};
//! # use splice_parser::error::ParseError;
//! fn main() -> Result<(), ParseError> {
//!     let parsed = parse_template("{name:width=8} owes {amount}", ParseOptions::default())?;
//!
//!     assert_eq!(parsed.text, " owes ");
//!     assert_eq!(parsed.placeholders.len(), 2);
//!     assert_eq!(parsed.identifiers.len(), 2);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod identifier;
mod span;
pub mod specification;
pub mod template;

pub use span::Span;
pub use template::{ParseOptions, ParsedTemplate, PlaceholderSite, TemplateMode, parse_template};
