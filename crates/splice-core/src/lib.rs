//! Splice Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Splice template
//! parser and the formatting engine. It includes:
//!
//! - **Identifiers**: How a placeholder names its argument ([`identifier::Identifier`])
//! - **Specifications**: Parsed `key=value` specifiers and nested groups ([`specification`] module)
//! - **Diagnostics**: The injected warning sink ([`diagnostics::DiagnosticSink`])
//! - **Formatters**: The per-type formatter protocol and the built-in
//!   formatters for scalars and containers ([`formatter`] module)

pub mod diagnostics;
pub mod formatter;
pub mod identifier;
pub mod specification;
