//! Placeholder resolution and substitution.
//!
//! One [`Substitution`] runs per formatting call. It walks the live
//! placeholders in template order, resolves each to an argument, writes the
//! formatted value into the buffer and shifts every later placeholder by the
//! number of bytes inserted so far. Placeholders that share an argument and a
//! specification are formatted once; later occurrences copy the bytes
//! written for the first one.

use std::collections::HashMap;

use indexmap::IndexSet;
use log::trace;

use splice_core::{
    diagnostics::{DiagnosticSink, Warning, WarningKind},
    formatter::FormatContext,
    identifier::Identifier,
    specification::Specification,
};
use splice_parser::Span;

use crate::{
    arguments::{Arg, CallArguments},
    error::SpliceError,
};

/// A live placeholder of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Placeholder {
    /// Byte offset into the template buffer.
    pub position: usize,
    /// Index into the identifier table.
    pub identifier: usize,
    /// Index into the specification table.
    pub specification: usize,
    /// Set once substituted; pruned at the end of the call.
    pub formatted: bool,
    /// The placeholder in the template source.
    pub span: Span,
}

/// The argument a placeholder resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Positional(usize),
    Named(usize),
}

/// Output written earlier in the same call.
#[derive(Debug, Clone, Copy)]
struct CachedOutput {
    start: usize,
    len: usize,
}

/// Counters reported after a call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Summary {
    /// Placeholders substituted in this call.
    pub formatted: usize,
    /// Substitutions served from output already written in this call.
    pub reused: usize,
}

pub(crate) struct Substitution<'t> {
    pub buffer: &'t mut Vec<u8>,
    pub placeholders: &'t mut Vec<Placeholder>,
    pub identifiers: &'t IndexSet<Identifier>,
    pub specifications: &'t [Specification],
    pub sink: &'t dyn DiagnosticSink,
    pub slow_path_warnings: bool,
}

impl Substitution<'_> {
    /// Substitutes every placeholder `call` can resolve.
    ///
    /// The first formatting error stops substitution. Placeholders written
    /// before it stay substituted and the rest stay live.
    pub fn run(self, call: &CallArguments<'_, '_>) -> Result<Summary, SpliceError> {
        let Self {
            buffer,
            placeholders,
            identifiers,
            specifications,
            sink,
            slow_path_warnings,
        } = self;

        let mut summary = Summary::default();
        let mut cache: HashMap<(Slot, usize), CachedOutput> = HashMap::new();
        let mut next_auto = 0;
        let mut drift = 0usize;
        let mut failure = None;

        for placeholder in placeholders.iter_mut() {
            placeholder.position = placeholder
                .position
                .checked_add(drift)
                .ok_or(SpliceError::NumericOverflow)?;
            if failure.is_some() {
                continue;
            }

            let Some(slot) = identifiers
                .get_index(placeholder.identifier)
                .and_then(|identifier| resolve(identifier, call, &mut next_auto))
            else {
                trace!(position = placeholder.position; "Placeholder left unresolved");
                continue;
            };

            let key = (slot, placeholder.specification);
            let written = match cache.get(&key).copied() {
                Some(cached) => copy_output(buffer, placeholder.position, cached).map(|()| {
                    summary.reused += 1;
                    cached.len
                }),
                None => {
                    let arg = match slot {
                        Slot::Positional(index) => call.positional[index],
                        Slot::Named(index) => call.named[index],
                    };
                    let specification = specifications
                        .get(placeholder.specification)
                        .unwrap_or(&EMPTY);
                    write_argument(
                        buffer,
                        placeholder.position,
                        arg,
                        specification,
                        sink,
                        slow_path_warnings,
                    )
                    .inspect(|len| {
                        cache.insert(key, CachedOutput {
                            start: placeholder.position,
                            len: *len,
                        });
                    })
                }
            };

            match written {
                Ok(len) => {
                    trace!(position = placeholder.position, len, slot:?; "Placeholder substituted");
                    drift = drift.checked_add(len).ok_or(SpliceError::NumericOverflow)?;
                    placeholder.formatted = true;
                    summary.formatted += 1;
                }
                Err(err) => failure = Some(err),
            }
        }

        placeholders.retain(|placeholder| !placeholder.formatted);
        match failure {
            Some(err) => Err(err),
            None => Ok(summary),
        }
    }
}

static EMPTY: Specification = Specification::Specifiers(Vec::new());

fn resolve(identifier: &Identifier, call: &CallArguments<'_, '_>, next_auto: &mut usize) -> Option<Slot> {
    match identifier {
        Identifier::Auto => {
            let index = *next_auto;
            *next_auto += 1;
            (index < call.positional.len()).then_some(Slot::Positional(index))
        }
        Identifier::Position(index) => {
            (*index < call.positional.len()).then_some(Slot::Positional(*index))
        }
        Identifier::Name(name) => call.find_named(name).map(Slot::Named),
    }
}

/// Formats `arg` into a gap opened at `position`; returns the bytes written.
fn write_argument(
    buffer: &mut Vec<u8>,
    position: usize,
    arg: &Arg<'_>,
    specification: &Specification,
    sink: &dyn DiagnosticSink,
    slow_path_warnings: bool,
) -> Result<usize, SpliceError> {
    let value = arg.value();
    let bound = value.bind(specification, sink);

    match bound.reserve() {
        Some(len) => {
            open_gap(buffer, position, len)?;
            let mut context = FormatContext::new(&mut buffer[position..position + len]);
            bound.format_to(&mut context);
            if !context.is_exact() {
                let written = context.written();
                buffer.drain(position..position + len);
                return Err(SpliceError::FormatterContract {
                    type_name: value.type_name(),
                    reserved: len,
                    written,
                });
            }
            Ok(len)
        }
        None => {
            if slow_path_warnings {
                sink.warn(Warning::new(
                    WarningKind::SlowPath,
                    format!(
                        "`{}` has no in-place formatter and is formatted through a temporary string",
                        value.type_name()
                    ),
                ));
            }
            let text = bound.format();
            open_gap(buffer, position, text.len())?;
            buffer[position..position + text.len()].copy_from_slice(text.as_bytes());
            Ok(text.len())
        }
    }
}

fn copy_output(buffer: &mut Vec<u8>, position: usize, cached: CachedOutput) -> Result<(), SpliceError> {
    open_gap(buffer, position, cached.len)?;
    buffer.copy_within(cached.start..cached.start + cached.len, position);
    Ok(())
}

/// Inserts `len` bytes at `at`, moving the tail once.
fn open_gap(buffer: &mut Vec<u8>, at: usize, len: usize) -> Result<(), SpliceError> {
    let new_len = buffer
        .len()
        .checked_add(len)
        .ok_or(SpliceError::NumericOverflow)?;
    buffer
        .try_reserve(len)
        .map_err(|_| SpliceError::NumericOverflow)?;
    buffer.resize(new_len, b' ');
    buffer[at..].rotate_right(len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_gap() {
        let mut buffer = b"abcd".to_vec();
        open_gap(&mut buffer, 1, 2).unwrap();
        assert_eq!(buffer.len(), 6);
        assert_eq!(&buffer[..1], b"a");
        assert_eq!(&buffer[3..], b"bcd");

        open_gap(&mut buffer, 6, 1).unwrap();
        assert_eq!(buffer.len(), 7);
    }

    #[test]
    fn test_copy_output() {
        let mut buffer = b"xy-".to_vec();
        copy_output(&mut buffer, 3, CachedOutput { start: 0, len: 2 }).unwrap();
        assert_eq!(buffer, b"xy-xy");
    }

    #[test]
    fn test_open_gap_overflow() {
        let mut buffer = vec![0u8; 1];
        assert!(matches!(
            open_gap(&mut buffer, 0, usize::MAX),
            Err(SpliceError::NumericOverflow)
        ));
        assert_eq!(buffer.len(), 1);
    }
}
