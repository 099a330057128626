//! Call arguments and their validation.
//!
//! A formatting call takes a list of [`Arg`]s: unnamed arguments bind to
//! auto-numbered and positional placeholders, named arguments bind to named
//! placeholders. Names starting with `__` are reserved; `__source` attaches
//! source-location metadata to the warnings of the call.

use std::borrow::Cow;

use splice_core::{
    diagnostics::NullSink,
    formatter::{Argument, Formattable},
    specification::Specification,
};
use splice_parser::TemplateMode;

use crate::error::SpliceError;

/// Prefix of reserved argument names.
pub const RESERVED_PREFIX: &str = "__";

/// Reserved argument overriding the source location of diagnostics.
pub const SOURCE_ARGUMENT: &str = "__source";

/// A single argument of a formatting call.
pub struct Arg<'a> {
    name: Option<Cow<'a, str>>,
    value: Box<dyn Argument + 'a>,
}

impl<'a> Arg<'a> {
    /// Creates an unnamed argument.
    pub fn new<T: Formattable + 'a>(value: T) -> Self {
        Self {
            name: None,
            value: Box::new(value),
        }
    }

    /// Creates a named argument.
    pub fn named<T: Formattable + 'a>(name: impl Into<Cow<'a, str>>, value: T) -> Self {
        Self {
            name: Some(name.into()),
            value: Box::new(value),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` if the argument has a reserved `__` name.
    pub fn is_reserved(&self) -> bool {
        self.name()
            .is_some_and(|name| name.starts_with(RESERVED_PREFIX))
    }

    pub fn value(&self) -> &dyn Argument {
        self.value.as_ref()
    }
}

impl std::fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arg")
            .field("name", &self.name)
            .field("type", &self.value.type_name())
            .finish()
    }
}

/// Builds a `Vec<Arg>` from `value` and `name = value` entries.
///
/// # Example
///
/// ```
/// let args = splice::args![1, "two", third = 3.0];
///
/// assert_eq!(args.len(), 3);
/// assert_eq!(args[2].name(), Some("third"));
/// ```
#[macro_export]
macro_rules! args {
    (@munch [$($out:expr,)*]) => {
        ::std::vec![$($out),*]
    };
    (@munch [$($out:expr,)*] $name:ident = $value:expr $(, $($rest:tt)*)?) => {
        $crate::args!(@munch [$($out,)* $crate::Arg::named(stringify!($name), $value),] $($($rest)*)?)
    };
    (@munch [$($out:expr,)*] $value:expr $(, $($rest:tt)*)?) => {
        $crate::args!(@munch [$($out,)* $crate::Arg::new($value),] $($($rest)*)?)
    };
    ($($input:tt)*) => {
        $crate::args!(@munch [] $($input)*)
    };
}

/// The arguments of one call, validated and split by kind.
#[derive(Debug)]
pub(crate) struct CallArguments<'c, 'a> {
    /// Unnamed arguments in call order.
    pub positional: Vec<&'c Arg<'a>>,
    /// Named, non-reserved arguments in call order.
    pub named: Vec<&'c Arg<'a>>,
    /// The value of `__source`, if given.
    pub source: Option<String>,
}

impl<'c, 'a> CallArguments<'c, 'a> {
    /// Validates `args` against a template's mode.
    ///
    /// Nothing is modified on failure.
    pub fn validate(args: &'c [Arg<'a>], mode: TemplateMode) -> Result<Self, SpliceError> {
        let mut positional = Vec::new();
        let mut named: Vec<&'c Arg<'a>> = Vec::new();
        let mut source = None;
        let mut seen: Vec<&str> = Vec::new();

        for arg in args {
            let Some(name) = arg.name() else {
                if let (TemplateMode::Explicit, Some(first_named)) = (mode, named.first()) {
                    return Err(SpliceError::ArgumentOrder {
                        index: positional.len(),
                        name: first_named.name().unwrap_or_default().to_string(),
                    });
                }
                positional.push(arg);
                continue;
            };

            if seen.contains(&name) {
                return Err(SpliceError::DuplicateNamedArgument(name.to_string()));
            }
            seen.push(name);

            if arg.is_reserved() {
                if name != SOURCE_ARGUMENT {
                    return Err(SpliceError::ReservedArgumentMisuse {
                        name: name.to_string(),
                        reason: "unknown reserved argument",
                    });
                }
                source = Some(
                    arg.value()
                        .bind(&Specification::empty(), &NullSink)
                        .format(),
                );
            } else if mode == TemplateMode::Auto {
                return Err(SpliceError::ReservedArgumentMisuse {
                    name: name.to_string(),
                    reason: "auto-numbered templates take no named arguments",
                });
            } else {
                named.push(arg);
            }
        }

        Ok(Self {
            positional,
            named,
            source,
        })
    }

    /// Returns the index of the first named argument called `name`.
    pub fn find_named(&self, name: &str) -> Option<usize> {
        self.named.iter().position(|arg| arg.name() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn test_macro_entries() {
        let value = String::from("owned");
        let args = args![1u8, &value, width = 3, __source = "main.rs:1"];

        let names: Vec<_> = args.iter().map(Arg::name).collect();
        assert_eq!(names, [None, None, Some("width"), Some("__source")]);
        assert!(args[3].is_reserved());
        assert!(!args[2].is_reserved());
    }

    #[test]
    fn test_macro_empty_and_expressions() {
        let empty: Vec<Arg<'_>> = args![];
        assert!(empty.is_empty());

        let x = 2;
        let args = args![x + 1, x > 1, total = x * 10,];
        assert_eq!(args.len(), 3);
        assert_eq!(args[2].name(), Some("total"));
    }

    #[test]
    fn test_explicit_split() {
        let args = args![1, 2, a = 3, b = 4, __source = "here"];
        let call = CallArguments::validate(&args, TemplateMode::Explicit).unwrap();

        assert_eq!(call.positional.len(), 2);
        assert_eq!(call.named.len(), 2);
        assert_eq!(call.source.as_deref(), Some("here"));
        assert_eq!(call.find_named("b"), Some(1));
        assert!(call.find_named("c").is_none());
    }

    #[test]
    fn test_positional_after_named() {
        let args = args![1, a = 2, 3];
        let err = CallArguments::validate(&args, TemplateMode::Explicit).unwrap_err();
        assert!(matches!(err, SpliceError::ArgumentOrder { index: 1, ref name } if name == "a"));
    }

    #[test]
    fn test_reserved_argument_does_not_affect_order() {
        let args = args![__source = "x", 1, 2];
        assert!(CallArguments::validate(&args, TemplateMode::Explicit).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let args = args![a = 1, a = 2];
        let err = CallArguments::validate(&args, TemplateMode::Explicit).unwrap_err();
        assert!(matches!(err, SpliceError::DuplicateNamedArgument(ref name) if name == "a"));
    }

    #[test]
    fn test_auto_mode_rejects_named() {
        let args = args![1, a = 2];
        let err = CallArguments::validate(&args, TemplateMode::Auto).unwrap_err();
        assert!(matches!(err, SpliceError::ReservedArgumentMisuse { ref name, .. } if name == "a"));
    }

    #[test]
    fn test_auto_mode_accepts_reserved() {
        let args = args![1, __source = "lib.rs:9", 2];
        let call = CallArguments::validate(&args, TemplateMode::Auto).unwrap();
        assert_eq!(call.positional.len(), 2);
        assert!(call.named.is_empty());
    }

    #[test]
    fn test_unknown_reserved_name() {
        let args = args![__colour = "red"];
        let err = CallArguments::validate(&args, TemplateMode::Explicit).unwrap_err();
        assert!(matches!(err, SpliceError::ReservedArgumentMisuse { .. }));
    }
}
