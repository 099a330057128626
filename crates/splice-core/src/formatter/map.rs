//! Map and map entry formatters.
//!
//! Maps render as `{ k: v, k: v }` and a single [`MapEntry`] as `{ k: v }`.
//! Group 1 of a group list configures the key formatter and group 2 the
//! value formatter.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::{
    diagnostics::DiagnosticSink,
    formatter::{
        FormatContext, FormatTo, Formattable, Formatter,
        composite::{BRACES, KEY_SEPARATOR, add, parse_shell},
        format_in_place, measure,
        options::Field,
        write_nested,
    },
    specification::Specification,
};

/// Key/value collections.
pub trait Map {
    type Key;
    type Value;

    /// Returns the entries in iteration order.
    fn entries(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;
}

impl<K, V, S> Map for HashMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl<K, V> Map for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl<K, V, S> Map for IndexMap<K, V, S> {
    type Key = K;
    type Value = V;

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl<K: Formattable, V: Formattable, S> Formattable for HashMap<K, V, S> {
    type Formatter = MapFormatter<K::Formatter, V::Formatter>;
}

impl<K: Formattable, V: Formattable> Formattable for BTreeMap<K, V> {
    type Formatter = MapFormatter<K::Formatter, V::Formatter>;
}

impl<K: Formattable, V: Formattable, S> Formattable for IndexMap<K, V, S> {
    type Formatter = MapFormatter<K::Formatter, V::Formatter>;
}

/// A single key/value pair, formatted as `{ key: value }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapEntry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> MapEntry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K: Formattable, V: Formattable> Formattable for MapEntry<K, V> {
    type Formatter = MapEntryFormatter<K::Formatter, V::Formatter>;
}

/// Key and value formatters shared by maps and single entries.
#[derive(Debug, Default, Clone)]
struct Entries<KF, VF> {
    field: Field,
    key: KF,
    value: VF,
}

impl<KF, VF> Entries<KF, VF> {
    fn parse<K, V>(&mut self, specification: &Specification, sink: &dyn DiagnosticSink, name: &str)
    where
        K: ?Sized,
        V: ?Sized,
        KF: Formatter<K>,
        VF: Formatter<V>,
    {
        parse_shell(&mut self.field, specification, sink, name);
        self.key.parse(specification.element(1), sink);
        self.value.parse(specification.element(2), sink);
    }

    fn is_in_place<K, V>(&self) -> bool
    where
        K: ?Sized,
        V: ?Sized,
        KF: Formatter<K>,
        VF: Formatter<V>,
    {
        self.key.in_place().is_some() && self.value.in_place().is_some()
    }

    fn content<'v, K, V, I>(&self, entries: I) -> (usize, usize)
    where
        K: ?Sized + 'v,
        V: ?Sized + 'v,
        KF: Formatter<K>,
        VF: Formatter<V>,
        I: Iterator<Item = (&'v K, &'v V)>,
    {
        let separator = (KEY_SEPARATOR.len(), KEY_SEPARATOR.len());
        let mut count = 0;
        let mut total = (0, 0);
        for (key, value) in entries {
            count += 1;
            total = add(total, measure(&self.key, key));
            total = add(total, separator);
            total = add(total, measure(&self.value, value));
        }
        BRACES.measure(count, total)
    }

    fn write<'v, K, V, I>(&self, chars: usize, entries: I, context: &mut FormatContext<'_>)
    where
        K: ?Sized + 'v,
        V: ?Sized + 'v,
        KF: Formatter<K>,
        VF: Formatter<V>,
        I: Iterator<Item = (&'v K, &'v V)>,
    {
        self.field.write(chars, context, |context| {
            BRACES.write(entries, context, |(key, value), context| {
                write_nested(&self.key, key, context);
                context.write_str(KEY_SEPARATOR);
                write_nested(&self.value, value, context);
            });
        });
    }
}

/// Formatter for [`Map`] values.
#[derive(Debug, Default, Clone)]
pub struct MapFormatter<KF, VF> {
    inner: Entries<KF, VF>,
}

impl<M, KF, VF> Formatter<M> for MapFormatter<KF, VF>
where
    M: Map + ?Sized,
    KF: Formatter<M::Key>,
    VF: Formatter<M::Value>,
{
    fn parse(&mut self, specification: &Specification, sink: &dyn DiagnosticSink) {
        self.inner
            .parse::<M::Key, M::Value>(specification, sink, "map");
    }

    fn format(&self, value: &M) -> String {
        format_in_place(self, value)
    }

    fn in_place(&self) -> Option<&dyn FormatTo<M>> {
        if self.inner.is_in_place::<M::Key, M::Value>() {
            Some(self)
        } else {
            None
        }
    }
}

impl<M, KF, VF> FormatTo<M> for MapFormatter<KF, VF>
where
    M: Map + ?Sized,
    KF: Formatter<M::Key>,
    VF: Formatter<M::Value>,
{
    fn reserve(&self, value: &M) -> usize {
        let (bytes, chars) = self.inner.content(value.entries());
        self.inner.field.reserve(bytes, chars)
    }

    fn char_count(&self, value: &M) -> usize {
        let (_, chars) = self.inner.content(value.entries());
        self.inner.field.char_count(chars)
    }

    fn format_to(&self, value: &M, context: &mut FormatContext<'_>) {
        let (_, chars) = self.inner.content(value.entries());
        self.inner.write(chars, value.entries(), context);
    }
}

/// Formatter for [`MapEntry`] values.
#[derive(Debug, Default, Clone)]
pub struct MapEntryFormatter<KF, VF> {
    inner: Entries<KF, VF>,
}

impl<K, V, KF, VF> Formatter<MapEntry<K, V>> for MapEntryFormatter<KF, VF>
where
    KF: Formatter<K>,
    VF: Formatter<V>,
{
    fn parse(&mut self, specification: &Specification, sink: &dyn DiagnosticSink) {
        self.inner.parse::<K, V>(specification, sink, "map entry");
    }

    fn format(&self, value: &MapEntry<K, V>) -> String {
        format_in_place(self, value)
    }

    fn in_place(&self) -> Option<&dyn FormatTo<MapEntry<K, V>>> {
        if self.inner.is_in_place::<K, V>() {
            Some(self)
        } else {
            None
        }
    }
}

impl<K, V, KF, VF> FormatTo<MapEntry<K, V>> for MapEntryFormatter<KF, VF>
where
    KF: Formatter<K>,
    VF: Formatter<V>,
{
    fn reserve(&self, value: &MapEntry<K, V>) -> usize {
        let (bytes, chars) = self.inner.content(std::iter::once((&value.key, &value.value)));
        self.inner.field.reserve(bytes, chars)
    }

    fn char_count(&self, value: &MapEntry<K, V>) -> usize {
        let (_, chars) = self.inner.content(std::iter::once((&value.key, &value.value)));
        self.inner.field.char_count(chars)
    }

    fn format_to(&self, value: &MapEntry<K, V>, context: &mut FormatContext<'_>) {
        let entry = std::iter::once((&value.key, &value.value));
        let (_, chars) = self.inner.content(entry.clone());
        self.inner.write(chars, entry, context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        diagnostics::{CollectingSink, NullSink, WarningKind},
        specification::Specifier,
    };

    fn flat(pairs: &[(&str, &str)]) -> Specification {
        Specification::Specifiers(pairs.iter().map(|(k, v)| Specifier::new(*k, *v)).collect())
    }

    fn render<T: Formattable>(value: &T, spec: &Specification) -> String {
        let mut formatter = T::Formatter::default();
        formatter.parse(spec, &NullSink);
        let text = formatter.format(value);
        if let Some(fast) = formatter.in_place() {
            assert_eq!(fast.reserve(value), text.len());
        }
        text
    }

    #[test]
    fn test_map_layout() {
        let map = BTreeMap::from([("a", 1), ("b", 2)]);
        assert_eq!(render(&map, &Specification::empty()), "{ a: 1, b: 2 }");
        assert_eq!(
            render(&HashMap::<String, u8>::new(), &Specification::empty()),
            "{ }"
        );
    }

    #[test]
    fn test_index_map_keeps_insertion_order() {
        let mut map = IndexMap::new();
        map.insert("zeta", 'z');
        map.insert("alpha", 'a');
        assert_eq!(render(&map, &Specification::empty()), "{ zeta: z, alpha: a }");
    }

    #[test]
    fn test_group_list_configures_key_and_value() {
        let map = BTreeMap::from([(10u8, 0.5f64)]);
        let spec = Specification::Groups(vec![
            flat(&[("width", "20")]),
            flat(&[("representation", "hexadecimal"), ("digits", "4")]),
            flat(&[("precision", "1"), ("sign", "both")]),
        ]);
        assert_eq!(render(&map, &spec), "{ 000a: +0.5 }      ");
    }

    #[test]
    fn test_map_entry() {
        let entry = MapEntry::new("answer", 42);
        assert_eq!(render(&entry, &Specification::empty()), "{ answer: 42 }");

        let spec = Specification::Groups(vec![
            flat(&[("width", "16"), ("justification", "right")]),
            flat(&[("width", "7")]),
        ]);
        assert_eq!(render(&entry, &spec), " { answer : 42 }");
    }

    #[test]
    fn test_nested_values() {
        let map = BTreeMap::from([("xs", vec![1, 2])]);
        assert_eq!(
            render(&map, &Specification::empty()),
            "{ xs: [ 1, 2 ] }"
        );
    }

    #[test]
    fn test_unknown_shell_key_warns_once() {
        let sink = CollectingSink::new();
        let spec = Specification::Groups(vec![flat(&[("digits", "3")])]);
        let mut formatter = <BTreeMap<u8, u8> as Formattable>::Formatter::default();
        Formatter::<BTreeMap<u8, u8>>::parse(&mut formatter, &spec, &sink);
        assert_eq!(sink.count(WarningKind::UnknownSpecifier), 1);
    }
}
