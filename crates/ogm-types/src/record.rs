use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::Options;
use crate::symbol::Symbol;
use crate::value::Value;

/// A record field key: a plain name or an identity-keyed symbol.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Name(String),
    Sym(Symbol),
}

impl Key {
    /// The name for string keys, `None` for symbol keys.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(s) => Some(s),
            Self::Sym(_) => None,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Sym(_))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<Symbol> for Key {
    fn from(s: Symbol) -> Self {
        Self::Sym(s)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(s) => write!(f, "{s:?}"),
            Self::Sym(s) => write!(f, "{s:?}"),
        }
    }
}

/// Per-field descriptor attributes.
///
/// Each attribute defaults to true when undefined, so a freshly written
/// field is enumerable, writable, and configurable unless stated otherwise.
/// The raw `Option` state is preserved on the field; resolution happens at
/// read time through the `is_*` accessors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMeta {
    pub enumerable: Option<bool>,
    pub writable: Option<bool>,
    pub configurable: Option<bool>,
}

impl FieldMeta {
    pub fn is_enumerable(&self) -> bool {
        self.enumerable.unwrap_or(true)
    }

    pub fn is_writable(&self) -> bool {
        self.writable.unwrap_or(true)
    }

    pub fn is_configurable(&self) -> bool {
        self.configurable.unwrap_or(true)
    }

    /// Meta for a non-enumerable field.
    pub fn hidden() -> Self {
        Self {
            enumerable: Some(false),
            ..Self::default()
        }
    }

    /// Meta for a non-writable field.
    pub fn read_only() -> Self {
        Self {
            writable: Some(false),
            ..Self::default()
        }
    }
}

/// A field: a value plus its descriptor attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub value: Value,
    pub meta: FieldMeta,
}

/// A plain keyed record: the only category the engines recurse into
/// key-by-key.
///
/// Fields keep insertion order. Name keys and symbol keys share one table;
/// enumeration lists name keys first, then symbol keys (see
/// [`Record::selected_keys`]).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    entries: Vec<(Key, Field)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn get(&self, key: &Key) -> Option<&Field> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, field)| field)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Field> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, field)| field)
    }

    /// Insert with default meta. A repeated key keeps its original position
    /// and meta; only the value is replaced.
    pub fn insert(&mut self, key: impl Into<Key>, value: Value) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(field) => field.value = value,
            None => self.entries.push((
                key,
                Field {
                    value,
                    meta: FieldMeta::default(),
                },
            )),
        }
    }

    /// Define a field with explicit meta, replacing any existing field and
    /// its meta. Construction-time API that bypasses the write policy.
    pub fn define(&mut self, key: impl Into<Key>, value: Value, meta: FieldMeta) {
        let key = key.into();
        match self.get_mut(&key) {
            Some(field) => *field = Field { value, meta },
            None => self.entries.push((key, Field { value, meta })),
        }
    }

    /// Write a field under the descriptor policy: a key absent from the
    /// record is defined with the given meta; a write to an existing key is
    /// a plain value assignment that keeps the existing meta; a write to an
    /// existing non-writable key is silently dropped.
    ///
    /// Returns `false` iff the write was dropped.
    pub fn write_field(&mut self, key: Key, value: Value, meta: FieldMeta) -> bool {
        match self.get_mut(&key) {
            Some(field) => {
                if !field.meta.is_writable() {
                    return false;
                }
                field.value = value;
                true
            }
            None => {
                self.entries.push((key, Field { value, meta }));
                true
            }
        }
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[(Key, Field)] {
        &self.entries
    }

    /// The keys an engine should enumerate, per `options`.
    ///
    /// Name keys come first in insertion order, filtered to enumerable
    /// fields when the resolved `enumerable_only` policy says so; engines
    /// pass their own default for the unset case. Symbol keys follow when
    /// `include_symbols` is set and are not filtered by enumerability.
    pub fn selected_keys(&self, options: &Options, default_enumerable_only: bool) -> Vec<Key> {
        let enumerable_only = options
            .enumerable_only
            .unwrap_or(default_enumerable_only);
        let mut keys: Vec<Key> = self
            .entries
            .iter()
            .filter(|(key, field)| {
                !key.is_symbol() && (!enumerable_only || field.meta.is_enumerable())
            })
            .map(|(key, _)| key.clone())
            .collect();
        if options.include_symbols {
            keys.extend(
                self.entries
                    .iter()
                    .filter(|(key, _)| key.is_symbol())
                    .map(|(key, _)| key.clone()),
            );
        }
        keys
    }
}
