use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::callable::Callable;
use crate::collections::{ValueMap, ValueSet};
use crate::opaque::{Opaque, OpaqueValue};
use crate::pattern::Pattern;
use crate::record::{Field, FieldMeta, Key, Record};
use crate::symbol::Symbol;
use crate::temporal::Timestamp;

/// Shared handle to an ordered list of values.
pub type SeqHandle = Rc<RefCell<Vec<Value>>>;
/// Shared handle to a unique-value collection.
pub type SetHandle = Rc<RefCell<ValueSet>>;
/// Shared handle to a key/value collection.
pub type MapHandle = Rc<RefCell<ValueMap>>;
/// Shared handle to a plain keyed record.
pub type RecordHandle = Rc<RefCell<Record>>;

/// Any datum flowing through the merge and clone engines.
///
/// `Value` is a cheap-to-clone handle: primitive variants are held by value,
/// composite variants hold an `Rc<RefCell<..>>` so that the same underlying
/// collection can be reached through many handles and mutated in place.
/// Cloning a `Value` clones the handle, never the contents; use the clone
/// engine for an independent copy.
///
/// Composite identity is pointer identity (see [`Value::address`]), which is
/// what the visitation trackers and the engines' skip-identical-write checks
/// key on. Structural equality is available through `PartialEq` but must not
/// be applied to cyclic graphs.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Sym(Symbol),
    Seq(SeqHandle),
    Set(SetHandle),
    Map(MapHandle),
    Time(Timestamp),
    Pattern(Pattern),
    Record(RecordHandle),
    Callable(Callable),
    Opaque(Opaque),
}

impl Value {
    /// A new empty record.
    pub fn record() -> Self {
        Self::Record(Rc::new(RefCell::new(Record::new())))
    }

    /// A record populated from `(key, value)` pairs with default field meta.
    pub fn record_from<K, I>(fields: I) -> Self
    where
        K: Into<Key>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut record = Record::new();
        for (key, value) in fields {
            record.insert(key, value);
        }
        Self::Record(Rc::new(RefCell::new(record)))
    }

    /// A new sequence holding `items` in order.
    pub fn sequence<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Seq(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// A new set built from `items` in iteration order, duplicates dropped.
    pub fn set_of<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Set(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// A new map built from `entries` in iteration order; a repeated key
    /// keeps its first position and takes the last value.
    pub fn map_of<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        Self::Map(Rc::new(RefCell::new(entries.into_iter().collect())))
    }

    /// Wrap an already-built record in a fresh handle.
    pub fn from_record(record: Record) -> Self {
        Self::Record(Rc::new(RefCell::new(record)))
    }

    /// Wrap an already-built set in a fresh handle.
    pub fn from_set(set: ValueSet) -> Self {
        Self::Set(Rc::new(RefCell::new(set)))
    }

    /// Wrap an already-built map in a fresh handle.
    pub fn from_map(map: ValueMap) -> Self {
        Self::Map(Rc::new(RefCell::new(map)))
    }

    /// Wrap an invocable unit.
    pub fn callable(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self::Callable(Callable::new(f))
    }

    /// Wrap a foreign value the classifier does not recognize.
    pub fn opaque(value: impl OpaqueValue + 'static) -> Self {
        Self::Opaque(Opaque::new(value))
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn as_record(&self) -> Option<RecordHandle> {
        match self {
            Self::Record(h) => Some(Rc::clone(h)),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<SeqHandle> {
        match self {
            Self::Seq(h) => Some(Rc::clone(h)),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<SetHandle> {
        match self {
            Self::Set(h) => Some(Rc::clone(h)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<MapHandle> {
        match self {
            Self::Map(h) => Some(Rc::clone(h)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Read a field of a record value. `None` for non-records and absent keys.
    pub fn get_field(&self, key: impl Into<Key>) -> Option<Value> {
        let record = self.as_record()?;
        let key = key.into();
        let borrowed = record.borrow();
        borrowed.get(&key).map(|field| field.value.clone())
    }

    /// Write a field of a record value with default meta, honoring the
    /// non-writable drop policy. `false` for non-records or dropped writes.
    pub fn set_field(&self, key: impl Into<Key>, value: Value) -> bool {
        match self.as_record() {
            Some(record) => record
                .borrow_mut()
                .write_field(key.into(), value, FieldMeta::default()),
            None => false,
        }
    }

    /// Define a field of a record value with explicit meta, unconditionally.
    /// Construction-time API; `false` for non-records.
    pub fn define_field(&self, key: impl Into<Key>, value: Value, meta: FieldMeta) -> bool {
        match self.as_record() {
            Some(record) => {
                record.borrow_mut().define(key.into(), value, meta);
                true
            }
            None => false,
        }
    }

    // ---------------------------------------------------------------
    // Identity
    // ---------------------------------------------------------------

    /// Stable address of the underlying allocation for composite values,
    /// `None` for by-value data. This is the identity the visitation
    /// trackers key on; it is stable for as long as the graph is alive.
    pub fn address(&self) -> Option<usize> {
        match self {
            Self::Seq(h) => Some(Rc::as_ptr(h) as *const () as usize),
            Self::Set(h) => Some(Rc::as_ptr(h) as *const () as usize),
            Self::Map(h) => Some(Rc::as_ptr(h) as *const () as usize),
            Self::Record(h) => Some(Rc::as_ptr(h) as *const () as usize),
            Self::Callable(c) => Some(c.address()),
            Self::Opaque(o) => Some(o.address()),
            _ => None,
        }
    }

    /// Same-value identity: primitives compare by value (with NaN equal to
    /// NaN and zero equal to negative zero), immutable leaves by content,
    /// composites by pointer identity. This is the "is it already the same
    /// thing" check the merge engine uses to skip redundant writes.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => *a as f64 == *b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Sym(a), Self::Sym(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a == b,
            _ => match (self.address(), other.address()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

/// Structural equality. Composites compare element-by-element; callables and
/// opaques compare by identity. Diverges on cyclic graphs.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => *a as f64 == *b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Sym(a), Self::Sym(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => *a.borrow() == *b.borrow(),
            (Self::Set(a), Self::Set(b)) => *a.borrow() == *b.borrow(),
            (Self::Map(a), Self::Map(b)) => *a.borrow() == *b.borrow(),
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::Pattern(a), Self::Pattern(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => *a.borrow() == *b.borrow(),
            (Self::Callable(a), Self::Callable(b)) => a.address() == b.address(),
            (Self::Opaque(a), Self::Opaque(b)) => a.address() == b.address(),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Sym(s) => write!(f, "{s:?}"),
            Self::Seq(h) => f.debug_list().entries(h.borrow().iter()).finish(),
            Self::Set(h) => {
                write!(f, "Set")?;
                f.debug_set().entries(h.borrow().iter()).finish()
            }
            Self::Map(h) => {
                write!(f, "Map")?;
                f.debug_map()
                    .entries(h.borrow().entries().iter().map(|(k, v)| (k, v)))
                    .finish()
            }
            Self::Time(t) => write!(f, "{t:?}"),
            Self::Pattern(p) => write!(f, "{p:?}"),
            Self::Record(h) => f
                .debug_map()
                .entries(
                    h.borrow()
                        .entries()
                        .iter()
                        .map(|(k, Field { value, .. })| (k.clone(), value.clone())),
                )
                .finish(),
            Self::Callable(c) => write!(f, "{c:?}"),
            Self::Opaque(o) => write!(f, "{o:?}"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Symbol> for Value {
    fn from(v: Symbol) -> Self {
        Self::Sym(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Self::Time(v)
    }
}

impl From<Pattern> for Value {
    fn from(v: Pattern) -> Self {
        Self::Pattern(v)
    }
}
