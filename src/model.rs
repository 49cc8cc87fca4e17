use std::collections::btree_map::{self, BTreeMap};
use std::slice;

use crate::error::{ErrorKind, JsonError};

/// A position within the JSON input text.
///
/// Used to report the location of parse errors within the source.
/// All values are zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputPosition {
    /// Character offset from the start of the input (zero-indexed).
    pub index: usize,
    /// Line number (zero-indexed, so first line is 0).
    pub row: usize,
    /// Column number within the line (zero-indexed).
    pub column: usize,
}

/// The kind currently held by a [`Value`].
///
/// Exactly one kind is active at a time; [`Value::kind`] reports which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

/// A JSON document node: a closed union over the seven JSON kinds.
///
/// Numbers are split into two canonical kinds: `Integer` (64-bit signed) and
/// `Float` (double precision). Construction widens any native numeric width
/// into one of those two; narrowing back out happens at the caller's boundary
/// via [`Value::to_integer`] / [`Value::to_float`].
///
/// Equality is structural: same active kind, recursively equal contents.
/// Float equality is exact, with no epsilon tolerance built in.
///
/// ```rust
/// use tabjson::Value;
///
/// let v = Value::from(42u8);
/// assert_eq!(v, Value::Integer(42));
/// assert_eq!(v.as_integer().unwrap(), 42);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Array),
    Object(Object),
}

impl Value {
    /// Reports which kind is currently active.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Strict access: succeeds only when the Boolean kind is active.
    pub fn as_boolean(&self) -> Result<bool, JsonError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(other.mismatch("boolean")),
        }
    }

    /// Strict access: succeeds only when the Integer kind is active.
    ///
    /// A `Float`-holding value fails here even when its content is a whole
    /// number; reading the stored representation and converting it are
    /// deliberately separate operations. Use [`Value::to_integer`] to convert.
    pub fn as_integer(&self) -> Result<i64, JsonError> {
        match self {
            Value::Integer(n) => Ok(*n),
            other => Err(other.mismatch("integer")),
        }
    }

    /// Strict access: succeeds only when the Float kind is active.
    pub fn as_float(&self) -> Result<f64, JsonError> {
        match self {
            Value::Float(x) => Ok(*x),
            other => Err(other.mismatch("float")),
        }
    }

    /// Strict access: succeeds only when the String kind is active.
    pub fn as_str(&self) -> Result<&str, JsonError> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    /// Strict access: succeeds only when the Array kind is active.
    pub fn as_array(&self) -> Result<&Array, JsonError> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.mismatch("array")),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array, JsonError> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.mismatch("array")),
        }
    }

    /// Strict access: succeeds only when the Object kind is active.
    pub fn as_object(&self) -> Result<&Object, JsonError> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.mismatch("object")),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object, JsonError> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.mismatch("object")),
        }
    }

    /// Converting access into an integral target.
    ///
    /// Accepts either numeric kind: `Integer` is returned as stored; `Float`
    /// is rounded to the nearest integer with ties away from zero. Narrowing
    /// the result to a smaller native width is the caller's concern and is
    /// not guarded here. Every non-numeric kind fails with `TypeMismatch`.
    pub fn to_integer(&self) -> Result<i64, JsonError> {
        match self {
            Value::Integer(n) => Ok(*n),
            Value::Float(x) => Ok(x.round() as i64),
            other => Err(other.mismatch("a numeric kind convertible to integer")),
        }
    }

    /// Converting access into a floating target.
    ///
    /// Accepts either numeric kind: `Float` is returned as stored; `Integer`
    /// is widened with a direct cast. Every non-numeric kind fails with
    /// `TypeMismatch`.
    pub fn to_float(&self) -> Result<f64, JsonError> {
        match self {
            Value::Float(x) => Ok(*x),
            Value::Integer(n) => Ok(*n as f64),
            other => Err(other.mismatch("a numeric kind convertible to float")),
        }
    }

    fn mismatch(&self, wanted: &str) -> JsonError {
        JsonError::simple(
            ErrorKind::TypeMismatch,
            format!("expected {}, found {:?}", wanted, self.kind()),
        )
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! value_from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Integer(n as i64)
            }
        })*
    };
}

// Every native width that widens losslessly into the 64-bit Integer kind.
value_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

/// A key-sorted associative container mapping `String` to [`Value`].
///
/// Keys are unique; iteration always yields ascending byte-wise key order,
/// independent of insertion order. Inserting an existing key overwrites the
/// stored value in place without changing the size.
///
/// ```rust
/// use tabjson::Object;
///
/// let mut obj = Object::new();
/// obj.insert("b", 2);
/// obj.insert("a", 1);
/// let keys: Vec<&str> = obj.iter().map(|(k, _)| k.as_str()).collect();
/// assert_eq!(keys, ["a", "b"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    entries: BTreeMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites. Overwriting does not change the size.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the stored value, or `KeyNotFound` if the key is absent.
    pub fn at(&self, key: &str) -> Result<&Value, JsonError> {
        self.entries.get(key).ok_or_else(|| {
            JsonError::simple(ErrorKind::KeyNotFound, format!("key {:?} not found", key))
        })
    }

    pub fn at_mut(&mut self, key: &str) -> Result<&mut Value, JsonError> {
        self.entries.get_mut(key).ok_or_else(|| {
            JsonError::simple(ErrorKind::KeyNotFound, format!("key {:?} not found", key))
        })
    }

    /// Subscript access: returns a mutable reference to the stored value,
    /// inserting a Null entry first if the key is absent. The caller can then
    /// overwrite it, or mutate an already-present Array in place.
    pub fn entry(&mut self, key: impl Into<String>) -> &mut Value {
        self.entries.entry(key.into()).or_insert(Value::Null)
    }

    /// Lookup without auto-vivification.
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes an entry, returning the value it held if the key was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in ascending byte-wise key order, stable across calls.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, Value> {
        self.entries.keys()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = Object::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

/// An ordered, insertion-order-preserving, index-addressable sequence of
/// [`Value`]. Indices are contiguous from 0.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array {
    items: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: Vec::with_capacity(capacity) }
    }

    pub fn push_back(&mut self, value: impl Into<Value>) {
        self.items.push(value.into());
    }

    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    /// Bounds-checked access; fails with `IndexOutOfRange` when `index` is at
    /// or past the end.
    pub fn at(&self, index: usize) -> Result<&Value, JsonError> {
        self.items.get(index).ok_or_else(|| self.range_error(index))
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut Value, JsonError> {
        let len = self.items.len();
        self.items.get_mut(index).ok_or_else(|| {
            JsonError::simple(
                ErrorKind::IndexOutOfRange,
                format!("index {} out of range for array of size {}", index, len),
            )
        })
    }

    pub fn remove(&mut self, index: usize) -> Result<Value, JsonError> {
        if index >= self.items.len() {
            return Err(self.range_error(index));
        }
        Ok(self.items.remove(index))
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Forward iteration in index order.
    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.items.iter()
    }

    fn range_error(&self, index: usize) -> JsonError {
        JsonError::simple(
            ErrorKind::IndexOutOfRange,
            format!("index {} out of range for array of size {}", index, self.items.len()),
        )
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Self { items }
    }
}

impl<T: Into<Value>> FromIterator<T> for Array {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { items: iter.into_iter().map(Into::into).collect() }
    }
}

/// A single named top-level pair.
///
/// Not a general container; it exists only as the unit of named top-level
/// serialization (`"key":` followed by the value).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub key: String,
    pub value: Value,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}
