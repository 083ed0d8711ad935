//! Dynamic record model walked by the adapter.
//!
//! Storage semantics follow the container kind:
//!
//! - Scalars, [`Record`]s, arrays and boxed values ([`Value::Any`]) are plain
//!   values. Cloning them yields independent storage.
//! - [`Pointer`] targets, [`Sequence`] backing storage and [`Map`] storage are
//!   shared. Cloning the handle aliases the same storage, so a write through
//!   one clone is visible through every other.
//!
//! The adapter relies on exactly these rules to decide what it may edit in
//! place and what has to be redirected through the write-back ledger.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::tag::Tag;

/// Shared, lockable storage used by pointers, sequences and maps.
pub type Shared<T> = Arc<RwLock<T>>;

/// Wrap a value in fresh shared storage.
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}

/// Flat kind tag of a [`Value`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Text,
    Bool,
    Record,
    Sequence,
    Array,
    Map,
    Pointer,
    Any,
}

impl Kind {
    /// Zero value of a scalar kind; `None` for composite kinds.
    pub fn zero(self) -> Option<Value> {
        let zero = match self {
            Kind::I8 => Value::I8(0),
            Kind::I16 => Value::I16(0),
            Kind::I32 => Value::I32(0),
            Kind::I64 => Value::I64(0),
            Kind::U8 => Value::U8(0),
            Kind::U16 => Value::U16(0),
            Kind::U32 => Value::U32(0),
            Kind::U64 => Value::U64(0),
            Kind::F32 => Value::F32(0.0),
            Kind::F64 => Value::F64(0.0),
            Kind::Text => Value::Text(String::new()),
            Kind::Bool => Value::Bool(false),
            _ => return None,
        };
        Some(zero)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Text => "text",
            Kind::Bool => "bool",
            Kind::Record => "record",
            Kind::Sequence => "sequence",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::Pointer => "pointer",
            Kind::Any => "any",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value in the dynamic record model.
#[derive(Clone, Debug)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Text(String),
    Bool(bool),
    Record(Record),
    /// Pointer or optional: absent, or aliasing a shared target.
    Pointer(Pointer),
    /// Polymorphic box: empty, or owning any other value.
    Any(Option<Box<Value>>),
    /// Growable sequence over shared backing storage.
    Sequence(Sequence),
    /// Fixed-size array, owned.
    Array(Vec<Value>),
    /// Associative map over shared storage.
    Map(Map),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Text(_) => Kind::Text,
            Value::Bool(_) => Kind::Bool,
            Value::Record(_) => Kind::Record,
            Value::Pointer(_) => Kind::Pointer,
            Value::Any(_) => Kind::Any,
            Value::Sequence(_) => Kind::Sequence,
            Value::Array(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
        }
    }

    /// Whether the value holds its kind's zero value.
    ///
    /// Floats are zero only for `+0.0`; absent pointers and empty boxes are
    /// zero; composite values are zero when every part is.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::I8(v) => *v == 0,
            Value::I16(v) => *v == 0,
            Value::I32(v) => *v == 0,
            Value::I64(v) => *v == 0,
            Value::U8(v) => *v == 0,
            Value::U16(v) => *v == 0,
            Value::U32(v) => *v == 0,
            Value::U64(v) => *v == 0,
            Value::F32(v) => v.to_bits() == 0,
            Value::F64(v) => v.to_bits() == 0,
            Value::Text(v) => v.is_empty(),
            Value::Bool(v) => !*v,
            Value::Record(record) => record.fields.iter().all(|f| f.value.is_zero()),
            Value::Pointer(pointer) => pointer.is_nil(),
            Value::Any(inner) => inner.is_none(),
            Value::Sequence(_) | Value::Map(_) => false,
            Value::Array(items) => items.iter().all(Value::is_zero),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// A present pointer to fresh storage holding `target`.
    pub fn pointer(target: Value) -> Self {
        Value::Pointer(Pointer::new(target))
    }

    /// A present pointer aliasing existing storage.
    pub fn pointer_to(target: &Shared<Value>) -> Self {
        Value::Pointer(Pointer::to(target.clone()))
    }

    /// An absent pointer whose target would be of kind `elem`.
    pub fn nil(elem: Kind) -> Self {
        Value::Pointer(Pointer::nil(elem))
    }

    pub fn boxed(inner: Value) -> Self {
        Value::Any(Some(Box::new(inner)))
    }

    pub fn empty_box() -> Self {
        Value::Any(None)
    }

    pub fn sequence(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Sequence(Sequence::new(items.into_iter().collect()))
    }

    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(items.into_iter().collect())
    }

    pub fn map<K: Into<MapKey>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(Map::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_pointer(&self) -> Option<&Pointer> {
        match self {
            Value::Pointer(pointer) => Some(pointer),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Follow a dotted path of field names (not display names) through
    /// records, present pointers and boxes.
    pub fn lookup(&self, path: &str) -> Option<Value> {
        let mut current = self.clone();
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            current = current.deref_all();
            current = current.as_record()?.get(segment)?.clone();
        }
        Some(current)
    }

    /// Strip present pointers and boxes until a plain value remains.
    pub fn deref_all(&self) -> Value {
        match self {
            Value::Pointer(pointer) => match pointer.get() {
                Some(target) => target.deref_all(),
                None => self.clone(),
            },
            Value::Any(Some(inner)) => inner.deref_all(),
            other => other.clone(),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Text,
    bool => Bool,
    Record => Record,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::I8(a), Value::I8(b)) => a == b,
            (Value::I16(a), Value::I16(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U8(a), Value::U8(b)) => a == b,
            (Value::U16(a), Value::U16(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Pointer(a), Value::Pointer(b)) => a == b,
            (Value::Any(a), Value::Any(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Record(record) => write!(f, "{record}"),
            Value::Pointer(pointer) => match pointer.get() {
                Some(target) => write!(f, "{target}"),
                None => f.write_str("<nil>"),
            },
            Value::Any(Some(inner)) => write!(f, "{inner}"),
            Value::Any(None) => f.write_str("<nil>"),
            Value::Sequence(seq) => write_list(f, &seq.to_vec()),
            Value::Array(items) => write_list(f, items),
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.entries().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::F32(v) => serializer.serialize_f32(*v),
            Value::F64(v) => serializer.serialize_f64(*v),
            Value::Text(v) => serializer.serialize_str(v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Record(record) => record.serialize(serializer),
            Value::Pointer(pointer) => match pointer.get() {
                Some(target) => target.serialize(serializer),
                None => serializer.serialize_none(),
            },
            Value::Any(Some(inner)) => inner.serialize(serializer),
            Value::Any(None) => serializer.serialize_none(),
            Value::Sequence(seq) => serialize_list(serializer, &seq.to_vec()),
            Value::Array(items) => serialize_list(serializer, items),
            Value::Map(map) => {
                let entries = map.entries();
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in &entries {
                    out.serialize_entry(&key.to_string(), value)?;
                }
                out.end()
            }
        }
    }
}

fn serialize_list<S: Serializer>(serializer: S, items: &[Value]) -> Result<S::Ok, S::Error> {
    let mut out = serializer.serialize_seq(Some(items.len()))?;
    for item in items {
        out.serialize_element(item)?;
    }
    out.end()
}

/// A named record: an ordered list of tagged fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    name: String,
    fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field carrying raw metadata, e.g. `minimum:"5" json:"count"`.
    pub fn field(mut self, name: impl Into<String>, tag: &str, value: impl Into<Value>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            tag: Tag::new(tag),
            value: value.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| &mut f.value)
    }

    /// Replace the value of an existing field. Returns false if absent.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.name)?;
        for (i, field) in self.fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{}: {}", field.name, field.value)?;
        }
        if self.fields.is_empty() {
            f.write_str("}")
        } else {
            f.write_str(" }")
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.fields.len()))?;
        for field in &self.fields {
            out.serialize_entry(&field.display_name(), &field.value)?;
        }
        out.end()
    }
}

/// A record field: name, raw metadata and value.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub tag: Tag,
    pub value: Value,
}

impl Field {
    /// Name used in paths and snapshots: the `json` override when present.
    pub fn display_name(&self) -> String {
        self.tag
            .display_name()
            .unwrap_or_else(|| self.name.clone())
    }
}

/// Pointer or optional. Carries its element kind so an absent pointer can
/// still be allocated by a default rule.
#[derive(Clone, Debug)]
pub struct Pointer {
    elem: Kind,
    target: Option<Shared<Value>>,
}

impl Pointer {
    pub fn new(target: Value) -> Self {
        Self::to(shared(target))
    }

    pub fn to(target: Shared<Value>) -> Self {
        let elem = target.read().kind();
        Self {
            elem,
            target: Some(target),
        }
    }

    pub fn nil(elem: Kind) -> Self {
        Self { elem, target: None }
    }

    pub fn elem(&self) -> Kind {
        self.elem
    }

    pub fn is_nil(&self) -> bool {
        self.target.is_none()
    }

    pub fn target(&self) -> Option<&Shared<Value>> {
        self.target.as_ref()
    }

    /// Snapshot of the pointee.
    pub fn get(&self) -> Option<Value> {
        self.target.as_ref().map(|t| t.read_recursive().clone())
    }

    /// Point at fresh storage holding `value`.
    pub fn set(&mut self, value: Value) {
        self.elem = value.kind();
        self.target = Some(shared(value));
    }

    /// Whether both pointers alias the same storage.
    pub fn same_target(&self, other: &Pointer) -> bool {
        match (&self.target, &other.target) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        match (&self.target, &other.target) {
            (None, None) => self.elem == other.elem,
            (Some(a), Some(b)) => {
                Arc::ptr_eq(a, b) || *a.read_recursive() == *b.read_recursive()
            }
            _ => false,
        }
    }
}

/// Sequence handle. Clones alias the same backing storage.
#[derive(Clone, Debug)]
pub struct Sequence(Shared<Vec<Value>>);

impl Sequence {
    pub fn new(items: Vec<Value>) -> Self {
        Self(shared(items))
    }

    pub fn storage(&self) -> &Shared<Vec<Value>> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.read_recursive().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read_recursive().get(index).cloned()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.0.read_recursive().clone()
    }

    pub fn same_storage(&self, other: &Sequence) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.same_storage(other) || *self.0.read_recursive() == *other.0.read_recursive()
    }
}

/// Map handle. Clones alias the same storage.
#[derive(Clone, Debug)]
pub struct Map(Shared<BTreeMap<MapKey, Value>>);

impl Map {
    pub fn new(entries: BTreeMap<MapKey, Value>) -> Self {
        Self(shared(entries))
    }

    pub fn storage(&self) -> &Shared<BTreeMap<MapKey, Value>> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.read_recursive().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: impl Into<MapKey>) -> Option<Value> {
        self.0.read_recursive().get(&key.into()).cloned()
    }

    /// Snapshot of all entries in key order.
    pub fn entries(&self) -> Vec<(MapKey, Value)> {
        self.0
            .read_recursive()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn same_storage(&self, other: &Map) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.same_storage(other) || *self.0.read_recursive() == *other.0.read_recursive()
    }
}

/// Map key. Keys are never adapted.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Int(i64),
    Uint(u64),
    Text(String),
    Bool(bool),
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Int(v) => write!(f, "{v}"),
            MapKey::Uint(v) => write!(f, "{v}"),
            MapKey::Text(v) => f.write_str(v),
            MapKey::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for MapKey {
    fn from(value: &str) -> Self {
        MapKey::Text(value.to_string())
    }
}

impl From<String> for MapKey {
    fn from(value: String) -> Self {
        MapKey::Text(value)
    }
}

impl From<i64> for MapKey {
    fn from(value: i64) -> Self {
        MapKey::Int(value)
    }
}

impl From<u64> for MapKey {
    fn from(value: u64) -> Self {
        MapKey::Uint(value)
    }
}

impl From<bool> for MapKey {
    fn from(value: bool) -> Self {
        MapKey::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_clone_is_isolated() {
        let original = Value::from(Record::new("Point").field("x", "", 1i64));
        let mut copy = original.clone();
        copy.as_record_mut().unwrap().set("x", 2i64);

        assert_eq!(original.lookup("x"), Some(Value::I64(1)));
        assert_eq!(copy.lookup("x"), Some(Value::I64(2)));
    }

    #[test]
    fn pointer_clone_aliases_target() {
        let slot = shared(Value::I64(1));
        let a = Value::pointer_to(&slot);
        let b = a.clone();
        *slot.write() = Value::I64(9);

        assert_eq!(a.deref_all(), Value::I64(9));
        assert!(a.as_pointer().unwrap().same_target(b.as_pointer().unwrap()));
    }

    #[test]
    fn sequence_clone_aliases_storage() {
        let seq = Value::sequence([Value::I32(1), Value::I32(2)]);
        let alias = seq.clone();
        seq.as_sequence().unwrap().storage().write()[0] = Value::I32(7);

        assert_eq!(alias.as_sequence().unwrap().get(0), Some(Value::I32(7)));
    }

    #[test]
    fn zero_values_per_kind() {
        assert!(Value::I16(0).is_zero());
        assert!(Value::text("").is_zero());
        assert!(Value::Bool(false).is_zero());
        assert!(Value::nil(Kind::F64).is_zero());
        assert!(!Value::F64(-0.0).is_zero());
        assert!(!Value::U8(1).is_zero());
        assert_eq!(Kind::U32.zero(), Some(Value::U32(0)));
        assert_eq!(Kind::Record.zero(), None);
    }

    #[test]
    fn nil_pointers_compare_by_elem_kind() {
        assert_eq!(Value::nil(Kind::I64), Value::nil(Kind::I64));
        assert_ne!(Value::nil(Kind::I64), Value::nil(Kind::Text));
        assert_ne!(Value::nil(Kind::I64), Value::pointer(Value::I64(0)));
    }

    #[test]
    fn lookup_follows_pointers_and_boxes() {
        let inner = Record::new("Inner").field("depth", "", 3u8);
        let outer = Value::from(
            Record::new("Outer")
                .field("ptr", "", Value::pointer(inner.clone().into()))
                .field("boxed", "", Value::boxed(inner.into())),
        );

        assert_eq!(outer.lookup("ptr.depth"), Some(Value::U8(3)));
        assert_eq!(outer.lookup("boxed.depth"), Some(Value::U8(3)));
        assert_eq!(outer.lookup("missing"), None);
    }

    #[test]
    fn serializes_by_display_name() {
        let record = Value::from(
            Record::new("User")
                .field("Name", r#"json:"name,omitempty""#, "ada")
                .field("Age", "", Value::nil(Kind::U8))
                .field("Scores", "", Value::map([("a", Value::F64(1.5))])),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "ada", "Age": null, "Scores": {"a": 1.5}})
        );
    }

    #[test]
    fn display_renders_nested_values() {
        let record = Value::from(
            Record::new("Order")
                .field("id", "", 7i64)
                .field("items", "", Value::sequence([Value::text("a"), Value::text("b")])),
        );
        assert_eq!(record.to_string(), "Order { id: 7, items: [a, b] }");
    }
}
