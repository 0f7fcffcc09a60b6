use super::encode::{self, Encoder, ToCbor};
use alloc::{string::String, vec::Vec};
use core::fmt;

/// A map key.  COSE only ever keys its maps with integers or text strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Int(i64),
    Text(String),
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl ToCbor for Label {
    fn to_cbor(&self, encoder: &mut Encoder) {
        match self {
            Self::Int(i) => encoder.emit(i),
            Self::Text(s) => encoder.emit(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Bytes(Vec<u8>),
    Text(String),
    Bool(bool),
    Null,
    Float(f64),
    Array(Vec<Value>),
    Map(Map),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Bytes(_) => "byte string",
            Self::Text(_) => "text string",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
            Self::Float(_) => "float",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

macro_rules! impl_value_from {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_value_from!(
    i64 => Integer,
    bool => Bool,
    f64 => Float,
    &str => Text,
    String => Text,
    &[u8] => Bytes,
    Vec<u8> => Bytes,
    Vec<Value> => Array,
    Map => Map
);

impl<const N: usize> From<[u8; N]> for Value {
    fn from(value: [u8; N]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Label> for Value {
    fn from(value: Label) -> Self {
        match value {
            Label::Int(i) => Self::Integer(i),
            Label::Text(s) => Self::Text(s),
        }
    }
}

impl ToCbor for Value {
    fn to_cbor(&self, encoder: &mut Encoder) {
        match self {
            Self::Integer(i) => encoder.emit(i),
            Self::Bytes(b) => encoder.emit(b),
            Self::Text(s) => encoder.emit(s),
            Self::Bool(b) => encoder.emit(b),
            Self::Null => encoder.emit_null(),
            Self::Float(f) => encoder.emit(f),
            Self::Array(a) => encoder.emit_slice(a),
            Self::Map(m) => encoder.emit(m),
        }
    }
}

/// An insertion-ordered map with unique labels.
///
/// Ordering only matters for iteration: the encoder always sorts entries
/// by the bytewise order of their encoded labels, and equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: Vec<(Label, Value)>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, label: &Label) -> bool {
        self.position(label).is_some()
    }

    pub fn get(&self, label: &Label) -> Option<&Value> {
        self.position(label).map(|idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, label: &Label) -> Option<&mut Value> {
        self.position(label).map(|idx| &mut self.entries[idx].1)
    }

    /// Sets `label` to `value`, returning the value it replaced.
    pub fn insert(&mut self, label: impl Into<Label>, value: impl Into<Value>) -> Option<Value> {
        let label = label.into();
        let value = value.into();
        match self.position(&label) {
            Some(idx) => Some(core::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.entries.push((label, value));
                None
            }
        }
    }

    pub fn remove(&mut self, label: &Label) -> Option<Value> {
        self.position(label).map(|idx| self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Label, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Label> {
        self.entries.iter().map(|(k, _)| k)
    }

    fn position(&self, label: &Label) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == label)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl FromIterator<(Label, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (Label, Value)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for Map {
    type Item = (Label, Value);
    type IntoIter = alloc::vec::IntoIter<(Label, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl ToCbor for Map {
    fn to_cbor(&self, encoder: &mut Encoder) {
        // RFC 8949 §4.2.1: sort by the bytewise order of the encoded keys
        let mut entries = self
            .entries
            .iter()
            .map(|(k, v)| (encode::emit(k), v))
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        encoder.emit_map(entries.len(), |m| {
            for (k, v) in &entries {
                m.emit_raw_slice(k);
                m.emit(*v);
            }
        })
    }
}
