use super::*;
use cbor::{Label, Value};

/// A label/value map with typed accessors, the shared base of headers,
/// keys and claims sets.
///
/// Accessors distinguish an absent label ([`Error::MissingKey`]) from a
/// present value of the wrong type ([`Error::TypeMismatch`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KvMap(cbor::Map);

impl KvMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        Ok(Self(cbor::decode::from_slice_map(data)?))
    }

    /// Deterministic encoding of the map.
    pub fn to_bytes(&self) -> Vec<u8> {
        cbor::encode::emit(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Label, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &cbor::Map {
        &self.0
    }

    pub fn into_map(self) -> cbor::Map {
        self.0
    }

    pub fn has(&self, label: impl Into<Label>) -> bool {
        self.0.contains_key(&label.into())
    }

    /// Removes `label`, returning whether it was present.
    pub fn delete(&mut self, label: impl Into<Label>) -> bool {
        self.0.remove(&label.into()).is_some()
    }

    pub fn get_param(&self, label: impl Into<Label>) -> Option<&Value> {
        self.0.get(&label.into())
    }

    pub fn set_param(&mut self, label: impl Into<Label>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(label, value);
        self
    }

    fn get_typed<'a, T>(
        &'a self,
        label: Label,
        expected: &'static str,
        f: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T, Error> {
        let Some(value) = self.0.get(&label) else {
            return Err(Error::MissingKey(label));
        };
        f(value).ok_or(Error::TypeMismatch { label, expected })
    }

    pub fn get_int(&self, label: impl Into<Label>) -> Result<i64, Error> {
        self.get_typed(label.into(), "an integer", Value::as_integer)
    }

    pub fn get_text(&self, label: impl Into<Label>) -> Result<&str, Error> {
        self.get_typed(label.into(), "a text string", Value::as_text)
    }

    pub fn get_bytes(&self, label: impl Into<Label>) -> Result<&[u8], Error> {
        self.get_typed(label.into(), "a byte string", Value::as_bytes)
    }

    pub fn get_bool(&self, label: impl Into<Label>) -> Result<bool, Error> {
        self.get_typed(label.into(), "a boolean", Value::as_bool)
    }

    pub fn get_map(&self, label: impl Into<Label>) -> Result<&cbor::Map, Error> {
        self.get_typed(label.into(), "a map", Value::as_map)
    }

    pub fn get_int_or_text(&self, label: impl Into<Label>) -> Result<Label, Error> {
        self.get_typed(label.into(), "an integer or text string", int_or_text)
    }

    /// Returns every element of the array at `label`, converted by `f`.
    /// Fails if the value is not an array or any element is rejected by `f`.
    pub fn get_array<T>(
        &self,
        label: impl Into<Label>,
        f: impl Fn(&Value) -> Option<T>,
    ) -> Result<Vec<T>, Error> {
        self.get_typed(label.into(), "an array", |v| {
            v.as_array()?.iter().map(&f).collect::<Option<Vec<T>>>()
        })
    }
}

/// Element converter for labels stored as values, such as `kty` or `key_ops`.
pub fn int_or_text(value: &Value) -> Option<Label> {
    match value {
        Value::Integer(i) => Some(Label::Int(*i)),
        Value::Text(s) => Some(Label::Text(s.clone())),
        _ => None,
    }
}

impl From<cbor::Map> for KvMap {
    fn from(value: cbor::Map) -> Self {
        Self(value)
    }
}
