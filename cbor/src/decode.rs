use super::value::{Label, Map, Value};
use alloc::vec::Vec;
use thiserror::Error;

const MAX_RECURSION: usize = 32;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Not enough data for encoded value")]
    NotEnoughData,

    #[error("Additional data after the encoded value")]
    AdditionalData,

    #[error("Invalid minor-type value {0}")]
    InvalidMinorValue(u8),

    #[error("Incorrect type, expecting {0}, found {1}")]
    IncorrectType(&'static str, &'static str),

    #[error("Duplicate map key {0}")]
    DuplicateKey(Label),

    #[error("Map keys must be integers or text strings")]
    InvalidMapKey,

    #[error("Unsupported CBOR item: {0}")]
    Unsupported(&'static str),

    #[error("Integer does not fit in 64-bit signed range")]
    IntegerOverflow,

    #[error("Text string is not valid UTF-8")]
    InvalidUtf8,

    #[error("Maximum recursion depth reached")]
    MaxRecursion,
}

struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Decoder<'a> {
    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        let end = self.offset.checked_add(len).ok_or(Error::NotEnoughData)?;
        let s = self
            .data
            .get(self.offset..end)
            .ok_or(Error::NotEnoughData)?;
        self.offset = end;
        Ok(s)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N)?);
        Ok(buf)
    }

    fn parse_head(&mut self) -> Result<(u8, u8, u64), Error> {
        let b = self.take_array::<1>()?[0];
        let (major, minor) = (b >> 5, b & 0x1F);
        let arg = match minor {
            0..=23 => minor as u64,
            24 => self.take_array::<1>()?[0] as u64,
            25 => u16::from_be_bytes(self.take_array()?) as u64,
            26 => u32::from_be_bytes(self.take_array()?) as u64,
            27 => u64::from_be_bytes(self.take_array()?),
            31 => return Err(Error::Unsupported("indefinite-length item")),
            _ => return Err(Error::InvalidMinorValue(minor)),
        };
        Ok((major, minor, arg))
    }

    fn parse_len(&self, arg: u64) -> Result<usize, Error> {
        // A length can never exceed what is left of the input
        match usize::try_from(arg) {
            Ok(len) if len <= self.remaining() => Ok(len),
            _ => Err(Error::NotEnoughData),
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, Error> {
        if depth > MAX_RECURSION {
            return Err(Error::MaxRecursion);
        }

        let (major, minor, arg) = self.parse_head()?;
        match major {
            0 => i64::try_from(arg)
                .map(Value::Integer)
                .map_err(|_| Error::IntegerOverflow),
            1 => i64::try_from(arg)
                .map(|n| Value::Integer(-1 - n))
                .map_err(|_| Error::IntegerOverflow),
            2 => {
                let len = self.parse_len(arg)?;
                Ok(Value::Bytes(self.take(len)?.to_vec()))
            }
            3 => {
                let len = self.parse_len(arg)?;
                core::str::from_utf8(self.take(len)?)
                    .map(|s| Value::Text(s.into()))
                    .map_err(|_| Error::InvalidUtf8)
            }
            4 => {
                // Every item takes at least one byte
                let count = self.parse_len(arg)?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.parse_value(depth + 1)?);
                }
                Ok(Value::Array(items))
            }
            5 => {
                let count = self.parse_len(arg)?;
                let mut map = Map::with_capacity(count);
                for _ in 0..count {
                    let label = match self.parse_value(depth + 1)? {
                        Value::Integer(i) => Label::Int(i),
                        Value::Text(s) => Label::Text(s),
                        _ => return Err(Error::InvalidMapKey),
                    };
                    let value = self.parse_value(depth + 1)?;
                    if map.contains_key(&label) {
                        return Err(Error::DuplicateKey(label));
                    }
                    map.insert(label, value);
                }
                Ok(Value::Map(map))
            }
            6 => Err(Error::Unsupported("tagged item")),
            _ => match minor {
                20 => Ok(Value::Bool(false)),
                21 => Ok(Value::Bool(true)),
                22 => Ok(Value::Null),
                23 => Err(Error::Unsupported("undefined")),
                25 => Ok(Value::Float(half::f16::from_bits(arg as u16).to_f64())),
                26 => Ok(Value::Float(f32::from_bits(arg as u32) as f64)),
                27 => Ok(Value::Float(f64::from_bits(arg))),
                _ => Err(Error::Unsupported("simple value")),
            },
        }
    }
}

/// Decodes exactly one data item from `data`.
pub fn from_slice(data: &[u8]) -> Result<Value, Error> {
    let mut decoder = Decoder { data, offset: 0 };
    let value = decoder.parse_value(0)?;
    if decoder.remaining() != 0 {
        return Err(Error::AdditionalData);
    }
    Ok(value)
}

pub fn from_slice_map(data: &[u8]) -> Result<Map, Error> {
    match from_slice(data)? {
        Value::Map(m) => Ok(m),
        v => Err(Error::IncorrectType("map", v.type_name())),
    }
}

pub fn from_slice_array(data: &[u8]) -> Result<Vec<Value>, Error> {
    match from_slice(data)? {
        Value::Array(a) => Ok(a),
        v => Err(Error::IncorrectType("array", v.type_name())),
    }
}
