/*!
Deterministic CBOR for COSE.

The [`encode`] module is a low-level, allocation-light emitter that always
produces the shortest-form heads required by RFC 8949 §4.2.1.  The [`value`]
module provides the dynamic [`Value`] model used by COSE headers, keys and
claims, whose maps are serialized with their keys sorted bytewise.  The
[`decode`] module is a strict single-item parser that refuses anything the
COSE layer cannot round-trip: tags, indefinite lengths, duplicate map keys
and trailing data.
*/
#![no_std]
extern crate alloc;

pub mod decode;
pub mod encode;
pub mod value;

pub use decode::from_slice;
pub use value::{Label, Map, Value};

/// Serializes `value` using deterministic encoding.
pub fn to_vec(value: &Value) -> alloc::vec::Vec<u8> {
    encode::emit(value)
}

#[cfg(test)]
mod decode_tests;
