/*!
COSE (RFC 9052, RFC 9053) single-recipient messages and CBOR Web Tokens
(RFC 8392).

Messages are built from a payload and optional protected and unprotected
[`Header`]s, and are signed, MACed or encrypted with any key that implements
the matching capability trait: [`Signer`]/[`Verifier`] for
[`Sign1Message`], [`Macer`] for [`Mac0Message`] and [`Encryptor`] for
[`Encrypt0Message`].  Keys are [`Key`] maps specialised per algorithm
family, and serialize as COSE_Key.

Everything that is signed, MACed or authenticated as additional data is
built from the exact protected header bytes, using deterministic CBOR from
[`cbor`].
*/

pub use cosette_cbor as cbor;

use rand::{RngCore, rngs::OsRng};
use tracing::*;
use zeroize::Zeroizing;

mod aead;
mod aesgcm;
mod chacha20;
mod ecdh;
mod ecdsa;
mod ed25519;
mod encrypt0;
mod error;
mod header;
mod hmac_sha2;
mod kdf;
mod kdf_context;
mod key;
mod mac0;
mod map;
mod sign1;

pub mod cwt;
pub mod iana;
pub mod tag;

pub use aesgcm::AesGcmKey;
pub use chacha20::ChaCha20Poly1305Key;
pub use ecdh::EcdhKey;
pub use ecdsa::EcdsaKey;
pub use ed25519::Ed25519Key;
pub use encrypt0::Encrypt0Message;
pub use error::{CaptureFieldErr, Error};
pub use header::Header;
pub use hmac_sha2::HmacKey;
pub use kdf::{hkdf256, hkdf512};
pub use kdf_context::{KdfContext, PartyInfo, SuppPubInfo};
pub use key::{Ecdher, Encryptor, Key, Macer, Signer, Verifier};
pub use mac0::Mac0Message;
pub use map::{KvMap, int_or_text};
pub use sign1::Sign1Message;

use key::impl_key_wrapper;

/// Takes a byte string out of a decoded structure.
fn expect_bytes(value: cbor::Value, field: &'static str) -> Result<Vec<u8>, Error> {
    match value {
        cbor::Value::Bytes(b) => Ok(b),
        v => Err(cbor::decode::Error::IncorrectType("byte string", v.type_name()))
            .map_field_err(field),
    }
}

/// Takes a map out of a decoded structure.
fn expect_map(value: cbor::Value, field: &'static str) -> Result<cbor::Map, Error> {
    match value {
        cbor::Value::Map(m) => Ok(m),
        v => Err(cbor::decode::Error::IncorrectType("map", v.type_name())).map_field_err(field),
    }
}

/// Decodes a CBOR array of exactly `N` items.
fn decode_array<const N: usize>(data: &[u8], what: &'static str) -> Result<[cbor::Value; N], Error> {
    cbor::decode::from_slice_array(data)?
        .try_into()
        .map_err(|_| Error::InvalidStructure(what))
}
