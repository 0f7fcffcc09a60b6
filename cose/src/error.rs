/*!
This module defines the primary error type for the `cosette` crate.

Errors fall into three groups: structural problems with the CBOR being
parsed, problems with key material or algorithm selection, and
cryptographic failures such as a bad signature or tag.
*/

use super::*;
use thiserror::Error;

/// The primary error type for the `cosette` crate.
#[derive(Error, Debug)]
pub enum Error {
    /// A required map entry is absent.
    #[error("Missing parameter {0}")]
    MissingKey(cbor::Label),

    /// A map entry is present but has the wrong CBOR type.
    #[error("Parameter {label} must be {expected}")]
    TypeMismatch {
        label: cbor::Label,
        expected: &'static str,
    },

    /// Secret or public key bytes are not valid for the algorithm or curve.
    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("Unsupported algorithm {0}")]
    UnsupportedAlgorithm(i64),

    #[error("Unsupported key type {0}")]
    UnsupportedKeyType(cbor::Label),

    #[error("Unsupported elliptic curve {0}")]
    UnsupportedCurve(i64),

    /// The `alg` of a header does not match the `alg` of the key in use.
    #[error("Algorithm mismatch, header specifies {header}, key has {key:?}")]
    AlgorithmMismatch { header: i64, key: Option<i64> },

    #[error("Curve mismatch, expected {expected}, got {actual}")]
    CurveMismatch { expected: i64, actual: i64 },

    #[error("IV size mismatch, expected {expected}, got {actual}")]
    IvSizeMismatch { expected: usize, actual: usize },

    #[error("{0} is not supported")]
    NotSupported(&'static str),

    #[error("Signature mismatch")]
    SignatureMismatch,

    #[error("MAC tag mismatch")]
    TagMismatch,

    /// AEAD decryption failed: wrong key, nonce, additional data, or tampered ciphertext.
    #[error("Authenticated decryption failed")]
    AuthenticationFailure,

    #[error("Encryption failed")]
    EncryptionFailed,

    /// The outer structure of a message or context has the wrong shape.
    #[error("Invalid structure: {0}")]
    InvalidStructure(&'static str),

    #[error("Random number generation failed: {0}")]
    Random(String),

    /// A generic error for when parsing a specific field fails.
    #[error("Failed to parse {field}: {source}")]
    InvalidField {
        /// The name of the field that failed to parse.
        field: &'static str,
        /// The underlying error that caused the failure.
        source: Box<dyn core::error::Error + Send + Sync>,
    },

    /// An error related to CBOR decoding.
    #[error(transparent)]
    InvalidCBOR(#[from] cbor::decode::Error),
}

/// A trait for mapping errors to a `Error::InvalidField`.
pub trait CaptureFieldErr<T> {
    /// Maps the error to a `Error::InvalidField` with the given field name.
    fn map_field_err(self, field: &'static str) -> Result<T, Error>;
}

impl<T, E: Into<Box<dyn core::error::Error + Send + Sync>>> CaptureFieldErr<T>
    for core::result::Result<T, E>
{
    fn map_field_err(self, field: &'static str) -> Result<T, Error> {
        self.map_err(|e| Error::InvalidField {
            field,
            source: e.into(),
        })
    }
}
