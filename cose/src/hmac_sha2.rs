use super::*;
use cbor::Value;
use hmac::{
    Mac,
    digest::{
        HashMarker, block_buffer,
        consts::U256,
        core_api::{BlockSizeUser, BufferKindUser, CoreProxy, FixedOutputCore, UpdateCore},
        typenum,
    },
};

#[allow(clippy::upper_case_acronyms)]
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ShaVariant {
    HMAC_256_64,
    HMAC_256_256,
    HMAC_384_384,
    HMAC_512_512,
}

impl ShaVariant {
    fn from_alg(alg: i64) -> Result<Self, Error> {
        match alg {
            iana::ALGORITHM_HMAC_256_64 => Ok(Self::HMAC_256_64),
            iana::ALGORITHM_HMAC_256_256 => Ok(Self::HMAC_256_256),
            iana::ALGORITHM_HMAC_384_384 => Ok(Self::HMAC_384_384),
            iana::ALGORITHM_HMAC_512_512 => Ok(Self::HMAC_512_512),
            _ => Err(Error::UnsupportedAlgorithm(alg)),
        }
    }

    fn key_size(self) -> usize {
        match self {
            Self::HMAC_256_64 | Self::HMAC_256_256 => 32,
            Self::HMAC_384_384 => 48,
            Self::HMAC_512_512 => 64,
        }
    }

    fn tag_size(self) -> usize {
        match self {
            Self::HMAC_256_64 => 8,
            Self::HMAC_256_256 => 32,
            Self::HMAC_384_384 => 48,
            Self::HMAC_512_512 => 64,
        }
    }
}

fn calculate_hmac<A>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error>
where
    A: CoreProxy,
    <A as CoreProxy>::Core: HashMarker
        + UpdateCore
        + FixedOutputCore
        + BufferKindUser<BufferKind = block_buffer::Eager>
        + Default
        + Clone,
    <<A as CoreProxy>::Core as BlockSizeUser>::BlockSize: typenum::IsLess<U256>,
    typenum::Le<<<A as CoreProxy>::Core as BlockSizeUser>::BlockSize, U256>: typenum::NonZero,
{
    let mut mac = hmac::Hmac::<A>::new_from_slice(key)
        .map_err(|e| Error::InvalidKeyMaterial(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// A symmetric HMAC key, RFC 9053 §3.1.
#[derive(Debug, Clone, PartialEq)]
pub struct HmacKey(Key);

impl_key_wrapper!(HmacKey);

impl HmacKey {
    pub fn generate(alg: i64, kid: Option<Value>) -> Result<Self, Error> {
        let size = ShaVariant::from_alg(alg)?.key_size();
        Self::from_secret(&key::random_bytes(size)?, alg, kid)
    }

    pub fn from_secret(secret: &[u8], alg: i64, kid: Option<Value>) -> Result<Self, Error> {
        let expected = ShaVariant::from_alg(alg)?.key_size();
        if secret.len() != expected {
            return Err(Error::InvalidKeyMaterial(format!(
                "HMAC algorithm {alg} needs a {expected} byte secret, got {}",
                secret.len()
            )));
        }

        let mut key = Key::new();
        key.set_kty(iana::KEY_TYPE_SYMMETRIC).set_alg(alg);
        if let Some(kid) = kid {
            key.set_kid_value(kid);
        }
        key.set_param(iana::SYMMETRIC_KEY_PARAMETER_K, secret);
        Ok(Self(key))
    }

    /// The HMAC variant cannot be told from the secret, so `alg` is
    /// required.
    pub fn from_key(key: Key) -> Result<Self, Error> {
        key.alg()?;
        key.check(
            iana::KEY_TYPE_SYMMETRIC,
            &[
                iana::ALGORITHM_HMAC_256_64,
                iana::ALGORITHM_HMAC_256_256,
                iana::ALGORITHM_HMAC_384_384,
                iana::ALGORITHM_HMAC_512_512,
            ],
        )?;
        Ok(Self(key))
    }
}

impl Macer for HmacKey {
    fn mac(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        let variant = ShaVariant::from_alg(self.alg()?)?;
        let secret = self.get_bytes(iana::SYMMETRIC_KEY_PARAMETER_K)?;
        let mut tag = match variant {
            ShaVariant::HMAC_256_64 | ShaVariant::HMAC_256_256 => {
                calculate_hmac::<sha2::Sha256>(secret, message)?
            }
            ShaVariant::HMAC_384_384 => calculate_hmac::<sha2::Sha384>(secret, message)?,
            ShaVariant::HMAC_512_512 => calculate_hmac::<sha2::Sha512>(secret, message)?,
        };
        tag.truncate(variant.tag_size());
        Ok(tag)
    }
}
