use super::*;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, aead::consts::U12, aes::Aes192};
use cbor::Value;

type Aes192Gcm = AesGcm<Aes192, U12>;

const NONCE_SIZE: usize = 12;

const ALGORITHMS: &[i64] = &[
    iana::ALGORITHM_A128GCM,
    iana::ALGORITHM_A192GCM,
    iana::ALGORITHM_A256GCM,
];

fn key_size(alg: i64) -> Result<usize, Error> {
    match alg {
        iana::ALGORITHM_A128GCM => Ok(16),
        iana::ALGORITHM_A192GCM => Ok(24),
        iana::ALGORITHM_A256GCM => Ok(32),
        _ => Err(Error::UnsupportedAlgorithm(alg)),
    }
}

fn alg_for_size(len: usize) -> Result<i64, Error> {
    match len {
        16 => Ok(iana::ALGORITHM_A128GCM),
        24 => Ok(iana::ALGORITHM_A192GCM),
        32 => Ok(iana::ALGORITHM_A256GCM),
        _ => Err(Error::InvalidKeyMaterial(format!(
            "AES-GCM secret must be 16, 24 or 32 bytes, got {len}"
        ))),
    }
}

/// A symmetric AES-GCM key, RFC 9053 §4.1.  The variant follows the length of
/// the secret.
#[derive(Debug, Clone, PartialEq)]
pub struct AesGcmKey(Key);

impl_key_wrapper!(AesGcmKey);

impl AesGcmKey {
    pub fn generate(alg: i64, kid: Option<Value>) -> Result<Self, Error> {
        Self::from_secret(&key::random_bytes(key_size(alg)?)?, kid)
    }

    pub fn from_secret(secret: &[u8], kid: Option<Value>) -> Result<Self, Error> {
        let alg = alg_for_size(secret.len())?;

        let mut key = Key::new();
        key.set_kty(iana::KEY_TYPE_SYMMETRIC).set_alg(alg);
        key.set_param(iana::SYMMETRIC_KEY_PARAMETER_K, secret);
        if let Some(kid) = kid {
            key.set_kid_value(kid);
        }
        Ok(Self(key))
    }

    pub fn from_key(key: Key) -> Result<Self, Error> {
        key.check(iana::KEY_TYPE_SYMMETRIC, ALGORITHMS)?;
        Ok(Self(key))
    }

    /// The secret and the cipher it selects.  A key without `alg` takes the
    /// variant matching the length of its secret.
    fn cipher_key(&self) -> Result<(i64, &[u8]), Error> {
        let secret = self.get_bytes(iana::SYMMETRIC_KEY_PARAMETER_K)?;
        if !self.has(iana::KEY_PARAMETER_ALG) {
            return Ok((alg_for_size(secret.len())?, secret));
        }
        let alg = self.alg()?;
        let expected = key_size(alg)?;
        if secret.len() != expected {
            return Err(Error::InvalidKeyMaterial(format!(
                "AES-GCM algorithm {alg} needs a {expected} byte secret, got {}",
                secret.len()
            )));
        }
        Ok((alg, secret))
    }
}

impl Encryptor for AesGcmKey {
    fn nonce_size(&self) -> usize {
        NONCE_SIZE
    }

    fn encrypt(&self, plaintext: &[u8], nonce: &[u8], aad: &[u8]) -> Result<Vec<u8>, Error> {
        match self.cipher_key()? {
            (iana::ALGORITHM_A128GCM, k) => aead::seal::<Aes128Gcm>(k, nonce, plaintext, aad),
            (iana::ALGORITHM_A192GCM, k) => aead::seal::<Aes192Gcm>(k, nonce, plaintext, aad),
            (_, k) => aead::seal::<Aes256Gcm>(k, nonce, plaintext, aad),
        }
    }

    fn decrypt(&self, ciphertext: &[u8], nonce: &[u8], aad: &[u8]) -> Result<Vec<u8>, Error> {
        match self.cipher_key()? {
            (iana::ALGORITHM_A128GCM, k) => aead::open::<Aes128Gcm>(k, nonce, ciphertext, aad),
            (iana::ALGORITHM_A192GCM, k) => aead::open::<Aes192Gcm>(k, nonce, ciphertext, aad),
            (_, k) => aead::open::<Aes256Gcm>(k, nonce, ciphertext, aad),
        }
    }
}
