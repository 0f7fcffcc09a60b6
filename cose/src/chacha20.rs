use super::*;
use cbor::Value;
use chacha20poly1305::ChaCha20Poly1305;

const KEY_SIZE: usize = 32;
const NONCE_SIZE: usize = 12;

/// A symmetric ChaCha20/Poly1305 key, RFC 9053 §4.3.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaCha20Poly1305Key(Key);

impl_key_wrapper!(ChaCha20Poly1305Key);

impl ChaCha20Poly1305Key {
    pub fn generate(kid: Option<Value>) -> Result<Self, Error> {
        Self::from_secret(&key::random_bytes(KEY_SIZE)?, kid)
    }

    pub fn from_secret(secret: &[u8], kid: Option<Value>) -> Result<Self, Error> {
        if secret.len() != KEY_SIZE {
            return Err(Error::InvalidKeyMaterial(format!(
                "ChaCha20/Poly1305 secret must be {KEY_SIZE} bytes, got {}",
                secret.len()
            )));
        }

        let mut key = Key::new();
        key.set_kty(iana::KEY_TYPE_SYMMETRIC)
            .set_alg(iana::ALGORITHM_CHACHA20_POLY1305);
        key.set_param(iana::SYMMETRIC_KEY_PARAMETER_K, secret);
        if let Some(kid) = kid {
            key.set_kid_value(kid);
        }
        Ok(Self(key))
    }

    pub fn from_key(key: Key) -> Result<Self, Error> {
        key.check(
            iana::KEY_TYPE_SYMMETRIC,
            &[iana::ALGORITHM_CHACHA20_POLY1305],
        )?;
        Ok(Self(key))
    }
}

impl Encryptor for ChaCha20Poly1305Key {
    fn nonce_size(&self) -> usize {
        NONCE_SIZE
    }

    fn encrypt(&self, plaintext: &[u8], nonce: &[u8], aad: &[u8]) -> Result<Vec<u8>, Error> {
        let secret = self.get_bytes(iana::SYMMETRIC_KEY_PARAMETER_K)?;
        aead::seal::<ChaCha20Poly1305>(secret, nonce, plaintext, aad)
    }

    fn decrypt(&self, ciphertext: &[u8], nonce: &[u8], aad: &[u8]) -> Result<Vec<u8>, Error> {
        let secret = self.get_bytes(iana::SYMMETRIC_KEY_PARAMETER_K)?;
        aead::open::<ChaCha20Poly1305>(secret, nonce, ciphertext, aad)
    }
}
