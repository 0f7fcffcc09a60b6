use super::*;

/// A COSE_Encrypt0 message, RFC 9052 §5.2.  `payload` is the plaintext.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encrypt0Message {
    pub payload: Vec<u8>,
    pub protected: Option<Header>,
    pub unprotected: Option<Header>,
}

/// The IV carried in the unprotected header, checked against the cipher.
fn header_iv(unprotected: &Header, nonce_size: usize) -> Result<&[u8], Error> {
    if !unprotected.has(iana::HEADER_PARAMETER_IV)
        && unprotected.has(iana::HEADER_PARAMETER_PARTIAL_IV)
    {
        return Err(Error::NotSupported("Partial IV"));
    }
    let iv = unprotected.iv()?;
    if iv.len() != nonce_size {
        return Err(Error::IvSizeMismatch {
            expected: nonce_size,
            actual: iv.len(),
        });
    }
    Ok(iv)
}

impl Encrypt0Message {
    pub fn new(
        payload: impl Into<Vec<u8>>,
        protected: Option<Header>,
        unprotected: Option<Header>,
    ) -> Self {
        Self {
            payload: payload.into(),
            protected,
            unprotected,
        }
    }

    /// The Enc_structure of RFC 9052 §5.3.
    fn to_be_authenticated(protected: &[u8], external_aad: Option<&[u8]>) -> Vec<u8> {
        cbor::encode::emit_array(3, |a| {
            a.emit("Encrypt0");
            a.emit(protected);
            a.emit(external_aad.unwrap_or_default());
        })
    }

    /// Encrypts the message with `key` and returns the untagged
    /// COSE_Encrypt0.  Absent headers are filled in from the key, and a
    /// fresh random IV is added if the unprotected header has none.
    pub fn to_bytes<K>(&mut self, key: &K, external_aad: Option<&[u8]>) -> Result<Vec<u8>, Error>
    where
        K: Encryptor + AsRef<Key>,
    {
        let (protected, unprotected) =
            header::populate(&mut self.protected, &mut self.unprotected, key.as_ref())?;

        let nonce_size = key.nonce_size();
        if !unprotected.has(iana::HEADER_PARAMETER_IV)
            && !unprotected.has(iana::HEADER_PARAMETER_PARTIAL_IV)
        {
            trace!("Generating a {nonce_size} byte IV");
            unprotected.set_iv(key::random_bytes(nonce_size)?.to_vec());
        }
        let iv = header_iv(unprotected, nonce_size)?;

        let protected = protected.to_bytes();
        let ciphertext = key.encrypt(
            &self.payload,
            iv,
            &Self::to_be_authenticated(&protected, external_aad),
        )?;

        Ok(cbor::encode::emit_array(3, |a| {
            a.emit(&protected);
            a.emit(unprotected.as_map());
            a.emit(&ciphertext);
        }))
    }

    /// Parses and decrypts a COSE_Encrypt0, tagged or not.
    pub fn from_bytes<K>(key: &K, data: &[u8], external_aad: Option<&[u8]>) -> Result<Self, Error>
    where
        K: Encryptor + AsRef<Key>,
    {
        let data = tag::skip_message_tags(tag::ENCRYPT0_MESSAGE_PREFIX, data);
        let [protected, unprotected, ciphertext] =
            decode_array(data, "COSE_Encrypt0 must have 3 items")?;

        let protected_bytes = expect_bytes(protected, "protected header")?;
        let protected = Header::from_bytes(&protected_bytes)?;
        let unprotected = Header::from(expect_map(unprotected, "unprotected header")?);
        let ciphertext = expect_bytes(ciphertext, "ciphertext")?;

        header::check_alg(&protected, key.as_ref())?;
        let payload = key.decrypt(
            &ciphertext,
            header_iv(&unprotected, key.nonce_size())?,
            &Self::to_be_authenticated(&protected_bytes, external_aad),
        )?;

        Ok(Self {
            payload,
            protected: Some(protected),
            unprotected: Some(unprotected),
        })
    }

    pub fn with_tag(data: &[u8]) -> Vec<u8> {
        tag::with_tag(tag::ENCRYPT0_MESSAGE_PREFIX, data)
    }
}
