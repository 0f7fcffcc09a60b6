use super::*;

/// A COSE_Sign1 message, RFC 9052 §4.2.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sign1Message {
    pub payload: Vec<u8>,
    pub protected: Option<Header>,
    pub unprotected: Option<Header>,
}

impl Sign1Message {
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

    /// The Sig_structure of RFC 9052 §4.4.
    fn to_be_signed(protected: &[u8], external_aad: Option<&[u8]>, payload: &[u8]) -> Vec<u8> {
        cbor::encode::emit_array(4, |a| {
            a.emit("Signature1");
            a.emit(protected);
            a.emit(external_aad.unwrap_or_default());
            a.emit(payload);
        })
    }

    /// Signs the message with `key`, first filling in any absent header
    /// from the key, and returns the untagged COSE_Sign1.
    pub fn to_bytes<K>(&mut self, key: &K, external_aad: Option<&[u8]>) -> Result<Vec<u8>, Error>
    where
        K: Signer + AsRef<Key>,
    {
        let (protected, unprotected) =
            header::populate(&mut self.protected, &mut self.unprotected, key.as_ref())?;

        let protected = protected.to_bytes();
        let signature = key.sign(&Self::to_be_signed(
            &protected,
            external_aad,
            &self.payload,
        ))?;

        Ok(cbor::encode::emit_array(4, |a| {
            a.emit(&protected);
            a.emit(unprotected.as_map());
            a.emit(&self.payload);
            a.emit(&signature);
        }))
    }

    /// Parses and verifies a COSE_Sign1, tagged or not.
    pub fn from_bytes<K>(key: &K, data: &[u8], external_aad: Option<&[u8]>) -> Result<Self, Error>
    where
        K: Verifier + AsRef<Key>,
    {
        let data = tag::skip_message_tags(tag::SIGN1_MESSAGE_PREFIX, data);
        let [protected, unprotected, payload, signature] =
            decode_array(data, "COSE_Sign1 must have 4 items")?;

        let protected_bytes = expect_bytes(protected, "protected header")?;
        let protected = Header::from_bytes(&protected_bytes)?;
        let unprotected = Header::from(expect_map(unprotected, "unprotected header")?);
        let payload = expect_bytes(payload, "payload")?;
        let signature = expect_bytes(signature, "signature")?;

        header::check_alg(&protected, key.as_ref())?;
        if !key.verify(
            &Self::to_be_signed(&protected_bytes, external_aad, &payload),
            &signature,
        )? {
            debug!("COSE_Sign1 signature verification failed");
            return Err(Error::SignatureMismatch);
        }

        Ok(Self {
            payload,
            protected: Some(protected),
            unprotected: Some(unprotected),
        })
    }

    pub fn with_tag(data: &[u8]) -> Vec<u8> {
        tag::with_tag(tag::SIGN1_MESSAGE_PREFIX, data)
    }
}
