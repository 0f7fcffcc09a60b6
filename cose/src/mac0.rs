use super::*;
use subtle::ConstantTimeEq;

/// A COSE_Mac0 message, RFC 9052 §6.2.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mac0Message {
    pub payload: Vec<u8>,
    pub protected: Option<Header>,
    pub unprotected: Option<Header>,
}

impl Mac0Message {
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

    /// The MAC_structure of RFC 9052 §6.3.
    fn to_be_maced(protected: &[u8], external_aad: Option<&[u8]>, payload: &[u8]) -> Vec<u8> {
        cbor::encode::emit_array(4, |a| {
            a.emit("MAC0");
            a.emit(protected);
            a.emit(external_aad.unwrap_or_default());
            a.emit(payload);
        })
    }

    /// MACs the message with `key`, first filling in any absent header
    /// from the key, and returns the untagged COSE_Mac0.
    pub fn to_bytes<K>(&mut self, key: &K, external_aad: Option<&[u8]>) -> Result<Vec<u8>, Error>
    where
        K: Macer + AsRef<Key>,
    {
        let (protected, unprotected) =
            header::populate(&mut self.protected, &mut self.unprotected, key.as_ref())?;

        let protected = protected.to_bytes();
        let tag = key.mac(&Self::to_be_maced(&protected, external_aad, &self.payload))?;

        Ok(cbor::encode::emit_array(4, |a| {
            a.emit(&protected);
            a.emit(unprotected.as_map());
            a.emit(&self.payload);
            a.emit(&tag);
        }))
    }

    /// Parses a COSE_Mac0, tagged or not, and checks its tag.
    pub fn from_bytes<K>(key: &K, data: &[u8], external_aad: Option<&[u8]>) -> Result<Self, Error>
    where
        K: Macer + AsRef<Key>,
    {
        let data = tag::skip_message_tags(tag::MAC0_MESSAGE_PREFIX, data);
        let [protected, unprotected, payload, tag] =
            decode_array(data, "COSE_Mac0 must have 4 items")?;

        let protected_bytes = expect_bytes(protected, "protected header")?;
        let protected = Header::from_bytes(&protected_bytes)?;
        let unprotected = Header::from(expect_map(unprotected, "unprotected header")?);
        let payload = expect_bytes(payload, "payload")?;
        let tag = expect_bytes(tag, "tag")?;

        header::check_alg(&protected, key.as_ref())?;
        let expected = key.mac(&Self::to_be_maced(&protected_bytes, external_aad, &payload))?;
        if !bool::from(expected.ct_eq(&tag)) {
            debug!("COSE_Mac0 tag verification failed");
            return Err(Error::TagMismatch);
        }

        Ok(Self {
            payload,
            protected: Some(protected),
            unprotected: Some(unprotected),
        })
    }

    pub fn with_tag(data: &[u8]) -> Vec<u8> {
        tag::with_tag(tag::MAC0_MESSAGE_PREFIX, data)
    }
}
