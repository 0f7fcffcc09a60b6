use super::*;
use core::ops::{Deref, DerefMut};

/// COSE Generic_Headers, RFC 9052 §3.
///
/// An empty header serializes to a zero-length byte string rather than an
/// empty map, so that an absent protected bucket is encoded as `h''`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header(KvMap);

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        if data.is_empty() {
            return Ok(Self::new());
        }
        KvMap::from_bytes(data).map(Self)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        if self.0.is_empty() {
            return Vec::new();
        }
        self.0.to_bytes()
    }

    pub fn alg(&self) -> Result<i64, Error> {
        self.get_int(iana::HEADER_PARAMETER_ALG)
    }

    pub fn set_alg(&mut self, alg: i64) -> &mut Self {
        self.set_param(iana::HEADER_PARAMETER_ALG, alg);
        self
    }

    pub fn kid(&self) -> Result<&[u8], Error> {
        self.get_bytes(iana::HEADER_PARAMETER_KID)
    }

    pub fn set_kid(&mut self, kid: impl Into<Vec<u8>>) -> &mut Self {
        self.set_param(iana::HEADER_PARAMETER_KID, kid.into());
        self
    }

    pub fn iv(&self) -> Result<&[u8], Error> {
        self.get_bytes(iana::HEADER_PARAMETER_IV)
    }

    pub fn set_iv(&mut self, iv: impl Into<Vec<u8>>) -> &mut Self {
        self.set_param(iana::HEADER_PARAMETER_IV, iv.into());
        self
    }
}

impl Deref for Header {
    type Target = KvMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Header {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<KvMap> for Header {
    fn from(value: KvMap) -> Self {
        Self(value)
    }
}

impl From<cbor::Map> for Header {
    fn from(value: cbor::Map) -> Self {
        Self(value.into())
    }
}

/// Checks the `alg` of a protected header against the key's own `alg`.
pub(crate) fn check_alg(header: &Header, key: &Key) -> Result<(), Error> {
    if !header.has(iana::HEADER_PARAMETER_ALG) {
        return Ok(());
    }
    let alg = header.alg()?;
    let key_alg = key.alg().ok();
    if key_alg != Some(alg) {
        debug!("Header algorithm {alg} does not match key algorithm {key_alg:?}");
        return Err(Error::AlgorithmMismatch {
            header: alg,
            key: key_alg,
        });
    }
    Ok(())
}

/// Fills in absent headers from `key`: `alg` goes into a new protected
/// header and `kid` into a new unprotected one.  Headers supplied by the
/// caller are left as they are, apart from the `alg` check.
pub(crate) fn populate<'a>(
    protected: &'a mut Option<Header>,
    unprotected: &'a mut Option<Header>,
    key: &Key,
) -> Result<(&'a Header, &'a mut Header), Error> {
    if let Some(header) = protected.as_ref() {
        check_alg(header, key)?;
    }

    let protected = protected.get_or_insert_with(|| {
        let mut header = Header::new();
        if let Ok(alg) = key.alg() {
            trace!("Setting protected alg {alg} from key");
            header.set_alg(alg);
        }
        header
    });
    let unprotected = unprotected.get_or_insert_with(|| {
        let mut header = Header::new();
        if let Ok(kid) = key.kid() {
            header.set_kid(kid);
        }
        header
    });
    Ok((protected, unprotected))
}
