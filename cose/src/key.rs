use super::*;
use cbor::{Label, Value};
use core::ops::{Deref, DerefMut};

/// Authenticated encryption with associated data.
pub trait Encryptor {
    fn nonce_size(&self) -> usize;

    fn encrypt(&self, plaintext: &[u8], nonce: &[u8], aad: &[u8]) -> Result<Vec<u8>, Error>;

    /// Fails with [`Error::AuthenticationFailure`] if the tag does not verify.
    fn decrypt(&self, ciphertext: &[u8], nonce: &[u8], aad: &[u8]) -> Result<Vec<u8>, Error>;
}

pub trait Macer {
    /// Computes the tag, already truncated to the algorithm's tag length.
    fn mac(&self, message: &[u8]) -> Result<Vec<u8>, Error>;
}

pub trait Signer {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error>;
}

pub trait Verifier {
    /// Returns `Ok(false)` for a signature that does not verify; errors are
    /// reserved for unusable key material.
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, Error>;
}

pub trait Ecdher {
    fn ecdh(&self, remote: &Key) -> Result<Zeroizing<Vec<u8>>, Error>;
}

/// A COSE_Key, RFC 9052 §7.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Key(KvMap);

impl Key {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        KvMap::from_bytes(data).map(Self)
    }

    pub fn kty(&self) -> Result<Label, Error> {
        self.get_int_or_text(iana::KEY_PARAMETER_KTY)
    }

    pub fn set_kty(&mut self, kty: i64) -> &mut Self {
        self.set_param(iana::KEY_PARAMETER_KTY, kty);
        self
    }

    pub fn kid(&self) -> Result<&[u8], Error> {
        self.get_bytes(iana::KEY_PARAMETER_KID)
    }

    pub fn set_kid(&mut self, kid: impl Into<Vec<u8>>) -> &mut Self {
        self.set_param(iana::KEY_PARAMETER_KID, kid.into());
        self
    }

    /// The `kid`, decoded as CBOR.
    pub fn kid_value(&self) -> Result<Value, Error> {
        Ok(cbor::from_slice(self.kid()?)?)
    }

    /// Sets the `kid` to the CBOR encoding of `kid`.
    pub fn set_kid_value(&mut self, kid: impl Into<Value>) -> &mut Self {
        self.set_kid(cbor::to_vec(&kid.into()))
    }

    pub fn alg(&self) -> Result<i64, Error> {
        self.get_int(iana::KEY_PARAMETER_ALG)
    }

    pub fn set_alg(&mut self, alg: i64) -> &mut Self {
        self.set_param(iana::KEY_PARAMETER_ALG, alg);
        self
    }

    pub fn ops(&self) -> Result<Vec<Label>, Error> {
        self.get_array(iana::KEY_PARAMETER_KEY_OPS, map::int_or_text)
    }

    pub fn set_ops<I, L>(&mut self, ops: I) -> &mut Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let ops = ops
            .into_iter()
            .map(|op| {
                let op: Label = op.into();
                Value::from(op)
            })
            .collect::<Vec<_>>();
        self.set_param(iana::KEY_PARAMETER_KEY_OPS, ops);
        self
    }

    pub fn base_iv(&self) -> Result<&[u8], Error> {
        self.get_bytes(iana::KEY_PARAMETER_BASE_IV)
    }

    pub fn set_base_iv(&mut self, iv: impl Into<Vec<u8>>) -> &mut Self {
        self.set_param(iana::KEY_PARAMETER_BASE_IV, iv.into());
        self
    }

    /// The private or symmetric key material, according to `kty`.
    pub fn secret(&self) -> Result<&[u8], Error> {
        match self.kty()? {
            Label::Int(iana::KEY_TYPE_OKP) => self.get_bytes(iana::OKP_KEY_PARAMETER_D),
            Label::Int(iana::KEY_TYPE_EC2) => self.get_bytes(iana::EC2_KEY_PARAMETER_D),
            Label::Int(iana::KEY_TYPE_SYMMETRIC) => self.get_bytes(iana::SYMMETRIC_KEY_PARAMETER_K),
            kty => Err(Error::UnsupportedKeyType(kty)),
        }
    }

    /// Checks the key type, and the algorithm if one is present.
    pub(crate) fn check(&self, kty: i64, algs: &[i64]) -> Result<(), Error> {
        match self.kty()? {
            Label::Int(k) if k == kty => {}
            other => return Err(Error::UnsupportedKeyType(other)),
        }
        if self.has(iana::KEY_PARAMETER_ALG) {
            let alg = self.alg()?;
            if !algs.contains(&alg) {
                return Err(Error::UnsupportedAlgorithm(alg));
            }
        }
        Ok(())
    }

    /// Stores a SEC1 encoded point as EC2 `x` and `y`, with `y` as its sign
    /// bit for compressed points.
    pub(crate) fn set_sec1_point(&mut self, point: &[u8]) -> Result<(), Error> {
        match point.split_first() {
            Some((&0x02, x)) => {
                self.set_param(iana::EC2_KEY_PARAMETER_X, x)
                    .set_param(iana::EC2_KEY_PARAMETER_Y, false);
            }
            Some((&0x03, x)) => {
                self.set_param(iana::EC2_KEY_PARAMETER_X, x)
                    .set_param(iana::EC2_KEY_PARAMETER_Y, true);
            }
            Some((&0x04, xy)) if xy.len() % 2 == 0 => {
                let (x, y) = xy.split_at(xy.len() / 2);
                self.set_param(iana::EC2_KEY_PARAMETER_X, x)
                    .set_param(iana::EC2_KEY_PARAMETER_Y, y);
            }
            _ => {
                return Err(Error::InvalidKeyMaterial(
                    "unrecognised SEC1 point encoding".into(),
                ));
            }
        }
        Ok(())
    }

    /// The SEC1 encoding of the EC2 `x` and `y` parameters.
    pub(crate) fn sec1_point(&self) -> Result<Vec<u8>, Error> {
        let x = self.get_bytes(iana::EC2_KEY_PARAMETER_X)?;
        let mut point = Vec::with_capacity(1 + 2 * x.len());
        if let Ok(sign) = self.get_bool(iana::EC2_KEY_PARAMETER_Y) {
            point.push(if sign { 0x03 } else { 0x02 });
            point.extend_from_slice(x);
        } else {
            let y = self.get_bytes(iana::EC2_KEY_PARAMETER_Y)?;
            point.push(0x04);
            point.extend_from_slice(x);
            point.extend_from_slice(y);
        }
        Ok(point)
    }

    /// Narrows `key_ops`, if present, for a public projection.
    pub(crate) fn restrict_ops(&mut self, ops: &[i64]) {
        if self.has(iana::KEY_PARAMETER_KEY_OPS) {
            self.set_ops(ops.iter().copied());
        }
    }
}

impl Deref for Key {
    type Target = KvMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Key {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl AsRef<Key> for Key {
    fn as_ref(&self) -> &Key {
        self
    }
}

impl From<KvMap> for Key {
    fn from(value: KvMap) -> Self {
        Self(value)
    }
}

/// A fresh buffer of `len` bytes from the OS random source.
pub(crate) fn random_bytes(len: usize) -> Result<Zeroizing<Vec<u8>>, Error> {
    let mut buf = Zeroizing::new(vec![0u8; len]);
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| Error::Random(e.to_string()))?;
    Ok(buf)
}

/// Implements the plumbing shared by all algorithm-specific key types,
/// each a newtype over [`Key`].
macro_rules! impl_key_wrapper {
    ($ty:ident) => {
        impl $ty {
            pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
                Self::from_key(Key::from_bytes(data)?)
            }

            pub fn into_key(self) -> Key {
                self.0
            }
        }

        impl core::ops::Deref for $ty {
            type Target = Key;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl core::ops::DerefMut for $ty {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl AsRef<Key> for $ty {
            fn as_ref(&self) -> &Key {
                &self.0
            }
        }

        impl From<$ty> for Key {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl TryFrom<Key> for $ty {
            type Error = Error;

            fn try_from(value: Key) -> Result<Self, Self::Error> {
                Self::from_key(value)
            }
        }
    };
}

pub(crate) use impl_key_wrapper;
