use super::*;
use cbor::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Curve {
    P256,
    P384,
    P521,
}

impl Curve {
    fn from_alg(alg: i64) -> Result<Self, Error> {
        match alg {
            iana::ALGORITHM_ES256 => Ok(Self::P256),
            iana::ALGORITHM_ES384 => Ok(Self::P384),
            iana::ALGORITHM_ES512 => Ok(Self::P521),
            _ => Err(Error::UnsupportedAlgorithm(alg)),
        }
    }

    fn from_crv(crv: i64) -> Result<Self, Error> {
        match crv {
            iana::ELLIPTIC_CURVE_P_256 => Ok(Self::P256),
            iana::ELLIPTIC_CURVE_P_384 => Ok(Self::P384),
            iana::ELLIPTIC_CURVE_P_521 => Ok(Self::P521),
            _ => Err(Error::UnsupportedCurve(crv)),
        }
    }

    /// Picks the algorithm from a secret or coordinate length.  Lengths
    /// that fit no curve fall through to ES256 and are rejected when the
    /// key material is parsed.
    fn from_size(size: usize) -> Self {
        match size {
            48 => Self::P384,
            s if s >= 65 => Self::P521,
            _ => Self::P256,
        }
    }

    fn alg(self) -> i64 {
        match self {
            Self::P256 => iana::ALGORITHM_ES256,
            Self::P384 => iana::ALGORITHM_ES384,
            Self::P521 => iana::ALGORITHM_ES512,
        }
    }

    fn crv(self) -> i64 {
        match self {
            Self::P256 => iana::ELLIPTIC_CURVE_P_256,
            Self::P384 => iana::ELLIPTIC_CURVE_P_384,
            Self::P521 => iana::ELLIPTIC_CURVE_P_521,
        }
    }
}

macro_rules! ecdsa_curve {
    ($m:ident, $crv:ident) => {
        mod $m {
            use super::*;
            use ::$crv::{
                SecretKey,
                ecdsa::{
                    Signature, SigningKey, VerifyingKey,
                    signature::{Signer as _, Verifier as _},
                },
                elliptic_curve::sec1::ToEncodedPoint,
            };

            pub(super) fn generate() -> Zeroizing<Vec<u8>> {
                Zeroizing::new(SecretKey::random(&mut OsRng).to_bytes().to_vec())
            }

            pub(super) fn check_secret(secret: &[u8]) -> Result<(), Error> {
                SecretKey::from_slice(secret)
                    .map(|_| ())
                    .map_err(|e| Error::InvalidKeyMaterial(e.to_string()))
            }

            pub(super) fn check_public(point: &[u8]) -> Result<(), Error> {
                VerifyingKey::from_sec1_bytes(point)
                    .map(|_| ())
                    .map_err(|e| Error::InvalidKeyMaterial(e.to_string()))
            }

            /// SEC1 compressed point of the public key.
            pub(super) fn public(secret: &[u8]) -> Result<Vec<u8>, Error> {
                let sk = SecretKey::from_slice(secret)
                    .map_err(|e| Error::InvalidKeyMaterial(e.to_string()))?;
                Ok(sk.public_key().to_encoded_point(true).as_bytes().to_vec())
            }

            pub(super) fn sign(secret: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
                let sk = SigningKey::from_slice(secret)
                    .map_err(|e| Error::InvalidKeyMaterial(e.to_string()))?;
                let signature: Signature = sk.sign(message);
                Ok(signature.to_bytes().to_vec())
            }

            pub(super) fn verify(
                point: &[u8],
                message: &[u8],
                signature: &[u8],
            ) -> Result<bool, Error> {
                let vk = VerifyingKey::from_sec1_bytes(point)
                    .map_err(|e| Error::InvalidKeyMaterial(e.to_string()))?;
                let Ok(signature) = Signature::from_slice(signature) else {
                    return Ok(false);
                };
                Ok(vk.verify(message, &signature).is_ok())
            }
        }
    };
}

ecdsa_curve!(es256, p256);
ecdsa_curve!(es384, p384);
ecdsa_curve!(es512, p521);

/// An ECDSA key over P-256, P-384 or P-521, RFC 9053 §2.1.
#[derive(Debug, Clone, PartialEq)]
pub struct EcdsaKey(Key);

impl_key_wrapper!(EcdsaKey);

impl EcdsaKey {
    fn with_curve(curve: Curve) -> Self {
        let mut key = Key::new();
        key.set_kty(iana::KEY_TYPE_EC2).set_alg(curve.alg());
        key.set_param(iana::EC2_KEY_PARAMETER_CRV, curve.crv());
        Self(key)
    }

    pub fn generate(alg: i64, kid: Option<Value>) -> Result<Self, Error> {
        let secret = match Curve::from_alg(alg)? {
            Curve::P256 => es256::generate(),
            Curve::P384 => es384::generate(),
            Curve::P521 => es512::generate(),
        };
        Self::from_secret(&secret, kid)
    }

    /// The algorithm is taken from the length of `secret`.
    pub fn from_secret(secret: &[u8], kid: Option<Value>) -> Result<Self, Error> {
        let curve = Curve::from_size(secret.len());
        match curve {
            Curve::P256 => es256::check_secret(secret)?,
            Curve::P384 => es384::check_secret(secret)?,
            Curve::P521 => es512::check_secret(secret)?,
        }

        let mut key = Self::with_curve(curve);
        key.set_param(iana::EC2_KEY_PARAMETER_D, secret);
        if let Some(kid) = kid {
            key.set_kid_value(kid);
        }
        Ok(key)
    }

    /// Builds a verification key from a SEC1 encoded point, compressed or
    /// not.
    pub fn from_public(public: &[u8], kid: Option<Value>) -> Result<Self, Error> {
        if public.len() < 33 {
            return Err(Error::InvalidKeyMaterial(format!(
                "ECDSA public key must be at least 33 bytes, got {}",
                public.len()
            )));
        }

        let coordinates = &public[1..];
        let curve = match public[0] {
            0x04 => Curve::from_size(coordinates.len() / 2),
            _ => Curve::from_size(coordinates.len()),
        };
        match curve {
            Curve::P256 => es256::check_public(public)?,
            Curve::P384 => es384::check_public(public)?,
            Curve::P521 => es512::check_public(public)?,
        }

        let mut key = Self::with_curve(curve);
        key.set_sec1_point(public)?;
        if let Some(kid) = kid {
            key.set_kid_value(kid);
        }
        Ok(key)
    }

    pub fn from_key(key: Key) -> Result<Self, Error> {
        key.check(
            iana::KEY_TYPE_EC2,
            &[
                iana::ALGORITHM_ES256,
                iana::ALGORITHM_ES384,
                iana::ALGORITHM_ES512,
            ],
        )?;
        Ok(Self(key))
    }

    fn curve(&self) -> Result<Curve, Error> {
        if self.has(iana::KEY_PARAMETER_ALG) {
            Curve::from_alg(self.alg()?)
        } else {
            Curve::from_crv(self.get_int(iana::EC2_KEY_PARAMETER_CRV)?)
        }
    }

    /// The SEC1 encoded public key: from `x` and `y` when present, otherwise
    /// derived from `d` in compressed form.
    pub fn public_key(&self) -> Result<Vec<u8>, Error> {
        if self.has(iana::EC2_KEY_PARAMETER_X) {
            return self.sec1_point();
        }

        let secret = self.get_bytes(iana::EC2_KEY_PARAMETER_D)?;
        match self.curve()? {
            Curve::P256 => es256::public(secret),
            Curve::P384 => es384::public(secret),
            Curve::P521 => es512::public(secret),
        }
    }

    /// A new key without the private scalar, restricted to `verify`.
    pub fn public(&self) -> Result<Self, Error> {
        let mut key = self.clone();
        if key.has(iana::EC2_KEY_PARAMETER_D) {
            let point = key.public_key()?;
            key.set_sec1_point(&point)?;
            key.delete(iana::EC2_KEY_PARAMETER_D);
        }
        key.restrict_ops(&[iana::KEY_OPERATION_VERIFY]);
        Ok(key)
    }
}

impl Signer for EcdsaKey {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        let secret = self.get_bytes(iana::EC2_KEY_PARAMETER_D)?;
        match self.curve()? {
            Curve::P256 => es256::sign(secret, message),
            Curve::P384 => es384::sign(secret, message),
            Curve::P521 => es512::sign(secret, message),
        }
    }
}

impl Verifier for EcdsaKey {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, Error> {
        let point = self.public_key()?;
        match self.curve()? {
            Curve::P256 => es256::verify(&point, message, signature),
            Curve::P384 => es384::verify(&point, message, signature),
            Curve::P521 => es512::verify(&point, message, signature),
        }
    }
}
