use super::*;
use cbor::{Label, Value};

/// Key agreement algorithms a key may be restricted to.
const ALGORITHMS: &[i64] = &[
    iana::ALGORITHM_ECDH_ES_HKDF_256,
    iana::ALGORITHM_ECDH_ES_HKDF_512,
    iana::ALGORITHM_ECDH_SS_HKDF_256,
    iana::ALGORITHM_ECDH_SS_HKDF_512,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Curve {
    P256,
    P384,
    P521,
    X25519,
}

impl Curve {
    fn from_crv(crv: i64) -> Result<Self, Error> {
        match crv {
            iana::ELLIPTIC_CURVE_P_256 => Ok(Self::P256),
            iana::ELLIPTIC_CURVE_P_384 => Ok(Self::P384),
            iana::ELLIPTIC_CURVE_P_521 => Ok(Self::P521),
            iana::ELLIPTIC_CURVE_X25519 => Ok(Self::X25519),
            _ => Err(Error::UnsupportedCurve(crv)),
        }
    }

    fn kty(self) -> i64 {
        match self {
            Self::X25519 => iana::KEY_TYPE_OKP,
            _ => iana::KEY_TYPE_EC2,
        }
    }
}

macro_rules! ecdh_curve {
    ($m:ident, $crv:ident) => {
        mod $m {
            use super::*;
            use ::$crv::{PublicKey, SecretKey, ecdh, elliptic_curve::sec1::ToEncodedPoint};

            fn secret_key(secret: &[u8]) -> Result<SecretKey, Error> {
                SecretKey::from_slice(secret).map_err(|e| Error::InvalidKeyMaterial(e.to_string()))
            }

            fn public_key(point: &[u8]) -> Result<PublicKey, Error> {
                PublicKey::from_sec1_bytes(point)
                    .map_err(|e| Error::InvalidKeyMaterial(e.to_string()))
            }

            pub(super) fn generate() -> Zeroizing<Vec<u8>> {
                Zeroizing::new(SecretKey::random(&mut OsRng).to_bytes().to_vec())
            }

            pub(super) fn check_secret(secret: &[u8]) -> Result<(), Error> {
                secret_key(secret).map(|_| ())
            }

            pub(super) fn check_public(point: &[u8]) -> Result<(), Error> {
                public_key(point).map(|_| ())
            }

            /// SEC1 compressed point of the public key.
            pub(super) fn public(secret: &[u8]) -> Result<Vec<u8>, Error> {
                Ok(secret_key(secret)?
                    .public_key()
                    .to_encoded_point(true)
                    .as_bytes()
                    .to_vec())
            }

            /// The x-coordinate of the shared point.
            pub(super) fn agree(secret: &[u8], point: &[u8]) -> Result<Zeroizing<Vec<u8>>, Error> {
                let sk = secret_key(secret)?;
                let pk = public_key(point)?;
                let shared = ecdh::diffie_hellman(sk.to_nonzero_scalar(), pk.as_affine());
                Ok(Zeroizing::new(shared.raw_secret_bytes().to_vec()))
            }
        }
    };
}

ecdh_curve!(p256_dh, p256);
ecdh_curve!(p384_dh, p384);
ecdh_curve!(p521_dh, p521);

mod x25519 {
    use super::*;
    use x25519_dalek::{PublicKey, StaticSecret};

    pub(super) const KEY_SIZE: usize = 32;

    pub(super) fn to_array(bytes: &[u8]) -> Result<[u8; KEY_SIZE], Error> {
        bytes.try_into().map_err(|_| {
            Error::InvalidKeyMaterial(format!(
                "X25519 key must be {KEY_SIZE} bytes, got {}",
                bytes.len()
            ))
        })
    }

    fn static_secret(secret: &[u8]) -> Result<StaticSecret, Error> {
        Ok(StaticSecret::from(to_array(secret)?))
    }

    pub(super) fn public(secret: &[u8]) -> Result<Vec<u8>, Error> {
        Ok(PublicKey::from(&static_secret(secret)?).as_bytes().to_vec())
    }

    pub(super) fn agree(secret: &[u8], public: &[u8]) -> Result<Zeroizing<Vec<u8>>, Error> {
        let shared = static_secret(secret)?.diffie_hellman(&PublicKey::from(to_array(public)?));
        Ok(Zeroizing::new(shared.as_bytes().to_vec()))
    }
}

/// A key agreement key for ECDH over P-256, P-384, P-521 or X25519,
/// RFC 9053 §6.3.
///
/// P-curve keys are EC2 keys, X25519 keys are OKP keys.  Generated keys
/// carry no `alg`, as the key agreement algorithm belongs to the recipient
/// structure.
#[derive(Debug, Clone, PartialEq)]
pub struct EcdhKey(Key);

impl_key_wrapper!(EcdhKey);

impl EcdhKey {
    fn with_curve(crv: i64) -> Result<Self, Error> {
        let curve = Curve::from_crv(crv)?;
        let mut key = Key::new();
        key.set_kty(curve.kty())
            .set_param(iana::EC2_KEY_PARAMETER_CRV, crv);
        Ok(Self(key))
    }

    pub fn generate(crv: i64, kid: Option<Value>) -> Result<Self, Error> {
        let secret = match Curve::from_crv(crv)? {
            Curve::P256 => p256_dh::generate(),
            Curve::P384 => p384_dh::generate(),
            Curve::P521 => p521_dh::generate(),
            Curve::X25519 => key::random_bytes(x25519::KEY_SIZE)?,
        };
        Self::from_secret(crv, &secret, kid)
    }

    pub fn from_secret(crv: i64, secret: &[u8], kid: Option<Value>) -> Result<Self, Error> {
        let mut key = Self::with_curve(crv)?;
        match key.curve()? {
            Curve::P256 => p256_dh::check_secret(secret)?,
            Curve::P384 => p384_dh::check_secret(secret)?,
            Curve::P521 => p521_dh::check_secret(secret)?,
            Curve::X25519 => {
                x25519::to_array(secret)?;
            }
        }

        key.set_param(iana::EC2_KEY_PARAMETER_D, secret);
        if let Some(kid) = kid {
            key.set_kid_value(kid);
        }
        Ok(key)
    }

    /// Builds a public key from a SEC1 encoded point, or the raw 32 bytes of
    /// an X25519 public key.
    pub fn from_public(crv: i64, public: &[u8], kid: Option<Value>) -> Result<Self, Error> {
        let mut key = Self::with_curve(crv)?;
        match key.curve()? {
            Curve::P256 => p256_dh::check_public(public)?,
            Curve::P384 => p384_dh::check_public(public)?,
            Curve::P521 => p521_dh::check_public(public)?,
            Curve::X25519 => {
                x25519::to_array(public)?;
            }
        }

        if key.curve()? == Curve::X25519 {
            key.set_param(iana::OKP_KEY_PARAMETER_X, public);
        } else {
            key.set_sec1_point(public)?;
        }
        if let Some(kid) = kid {
            key.set_kid_value(kid);
        }
        Ok(key)
    }

    pub fn from_key(key: Key) -> Result<Self, Error> {
        let curve = Curve::from_crv(key.get_int(iana::EC2_KEY_PARAMETER_CRV)?)?;
        match key.kty()? {
            Label::Int(kty) if kty == curve.kty() => {}
            kty => return Err(Error::UnsupportedKeyType(kty)),
        }
        if key.has(iana::KEY_PARAMETER_ALG) {
            let alg = key.alg()?;
            if !ALGORITHMS.contains(&alg) {
                return Err(Error::UnsupportedAlgorithm(alg));
            }
        }
        Ok(Self(key))
    }

    pub fn crv(&self) -> Result<i64, Error> {
        self.get_int(iana::EC2_KEY_PARAMETER_CRV)
    }

    fn curve(&self) -> Result<Curve, Error> {
        Curve::from_crv(self.crv()?)
    }

    /// The public key: a SEC1 point for the P-curves, compressed when
    /// derived from `d`, and 32 raw bytes for X25519.
    pub fn public_key(&self) -> Result<Vec<u8>, Error> {
        let curve = self.curve()?;
        if self.has(iana::EC2_KEY_PARAMETER_X) {
            return match curve {
                Curve::X25519 => Ok(self.get_bytes(iana::OKP_KEY_PARAMETER_X)?.to_vec()),
                _ => self.sec1_point(),
            };
        }

        let secret = self.get_bytes(iana::EC2_KEY_PARAMETER_D)?;
        match curve {
            Curve::P256 => p256_dh::public(secret),
            Curve::P384 => p384_dh::public(secret),
            Curve::P521 => p521_dh::public(secret),
            Curve::X25519 => x25519::public(secret),
        }
    }

    /// A new key without the private key.  A `key_ops` entry is emptied, as
    /// a public key agreement key permits no operation on its own.
    pub fn public(&self) -> Result<Self, Error> {
        let mut key = self.clone();
        if key.has(iana::EC2_KEY_PARAMETER_D) {
            let public = key.public_key()?;
            if key.curve()? == Curve::X25519 {
                key.set_param(iana::OKP_KEY_PARAMETER_X, public);
            } else {
                key.set_sec1_point(&public)?;
            }
            key.delete(iana::EC2_KEY_PARAMETER_D);
        }
        key.restrict_ops(&[]);
        Ok(key)
    }
}

impl Ecdher for EcdhKey {
    fn ecdh(&self, remote: &Key) -> Result<Zeroizing<Vec<u8>>, Error> {
        let remote = EcdhKey::from_key(remote.clone())?;
        let secret = self.get_bytes(iana::EC2_KEY_PARAMETER_D)?;

        let (expected, actual) = (self.crv()?, remote.crv()?);
        if expected != actual {
            debug!("ECDH curve mismatch, local {expected}, remote {actual}");
            return Err(Error::CurveMismatch { expected, actual });
        }

        let public = remote.public_key()?;
        match self.curve()? {
            Curve::P256 => p256_dh::agree(secret, &public),
            Curve::P384 => p384_dh::agree(secret, &public),
            Curve::P521 => p521_dh::agree(secret, &public),
            Curve::X25519 => x25519::agree(secret, &public),
        }
    }
}
