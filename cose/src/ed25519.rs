use super::*;
use cbor::Value;
use ed25519_dalek::{
    SECRET_KEY_LENGTH, Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey,
};

/// An Ed25519 key for EdDSA, RFC 9053 §2.2.
#[derive(Debug, Clone, PartialEq)]
pub struct Ed25519Key(Key);

impl_key_wrapper!(Ed25519Key);

fn to_array(bytes: &[u8], what: &str) -> Result<[u8; 32], Error> {
    bytes.try_into().map_err(|_| {
        Error::InvalidKeyMaterial(format!(
            "Ed25519 {what} must be 32 bytes, got {}",
            bytes.len()
        ))
    })
}

impl Ed25519Key {
    fn empty() -> Self {
        let mut key = Key::new();
        key.set_kty(iana::KEY_TYPE_OKP)
            .set_alg(iana::ALGORITHM_EDDSA)
            .set_param(iana::OKP_KEY_PARAMETER_CRV, iana::ELLIPTIC_CURVE_ED25519);
        Self(key)
    }

    pub fn generate(kid: Option<Value>) -> Result<Self, Error> {
        Self::from_secret(&key::random_bytes(SECRET_KEY_LENGTH)?, kid)
    }

    pub fn from_secret(secret: &[u8], kid: Option<Value>) -> Result<Self, Error> {
        to_array(secret, "secret")?;

        let mut key = Self::empty();
        key.set_param(iana::OKP_KEY_PARAMETER_D, secret);
        if let Some(kid) = kid {
            key.set_kid_value(kid);
        }
        Ok(key)
    }

    pub fn from_public(public: &[u8], kid: Option<Value>) -> Result<Self, Error> {
        VerifyingKey::from_bytes(&to_array(public, "public key")?)
            .map_err(|e| Error::InvalidKeyMaterial(e.to_string()))?;

        let mut key = Self::empty();
        key.set_param(iana::OKP_KEY_PARAMETER_X, public);
        if let Some(kid) = kid {
            key.set_kid_value(kid);
        }
        Ok(key)
    }

    pub fn from_key(key: Key) -> Result<Self, Error> {
        key.check(iana::KEY_TYPE_OKP, &[iana::ALGORITHM_EDDSA])?;
        if key.has(iana::OKP_KEY_PARAMETER_CRV) {
            let crv = key.get_int(iana::OKP_KEY_PARAMETER_CRV)?;
            if crv != iana::ELLIPTIC_CURVE_ED25519 {
                return Err(Error::UnsupportedCurve(crv));
            }
        }
        Ok(Self(key))
    }

    fn signing_key(&self) -> Result<SigningKey, Error> {
        let secret = Zeroizing::new(to_array(
            self.get_bytes(iana::OKP_KEY_PARAMETER_D)?,
            "secret",
        )?);
        Ok(SigningKey::from_bytes(&secret))
    }

    /// The 32 byte public key, from `x` or derived from `d`.
    pub fn public_key(&self) -> Result<Vec<u8>, Error> {
        if self.has(iana::OKP_KEY_PARAMETER_X) {
            return Ok(self.get_bytes(iana::OKP_KEY_PARAMETER_X)?.to_vec());
        }
        Ok(self.signing_key()?.verifying_key().to_bytes().to_vec())
    }

    /// A new key without the private key, restricted to `verify`.
    pub fn public(&self) -> Result<Self, Error> {
        let mut key = self.clone();
        if key.has(iana::OKP_KEY_PARAMETER_D) {
            let public = key.public_key()?;
            key.set_param(iana::OKP_KEY_PARAMETER_X, public);
            key.delete(iana::OKP_KEY_PARAMETER_D);
        }
        key.restrict_ops(&[iana::KEY_OPERATION_VERIFY]);
        Ok(key)
    }
}

impl Signer for Ed25519Key {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, Error> {
        Ok(self.signing_key()?.sign(message).to_bytes().to_vec())
    }
}

impl Verifier for Ed25519Key {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, Error> {
        let public = to_array(&self.public_key()?, "public key")?;
        let vk = VerifyingKey::from_bytes(&public)
            .map_err(|e| Error::InvalidKeyMaterial(e.to_string()))?;
        let Ok(signature) = Signature::from_slice(signature) else {
            return Ok(false);
        };
        Ok(vk.verify(message, &signature).is_ok())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    const CONTENT: &[u8] = b"This is the content.";

    #[test]
    fn sign_and_verify() {
        let key = Ed25519Key::generate(None).unwrap();
        assert_eq!(key.kty().unwrap(), cbor::Label::Int(iana::KEY_TYPE_OKP));
        assert_eq!(key.alg().unwrap(), iana::ALGORITHM_EDDSA);
        assert_eq!(
            key.get_int(iana::OKP_KEY_PARAMETER_CRV).unwrap(),
            iana::ELLIPTIC_CURVE_ED25519
        );

        let key = Ed25519Key::from_bytes(&key.to_bytes()).unwrap();
        let sig = key.sign(CONTENT).unwrap();
        assert!(key.verify(CONTENT, &sig).unwrap());
        assert!(!key.verify(b"This is the content", &sig).unwrap());
        assert!(!key.verify(CONTENT, &sig[..63]).unwrap());

        let key2 = Ed25519Key::from_secret(key.secret().unwrap(), None).unwrap();
        assert_eq!(key2.sign(CONTENT).unwrap(), sig);

        let pk = key.public().unwrap();
        assert!(pk.verify(CONTENT, &sig).unwrap());
        assert!(matches!(
            pk.sign(CONTENT),
            Err(Error::MissingKey(cbor::Label::Int(iana::OKP_KEY_PARAMETER_D)))
        ));

        let pk2 = Ed25519Key::from_public(&pk.public_key().unwrap(), None).unwrap();
        assert!(pk2.verify(CONTENT, &sig).unwrap());
    }

    #[test]
    fn public_projection() {
        let mut key = Ed25519Key::from_secret(
            &hex!("57c92077664146e876760c9520d054aa93c3afb04e306705db6090308507b4d3"),
            Some(Value::from("11")),
        )
        .unwrap();
        key.set_ops([iana::KEY_OPERATION_SIGN]);

        let pk = key.public().unwrap();
        assert_eq!(
            pk.get_bytes(iana::OKP_KEY_PARAMETER_X).unwrap(),
            hex!("8373deeba9c0af9880e5c9e976ffda8522db9e3df20fddfe54b3a8c59cfe3c94")
        );
        assert!(!pk.has(iana::OKP_KEY_PARAMETER_D));
        assert_eq!(pk.kid_value().unwrap(), Value::from("11"));
        assert_eq!(
            pk.ops().unwrap(),
            vec![cbor::Label::Int(iana::KEY_OPERATION_VERIFY)]
        );

        // The source key is untouched
        assert!(key.has(iana::OKP_KEY_PARAMETER_D));
        assert!(!key.has(iana::OKP_KEY_PARAMETER_X));
        assert_eq!(
            key.ops().unwrap(),
            vec![cbor::Label::Int(iana::KEY_OPERATION_SIGN)]
        );
    }

    #[test]
    fn invalid_material() {
        assert!(matches!(
            Ed25519Key::from_secret(&[1u8; 31], None),
            Err(Error::InvalidKeyMaterial(_))
        ));
        assert!(matches!(
            Ed25519Key::from_public(&[1u8; 33], None),
            Err(Error::InvalidKeyMaterial(_))
        ));

        let mut key = Ed25519Key::generate(None).unwrap().into_key();
        key.set_param(iana::OKP_KEY_PARAMETER_CRV, iana::ELLIPTIC_CURVE_X25519);
        assert!(matches!(
            Ed25519Key::from_key(key),
            Err(Error::UnsupportedCurve(iana::ELLIPTIC_CURVE_X25519))
        ));
    }
}
