/*!
CBOR Web Tokens, RFC 8392.

A CWT is a [`Claims`] set carried as the payload of a COSE message, usually
a [`Sign1Message`](crate::Sign1Message) or [`Mac0Message`](crate::Mac0Message),
optionally wrapped in the CWT tag with [`with_cwt_tag`].  [`Validator`]
checks the registered time and identity claims once the envelope has been
verified.
*/

use super::{KvMap, cbor, iana, tag};
use core::ops::{Deref, DerefMut};
use thiserror::Error;
use time::OffsetDateTime;

/// Largest clock skew a [`Validator`] will tolerate, in seconds.
pub const MAX_CLOCK_SKEW: u64 = 10 * 60;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Clock skew of {0}s is greater than 10 minutes")]
    InvalidClockSkew(u64),

    #[error("Token has no expiration")]
    MissingExpiration,

    #[error("Token has expired")]
    Expired,

    #[error("Token cannot be used yet")]
    NotYetValid,

    #[error("Token was issued in the future")]
    IssuedInFuture,

    #[error("Invalid issuer, expected {expected:?}, got {actual:?}")]
    InvalidIssuer { expected: String, actual: String },

    #[error("Invalid audience, expected {expected:?}, got {actual:?}")]
    InvalidAudience { expected: String, actual: String },

    /// A claim is present but malformed.
    #[error(transparent)]
    InvalidClaim(#[from] super::Error),
}

/// A CWT claims set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims(KvMap);

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, super::Error> {
        KvMap::from_bytes(data).map(Self)
    }

    pub fn iss(&self) -> Result<&str, super::Error> {
        self.get_text(iana::CWT_CLAIM_ISS)
    }

    pub fn set_iss(&mut self, iss: impl Into<String>) -> &mut Self {
        self.set_param(iana::CWT_CLAIM_ISS, iss.into());
        self
    }

    pub fn sub(&self) -> Result<&str, super::Error> {
        self.get_text(iana::CWT_CLAIM_SUB)
    }

    pub fn set_sub(&mut self, sub: impl Into<String>) -> &mut Self {
        self.set_param(iana::CWT_CLAIM_SUB, sub.into());
        self
    }

    pub fn aud(&self) -> Result<&str, super::Error> {
        self.get_text(iana::CWT_CLAIM_AUD)
    }

    pub fn set_aud(&mut self, aud: impl Into<String>) -> &mut Self {
        self.set_param(iana::CWT_CLAIM_AUD, aud.into());
        self
    }

    /// Expiration time, in seconds since the Unix epoch.
    pub fn exp(&self) -> Result<i64, super::Error> {
        self.get_int(iana::CWT_CLAIM_EXP)
    }

    pub fn set_exp(&mut self, exp: i64) -> &mut Self {
        self.set_param(iana::CWT_CLAIM_EXP, exp);
        self
    }

    pub fn nbf(&self) -> Result<i64, super::Error> {
        self.get_int(iana::CWT_CLAIM_NBF)
    }

    pub fn set_nbf(&mut self, nbf: i64) -> &mut Self {
        self.set_param(iana::CWT_CLAIM_NBF, nbf);
        self
    }

    pub fn iat(&self) -> Result<i64, super::Error> {
        self.get_int(iana::CWT_CLAIM_IAT)
    }

    pub fn set_iat(&mut self, iat: i64) -> &mut Self {
        self.set_param(iana::CWT_CLAIM_IAT, iat);
        self
    }

    pub fn cti(&self) -> Result<&[u8], super::Error> {
        self.get_bytes(iana::CWT_CLAIM_CTI)
    }

    pub fn set_cti(&mut self, cti: impl Into<Vec<u8>>) -> &mut Self {
        self.set_param(iana::CWT_CLAIM_CTI, cti.into());
        self
    }

    /// Confirmation method, RFC 8747.
    pub fn cnf(&self) -> Result<&cbor::Map, super::Error> {
        self.get_map(iana::CWT_CLAIM_CNF)
    }

    pub fn set_cnf(&mut self, cnf: cbor::Map) -> &mut Self {
        self.set_param(iana::CWT_CLAIM_CNF, cnf);
        self
    }

    pub fn scope(&self) -> Result<&str, super::Error> {
        self.get_text(iana::CWT_CLAIM_SCOPE)
    }

    pub fn set_scope(&mut self, scope: impl Into<String>) -> &mut Self {
        self.set_param(iana::CWT_CLAIM_SCOPE, scope.into());
        self
    }

    pub fn nonce(&self) -> Result<&[u8], super::Error> {
        self.get_bytes(iana::CWT_CLAIM_NONCE)
    }

    pub fn set_nonce(&mut self, nonce: impl Into<Vec<u8>>) -> &mut Self {
        self.set_param(iana::CWT_CLAIM_NONCE, nonce.into());
        self
    }

    /// A text claim that may be absent, with absence read as "".
    fn text_or_empty(&self, label: i64) -> Result<&str, super::Error> {
        if self.has(label) {
            self.get_text(label)
        } else {
            Ok("")
        }
    }
}

impl Deref for Claims {
    type Target = KvMap;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Claims {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<KvMap> for Claims {
    fn from(value: KvMap) -> Self {
        Self(value)
    }
}

/// Prepends the CWT tag (61) to an encoded COSE message.
pub fn with_cwt_tag(data: &[u8]) -> Vec<u8> {
    tag::with_tag(tag::CWT_PREFIX, data)
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ValidatorOptions {
    /// Required `iss`, if not empty.
    pub expected_issuer: String,
    /// Required `aud`, if not empty.
    pub expected_audience: String,
    pub allow_missing_expiration: bool,
    /// Reject tokens whose `iat` is later than now.
    pub expect_issued_in_the_past: bool,
    /// Leeway for the time claims, in seconds.
    pub clock_skew: u64,
    /// Validate against this instant instead of the system clock.
    pub fixed_now: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct Validator {
    options: ValidatorOptions,
}

impl Validator {
    pub fn new(options: ValidatorOptions) -> Result<Self, Error> {
        if options.clock_skew > MAX_CLOCK_SKEW {
            return Err(Error::InvalidClockSkew(options.clock_skew));
        }
        Ok(Self { options })
    }

    /// Whole seconds: the fraction is dropped, so a claim equal to the
    /// current second still counts as the current second.
    fn now(&self) -> i64 {
        self.options
            .fixed_now
            .unwrap_or_else(OffsetDateTime::now_utc)
            .unix_timestamp()
    }

    pub fn validate(&self, claims: &Claims) -> Result<(), Error> {
        let now = self.now();
        // Bounded by MAX_CLOCK_SKEW
        let skew = self.options.clock_skew as i64;

        if claims.has(iana::CWT_CLAIM_EXP) {
            let exp = claims.exp()?;
            if exp <= 0 || exp.saturating_add(skew) < now {
                return Err(Error::Expired);
            }
        } else if !self.options.allow_missing_expiration {
            return Err(Error::MissingExpiration);
        }

        if claims.has(iana::CWT_CLAIM_NBF) {
            let nbf = claims.nbf()?;
            if nbf <= 0 || nbf > now.saturating_add(skew) {
                return Err(Error::NotYetValid);
            }
        }

        if self.options.expect_issued_in_the_past
            && claims.has(iana::CWT_CLAIM_IAT)
            && claims.iat()? > now.saturating_add(skew)
        {
            return Err(Error::IssuedInFuture);
        }

        if !self.options.expected_issuer.is_empty() {
            let iss = claims.text_or_empty(iana::CWT_CLAIM_ISS)?;
            if iss != self.options.expected_issuer {
                return Err(Error::InvalidIssuer {
                    expected: self.options.expected_issuer.clone(),
                    actual: iss.to_string(),
                });
            }
        }

        if !self.options.expected_audience.is_empty() {
            let aud = claims.text_or_empty(iana::CWT_CLAIM_AUD)?;
            if aud != self.options.expected_audience {
                return Err(Error::InvalidAudience {
                    expected: self.options.expected_audience.clone(),
                    actual: aud.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Ed25519Key, HmacKey, Mac0Message, Sign1Message};
    use hex_literal::hex;

    fn at(secs: i64) -> Option<OffsetDateTime> {
        Some(OffsetDateTime::from_unix_timestamp(secs).unwrap())
    }

    fn now() -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }

    #[test]
    fn sign1_ed25519() {
        let key = Ed25519Key::generate(None).unwrap();
        let pk = key.public().unwrap();

        let mut claims = Claims::new();
        claims
            .set_iss("ldclabs")
            .set_aud("cosette")
            .set_sub("tester")
            .set_exp(now() + 3600)
            .set_cti(hex!("0102030405060708090a0b0c0d0e0f10"));

        let aad: &[u8] = b"@ldclabs/cosette";
        let mut msg = Sign1Message::new(claims.to_bytes(), None, None);
        let data = with_cwt_tag(&msg.to_bytes(&key, Some(aad)).unwrap());
        assert_eq!(data[..2], hex!("d83d"));

        assert!(matches!(
            Sign1Message::from_bytes(&pk, &data, None),
            Err(crate::Error::SignatureMismatch)
        ));
        let msg2 = Sign1Message::from_bytes(&pk, &data, Some(aad)).unwrap();
        let claims2 = Claims::from_bytes(&msg2.payload).unwrap();
        assert_eq!(claims2, claims);
        assert_eq!(claims2.iss().unwrap(), "ldclabs");
        assert_eq!(claims2.sub().unwrap(), "tester");
        assert_eq!(claims2.cti().unwrap(), hex!("0102030405060708090a0b0c0d0e0f10"));

        let validator = Validator::new(ValidatorOptions {
            expected_issuer: "ldclabs".into(),
            expected_audience: "cosette".into(),
            ..Default::default()
        })
        .unwrap();
        validator.validate(&claims2).unwrap();
    }

    // https://www.rfc-editor.org/rfc/rfc8392#appendix-A.4
    #[test]
    fn rfc8392_maced() {
        let key = HmacKey::from_secret(
            &hex!("403697de87af64611c1d32a05dab0fe1fcb715a86ab435f1ec99192d79569388"),
            iana::ALGORITHM_HMAC_256_64,
            None,
        )
        .unwrap();
        let data = hex!(
            "d83dd18443a10104a1044c53796d6d6574726963323536"
            "5850a70175636f61703a2f2f61732e6578616d706c652e636f6d02656572696b77037818"
            "636f61703a2f2f6c696768742e6578616d706c652e636f6d041a5612aeb0051a5610d9f0"
            "061a5610d9f007420b7148093101ef6d789200"
        );

        let msg = Mac0Message::from_bytes(&key, &data, None).unwrap();
        let claims = Claims::from_bytes(&msg.payload).unwrap();
        assert_eq!(claims.iss().unwrap(), "coap://as.example.com");
        assert_eq!(claims.sub().unwrap(), "erikw");
        assert_eq!(claims.aud().unwrap(), "coap://light.example.com");
        assert_eq!(claims.exp().unwrap(), 1444064944);
        assert_eq!(claims.nbf().unwrap(), 1443944944);
        assert_eq!(claims.iat().unwrap(), 1443944944);
        assert_eq!(claims.cti().unwrap(), hex!("0b71"));

        let validator = Validator::new(ValidatorOptions {
            expected_audience: "coap://light.example.com".into(),
            fixed_now: at(1444000000),
            ..Default::default()
        })
        .unwrap();
        validator.validate(&claims).unwrap();
    }

    #[test]
    fn clock_skew() {
        assert!(matches!(
            Validator::new(ValidatorOptions {
                clock_skew: 11 * 60,
                ..Default::default()
            }),
            Err(Error::InvalidClockSkew(660))
        ));
        assert!(
            Validator::new(ValidatorOptions {
                clock_skew: MAX_CLOCK_SKEW,
                ..Default::default()
            })
            .is_ok()
        );
    }

    #[test]
    fn expiration() {
        let validator = Validator::new(ValidatorOptions::default()).unwrap();
        assert!(matches!(
            validator.validate(&Claims::new()),
            Err(Error::MissingExpiration)
        ));

        let validator = Validator::new(ValidatorOptions {
            allow_missing_expiration: true,
            ..Default::default()
        })
        .unwrap();
        let mut claims = Claims::new();
        validator.validate(&claims).unwrap();
        claims.set_exp(123);
        assert!(matches!(validator.validate(&claims), Err(Error::Expired)));

        let validator = Validator::new(ValidatorOptions {
            fixed_now: at(100),
            ..Default::default()
        })
        .unwrap();
        validator.validate(&claims).unwrap();

        // Skew extends the lifetime
        let validator = Validator::new(ValidatorOptions {
            fixed_now: at(150),
            clock_skew: 30,
            ..Default::default()
        })
        .unwrap();
        validator.validate(&claims).unwrap();
        let validator = Validator::new(ValidatorOptions {
            fixed_now: at(154),
            clock_skew: 30,
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(validator.validate(&claims), Err(Error::Expired)));

        claims.set_exp(0);
        assert!(matches!(validator.validate(&claims), Err(Error::Expired)));

        // Within the second of exp is still valid
        let validator = Validator::new(ValidatorOptions {
            fixed_now: Some(OffsetDateTime::from_unix_timestamp_nanos(123_900_000_000).unwrap()),
            ..Default::default()
        })
        .unwrap();
        claims.set_exp(123);
        validator.validate(&claims).unwrap();
        claims.set_exp(122);
        assert!(matches!(validator.validate(&claims), Err(Error::Expired)));

        // Wrong type
        claims.set_param(iana::CWT_CLAIM_EXP, "soon");
        assert!(matches!(
            validator.validate(&claims),
            Err(Error::InvalidClaim(crate::Error::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn not_before() {
        let validator = Validator::new(ValidatorOptions {
            allow_missing_expiration: true,
            fixed_now: at(100),
            ..Default::default()
        })
        .unwrap();
        let mut claims = Claims::new();
        validator.validate(&claims).unwrap();
        claims.set_nbf(123);
        assert!(matches!(validator.validate(&claims), Err(Error::NotYetValid)));
        claims.set_nbf(100);
        validator.validate(&claims).unwrap();
        claims.set_nbf(-1);
        assert!(matches!(validator.validate(&claims), Err(Error::NotYetValid)));

        let validator = Validator::new(ValidatorOptions {
            allow_missing_expiration: true,
            fixed_now: at(100),
            clock_skew: 23,
            ..Default::default()
        })
        .unwrap();
        claims.set_nbf(123);
        validator.validate(&claims).unwrap();
    }

    #[test]
    fn issued_at() {
        let validator = Validator::new(ValidatorOptions {
            allow_missing_expiration: true,
            expect_issued_in_the_past: true,
            ..Default::default()
        })
        .unwrap();
        let mut claims = Claims::new();
        validator.validate(&claims).unwrap();
        claims.set_iat(now() + 100);
        assert!(matches!(
            validator.validate(&claims),
            Err(Error::IssuedInFuture)
        ));

        // Only checked on request
        let validator = Validator::new(ValidatorOptions {
            allow_missing_expiration: true,
            ..Default::default()
        })
        .unwrap();
        validator.validate(&claims).unwrap();
    }

    #[test]
    fn issuer_and_audience() {
        let mut claims = Claims::new();
        claims.set_exp(now() + 100);

        let validator = Validator::new(ValidatorOptions {
            expected_issuer: "ldclabs".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(
            validator.validate(&claims),
            Err(Error::InvalidIssuer { actual, .. }) if actual.is_empty()
        ));
        claims.set_iss("ldc");
        assert!(matches!(
            validator.validate(&claims),
            Err(Error::InvalidIssuer { .. })
        ));
        claims.set_iss("ldclabs");
        validator.validate(&claims).unwrap();

        let validator = Validator::new(ValidatorOptions {
            expected_audience: "cosette".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(
            validator.validate(&claims),
            Err(Error::InvalidAudience { .. })
        ));
        claims.set_aud("cosette");
        validator.validate(&claims).unwrap();
    }

    #[test]
    fn claim_accessors() {
        let mut cnf = cbor::Map::new();
        cnf.insert(iana::KEY_PARAMETER_KID, hex!("6b6964"));

        let mut claims = Claims::new();
        claims
            .set_scope("read write")
            .set_nonce(hex!("aabb"))
            .set_cnf(cnf.clone());

        let claims = Claims::from_bytes(&claims.to_bytes()).unwrap();
        assert_eq!(claims.scope().unwrap(), "read write");
        assert_eq!(claims.nonce().unwrap(), hex!("aabb"));
        assert_eq!(claims.cnf().unwrap(), &cnf);
        assert!(matches!(claims.iss(), Err(crate::Error::MissingKey(_))));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_from_json() {
        let options: ValidatorOptions =
            serde_json::from_str(r#"{"expected_issuer":"ldclabs","clock_skew":60}"#).unwrap();
        assert_eq!(options.expected_issuer, "ldclabs");
        assert_eq!(options.clock_skew, 60);
        assert!(!options.allow_missing_expiration);
        assert!(options.fixed_now.is_none());
    }
}
