/*!
The COSE_KDF_Context structure of RFC 9053 §5.2, used as the HKDF `info`
when deriving a content key by key agreement.
*/

use super::*;
use cbor::{
    Value,
    encode::{Encoder, ToCbor},
};

/// PartyUInfo or PartyVInfo.  Absent fields encode as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyInfo {
    pub identity: Option<Vec<u8>>,
    pub nonce: Option<Vec<u8>>,
    pub other: Option<Vec<u8>>,
}

impl ToCbor for PartyInfo {
    fn to_cbor(&self, encoder: &mut Encoder) {
        encoder.emit_array(3, |a| {
            a.emit(&self.identity);
            a.emit(&self.nonce);
            a.emit(&self.other);
        })
    }
}

impl PartyInfo {
    fn from_value(value: Value) -> Result<Self, Error> {
        let [identity, nonce, other] = expect_array(value, "PartyInfo")?
            .try_into()
            .map_err(|_| Error::InvalidStructure("PartyInfo must have 3 items"))?;
        Ok(Self {
            identity: optional_bytes(identity, "PartyInfo identity")?,
            nonce: optional_bytes(nonce, "PartyInfo nonce")?,
            other: optional_bytes(other, "PartyInfo other")?,
        })
    }
}

/// SuppPubInfo: the length of the derived key in bits, and the protected
/// header of the recipient structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuppPubInfo {
    pub key_data_length: u64,
    pub protected: Header,
    pub other: Option<Vec<u8>>,
}

impl SuppPubInfo {
    pub fn new(key_data_length: u64, protected: Header) -> Self {
        Self {
            key_data_length,
            protected,
            other: None,
        }
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        let mut items = expect_array(value, "SuppPubInfo")?.into_iter();
        let (Some(length), Some(protected), other, None) =
            (items.next(), items.next(), items.next(), items.next())
        else {
            return Err(Error::InvalidStructure("SuppPubInfo must have 2 or 3 items"));
        };

        let key_data_length = match length {
            Value::Integer(n) => u64::try_from(n).map_field_err("keyDataLength")?,
            v => Err(cbor::decode::Error::IncorrectType("integer", v.type_name()))
                .map_field_err("keyDataLength")?,
        };
        Ok(Self {
            key_data_length,
            protected: Header::from_bytes(&expect_bytes(protected, "SuppPubInfo protected")?)?,
            other: other
                .map(|v| expect_bytes(v, "SuppPubInfo other"))
                .transpose()?,
        })
    }
}

impl ToCbor for SuppPubInfo {
    fn to_cbor(&self, encoder: &mut Encoder) {
        let count = if self.other.is_some() { 3 } else { 2 };
        encoder.emit_array(count, |a| {
            a.emit(&self.key_data_length);
            a.emit(&self.protected.to_bytes());
            if let Some(other) = &self.other {
                a.emit(other);
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct KdfContext {
    pub algorithm_id: i64,
    pub party_u_info: PartyInfo,
    pub party_v_info: PartyInfo,
    pub supp_pub_info: SuppPubInfo,
    pub supp_priv_info: Option<Vec<u8>>,
}

impl KdfContext {
    pub fn new(
        algorithm_id: i64,
        party_u_info: PartyInfo,
        party_v_info: PartyInfo,
        supp_pub_info: SuppPubInfo,
    ) -> Self {
        Self {
            algorithm_id,
            party_u_info,
            party_v_info,
            supp_pub_info,
            supp_priv_info: None,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        cbor::encode::emit(self)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let mut items = cbor::decode::from_slice_array(data)?.into_iter();
        let (Some(alg), Some(u), Some(v), Some(supp_pub), supp_priv, None) = (
            items.next(),
            items.next(),
            items.next(),
            items.next(),
            items.next(),
            items.next(),
        ) else {
            return Err(Error::InvalidStructure("COSE_KDF_Context must have 4 or 5 items"));
        };

        let algorithm_id = match alg {
            Value::Integer(alg) => alg,
            v => Err(cbor::decode::Error::IncorrectType("integer", v.type_name()))
                .map_field_err("AlgorithmID")?,
        };
        Ok(Self {
            algorithm_id,
            party_u_info: PartyInfo::from_value(u)?,
            party_v_info: PartyInfo::from_value(v)?,
            supp_pub_info: SuppPubInfo::from_value(supp_pub)?,
            supp_priv_info: supp_priv
                .map(|v| expect_bytes(v, "SuppPrivInfo"))
                .transpose()?,
        })
    }
}

impl ToCbor for KdfContext {
    fn to_cbor(&self, encoder: &mut Encoder) {
        let count = if self.supp_priv_info.is_some() { 5 } else { 4 };
        encoder.emit_array(count, |a| {
            a.emit(&self.algorithm_id);
            a.emit(&self.party_u_info);
            a.emit(&self.party_v_info);
            a.emit(&self.supp_pub_info);
            if let Some(supp_priv_info) = &self.supp_priv_info {
                a.emit(supp_priv_info);
            }
        })
    }
}

fn expect_array(value: Value, field: &'static str) -> Result<Vec<Value>, Error> {
    match value {
        Value::Array(items) => Ok(items),
        v => Err(cbor::decode::Error::IncorrectType("array", v.type_name())).map_field_err(field),
    }
}

fn optional_bytes(value: Value, field: &'static str) -> Result<Option<Vec<u8>>, Error> {
    match value {
        Value::Null => Ok(None),
        v => expect_bytes(v, field).map(Some),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn empty_context() {
        let data = hex!("840083F6F6F683F6F6F6820040");
        let ctx = KdfContext::from_bytes(&data).unwrap();
        assert_eq!(ctx.algorithm_id, 0);
        assert_eq!(ctx.party_u_info, PartyInfo::default());
        assert_eq!(ctx.party_v_info, PartyInfo::default());
        assert_eq!(ctx.supp_pub_info, SuppPubInfo::new(0, Header::new()));
        assert_eq!(ctx.supp_priv_info, None);
        assert_eq!(ctx.to_bytes(), data);
    }

    // https://github.com/cose-wg/Examples/blob/master/ecdh-direct-examples/p256-hkdf-256-01.json
    #[test]
    fn ecdh_es_context() {
        let data = hex!("840183F6F6F683F6F6F682188044A1013818");

        let mut protected = Header::new();
        protected.set_alg(iana::ALGORITHM_ECDH_ES_HKDF_256);
        let ctx = KdfContext::new(
            iana::ALGORITHM_A128GCM,
            PartyInfo::default(),
            PartyInfo::default(),
            SuppPubInfo::new(128, protected),
        );
        assert_eq!(ctx.to_bytes(), data);
        assert_eq!(KdfContext::from_bytes(&data).unwrap(), ctx);

        let key = hkdf256(
            &hex!("4B31712E096E5F20B4ECF9790FD8CC7C8B7E2C8AD90BDA81CB224F62C0E7B9A6"),
            None,
            &ctx.to_bytes(),
            16,
        )
        .unwrap();
        assert_eq!(key, hex!("56074D506729CA40C4B4FE50C6439893"));
    }

    #[test]
    fn optional_fields() {
        let ctx = KdfContext {
            algorithm_id: iana::ALGORITHM_A256GCM,
            party_u_info: PartyInfo {
                identity: Some(b"lighting-client".to_vec()),
                nonce: None,
                other: None,
            },
            party_v_info: PartyInfo {
                identity: Some(b"lighting-server".to_vec()),
                nonce: Some(hex!("0102").to_vec()),
                other: Some(b"Encryption Example 02".to_vec()),
            },
            supp_pub_info: SuppPubInfo {
                key_data_length: 256,
                protected: Header::new(),
                other: Some(hex!("aa").to_vec()),
            },
            supp_priv_info: Some(hex!("bb").to_vec()),
        };
        let data = ctx.to_bytes();
        assert_eq!(data[0], 0x85);
        assert_eq!(KdfContext::from_bytes(&data).unwrap(), ctx);
    }

    #[test]
    fn malformed() {
        // Top level arity
        assert!(matches!(
            KdfContext::from_bytes(&hex!("830083F6F6F683F6F6F6")),
            Err(Error::InvalidStructure(_))
        ));
        // PartyInfo arity
        assert!(matches!(
            KdfContext::from_bytes(&hex!("840082F6F683F6F6F6820040")),
            Err(Error::InvalidStructure(_))
        ));
        // SuppPubInfo arity
        assert!(matches!(
            KdfContext::from_bytes(&hex!("840083F6F6F683F6F6F68100")),
            Err(Error::InvalidStructure(_))
        ));
        // Identity is not a byte string
        assert!(matches!(
            KdfContext::from_bytes(&hex!("840083F5F6F683F6F6F6820040")),
            Err(Error::InvalidField { .. })
        ));
        // Negative key length
        assert!(matches!(
            KdfContext::from_bytes(&hex!("840083F6F6F683F6F6F6822040")),
            Err(Error::InvalidField { .. })
        ));
    }
}
