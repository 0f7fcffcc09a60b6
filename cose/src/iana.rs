/*!
Registered values from the IANA COSE and CWT registries.

See <https://www.iana.org/assignments/cose/cose.xhtml> and
<https://www.iana.org/assignments/cwt/cwt.xhtml>.
*/

// COSE Key Common Parameters
pub const KEY_PARAMETER_KTY: i64 = 1;
pub const KEY_PARAMETER_KID: i64 = 2;
pub const KEY_PARAMETER_ALG: i64 = 3;
pub const KEY_PARAMETER_KEY_OPS: i64 = 4;
pub const KEY_PARAMETER_BASE_IV: i64 = 5;

// COSE Key Types
pub const KEY_TYPE_OKP: i64 = 1;
pub const KEY_TYPE_EC2: i64 = 2;
pub const KEY_TYPE_RSA: i64 = 3;
pub const KEY_TYPE_SYMMETRIC: i64 = 4;
pub const KEY_TYPE_HSS_LMS: i64 = 5;
pub const KEY_TYPE_WALNUT_DSA: i64 = 6;

// COSE Key Type Parameters
pub const OKP_KEY_PARAMETER_CRV: i64 = -1;
pub const OKP_KEY_PARAMETER_X: i64 = -2;
pub const OKP_KEY_PARAMETER_D: i64 = -4;

pub const EC2_KEY_PARAMETER_CRV: i64 = -1;
pub const EC2_KEY_PARAMETER_X: i64 = -2;
/// Either the y-coordinate, or a boolean sign bit for point compression.
pub const EC2_KEY_PARAMETER_Y: i64 = -3;
pub const EC2_KEY_PARAMETER_D: i64 = -4;

pub const SYMMETRIC_KEY_PARAMETER_K: i64 = -1;

// COSE Algorithms
pub const ALGORITHM_RS256: i64 = -257;
pub const ALGORITHM_ES256K: i64 = -47;
pub const ALGORITHM_SHA_512: i64 = -44;
pub const ALGORITHM_SHA_384: i64 = -43;
pub const ALGORITHM_PS256: i64 = -37;
pub const ALGORITHM_ES512: i64 = -36;
pub const ALGORITHM_ES384: i64 = -35;
pub const ALGORITHM_ECDH_SS_HKDF_512: i64 = -28;
pub const ALGORITHM_ECDH_SS_HKDF_256: i64 = -27;
pub const ALGORITHM_ECDH_ES_HKDF_512: i64 = -26;
pub const ALGORITHM_ECDH_ES_HKDF_256: i64 = -25;
pub const ALGORITHM_SHA_256: i64 = -16;
pub const ALGORITHM_DIRECT_HKDF_SHA_512: i64 = -11;
pub const ALGORITHM_DIRECT_HKDF_SHA_256: i64 = -10;
pub const ALGORITHM_EDDSA: i64 = -8;
pub const ALGORITHM_ES256: i64 = -7;
pub const ALGORITHM_DIRECT: i64 = -6;
pub const ALGORITHM_A256KW: i64 = -5;
pub const ALGORITHM_A192KW: i64 = -4;
pub const ALGORITHM_A128KW: i64 = -3;
pub const ALGORITHM_A128GCM: i64 = 1;
pub const ALGORITHM_A192GCM: i64 = 2;
pub const ALGORITHM_A256GCM: i64 = 3;
pub const ALGORITHM_HMAC_256_64: i64 = 4;
pub const ALGORITHM_HMAC_256_256: i64 = 5;
pub const ALGORITHM_HMAC_384_384: i64 = 6;
pub const ALGORITHM_HMAC_512_512: i64 = 7;
pub const ALGORITHM_AES_CCM_16_64_128: i64 = 10;
pub const ALGORITHM_AES_CCM_16_64_256: i64 = 11;
pub const ALGORITHM_CHACHA20_POLY1305: i64 = 24;

// COSE Elliptic Curves
pub const ELLIPTIC_CURVE_P_256: i64 = 1;
pub const ELLIPTIC_CURVE_P_384: i64 = 2;
pub const ELLIPTIC_CURVE_P_521: i64 = 3;
pub const ELLIPTIC_CURVE_X25519: i64 = 4;
pub const ELLIPTIC_CURVE_X448: i64 = 5;
pub const ELLIPTIC_CURVE_ED25519: i64 = 6;
pub const ELLIPTIC_CURVE_ED448: i64 = 7;
pub const ELLIPTIC_CURVE_SECP256K1: i64 = 8;

// COSE Header Parameters
pub const HEADER_PARAMETER_ALG: i64 = 1;
pub const HEADER_PARAMETER_CRIT: i64 = 2;
pub const HEADER_PARAMETER_CONTENT_TYPE: i64 = 3;
pub const HEADER_PARAMETER_KID: i64 = 4;
pub const HEADER_PARAMETER_IV: i64 = 5;
pub const HEADER_PARAMETER_PARTIAL_IV: i64 = 6;
pub const HEADER_PARAMETER_COUNTER_SIGNATURE: i64 = 7;
pub const HEADER_PARAMETER_COUNTER_SIGNATURE0: i64 = 9;
pub const HEADER_PARAMETER_KID_CONTEXT: i64 = 10;
pub const HEADER_PARAMETER_X5BAG: i64 = 32;
pub const HEADER_PARAMETER_X5CHAIN: i64 = 33;
pub const HEADER_PARAMETER_X5T: i64 = 34;
pub const HEADER_PARAMETER_X5U: i64 = 35;

// COSE Header Algorithm Parameters
pub const HEADER_ALGORITHM_PARAMETER_PARTY_V_OTHER: i64 = -26;
pub const HEADER_ALGORITHM_PARAMETER_PARTY_V_NONCE: i64 = -25;
pub const HEADER_ALGORITHM_PARAMETER_PARTY_V_IDENTITY: i64 = -24;
pub const HEADER_ALGORITHM_PARAMETER_PARTY_U_OTHER: i64 = -23;
pub const HEADER_ALGORITHM_PARAMETER_PARTY_U_NONCE: i64 = -22;
pub const HEADER_ALGORITHM_PARAMETER_PARTY_U_IDENTITY: i64 = -21;
pub const HEADER_ALGORITHM_PARAMETER_SALT: i64 = -20;
pub const HEADER_ALGORITHM_PARAMETER_STATIC_KEY_ID: i64 = -3;
pub const HEADER_ALGORITHM_PARAMETER_STATIC_KEY: i64 = -2;
pub const HEADER_ALGORITHM_PARAMETER_EPHEMERAL_KEY: i64 = -1;

// Key Operation values, RFC 9052 Table 5
pub const KEY_OPERATION_SIGN: i64 = 1;
pub const KEY_OPERATION_VERIFY: i64 = 2;
pub const KEY_OPERATION_ENCRYPT: i64 = 3;
pub const KEY_OPERATION_DECRYPT: i64 = 4;
pub const KEY_OPERATION_WRAP_KEY: i64 = 5;
pub const KEY_OPERATION_UNWRAP_KEY: i64 = 6;
pub const KEY_OPERATION_DERIVE_KEY: i64 = 7;
pub const KEY_OPERATION_DERIVE_BITS: i64 = 8;
pub const KEY_OPERATION_MAC_CREATE: i64 = 9;
pub const KEY_OPERATION_MAC_VERIFY: i64 = 10;

// CBOR Tags
pub const CBOR_TAG_COSE_ENCRYPT0: u64 = 16;
pub const CBOR_TAG_COSE_MAC0: u64 = 17;
pub const CBOR_TAG_COSE_SIGN1: u64 = 18;
pub const CBOR_TAG_CWT: u64 = 61;
pub const CBOR_TAG_COSE_ENCRYPT: u64 = 96;
pub const CBOR_TAG_COSE_MAC: u64 = 97;
pub const CBOR_TAG_COSE_SIGN: u64 = 98;
pub const CBOR_TAG_SELF_DESCRIBED: u64 = 55799;

// CWT Claims
pub const CWT_CLAIM_ISS: i64 = 1;
pub const CWT_CLAIM_SUB: i64 = 2;
pub const CWT_CLAIM_AUD: i64 = 3;
pub const CWT_CLAIM_EXP: i64 = 4;
pub const CWT_CLAIM_NBF: i64 = 5;
pub const CWT_CLAIM_IAT: i64 = 6;
pub const CWT_CLAIM_CTI: i64 = 7;
pub const CWT_CLAIM_CNF: i64 = 8;
pub const CWT_CLAIM_SCOPE: i64 = 9;
pub const CWT_CLAIM_NONCE: i64 = 10;
