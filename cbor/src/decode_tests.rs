use super::decode::*;
use super::encode::emit;
use super::value::*;
use alloc::{string::String, vec};
use hex_literal::hex;

fn int(data: &[u8]) -> i64 {
    from_slice(data).unwrap().as_integer().unwrap()
}

fn float(data: &[u8]) -> f64 {
    match from_slice(data).unwrap() {
        Value::Float(f) => f,
        v => panic!("Expected float, got {v:?}"),
    }
}

#[test]
fn rfc_tests() {
    // RFC 8949, Appendix A:
    // https://www.rfc-editor.org/rfc/rfc8949.html#section-appendix.a

    assert_eq!(0, int(&hex!("00")));
    assert_eq!(1, int(&hex!("01")));
    assert_eq!(10, int(&hex!("0a")));
    assert_eq!(23, int(&hex!("17")));
    assert_eq!(24, int(&hex!("1818")));
    assert_eq!(25, int(&hex!("1819")));
    assert_eq!(100, int(&hex!("1864")));
    assert_eq!(1000, int(&hex!("1903e8")));
    assert_eq!(1000000, int(&hex!("1a000f4240")));
    assert_eq!(1000000000000, int(&hex!("1b000000e8d4a51000")));
    assert_eq!(-1, int(&hex!("20")));
    assert_eq!(-10, int(&hex!("29")));
    assert_eq!(-100, int(&hex!("3863")));
    assert_eq!(-1000, int(&hex!("3903e7")));
    assert_eq!(i64::MIN, int(&hex!("3b7fffffffffffffff")));

    /* Integers are limited to the i64 range */
    assert_eq!(
        from_slice(&hex!("1bffffffffffffffff")),
        Err(Error::IntegerOverflow)
    );
    assert_eq!(
        from_slice(&hex!("3bffffffffffffffff")),
        Err(Error::IntegerOverflow)
    );
    /* We do not support BIGNUMs, or tags at all */
    assert_eq!(
        from_slice(&hex!("c249010000000000000000")),
        Err(Error::Unsupported("tagged item"))
    );

    assert_eq!(0.0, float(&hex!("f90000")));
    assert_eq!(1.0, float(&hex!("f93c00")));
    assert_eq!(1.5, float(&hex!("f93e00")));
    assert_eq!(65504.0, float(&hex!("f97bff")));
    assert_eq!(100000.0, float(&hex!("fa47c35000")));
    assert_eq!(1.1, float(&hex!("fb3ff199999999999a")));
    assert_eq!(-4.0, float(&hex!("f9c400")));
    assert_eq!(f64::INFINITY, float(&hex!("f97c00")));
    assert!(float(&hex!("f97e00")).is_nan());

    assert_eq!(from_slice(&hex!("f4")), Ok(Value::Bool(false)));
    assert_eq!(from_slice(&hex!("f5")), Ok(Value::Bool(true)));
    assert_eq!(from_slice(&hex!("f6")), Ok(Value::Null));
    assert_eq!(
        from_slice(&hex!("f7")),
        Err(Error::Unsupported("undefined"))
    );
    assert_eq!(
        from_slice(&hex!("f0")),
        Err(Error::Unsupported("simple value"))
    );

    assert_eq!(from_slice(&hex!("40")), Ok(Value::Bytes(vec![])));
    assert_eq!(
        from_slice(&hex!("4401020304")),
        Ok(Value::Bytes(hex!("01020304").to_vec()))
    );
    assert_eq!(from_slice(&hex!("60")), Ok(Value::Text(String::new())));
    assert_eq!(from_slice(&hex!("6449455446")), Ok(Value::from("IETF")));
    assert_eq!(from_slice(&hex!("62c3bc")), Ok(Value::from("\u{00fc}")));
    assert_eq!(from_slice(&hex!("64f0908591")), Ok(Value::from("\u{10151}")));

    assert_eq!(from_slice(&hex!("80")), Ok(Value::Array(vec![])));
    assert_eq!(
        from_slice(&hex!("8301820203820405")),
        Ok(Value::Array(vec![
            Value::Integer(1),
            Value::Array(vec![Value::Integer(2), Value::Integer(3)]),
            Value::Array(vec![Value::Integer(4), Value::Integer(5)]),
        ]))
    );
    assert_eq!(from_slice(&hex!("a0")), Ok(Value::Map(Map::new())));

    let m = from_slice_map(&hex!("a201020304")).unwrap();
    assert_eq!(m.get(&Label::Int(1)), Some(&Value::Integer(2)));
    assert_eq!(m.get(&Label::Int(3)), Some(&Value::Integer(4)));

    let m = from_slice_map(&hex!("a26161016162820203")).unwrap();
    assert_eq!(m.get(&Label::from("a")), Some(&Value::Integer(1)));
    assert_eq!(
        m.get(&Label::from("b")),
        Some(&Value::Array(vec![Value::Integer(2), Value::Integer(3)]))
    );
}

#[test]
fn indefinite_length_rejected() {
    assert_eq!(
        from_slice(&hex!("5f42010243030405ff")),
        Err(Error::Unsupported("indefinite-length item"))
    );
    assert_eq!(
        from_slice(&hex!("9fff")),
        Err(Error::Unsupported("indefinite-length item"))
    );
    assert_eq!(
        from_slice(&hex!("bf6346756ef563416d7421ff")),
        Err(Error::Unsupported("indefinite-length item"))
    );
}

#[test]
fn malformed() {
    assert_eq!(from_slice(&[]), Err(Error::NotEnoughData));
    assert_eq!(from_slice(&hex!("19 01")), Err(Error::NotEnoughData));
    assert_eq!(from_slice(&hex!("44 0102")), Err(Error::NotEnoughData));
    assert_eq!(from_slice(&hex!("83 0102")), Err(Error::NotEnoughData));
    assert_eq!(
        from_slice(&hex!("5b ffffffffffffffff")),
        Err(Error::NotEnoughData)
    );
    assert_eq!(from_slice(&hex!("1c")), Err(Error::InvalidMinorValue(28)));
    assert_eq!(from_slice(&hex!("62 c328")), Err(Error::InvalidUtf8));
    assert_eq!(from_slice(&hex!("0102")), Err(Error::AdditionalData));
}

#[test]
fn duplicate_keys_rejected() {
    assert_eq!(
        from_slice(&hex!("a2 01 02 01 03")),
        Err(Error::DuplicateKey(Label::Int(1)))
    );
    assert_eq!(
        from_slice(&hex!("a2 6161 01 6161 02")),
        Err(Error::DuplicateKey(Label::from("a")))
    );
}

#[test]
fn composite_keys_rejected() {
    assert_eq!(from_slice(&hex!("a1 8101 02")), Err(Error::InvalidMapKey));
    assert_eq!(from_slice(&hex!("a1 f5 02")), Err(Error::InvalidMapKey));
}

#[test]
fn max_recursion() {
    let mut deep = vec![0x81u8; 64];
    deep.push(0x00);
    assert_eq!(from_slice(&deep), Err(Error::MaxRecursion));

    let mut shallow = vec![0x81u8; 16];
    shallow.push(0x00);
    assert!(from_slice(&shallow).is_ok());
}

#[test]
fn incorrect_type() {
    assert_eq!(
        from_slice_map(&hex!("80")),
        Err(Error::IncorrectType("map", "array"))
    );
    assert_eq!(
        from_slice_array(&hex!("a0")),
        Err(Error::IncorrectType("array", "map"))
    );
}

#[test]
fn canonical_round_trip() {
    for data in [
        &hex!("a3 01 26 04 42 3131 20 01")[..],
        &hex!("84 43 a10127 a0 40 f6")[..],
        &hex!("a2 0a f4 6161 fb3ff199999999999a")[..],
    ] {
        assert_eq!(emit(&from_slice(data).unwrap()), data);
    }
}
