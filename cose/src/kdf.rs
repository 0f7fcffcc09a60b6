use super::*;
use hkdf::Hkdf;
use sha2::{Sha256, Sha512};

fn output_too_long(len: usize) -> Error {
    Error::InvalidKeyMaterial(format!("HKDF cannot derive {len} bytes"))
}

/// HKDF (RFC 5869) with SHA-256.  An empty `salt` is the same as none.
pub fn hkdf256(
    secret: &[u8],
    salt: Option<&[u8]>,
    info: &[u8],
    len: usize,
) -> Result<Vec<u8>, Error> {
    let mut okm = vec![0u8; len];
    Hkdf::<Sha256>::new(salt, secret)
        .expand(info, &mut okm)
        .map_err(|_| output_too_long(len))?;
    Ok(okm)
}

/// HKDF (RFC 5869) with SHA-512.  An empty `salt` is the same as none.
pub fn hkdf512(
    secret: &[u8],
    salt: Option<&[u8]>,
    info: &[u8],
    len: usize,
) -> Result<Vec<u8>, Error> {
    let mut okm = vec![0u8; len];
    Hkdf::<Sha512>::new(salt, secret)
        .expand(info, &mut okm)
        .map_err(|_| output_too_long(len))?;
    Ok(okm)
}

#[cfg(test)]
mod test {
    use super::*;
    use hex_literal::hex;

    const SECRET: [u8; 32] =
        hex!("4B31712E096E5F20B4ECF9790FD8CC7C8B7E2C8AD90BDA81CB224F62C0E7B9A6");

    // https://github.com/cose-wg/Examples/tree/master/hkdf-hmac-sha-examples
    #[test]
    fn hkdf_sha256() {
        for (info, expected) in [
            (
                &hex!("840183F6F6F683F6F6F682188044A1013818")[..],
                &hex!("56074D506729CA40C4B4FE50C6439893")[..],
            ),
            (
                &hex!("840383F6F6F683F6F6F68219010044A1013818")[..],
                &hex!("29CAA7326B683A73C98777707866D8838A3ADC3E3F46C180C54C5AAF01F1CC0C")[..],
            ),
            (
                &hex!("840783F6F6F683F6F6F68219020044A1013818")[..],
                &hex!(
                    "69220077533E89BDA8DA04814ACCB4703E8C9B009033C8F6A7E65DBB3BCA621B"
                    "2CF279C6842998CB2B4D2BBAD2E6652824F424D7B7004CC2D6A7384086CF5FF8"
                )[..],
            ),
            (&[][..], &hex!("0A9E2D1F080FDF6686C7DDE0DA3F113C")[..]),
        ] {
            assert_eq!(hkdf256(&SECRET, None, info, expected.len()).unwrap(), expected);
            assert_eq!(
                hkdf256(&SECRET, Some(&[][..]), info, expected.len()).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn hkdf_sha512() {
        for (info, expected) in [
            (
                &hex!("840183F6F6F683F6F6F682188044A1013819")[..],
                &hex!("7EC6DB8FF17E392A6CB51579F8443976")[..],
            ),
            (
                &hex!("840383F6F6F683F6F6F68219010044A1013819")[..],
                &hex!("4684AD00BE06914F7B74EE11F70E448D9192EE740182A674A665D7B4692A3EEB")[..],
            ),
            (
                &hex!("840783F6F6F683F6F6F68219020044A1013819")[..],
                &hex!(
                    "ECEAACB6A84FC9FAD2BB2E2C9520A036675BD6894CE41E826E0A5BB98D224031"
                    "63739A28A2FDFED93675BCC8E46F40EDBEA98D15834F01418A43382D54510DCB"
                )[..],
            ),
            (&[][..], &hex!("C42FFE41AA6D378EB0BEFE47841D2E28")[..]),
        ] {
            assert_eq!(hkdf512(&SECRET, None, info, expected.len()).unwrap(), expected);
        }
    }

    #[test]
    fn too_long() {
        assert!(matches!(
            hkdf256(&SECRET, None, &[], 255 * 32 + 1),
            Err(Error::InvalidKeyMaterial(_))
        ));
        assert_eq!(hkdf256(&SECRET, None, &[], 255 * 32).unwrap().len(), 255 * 32);
    }
}
