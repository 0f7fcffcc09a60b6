use super::*;
use aes_gcm::aead::{Aead, KeyInit, Nonce, Payload, generic_array::typenum::Unsigned};

fn cipher<C: KeyInit>(secret: &[u8]) -> Result<C, Error> {
    C::new_from_slice(secret).map_err(|_| {
        Error::InvalidKeyMaterial(format!("invalid AEAD key length {}", secret.len()))
    })
}

fn check_nonce<C: Aead>(nonce: &[u8]) -> Result<&Nonce<C>, Error> {
    let expected = C::NonceSize::USIZE;
    if nonce.len() != expected {
        return Err(Error::IvSizeMismatch {
            expected,
            actual: nonce.len(),
        });
    }
    Ok(Nonce::<C>::from_slice(nonce))
}

pub(crate) fn seal<C: KeyInit + Aead>(
    secret: &[u8],
    nonce: &[u8],
    plaintext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, Error> {
    cipher::<C>(secret)?
        .encrypt(
            check_nonce::<C>(nonce)?,
            Payload {
                msg: plaintext,
                aad,
            },
        )
        .map_err(|_| Error::EncryptionFailed)
}

pub(crate) fn open<C: KeyInit + Aead>(
    secret: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, Error> {
    cipher::<C>(secret)?
        .decrypt(
            check_nonce::<C>(nonce)?,
            Payload {
                msg: ciphertext,
                aad,
            },
        )
        .map_err(|_| {
            debug!("AEAD tag verification failed");
            Error::AuthenticationFailure
        })
}
