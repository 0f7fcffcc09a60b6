#![no_main]

use cosette::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mac_key = HmacKey::from_secret(
        &hex_literal::hex!("849b57219dae48de646d07dbb533566e976686457c1491be3a76dcea6c427188"),
        iana::ALGORITHM_HMAC_256_256,
        None,
    )
    .unwrap();
    if let Ok(mut msg) = Mac0Message::from_bytes(&mac_key, data, None) {
        let data = msg.to_bytes(&mac_key, None).expect("Rewrite borked");
        Mac0Message::from_bytes(&mac_key, &data, None).expect("Rewrite borked");
    }

    let enc_key =
        AesGcmKey::from_secret(&hex_literal::hex!("849B57219DAE48DE646D07DBB533566E"), None)
            .unwrap();
    if let Ok(mut msg) = Encrypt0Message::from_bytes(&enc_key, data, None) {
        let data = msg.to_bytes(&enc_key, None).expect("Rewrite borked");
        Encrypt0Message::from_bytes(&enc_key, &data, None).expect("Rewrite borked");
    }

    let _ = cwt::Claims::from_bytes(data).map(|claims| {
        let validator = cwt::Validator::new(cwt::ValidatorOptions {
            allow_missing_expiration: true,
            ..Default::default()
        })
        .unwrap();
        let _ = validator.validate(&claims);
    });
    let _ = Key::from_bytes(data);
    let _ = KdfContext::from_bytes(data);
});
