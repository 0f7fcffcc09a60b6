#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = cosette_cbor::from_slice(data) {
        // Whatever decodes must re-encode to a stable canonical form
        let canonical = cosette_cbor::to_vec(&value);
        let value = cosette_cbor::from_slice(&canonical).expect("canonical output must decode");
        assert_eq!(cosette_cbor::to_vec(&value), canonical);
    }
});
