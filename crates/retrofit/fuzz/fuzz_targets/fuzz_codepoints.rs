//! Fuzz target: decode arbitrary bytes under both policies.
//!
//! Lossy decoding must never fail, strict decoding must never panic, and for valid
//! UTF-8 both must agree with `str::chars`.

#![no_main]

use libfuzzer_sys::fuzz_target;

use retrofit::{DecodePolicy, decode_codepoints};

fuzz_target!(|data: &[u8]| {
    let lossy = decode_codepoints(data, DecodePolicy::Lossy).expect("lossy decoding never fails");
    assert!(lossy.len() <= data.len());

    let strict = decode_codepoints(data, DecodePolicy::Strict);
    if let Ok(text) = std::str::from_utf8(data) {
        let expected: Vec<u32> = text.chars().map(u32::from).collect();
        assert_eq!(strict.as_deref(), Ok(expected.as_slice()));
        assert_eq!(lossy, expected);
    }
});
