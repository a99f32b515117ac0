//! Fuzz target: partition arbitrary text around an arbitrary literal.
//!
//! The first byte picks where the input splits into pattern and text. Whatever the
//! outcome, the three parts must concatenate back to the text.

#![no_main]

use libfuzzer_sys::fuzz_target;

use retrofit::{partition_first, partition_last};

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };
    let mut at = usize::from(split).min(input.len());
    while !input.is_char_boundary(at) {
        at -= 1;
    }
    let (pattern, text) = input.split_at(at);

    for parts in [partition_first(text, pattern), partition_last(text, pattern)] {
        let (before, matched, after) = parts.parts();
        assert_eq!(format!("{before}{matched}{after}"), text);
        assert!(matched.is_empty() || matched == pattern);
    }
});
