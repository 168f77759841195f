#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // split into key / input at the first comma, if any
    let (key, input) = s.split_once(',').unwrap_or((s, ""));

    if let Ok(out) = keydiv::derive(key, input) {
        assert_eq!(out.len(), 32);
        assert!(out.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b)));
        assert_eq!(keydiv::derive(key, input).ok(), Some(out));
    }
});
