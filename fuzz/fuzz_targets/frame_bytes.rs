#![no_main]

use keydiv::message::{frame, PADDED_LEN, PADDING_THRESHOLD};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let m = frame(data);
    assert_eq!(m[0], 0x01);
    assert_eq!(&m[1..=data.len()], data);

    if data.len() + 1 < PADDING_THRESHOLD {
        assert_eq!(m.len(), (data.len() + 2).max(PADDED_LEN));
        assert_eq!(m[data.len() + 1], 0x80);
    } else {
        assert_eq!(m.len(), data.len() + 1);
    }
});
