//! Message framing for the CMAC input.
//!
//! Layout:
//!   data = DIV_CONSTANT[1] || diversification_input[n]
//!
//! If `data` is shorter than `PADDING_THRESHOLD` bytes it is padded:
//!   data || PAD_MARKER[1] || 0x00 ...   up to `PADDED_LEN` bytes
//!
//! The target is a fixed 31 bytes, not the next block boundary. A 31-byte
//! `data` gets the marker only and ends up 32 bytes long. Anything of 32
//! bytes or more is passed through unchanged.

extern crate alloc;
use alloc::vec::Vec;

/// Domain-separation prefix for AES-128 key diversification.
pub const DIV_CONSTANT: u8 = 0x01;

/// First padding byte.
pub const PAD_MARKER: u8 = 0x80;

/// Length padded messages are zero-filled to.
pub const PADDED_LEN: usize = 31;

/// Messages at or above this length are not padded.
pub const PADDING_THRESHOLD: usize = 32;

/// Build the exact buffer that is fed to CMAC.
pub fn frame(diversification_input: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity((1 + diversification_input.len()).max(PADDING_THRESHOLD));
    data.push(DIV_CONSTANT);
    data.extend_from_slice(diversification_input);

    if data.len() < PADDING_THRESHOLD {
        data.push(PAD_MARKER);
        if data.len() < PADDED_LEN {
            data.resize(PADDED_LEN, 0x00);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_pads_to_31() {
        let m = frame(&[]);
        assert_eq!(m.len(), PADDED_LEN);
        assert_eq!(m[0], DIV_CONSTANT);
        assert_eq!(m[1], PAD_MARKER);
        assert!(m[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn short_input_layout() {
        let input = [0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x01, 0x02, 0x03];
        let m = frame(&input);
        assert_eq!(m.len(), 31);
        assert_eq!(m[0], 0x01);
        assert_eq!(&m[1..11], &input);
        assert_eq!(m[11], 0x80);
        assert!(m[12..].iter().all(|&b| b == 0));
    }

    #[test]
    fn twenty_nine_bytes_fills_exactly() {
        // 1 + 29 = 30, marker brings it to 31, no zeros needed
        let m = frame(&[0xAA; 29]);
        assert_eq!(m.len(), 31);
        assert_eq!(m[30], PAD_MARKER);
    }

    #[test]
    fn thirty_bytes_gets_marker_only() {
        let m = frame(&[0xAA; 30]);
        assert_eq!(m.len(), 32);
        assert_eq!(m[0], DIV_CONSTANT);
        assert_eq!(m[31], PAD_MARKER);
    }

    #[test]
    fn thirty_one_bytes_unpadded() {
        let input = [0xAA; 31];
        let m = frame(&input);
        assert_eq!(m.len(), 32);
        assert_eq!(m[0], DIV_CONSTANT);
        assert_eq!(&m[1..], &input);
    }

    #[test]
    fn long_input_unpadded() {
        let input: Vec<u8> = (0u8..64).collect();
        let m = frame(&input);
        assert_eq!(m.len(), 65);
        assert_eq!(&m[1..], &input[..]);
    }
}
