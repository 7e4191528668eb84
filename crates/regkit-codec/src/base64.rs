//! Lenient base64 over the standard alphabet.
//!
//! Encoding always pads to a multiple of four characters. Decoding is not
//! strict: it consumes alphabet characters until the first byte that is not
//! one (padding included) and returns whatever whole bytes were accumulated
//! up to that point. Corrupt trailing text is dropped, never reported.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// Decodes an unpadded run of alphabet characters, keeping whole bytes and
/// ignoring the leftover bits of a final partial byte.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

fn is_alphabet(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'+' || byte == b'/'
}

/// Encode `input` as padded base64.
///
/// ```
/// use regkit_codec::base64::encode;
///
/// assert_eq!(encode(b""), "");
/// assert_eq!(encode(b"Man"), "TWFu");
/// assert_eq!(encode(b"Ma"), "TWE=");
/// ```
pub fn encode(input: &[u8]) -> String {
    STANDARD.encode(input)
}

/// Decode base64 text, stopping at the first non-alphabet character.
///
/// Never fails. A trailing partial byte is discarded.
///
/// ```
/// use regkit_codec::base64::decode;
///
/// assert_eq!(decode("TWFu"), b"Man");
/// assert_eq!(decode("TWE="), b"Ma");
/// assert_eq!(decode("TWFu@garbage"), b"Man");
/// ```
pub fn decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut len = bytes
        .iter()
        .position(|&b| !is_alphabet(b))
        .unwrap_or(bytes.len());
    // A lone sextet in the last group carries no whole byte.
    if len % 4 == 1 {
        len -= 1;
    }
    LENIENT.decode(&bytes[..len]).unwrap_or_default()
}
