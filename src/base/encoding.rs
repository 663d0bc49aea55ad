//! Encoding layers shared by the codecs.
//!
//! Cookie frameworks wrap their payloads in a handful of encodings: padded
//! standard base64, unpadded URL-safe base64, hex and form-style percent
//! encoding. Decoders here are lenient about non-zero trailing bits, matching
//! what the signing frameworks themselves accept.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use percent_encoding::percent_decode_str;

/// Standard alphabet, padding required.
pub const STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
        .with_decode_allow_trailing_bits(true),
);

/// URL-safe alphabet, no padding.
pub const URL_SAFE_NO_PAD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

pub fn b64_decode(input: &str) -> Option<Vec<u8>> {
    STANDARD.decode(input).ok()
}

pub fn b64_encode(input: &[u8]) -> String {
    STANDARD.encode(input)
}

pub fn b64url_decode(input: &str) -> Option<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(input).ok()
}

pub fn b64url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

pub fn hex_decode(input: &str) -> Option<Vec<u8>> {
    hex::decode(input).ok()
}

/// Decode a form-encoded component: `+` becomes a space and `%XX` escapes
/// are expanded.
///
/// Returns `None` when an escape is malformed or the result is not UTF-8.
pub fn query_unescape(input: &str) -> Option<String> {
    String::from_utf8(query_unescape_bytes(input)?).ok()
}

/// Like [`query_unescape`] but keeps the decoded bytes as they are.
///
/// Returns `None` only for a malformed escape.
pub fn query_unescape_bytes(input: &str) -> Option<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = input.replace('+', " ");
    Some(percent_decode_str(&spaced).collect())
}
