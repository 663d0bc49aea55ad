//! Flask's default `SecureCookieSessionInterface`.
//!
//! Wire format: `[.]data.timestamp.signature`. Flask configures itsdangerous
//! with HMAC key derivation, so the signing key is `HMAC(SECRET_KEY,
//! "cookie-session")` rather than a salted digest.

use super::MIN_LENGTH;
use crate::base::encoding::b64url_decode;
use crate::base::hashing::{self, HashAlgorithm};
use std::fmt;

const SEPARATOR: char = '.';
const SALT: &[u8] = b"cookie-session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaskParsed {
    pub data: String,
    pub timestamp: String,
    pub signature: String,
    pub decoded_signature: Vec<u8>,
    pub algorithm: HashAlgorithm,
    pub compressed: bool,
    to_be_signed: Vec<u8>,
}

impl fmt::Display for FlaskParsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compressed: {}", self.compressed)?;
        writeln!(f, "Data: {}", self.data)?;
        writeln!(f, "Timestamp: {}", self.timestamp)?;
        writeln!(f, "Signature: {}", self.signature)?;
        writeln!(f, "Algorithm: {}", self.algorithm)
    }
}

pub fn decode(raw: &str) -> Option<FlaskParsed> {
    if raw.len() < MIN_LENGTH {
        return None;
    }

    let (compressed, body) = match raw.strip_prefix('.') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    let components: Vec<&str> = body.split(SEPARATOR).collect();
    let [data, timestamp, signature] = components.as_slice() else {
        return None;
    };

    let decoded_signature = b64url_decode(signature)?;
    let algorithm = HashAlgorithm::from_digest_len(decoded_signature.len())?;

    let prefix = if compressed { "." } else { "" };
    let to_be_signed = format!("{prefix}{data}{SEPARATOR}{timestamp}").into_bytes();

    Some(FlaskParsed {
        data: data.to_string(),
        timestamp: timestamp.to_string(),
        signature: signature.to_string(),
        decoded_signature,
        algorithm,
        compressed,
        to_be_signed,
    })
}

pub fn verify(parsed: &FlaskParsed, secret: &[u8]) -> bool {
    // Key and data swap roles compared to the Django derivation.
    let key = hashing::hmac(parsed.algorithm, secret, SALT);
    hashing::verify_hmac(
        parsed.algorithm,
        &key,
        &parsed.to_be_signed,
        &parsed.decoded_signature,
    )
}
