//! Django `signed_cookies` session backend.
//!
//! Wire format: `[.]data:timestamp:signature`, where a leading `.` marks a
//! zlib-compressed payload and the signature is unpadded URL-safe base64.
//! Django's `TimestampSigner` derives the HMAC key by hashing a fixed salt
//! followed by `SECRET_KEY` with the same digest the HMAC uses.

use super::MIN_LENGTH;
use crate::base::encoding::{b64url_decode, b64url_encode};
use crate::base::hashing::{self, HashAlgorithm};
use std::fmt;

const SEPARATOR: char = ':';
const SALT: &[u8] = b"django.contrib.sessions.backends.signed_cookiessigner";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DjangoParsed {
    pub data: String,
    pub timestamp: String,
    pub signature: String,
    pub decoded_signature: Vec<u8>,
    pub algorithm: HashAlgorithm,
    pub compressed: bool,
    to_be_signed: Vec<u8>,
}

impl fmt::Display for DjangoParsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compressed: {}", self.compressed)?;
        writeln!(f, "Data: {}", self.data)?;
        writeln!(f, "Timestamp: {}", self.timestamp)?;
        writeln!(f, "Signature: {}", self.signature)?;
        writeln!(f, "Algorithm: {}", self.algorithm)
    }
}

pub fn decode(raw: &str) -> Option<DjangoParsed> {
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

    // The compression marker is part of the signed value.
    let prefix = if compressed { "." } else { "" };
    let to_be_signed = format!("{prefix}{data}{SEPARATOR}{timestamp}").into_bytes();

    Some(DjangoParsed {
        data: data.to_string(),
        timestamp: timestamp.to_string(),
        signature: signature.to_string(),
        decoded_signature,
        algorithm,
        compressed,
        to_be_signed,
    })
}

fn derive_key(algorithm: HashAlgorithm, secret: &[u8]) -> Vec<u8> {
    hashing::digest(algorithm, &[SALT, secret])
}

pub fn verify(parsed: &DjangoParsed, secret: &[u8]) -> bool {
    let key = derive_key(parsed.algorithm, secret);
    hashing::verify_hmac(
        parsed.algorithm,
        &key,
        &parsed.to_be_signed,
        &parsed.decoded_signature,
    )
}

/// Sign `data` with the recovered `secret`, keeping the original timestamp
/// and algorithm. The result is never compressed.
pub fn resign(parsed: &DjangoParsed, data: &str, secret: &[u8]) -> String {
    let to_be_signed = format!(
        "{}{SEPARATOR}{}",
        b64url_encode(data.as_bytes()),
        parsed.timestamp
    );

    let key = derive_key(parsed.algorithm, secret);
    let signature = hashing::hmac(parsed.algorithm, &key, to_be_signed.as_bytes());

    format!("{to_be_signed}{SEPARATOR}{}", b64url_encode(&signature))
}
