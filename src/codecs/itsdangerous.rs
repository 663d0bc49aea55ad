//! Plain itsdangerous `Signer` / `TimestampSigner` tokens.
//!
//! Wire format: `[.]data.signature` or `[.]data.timestamp.signature`. The
//! signing key is `digest("itsdangerous" + "signer" + secret)`, i.e. the
//! library's default salt with the `django-concat` derivation.

use super::MIN_LENGTH;
use crate::base::encoding::b64url_decode;
use crate::base::hashing::{self, HashAlgorithm};
use std::fmt;

const SEPARATOR: char = '.';
const SALT: &[u8] = b"itsdangerous";
const KEY_DERIVATION_SUFFIX: &[u8] = b"signer";

/// Timestamps are big-endian integers; anything wider than a u64 is not one.
const MAX_TIMESTAMP_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItsDangerousParsed {
    pub data: String,
    pub timestamp: Option<String>,
    pub decoded_timestamp: Vec<u8>,
    pub signature: String,
    pub decoded_signature: Vec<u8>,
    pub algorithm: HashAlgorithm,
    pub compressed: bool,
    to_be_signed: Vec<u8>,
}

impl fmt::Display for ItsDangerousParsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compressed: {}", self.compressed)?;
        writeln!(f, "Data: {}", self.data)?;
        if let Some(timestamp) = &self.timestamp {
            writeln!(f, "Timestamp: {}", timestamp)?;
        }
        writeln!(f, "Signature: {}", self.signature)?;
        writeln!(f, "Algorithm: {}", self.algorithm)
    }
}

pub fn decode(raw: &str) -> Option<ItsDangerousParsed> {
    if raw.len() < MIN_LENGTH {
        return None;
    }

    let (compressed, body) = match raw.strip_prefix('.') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    let components: Vec<&str> = body.split(SEPARATOR).collect();
    let (data, timestamp, signature) = match components.as_slice() {
        [data, signature] => (*data, None, *signature),
        [data, timestamp, signature] => (*data, Some(*timestamp), *signature),
        _ => return None,
    };

    let decoded_timestamp = b64url_decode(timestamp.unwrap_or_default())?;
    if decoded_timestamp.len() > MAX_TIMESTAMP_LEN {
        return None;
    }

    let decoded_signature = b64url_decode(signature)?;
    let algorithm = HashAlgorithm::from_digest_len(decoded_signature.len())?;

    let mut to_be_signed = String::with_capacity(raw.len());
    if compressed {
        to_be_signed.push('.');
    }
    to_be_signed.push_str(data);
    if let Some(timestamp) = timestamp.filter(|_| !decoded_timestamp.is_empty()) {
        to_be_signed.push(SEPARATOR);
        to_be_signed.push_str(timestamp);
    }

    Some(ItsDangerousParsed {
        data: data.to_string(),
        timestamp: timestamp.map(str::to_string),
        decoded_timestamp,
        signature: signature.to_string(),
        decoded_signature,
        algorithm,
        compressed,
        to_be_signed: to_be_signed.into_bytes(),
    })
}

pub fn verify(parsed: &ItsDangerousParsed, secret: &[u8]) -> bool {
    let key = hashing::digest(parsed.algorithm, &[SALT, KEY_DERIVATION_SUFFIX, secret]);
    hashing::verify_hmac(
        parsed.algorithm,
        &key,
        &parsed.to_be_signed,
        &parsed.decoded_signature,
    )
}
