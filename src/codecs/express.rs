//! Express `cookie-session` (via the `cookies`/`keygrip` packages).
//!
//! The value and its signature arrive as two cookies, `name=value` and
//! `name.sig=signature`. Callers join them as `name=value^signature`; the
//! signed string is `name=value` and the signature is unpadded URL-safe
//! base64 of `HMAC(secret, name=value)`.

use super::MIN_LENGTH;
use crate::base::encoding::b64url_decode;
use crate::base::hashing::{self, HashAlgorithm};
use std::fmt;

const SEPARATOR: char = '^';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressParsed {
    pub data: String,
    pub signature: String,
    pub decoded_signature: Vec<u8>,
    pub algorithm: HashAlgorithm,
}

impl fmt::Display for ExpressParsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data: {}", self.data)?;
        writeln!(f, "Signature: {}", self.signature)?;
        writeln!(f, "Algorithm: {}", self.algorithm)
    }
}

/// Join a value cookie and its `.sig` companion into the form [`decode`]
/// expects.
pub fn assemble(name: &str, value: &str, signature: &str) -> String {
    format!("{}={}{SEPARATOR}{}", name.trim(), value.trim(), signature.trim())
}

pub fn decode(raw: &str) -> Option<ExpressParsed> {
    if raw.len() < MIN_LENGTH {
        return None;
    }

    let components: Vec<&str> = raw.split(SEPARATOR).collect();
    let [data, signature] = components.as_slice() else {
        return None;
    };

    let decoded_signature = b64url_decode(signature)?;
    let algorithm = HashAlgorithm::from_digest_len(decoded_signature.len())?;

    Some(ExpressParsed {
        data: data.to_string(),
        signature: signature.to_string(),
        decoded_signature,
        algorithm,
    })
}

pub fn verify(parsed: &ExpressParsed, secret: &[u8]) -> bool {
    hashing::verify_hmac(
        parsed.algorithm,
        secret,
        parsed.data.as_bytes(),
        &parsed.decoded_signature,
    )
}
