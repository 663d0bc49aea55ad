//! HMAC-signed JSON Web Tokens (HS1/HS256/HS384/HS512).
//!
//! Wire format: `header.payload.signature`; the secret is the HMAC key
//! directly.

use super::MIN_LENGTH;
use crate::base::encoding::b64url_decode;
use crate::base::hashing::{self, HashAlgorithm};
use std::fmt;

const SEPARATOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtParsed {
    pub header: String,
    pub body: String,
    pub signature: String,
    pub decoded_signature: Vec<u8>,
    pub algorithm: HashAlgorithm,
    to_be_signed: Vec<u8>,
}

impl fmt::Display for JwtParsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Header: {}", self.header)?;
        writeln!(f, "Body: {}", self.body)?;
        writeln!(f, "Signature: {}", self.signature)?;
        writeln!(f, "Algorithm: {}", self.algorithm)
    }
}

pub fn decode(raw: &str) -> Option<JwtParsed> {
    if raw.len() < MIN_LENGTH {
        return None;
    }

    let components: Vec<&str> = raw.split(SEPARATOR).collect();
    let [header, body, signature] = components.as_slice() else {
        return None;
    };

    let decoded_signature = b64url_decode(signature)?;
    let algorithm = HashAlgorithm::from_digest_len(decoded_signature.len())?;

    Some(JwtParsed {
        header: header.to_string(),
        body: body.to_string(),
        signature: signature.to_string(),
        decoded_signature,
        algorithm,
        to_be_signed: format!("{header}{SEPARATOR}{body}").into_bytes(),
    })
}

pub fn verify(parsed: &JwtParsed, secret: &[u8]) -> bool {
    hashing::verify_hmac(
        parsed.algorithm,
        secret,
        &parsed.to_be_signed,
        &parsed.decoded_signature,
    )
}
