//! CodeIgniter 2 session cookies.
//!
//! A URL-encoded serialized PHP array followed directly by a hex digest of
//! `body + encryption_key`. CodeIgniter 2 used SHA-1 by default and MD5 on
//! older configurations; there is no separator between the two halves.

use crate::base::encoding::{hex_decode, query_unescape_bytes};
use crate::base::hashing::{self, HashAlgorithm};
use std::fmt;

const MIN_LENGTH: usize = 100;

/// Fields every CodeIgniter session array carries.
const REQUIRED_FIELDS: [&str; 2] = ["session_id", "user_agent"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeIgniterDigest {
    Md5,
    Sha1,
}

impl CodeIgniterDigest {
    fn hex_len(&self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeIgniterParsed {
    /// URL-decoded body bytes; serialized PHP strings need not be UTF-8.
    pub body: Vec<u8>,
    pub signature: String,
    pub decoded_signature: Vec<u8>,
    pub algorithm: CodeIgniterDigest,
}

impl fmt::Display for CodeIgniterParsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Body: {}", String::from_utf8_lossy(&self.body))?;
        writeln!(f, "Signature: {}", self.signature)?;
        writeln!(f, "Algorithm: {}", self.algorithm.as_str())
    }
}

pub fn decode(raw: &str) -> Option<CodeIgniterParsed> {
    if raw.len() < MIN_LENGTH {
        return None;
    }

    if !REQUIRED_FIELDS.iter().all(|field| raw.contains(field)) {
        return None;
    }

    let (body, signature, decoded_signature, algorithm) = [CodeIgniterDigest::Sha1, CodeIgniterDigest::Md5]
        .into_iter()
        .find_map(|algorithm| {
            let (body, signature) = split_signature(raw, algorithm.hex_len())?;
            let decoded = hex_decode(signature)?;
            Some((body, signature, decoded, algorithm))
        })?;

    // The body is signed after URL decoding; keep it raw if an escape is malformed.
    let body = query_unescape_bytes(body).unwrap_or_else(|| body.as_bytes().to_vec());

    Some(CodeIgniterParsed {
        body,
        signature: signature.to_string(),
        decoded_signature,
        algorithm,
    })
}

fn split_signature(raw: &str, hex_len: usize) -> Option<(&str, &str)> {
    let at = raw.len().checked_sub(hex_len)?;
    if !raw.is_char_boundary(at) {
        return None;
    }
    Some(raw.split_at(at))
}

pub fn verify(parsed: &CodeIgniterParsed, secret: &[u8]) -> bool {
    let parts: [&[u8]; 2] = [&parsed.body, secret];
    let computed = match parsed.algorithm {
        CodeIgniterDigest::Md5 => hashing::md5(&parts),
        CodeIgniterDigest::Sha1 => hashing::digest(HashAlgorithm::Sha1, &parts),
    };
    computed == parsed.decoded_signature
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "a%3A4%3A%7Bs%3A10%3A%22session_id%22%3Bs%3A32%3A%220123456789abcdef0123456789abcdef%22%3Bs%3A10%3A%22ip_address%22%3Bs%3A9%3A%22127.0.0.1%22%3Bs%3A10%3A%22user_agent%22%3Bs%3A11%3A%22Mozilla%2F5.0%22%3Bs%3A13%3A%22last_activity%22%3Bi%3A1700000000%3B%7D";
    const SECRET: &[u8] = b"ci-encryption-key";

    #[test]
    fn test_md5_signature() {
        let cookie = format!("{BODY}eeed2f4ecd9b5e3d7aa6940be8a0095d");
        let parsed = decode(&cookie).unwrap();
        assert_eq!(parsed.algorithm, CodeIgniterDigest::Md5);
        assert!(parsed.body.starts_with(b"a:4:{s:10:\"session_id\""));
        assert!(verify(&parsed, SECRET));
        assert!(!verify(&parsed, b"ci-encryption-kez"));
    }

    #[test]
    fn test_sha1_signature() {
        let cookie = format!("{BODY}bcd923bd9b9667d32461865fc1fcb90ca85a8296");
        let parsed = decode(&cookie).unwrap();
        assert_eq!(parsed.algorithm, CodeIgniterDigest::Sha1);
        assert_eq!(parsed.decoded_signature.len(), 20);
        assert!(verify(&parsed, SECRET));
    }

    #[test]
    fn test_latin1_body_is_signed_as_raw_bytes() {
        let cookie = "a%3A4%3A%7Bs%3A10%3A%22session_id%22%3Bs%3A32%3A%220123456789abcdef0123456789abcdef%22%3Bs%3A10%3A%22ip_address%22%3Bs%3A9%3A%22127.0.0.1%22%3Bs%3A10%3A%22user_agent%22%3Bs%3A6%3A%22Caf%E9%2F1%22%3Bs%3A13%3A%22last_activity%22%3Bi%3A1700000000%3B%7D6e822af4d9e783c2661293983a38dd80";
        let parsed = decode(cookie).unwrap();
        assert_eq!(parsed.algorithm, CodeIgniterDigest::Md5);
        assert!(parsed
            .body
            .windows(b"Caf\xe9/1".len())
            .any(|w| w == b"Caf\xe9/1"));
        assert!(verify(&parsed, SECRET));
        assert!(parsed.to_string().contains("Caf\u{fffd}/1"));
    }

    #[test]
    fn test_malformed_escape_keeps_raw_body() {
        let cookie = format!("{BODY}%zz{}", "eeed2f4ecd9b5e3d7aa6940be8a0095d");
        let parsed = decode(&cookie).unwrap();
        assert!(parsed.body.ends_with(b"%7D%zz"));
        assert!(!verify(&parsed, SECRET));
    }

    #[test]
    fn test_requires_session_fields() {
        let cookie = format!("{}eeed2f4ecd9b5e3d7aa6940be8a0095d", "x".repeat(120));
        assert!(decode(&cookie).is_none());
    }

    #[test]
    fn test_rejects_short_input() {
        assert!(decode("session_id user_agent 0123456789abcdef0123456789abcdef").is_none());
    }
}
