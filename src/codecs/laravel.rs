//! Laravel encrypted cookies (`Illuminate\Encryption\Encrypter`).
//!
//! The cookie is URL-encoded base64 of a JSON envelope
//! `{"iv": .., "value": .., "mac": .., "tag": ..}`. For the CBC ciphers the
//! envelope carries `mac = hex(HMAC-SHA256(APP_KEY, iv . value))` computed over
//! the base64 *text* of both fields, which is enough to test a candidate key
//! without decrypting anything. GCM envelopes carry no MAC and are recognised
//! but never verified.
//!
//! Envelope keys are matched exactly and a repeated key rejects the cookie.
//! Laravel never emits either shape.

use super::MIN_LENGTH;
use crate::base::encoding::{b64_decode, hex_decode, query_unescape};
use crate::base::hashing::{self, HashAlgorithm};
use serde::Deserialize;
use std::fmt;

/// Hex characters in an HMAC-SHA256 tag.
const MAC_HEX_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaravelCipher {
    AesCbc128,
    AesCbc256,
    /// `aes-128-gcm` / `aes-256-gcm`; indistinguishable from the envelope.
    AesGcm,
}

impl LaravelCipher {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AesCbc128 => "aes-cbc-128",
            Self::AesCbc256 => "aes-cbc-256",
            Self::AesGcm => "aes-gcm",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::AesGcm)
    }
}

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    iv: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    mac: Option<String>,
    #[serde(default)]
    tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaravelParsed {
    pub iv: String,
    pub decoded_iv: Vec<u8>,
    pub value: String,
    pub decoded_value: Vec<u8>,
    pub mac: String,
    pub decoded_mac: Vec<u8>,
    pub tag: String,
    pub cipher: LaravelCipher,
    mac_input: Vec<u8>,
}

impl fmt::Display for LaravelParsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm: {}", self.cipher.as_str())?;
        writeln!(f, "IV: {}", self.iv)?;
        writeln!(f, "Value: {}", self.value)?;
        writeln!(f, "MAC: {}", self.mac)?;
        writeln!(f, "Tag: {}", self.tag)
    }
}

pub fn decode(raw: &str) -> Option<LaravelParsed> {
    if raw.len() < MIN_LENGTH {
        return None;
    }

    // Standard base64 in a cookie arrives percent-encoded.
    let unescaped = query_unescape(raw)?;
    let json = b64_decode(&unescaped)?;
    let envelope: Envelope = serde_json::from_slice::<Option<Envelope>>(&json)
        .ok()?
        .unwrap_or_default();

    let iv = envelope.iv.unwrap_or_default();
    let value = envelope.value.unwrap_or_default();
    let mac = envelope.mac.unwrap_or_default();
    let tag = envelope.tag.unwrap_or_default();

    let decoded_iv = b64_decode(&iv)?;
    let decoded_value = b64_decode(&value)?;
    let decoded_mac = hex_decode(&mac)?;

    let cipher = match (decoded_iv.len(), mac.len()) {
        (8, MAC_HEX_LEN) => LaravelCipher::AesCbc128,
        (16, MAC_HEX_LEN) => LaravelCipher::AesCbc256,
        (_, 0) if !tag.is_empty() => LaravelCipher::AesGcm,
        _ => return None,
    };

    let mac_input = [iv.as_bytes(), value.as_bytes()].concat();

    Some(LaravelParsed {
        iv,
        decoded_iv,
        value,
        decoded_value,
        mac,
        decoded_mac,
        tag,
        cipher,
        mac_input,
    })
}

pub fn verify(parsed: &LaravelParsed, secret: &[u8]) -> bool {
    match parsed.cipher {
        LaravelCipher::AesCbc128 | LaravelCipher::AesCbc256 => hashing::verify_hmac(
            HashAlgorithm::Sha256,
            secret,
            &parsed.mac_input,
            &parsed.decoded_mac,
        ),
        LaravelCipher::AesGcm => {
            tracing::trace!("laravel GCM envelopes cannot be verified without decryption");
            false
        }
    }
}
