//! Rack / Rails session cookies.
//!
//! Two shapes share the `--` separator:
//!
//! | Parts | Scheme | Verification |
//! |-------|--------|--------------|
//! | `data--hexsig` | Rack `Session::Cookie`, Rails < 5.2 | `HMAC(secret, data)` |
//! | `data--iv--tag` | Rails 5.2+ authenticated encryption | AES-256-GCM with a PBKDF2 key |
//!
//! In the encrypted form every part is URL-encoded standard base64.

use super::MIN_LENGTH;
use crate::base::encoding::{b64_decode, hex_decode, query_unescape};
use crate::base::hashing::{self, HashAlgorithm};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use serde::de::IgnoredAny;
use std::fmt;

const SEPARATOR: &str = "--";

/// `ActiveSupport::KeyGenerator` salt for `authenticated_encrypted_cookie_salt`.
const AEAD_SALT: &[u8] = b"authenticated encrypted cookie";
const AEAD_ITERATIONS: usize = 1000;
const AEAD_KEY_LEN: usize = 32;
const AEAD_IV_LEN: usize = 12;
const AEAD_TAG_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RackScheme {
    Hmac {
        algorithm: HashAlgorithm,
        decoded_signature: Vec<u8>,
    },
    AesGcm {
        iv: String,
        decoded_data: Vec<u8>,
        decoded_iv: Vec<u8>,
        decoded_tag: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackParsed {
    pub data: String,
    pub signature: String,
    pub scheme: RackScheme,
}

impl RackParsed {
    pub fn algorithm_name(&self) -> &'static str {
        match &self.scheme {
            RackScheme::Hmac { algorithm, .. } => algorithm.as_str(),
            RackScheme::AesGcm { .. } => "aes-256-gcm",
        }
    }
}

impl fmt::Display for RackParsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data: {}", self.data)?;
        if let RackScheme::AesGcm { iv, .. } = &self.scheme {
            writeln!(f, "IV: {}", iv)?;
        }
        writeln!(f, "Signature: {}", self.signature)?;
        writeln!(f, "Algorithm: {}", self.algorithm_name())
    }
}

pub fn decode(raw: &str) -> Option<RackParsed> {
    if raw.len() < MIN_LENGTH {
        return None;
    }

    let components: Vec<&str> = raw.split(SEPARATOR).collect();
    match components.as_slice() {
        [data, signature] => decode_signed(data, signature),
        [data, iv, tag] => decode_encrypted(data, iv, tag),
        _ => None,
    }
}

fn decode_signed(data: &str, signature: &str) -> Option<RackParsed> {
    let decoded_signature = hex_decode(signature)?;
    let algorithm = HashAlgorithm::from_digest_len(decoded_signature.len())?;

    Some(RackParsed {
        data: data.to_string(),
        signature: signature.to_string(),
        scheme: RackScheme::Hmac {
            algorithm,
            decoded_signature,
        },
    })
}

fn decode_encrypted(data: &str, iv: &str, tag: &str) -> Option<RackParsed> {
    let unwrap_part = |part: &str| query_unescape(part).and_then(|p| b64_decode(&p));

    let decoded_iv = unwrap_part(iv)?;
    let decoded_tag = unwrap_part(tag)?;
    let decoded_data = unwrap_part(data)?;

    if decoded_iv.len() != AEAD_IV_LEN || decoded_tag.len() != AEAD_TAG_LEN {
        return None;
    }

    Some(RackParsed {
        data: data.to_string(),
        signature: tag.to_string(),
        scheme: RackScheme::AesGcm {
            iv: iv.to_string(),
            decoded_data,
            decoded_iv,
            decoded_tag,
        },
    })
}

pub fn verify(parsed: &RackParsed, secret: &[u8]) -> bool {
    match &parsed.scheme {
        RackScheme::Hmac {
            algorithm,
            decoded_signature,
        } => hashing::verify_hmac(
            *algorithm,
            secret,
            parsed.data.as_bytes(),
            decoded_signature,
        ),
        RackScheme::AesGcm {
            decoded_data,
            decoded_iv,
            decoded_tag,
            ..
        } => open_aead(secret, decoded_data, decoded_iv, decoded_tag),
    }
}

/// Open a Rails 5.2+ encrypted cookie.
///
/// A candidate only counts when GCM authenticates and the plaintext is JSON.
fn open_aead(secret: &[u8], data: &[u8], iv: &[u8], tag: &[u8]) -> bool {
    let mut key = [0u8; AEAD_KEY_LEN];
    hashing::pbkdf2_sha256(secret, AEAD_SALT, AEAD_ITERATIONS, &mut key);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key));

    // The tag travels separately; aes-gcm expects it appended.
    let mut ciphertext = Vec::with_capacity(data.len() + tag.len());
    ciphertext.extend_from_slice(data);
    ciphertext.extend_from_slice(tag);

    match cipher.decrypt(Nonce::from_slice(iv), ciphertext.as_slice()) {
        Ok(plaintext) => serde_json::from_slice::<IgnoredAny>(&plaintext).is_ok(),
        Err(_) => false,
    }
}
