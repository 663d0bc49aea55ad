//! Digest and MAC primitives shared by every codec.
//!
//! Plain digests and PBKDF2 go through BoringSSL; HMAC uses the RustCrypto
//! `hmac` crate so verification can compare tags in constant time.

use boring::hash::{Hasher, MessageDigest};
use boring::pkcs5::pbkdf2_hmac;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;

/// Digest family used by an HMAC-signed cookie.
///
/// Cookies never name their algorithm, so it is inferred from the length of the
/// decoded signature. Two algorithms with equal output length would be
/// indistinguishable; none of the supported ones collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Infer the algorithm from a signature length in bytes.
    pub fn from_digest_len(len: usize) -> Option<Self> {
        match len {
            20 => Some(Self::Sha1),
            32 => Some(Self::Sha256),
            48 => Some(Self::Sha384),
            64 => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Output length in bytes.
    pub fn digest_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    fn message_digest(&self) -> MessageDigest {
        match self {
            Self::Sha1 => MessageDigest::sha1(),
            Self::Sha256 => MessageDigest::sha256(),
            Self::Sha384 => MessageDigest::sha384(),
            Self::Sha512 => MessageDigest::sha512(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digest of the concatenation of `parts`.
pub fn digest(algorithm: HashAlgorithm, parts: &[&[u8]]) -> Vec<u8> {
    digest_with(algorithm.message_digest(), parts)
}

/// MD5 of the concatenation of `parts`.
pub fn md5(parts: &[&[u8]]) -> Vec<u8> {
    digest_with(MessageDigest::md5(), parts)
}

fn digest_with(md: MessageDigest, parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = Hasher::new(md).expect("hasher should initialize");
    for part in parts {
        hasher.update(part).expect("hash update should not fail");
    }
    hasher.finish().expect("hash should not fail").to_vec()
}

/// HMAC of `data` under `key`.
pub fn hmac(algorithm: HashAlgorithm, key: &[u8], data: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha1 => compute::<Hmac<Sha1>>(key, data),
        HashAlgorithm::Sha256 => compute::<Hmac<Sha256>>(key, data),
        HashAlgorithm::Sha384 => compute::<Hmac<Sha384>>(key, data),
        HashAlgorithm::Sha512 => compute::<Hmac<Sha512>>(key, data),
    }
}

/// Check `expected` against the HMAC of `data` under `key`.
///
/// Returns false on any length mismatch.
pub fn verify_hmac(algorithm: HashAlgorithm, key: &[u8], data: &[u8], expected: &[u8]) -> bool {
    match algorithm {
        HashAlgorithm::Sha1 => verify::<Hmac<Sha1>>(key, data, expected),
        HashAlgorithm::Sha256 => verify::<Hmac<Sha256>>(key, data, expected),
        HashAlgorithm::Sha384 => verify::<Hmac<Sha384>>(key, data, expected),
        HashAlgorithm::Sha512 => verify::<Hmac<Sha512>>(key, data, expected),
    }
}

fn keyed<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> M {
    let mut mac = <M as KeyInit>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac
}

fn compute<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> Vec<u8> {
    keyed::<M>(key, data).finalize().into_bytes().to_vec()
}

fn verify<M: Mac + KeyInit>(key: &[u8], data: &[u8], expected: &[u8]) -> bool {
    keyed::<M>(key, data).verify_slice(expected).is_ok()
}

/// PBKDF2-HMAC-SHA256 filling `out`.
pub fn pbkdf2_sha256(secret: &[u8], salt: &[u8], iterations: usize, out: &mut [u8]) {
    pbkdf2_hmac(secret, salt, iterations, MessageDigest::sha256(), out)
        .expect("PBKDF2 should not fail");
}
