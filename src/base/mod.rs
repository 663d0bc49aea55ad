//! Base types shared by every codec.
//!
//! - [`error`]: [`MonsterError`](error::MonsterError), the crate's error type
//! - [`hashing`]: digest, HMAC and PBKDF2 primitives
//! - [`encoding`]: base64, hex and percent-decoding helpers

pub mod encoding;
pub mod error;
pub mod hashing;
