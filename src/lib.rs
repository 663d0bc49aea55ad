//! # cookiemonster
//!
//! Identify the web framework behind a signed session cookie and recover its
//! signing secret from a wordlist.
//!
//! ## Supported formats
//!
//! - **Django** `signed_cookies` sessions
//! - **Flask** sessions and plain **itsdangerous** tokens
//! - **JWT** with HMAC algorithms
//! - **Rack/Rails** signed cookies and Rails 5.2+ encrypted cookies
//! - **Express** `cookie-session` (value plus `.sig` cookie)
//! - **Laravel** CBC-encrypted cookies
//! - **CodeIgniter 2** sessions
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cookiemonster::monster::Cookie;
//! use cookiemonster::wordlist::Wordlist;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cookiemonster::MonsterError> {
//!     let wordlist = Wordlist::new();
//!     wordlist.load_default()?;
//!
//!     let mut cookie = Cookie::new("eyJ1c2VyIjoiYWRtaW4ifQ:1qZk3A:L1e5Am4mNEPLAis_HCqoRBcFWq8");
//!     if !cookie.decode() {
//!         return Ok(());
//!     }
//!
//!     if cookie.unsign(&wordlist, 8).await?.is_some() {
//!         let result = cookie.result().unwrap();
//!         println!("{} secret: {}", result.codec, result.key_display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Hashing, encoding layers and error definitions
//! - [`codecs`] - One decoder/verifier per framework
//! - [`monster`] - The cookie entity and concurrent unsign search
//! - [`wordlist`] - Candidate secret loading

pub mod base;
pub mod codecs;
pub mod monster;
pub mod wordlist;

pub use base::error::MonsterError;
pub use codecs::{CodecKind, ParsedCookie};
pub use monster::{Cookie, UnsignConfig, UnsignResult};
pub use wordlist::{CandidateSource, Wordlist};
