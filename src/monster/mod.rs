//! The cookie entity and the unsign search.
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`Cookie`] | Raw value, per-codec parse results, unsign result |
//! | [`UnsignConfig`] | Concurrency limit for the search |
//! | [`UnsignResult`] | Winning codec and recovered key |

pub mod config;
pub mod cookie;
pub mod unsign;

pub use config::UnsignConfig;
pub use cookie::Cookie;
pub use unsign::UnsignResult;
