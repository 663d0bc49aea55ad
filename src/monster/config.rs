//! Unsign search configuration.

use std::num::NonZeroUsize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignConfig {
    /// Maximum verification tasks in flight. Zero is treated as one.
    pub concurrency_limit: usize,
}

impl Default for UnsignConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

impl UnsignConfig {
    /// Create a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency limit.
    pub fn concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit;
        self
    }

    /// The limit actually used for scheduling.
    pub(crate) fn effective_limit(&self) -> usize {
        self.concurrency_limit.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_available_parallelism() {
        let config = UnsignConfig::default();
        assert!(config.concurrency_limit >= 1);
    }

    #[test]
    fn test_zero_limit_is_clamped() {
        let config = UnsignConfig::new().concurrency_limit(0);
        assert_eq!(config.concurrency_limit, 0);
        assert_eq!(config.effective_limit(), 1);
    }
}
