//! Candidate secrets for the unsign search.
//!
//! Wordlist files hold one standard-base64 entry per line, so keys with
//! arbitrary bytes (including newlines) survive the round trip. Entries are
//! decoded at load time; the search only ever sees raw key bytes.
//!
//! ```rust
//! use cookiemonster::wordlist::{CandidateSource, Wordlist};
//!
//! let wordlist = Wordlist::new();
//! wordlist.load_from_str("Y2hhbmdlbWU=\nc2VjcmV0\n")?;
//! assert_eq!(wordlist.count(), 2);
//! # Ok::<(), cookiemonster::base::error::MonsterError>(())
//! ```

use crate::base::encoding::STANDARD;
use crate::base::error::MonsterError;
use base64::Engine as _;
use bytes::Bytes;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

/// Embedded list of common framework secrets.
const DEFAULT_WORDLIST: &str = include_str!("wordlists/default.txt");

/// Anything that can hand the unsign coordinator an ordered list of keys.
pub trait CandidateSource: Send + Sync {
    fn is_loaded(&self) -> bool;

    /// Number of entries; zero when nothing has been loaded.
    fn count(&self) -> usize;

    /// Snapshot of the entries in load order.
    fn entries(&self) -> Result<Vec<Bytes>, MonsterError>;
}

#[derive(Debug, Default)]
struct Inner {
    loaded: bool,
    entries: Vec<Bytes>,
}

/// An in-memory wordlist. Loads append; every loader marks the list loaded.
#[derive(Debug, Default)]
pub struct Wordlist {
    inner: RwLock<Inner>,
}

impl Wordlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load newline-separated base64 entries.
    ///
    /// Lines are trimmed and entries that decode to nothing are skipped. The
    /// first invalid line aborts the load and nothing from this call is kept.
    pub fn load_from_str(&self, text: &str) -> Result<(), MonsterError> {
        let parsed = parse_entries(text)?;
        self.extend(parsed);
        Ok(())
    }

    /// Load entries from a file in the same format as [`Self::load_from_str`].
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(), MonsterError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading wordlist");
        self.load_from_str(&text)
    }

    /// Load the embedded default wordlist.
    pub fn load_default(&self) -> Result<(), MonsterError> {
        self.load_from_str(DEFAULT_WORDLIST)
    }

    /// Load raw key bytes as-is. Empty entries are kept.
    pub fn load_from_array<I, B>(&self, entries: I)
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        self.extend(entries.into_iter().map(Into::into).collect());
    }

    fn extend(&self, entries: Vec<Bytes>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.entries.extend(entries);
        inner.loaded = true;
        tracing::debug!(total = inner.entries.len(), "wordlist loaded");
    }
}

impl CandidateSource for Wordlist {
    fn is_loaded(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .loaded
    }

    fn count(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        if inner.loaded {
            inner.entries.len()
        } else {
            0
        }
    }

    fn entries(&self) -> Result<Vec<Bytes>, MonsterError> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        if !inner.loaded {
            return Err(MonsterError::WordlistNotLoaded);
        }
        // Bytes clones are reference-count bumps.
        Ok(inner.entries.clone())
    }
}

fn parse_entries(text: &str) -> Result<Vec<Bytes>, MonsterError> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let entry = STANDARD
            .decode(line.trim())
            .map_err(|source| MonsterError::InvalidWordlistEntry {
                line: index + 1,
                source,
            })?;
        if !entry.is_empty() {
            entries.push(Bytes::from(entry));
        }
    }
    Ok(entries)
}
