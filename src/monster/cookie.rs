use super::config::UnsignConfig;
use super::unsign::{self, ResultSlot, UnsignResult};
use crate::base::encoding::{b64_decode, query_unescape};
use crate::base::error::MonsterError;
use crate::codecs::{CodecKind, ParsedCookie};
use crate::wordlist::CandidateSource;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A single signed cookie value under analysis.
///
/// Typical flow: [`Cookie::new`] → [`Cookie::decode`] → [`Cookie::unsign`] →
/// optionally [`Cookie::resign`].
///
/// ```rust,no_run
/// use cookiemonster::monster::Cookie;
/// use cookiemonster::wordlist::Wordlist;
///
/// # async fn run() -> Result<(), cookiemonster::base::error::MonsterError> {
/// let wordlist = Wordlist::new();
/// wordlist.load_default()?;
///
/// let mut cookie = Cookie::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.e30.signature");
/// if cookie.decode() {
///     if let Some(key) = cookie.unsign(&wordlist, 8).await? {
///         println!("secret: {:?}", key);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cookie {
    raw: String,
    parsed: BTreeMap<CodecKind, ParsedCookie>,
    unsigned: ResultSlot,
    was_unwrapped: bool,
}

impl Cookie {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            parsed: BTreeMap::new(),
            unsigned: ResultSlot::default(),
            was_unwrapped: false,
        }
    }

    /// The current raw value. Differs from the input only after unwrapping.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Run every codec over the raw value and keep all matches.
    ///
    /// When nothing matches, the value is unwrapped once (URL decoding, then
    /// base64) and decoded again. Returns true when any codec matched.
    pub fn decode(&mut self) -> bool {
        let mut success = false;

        for kind in CodecKind::ALL {
            if let Some(parsed) = kind.decode(&self.raw) {
                tracing::debug!(codec = %kind, "cookie decoded");
                self.parsed.insert(kind, parsed);
                success = true;
            }
        }

        if !success && self.unwrap() {
            return self.decode();
        }

        success
    }

    /// Strip one URL-encoding and one base64 layer. Runs at most once per
    /// cookie; returns true when the raw value changed.
    fn unwrap(&mut self) -> bool {
        if self.was_unwrapped {
            return false;
        }
        self.was_unwrapped = true;

        let mut out = self.raw.clone();
        let mut changed = false;

        if let Some(unescaped) = query_unescape(&out) {
            if unescaped != out {
                out = unescaped;
                changed = true;
            }
        }

        // Only a UTF-8 base64 payload can replace the raw string.
        if let Some(decoded) = b64_decode(&out).and_then(|bytes| String::from_utf8(bytes).ok()) {
            if decoded != out {
                out = decoded;
                changed = true;
            }
        }

        if changed {
            tracing::debug!(from = %self.raw, to = %out, "unwrapped cookie");
            self.raw = out;
        }
        changed
    }

    /// Codecs that recognised this cookie, in decode order.
    pub fn matched_codecs(&self) -> Vec<CodecKind> {
        self.parsed.keys().copied().collect()
    }

    pub fn parsed_for(&self, codec: CodecKind) -> Result<&ParsedCookie, MonsterError> {
        self.parsed
            .get(&codec)
            .ok_or(MonsterError::MissingParsedData { codec })
    }

    /// Search `source` for the secret, with at most `concurrency_limit`
    /// verification tasks in flight.
    pub async fn unsign<S>(
        &self,
        source: &S,
        concurrency_limit: usize,
    ) -> Result<Option<Bytes>, MonsterError>
    where
        S: CandidateSource + ?Sized,
    {
        let config = UnsignConfig::new().concurrency_limit(concurrency_limit);
        self.unsign_with_config(source, &config).await
    }

    /// Returns `Ok(None)` without touching `source` when no codec matched.
    pub async fn unsign_with_config<S>(
        &self,
        source: &S,
        config: &UnsignConfig,
    ) -> Result<Option<Bytes>, MonsterError>
    where
        S: CandidateSource + ?Sized,
    {
        if self.parsed.is_empty() {
            return Ok(None);
        }

        let entries = source.entries()?;
        let parsed: Arc<Vec<ParsedCookie>> = Arc::new(self.parsed.values().cloned().collect());

        tracing::debug!(
            entries = entries.len(),
            codecs = parsed.len(),
            limit = config.effective_limit(),
            "starting unsign"
        );

        unsign::search(parsed, entries, Arc::clone(&self.unsigned), config).await?;

        let result = self.result();
        tracing::debug!(
            found = result.is_some(),
            codec = ?result.as_ref().map(|r| r.codec),
            "unsign finished"
        );
        Ok(result.map(|r| r.key))
    }

    /// The codec and key of the last successful unsign, if any.
    pub fn result(&self) -> Option<UnsignResult> {
        unsign::read_slot(&self.unsigned)
    }

    /// Sign `data` with the recovered key.
    ///
    /// Fails with [`MonsterError::NotUnsigned`] before a successful unsign.
    /// `Ok(None)` means the winning codec cannot produce new cookies; only
    /// Django can.
    pub fn resign(&self, data: &str) -> Result<Option<String>, MonsterError> {
        let result = self.result().ok_or(MonsterError::NotUnsigned)?;
        let parsed = self.parsed_for(result.codec)?;
        Ok(parsed.resign(data, &result.key))
    }

    /// Per-codec breakdown of everything that matched.
    pub fn debug_description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (kind, parsed) in &self.parsed {
            writeln!(f, "Decoder {} reports:", kind)?;
            writeln!(f, "{}", parsed)?;
        }
        Ok(())
    }
}
