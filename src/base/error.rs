use crate::codecs::CodecKind;
use thiserror::Error;

/// Errors surfaced by the unsigning engine.
///
/// Structural mismatches (a codec not recognising a cookie, a candidate key not
/// verifying) are never errors; they are reported as `false`/`None`. What
/// remains here are load failures and contract violations.
///
/// | Variant | Kind |
/// |---------|------|
/// | `WordlistNotLoaded` | contract violation |
/// | `InvalidWordlistEntry` | load failure |
/// | `Io` | load failure |
/// | `MissingParsedData` | contract violation |
/// | `NotUnsigned` | contract violation |
/// | `WorkerFailed` | internal failure |
#[derive(Debug, Error)]
pub enum MonsterError {
    #[error("Wordlist entries requested before the wordlist was loaded")]
    WordlistNotLoaded,

    #[error("Wordlist line {line} is not valid base64: {source}")]
    InvalidWordlistEntry {
        line: usize,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Wordlist I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No parsed data for the {codec} decoder")]
    MissingParsedData { codec: CodecKind },

    #[error("Cannot resign a cookie that was not unsigned")]
    NotUnsigned,

    #[error("Verification worker failed: {0}")]
    WorkerFailed(String),
}

impl MonsterError {
    /// Returns true for errors caused by misuse of the API rather than bad input.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            MonsterError::WordlistNotLoaded
                | MonsterError::MissingParsedData { .. }
                | MonsterError::NotUnsigned
        )
    }

    /// Returns true for errors raised while loading a wordlist.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            MonsterError::InvalidWordlistEntry { .. } | MonsterError::Io(_)
        )
    }
}
