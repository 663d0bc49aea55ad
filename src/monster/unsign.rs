//! Brute-force coordinator.
//!
//! Every wordlist entry becomes one blocking task that tries the entry
//! against each matched codec. A semaphore permit is taken before a task is
//! spawned and released when it finishes, so at most `limit` tasks run at
//! once. Successes land in a shared slot; if more than one candidate
//! verifies, the last writer wins.

use super::config::UnsignConfig;
use crate::base::encoding::b64_encode;
use crate::base::error::MonsterError;
use crate::codecs::{CodecKind, ParsedCookie};
use bytes::Bytes;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

/// Which codec verified and with what key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignResult {
    pub codec: CodecKind,
    pub key: Bytes,
}

impl UnsignResult {
    /// The key as text when it is printable ASCII, otherwise standard base64.
    pub fn key_display(&self) -> String {
        if self.key.iter().all(|b| (0x20..=0x7e).contains(b)) {
            String::from_utf8_lossy(&self.key).into_owned()
        } else {
            b64_encode(&self.key)
        }
    }
}

pub(crate) type ResultSlot = Arc<RwLock<Option<UnsignResult>>>;

pub(crate) fn read_slot(slot: &RwLock<Option<UnsignResult>>) -> Option<UnsignResult> {
    slot.read().unwrap_or_else(PoisonError::into_inner).clone()
}

fn record(slot: &RwLock<Option<UnsignResult>>, codec: CodecKind, key: Bytes) {
    let mut guard = slot.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(previous) = guard.as_ref() {
        tracing::warn!(
            previous = %previous.codec,
            codec = %codec,
            "cookie unsigned more than once, keeping the latest key"
        );
    }
    *guard = Some(UnsignResult { codec, key });
}

fn worker_failed(err: JoinError) -> MonsterError {
    MonsterError::WorkerFailed(err.to_string())
}

/// Try every entry against every parse result, writing hits into `slot`.
///
/// Waits for all spawned tasks before returning; there is no early exit on
/// the first hit.
pub(crate) async fn search(
    parsed: Arc<Vec<ParsedCookie>>,
    entries: Vec<Bytes>,
    slot: ResultSlot,
    config: &UnsignConfig,
) -> Result<(), MonsterError> {
    let semaphore = Arc::new(Semaphore::new(config.effective_limit()));
    let mut tasks = JoinSet::new();

    for entry in entries {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .map_err(|e| MonsterError::WorkerFailed(e.to_string()))?;

        let parsed = Arc::clone(&parsed);
        let slot = Arc::clone(&slot);

        tasks.spawn_blocking(move || {
            let _permit = permit;
            for candidate in parsed.iter() {
                if candidate.verify(&entry) {
                    tracing::debug!(codec = %candidate.codec(), "candidate key verified");
                    record(&slot, candidate.codec(), entry.clone());
                }
            }
        });

        // Reap finished tasks so the set stays near the concurrency limit.
        while let Some(joined) = tasks.try_join_next() {
            joined.map_err(worker_failed)?;
        }
    }

    while let Some(joined) = tasks.join_next().await {
        joined.map_err(worker_failed)?;
    }

    Ok(())
}
