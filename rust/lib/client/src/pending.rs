//! Deferred Action Queue: one "collect this novel" intent carried across
//! the redirect to login.
//!
//! ```text
//!   Empty ──capture──▶ Captured ──drain──▶ Draining ──▶ Empty
//!                        │  ▲
//!                        └──┘ capture again (last write wins)
//! ```
//!
//! The intent lives in durable storage under [`PENDING_KEY`], so it
//! survives the login step even when that runs in another process. A drain
//! removes the slot whatever happens; the slot is never left populated
//! after being read.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shuxiang_kv::{KVError, KVStore};
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::model::{Collection, Id, NewCollection, NovelDraft, NovelInfo};
use crate::site::infer_source_site;

pub const PENDING_KEY: &str = "pending:collect";

/// Status sent for novels whose ranking entry has none.
pub const UNKNOWN_STATUS: &str = "未知";

/// A novel the user wanted to collect before logging in.
///
/// Serialised with the same field names as `POST /novels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingCollect {
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub source_url: String,
    pub source_site: String,
    #[serde(default)]
    pub total_chapters: u32,
    pub status: String,
}

impl PendingCollect {
    pub fn from_ranking(info: &NovelInfo) -> Self {
        Self {
            title: info.title.clone(),
            author: info.author.clone(),
            description: info.description.clone(),
            source_url: info.source_url.clone(),
            source_site: infer_source_site(&info.source_url).to_string(),
            total_chapters: info.total_chapters.unwrap_or(0),
            status: info
                .status
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        }
    }

    pub fn to_draft(&self) -> NovelDraft {
        NovelDraft {
            title: self.title.clone(),
            author: Some(self.author.clone()),
            description: self.description.clone(),
            cover_url: None,
            source_url: self.source_url.clone(),
            source_site: Some(self.source_site.clone()),
            total_chapters: self.total_chapters,
            status: Some(self.status.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueState {
    Empty,
    Captured,
    Draining,
}

/// Result of one drain.
#[derive(Debug)]
pub enum DrainOutcome {
    /// Nothing was pending.
    Empty,
    /// Another drain is already running; this one did nothing.
    Busy,
    /// The slot held something unreadable. It was cleared; no API call made.
    Corrupt,
    Collected { title: String, collection: Collection },
    /// The replay failed. The slot was still cleared.
    Failed { title: Option<String>, error: ClientError },
}

impl DrainOutcome {
    pub fn is_collected(&self) -> bool {
        matches!(self, DrainOutcome::Collected { .. })
    }
}

/// Single-slot queue over an injected key-value store.
pub struct PendingQueue {
    kv: Arc<dyn KVStore>,
    draining: AtomicBool,
}

/// Resets the draining flag even if the drain future is dropped midway.
struct DrainGuard<'a>(&'a AtomicBool);

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PendingQueue {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            kv,
            draining: AtomicBool::new(false),
        }
    }

    /// Store `intent`, replacing whatever was pending.
    pub fn capture(&self, intent: &PendingCollect) -> Result<(), ClientError> {
        let raw = serde_json::to_vec(intent).map_err(|e| KVError::Serialization(e.to_string()))?;
        self.kv.set(PENDING_KEY, &raw)?;
        debug!(title = %intent.title, source_url = %intent.source_url, "pending collect captured");
        Ok(())
    }

    pub fn state(&self) -> Result<QueueState, ClientError> {
        if self.draining.load(Ordering::Acquire) {
            return Ok(QueueState::Draining);
        }
        if self.kv.contains(PENDING_KEY)? {
            Ok(QueueState::Captured)
        } else {
            Ok(QueueState::Empty)
        }
    }

    /// Read the pending intent without consuming it.
    pub fn peek(&self) -> Result<Option<PendingCollect>, ClientError> {
        match self.kv.get(PENDING_KEY)? {
            None => Ok(None),
            Some(raw) => serde_json::from_slice(&raw)
                .map(Some)
                .map_err(|e| ClientError::Decode(format!("pending collect: {}", e))),
        }
    }

    /// Drop the pending intent without replaying it.
    pub fn clear(&self) -> Result<(), ClientError> {
        self.kv.delete(PENDING_KEY)?;
        Ok(())
    }

    /// Replay the pending intent once: lookup-or-create the novel, then
    /// create the collection. The slot is emptied on every path.
    pub async fn drain(&self, api: &ApiClient) -> DrainOutcome {
        if self
            .draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("drain already in progress");
            return DrainOutcome::Busy;
        }
        let _guard = DrainGuard(&self.draining);

        let raw = match self.kv.get(PENDING_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return DrainOutcome::Empty,
            Err(e) => {
                warn!(error = %e, "cannot read pending collect");
                self.discard();
                return DrainOutcome::Failed { title: None, error: e.into() };
            }
        };

        let intent: PendingCollect = match serde_json::from_slice(&raw) {
            Ok(intent) => intent,
            Err(e) => {
                warn!(error = %e, "discarding corrupt pending collect");
                self.discard();
                return DrainOutcome::Corrupt;
            }
        };

        let result = collect_draft(api, &intent.to_draft(), None).await;
        self.discard();

        match result {
            Ok(collection) => {
                info!(title = %intent.title, collection_id = collection.id, "pending collect replayed");
                DrainOutcome::Collected { title: intent.title, collection }
            }
            Err(error) => {
                warn!(title = %intent.title, error = %error, "pending collect failed");
                DrainOutcome::Failed { title: Some(intent.title), error }
            }
        }
    }

    fn discard(&self) {
        if let Err(e) = self.kv.delete(PENDING_KEY) {
            warn!(error = %e, "cannot clear pending collect");
        }
    }
}

/// Find the novel whose `source_url` matches, or create it.
///
/// A failed lookup falls through to creation.
pub async fn resolve_novel_id(api: &ApiClient, draft: &NovelDraft) -> Result<Id, ClientError> {
    match api.novels().find_by_source_url(&draft.source_url).await {
        Ok(page) => {
            if let Some(novel) = page.content.iter().find(|n| n.source_url == draft.source_url) {
                debug!(novel_id = novel.id, "reusing existing novel");
                return Ok(novel.id);
            }
        }
        Err(e) => {
            warn!(error = %e, "novel lookup failed, creating instead");
        }
    }
    let novel = api.novels().create(draft).await?;
    debug!(novel_id = novel.id, "novel created");
    Ok(novel.id)
}

/// Lookup-or-create the novel, then add it to the user's collections.
pub async fn collect_draft(
    api: &ApiClient,
    draft: &NovelDraft,
    category_id: Option<Id>,
) -> Result<Collection, ClientError> {
    let novel_id = resolve_novel_id(api, draft).await?;
    api.collections()
        .create(&NewCollection { novel_id, category_id })
        .await
}
