//! JSON-file [`VoteStore`] and backend selection.
//!
//! [`FileVoteStore`] keeps the whole [`VoteLedger`] in memory, loaded once
//! on open, and rewrites the file after every applied vote. A missing file
//! is an empty ledger. Writes go to a sibling temp file first and are then
//! renamed over the original. A vote that fails to persist is not applied.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tooldex_core::models::{Tool, VoteDirection, Votes};
use tooldex_core::votes::memory::InMemoryVoteStore;
use tooldex_core::votes::{VoteLedger, VoteStore};

use crate::config::Config;

/// Vote store persisted to a JSON file.
pub struct FileVoteStore {
    path: PathBuf,
    ledger: Mutex<VoteLedger>,
}

impl FileVoteStore {
    /// Open `path`, seeding tallies for catalog tools the file does not know.
    pub async fn open(path: &Path, tools: &[Tool]) -> Result<Self> {
        let mut ledger = match tokio::fs::read(path).await {
            Ok(bytes) => serde_json::from_slice::<VoteLedger>(&bytes)
                .with_context(|| format!("Failed to parse vote file: {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => VoteLedger::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read vote file: {}", path.display()))
            }
        };
        ledger.seed(tools);
        tracing::debug!(path = %path.display(), tallies = ledger.tallies.len(), "vote file opened");
        Ok(Self {
            path: path.to_path_buf(),
            ledger: Mutex::new(ledger),
        })
    }

    async fn persist(&self, ledger: &VoteLedger) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(ledger)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write vote file: {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace vote file: {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl VoteStore for FileVoteStore {
    async fn get(&self, slug: &str, viewer: Option<&str>) -> Result<Votes> {
        Ok(self.ledger.lock().await.get(slug, viewer))
    }

    async fn apply(&self, slug: &str, viewer: &str, direction: VoteDirection) -> Result<Votes> {
        let mut ledger = self.ledger.lock().await;
        let mut next = ledger.clone();
        let votes = next.apply(slug, viewer, direction);
        self.persist(&next).await?;
        *ledger = next;
        Ok(votes)
    }

    async fn snapshot(&self) -> Result<VoteLedger> {
        Ok(self.ledger.lock().await.clone())
    }
}

/// Build the configured vote backend, seeded from `tools`.
pub async fn open_vote_store(config: &Config, tools: &[Tool]) -> Result<Arc<dyn VoteStore>> {
    if config.votes.is_file() {
        let path = config
            .votes
            .path
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("votes.path must be specified when backend is 'file'"))?;
        Ok(Arc::new(FileVoteStore::open(path, tools).await?))
    } else {
        tracing::debug!("using in-memory vote store; votes are lost on exit");
        Ok(Arc::new(InMemoryVoteStore::seeded(tools)))
    }
}
