//! In-memory [`VoteStore`] implementation.
//!
//! Holds a [`VoteLedger`] behind `std::sync::RwLock`. Votes are lost when
//! the process exits and are not shared between processes.

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::{Tool, VoteDirection, Votes};

use super::{VoteLedger, VoteStore};

/// Process-local vote store.
pub struct InMemoryVoteStore {
    ledger: RwLock<VoteLedger>,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self {
            ledger: RwLock::new(VoteLedger::new()),
        }
    }

    /// Start from the counts already present in the catalog.
    pub fn seeded(tools: &[Tool]) -> Self {
        let mut ledger = VoteLedger::new();
        ledger.seed(tools);
        Self {
            ledger: RwLock::new(ledger),
        }
    }
}

impl Default for InMemoryVoteStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> anyhow::Error {
    anyhow!("vote store lock poisoned")
}

#[async_trait]
impl VoteStore for InMemoryVoteStore {
    async fn get(&self, slug: &str, viewer: Option<&str>) -> Result<Votes> {
        let ledger = self.ledger.read().map_err(|_| poisoned())?;
        Ok(ledger.get(slug, viewer))
    }

    async fn apply(&self, slug: &str, viewer: &str, direction: VoteDirection) -> Result<Votes> {
        let mut ledger = self.ledger.write().map_err(|_| poisoned())?;
        Ok(ledger.apply(slug, viewer, direction))
    }

    async fn snapshot(&self) -> Result<VoteLedger> {
        let ledger = self.ledger.read().map_err(|_| poisoned())?;
        Ok(ledger.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::tool;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seeded_store_round_trip() {
        let mut t = tool("t");
        t.votes.upvotes = 10;
        let store = InMemoryVoteStore::seeded(&[t]);

        let v = store.apply("t", "alice", VoteDirection::Up).await.unwrap();
        assert_eq!(v.upvotes, 11);
        let v = store.get("t", Some("alice")).await.unwrap();
        assert_eq!(v.user_vote, Some(VoteDirection::Up));
        assert_eq!(store.snapshot().await.unwrap().tallies.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_viewers() {
        let store = Arc::new(InMemoryVoteStore::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .apply("t", &format!("viewer-{}", i), VoteDirection::Up)
                    .await
                    .unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(store.get("t", None).await.unwrap().upvotes, 20);
    }
}
