//! Vote storage abstraction.
//!
//! Votes live outside the tool catalog, keyed by slug and viewer. The
//! [`VoteStore`] trait is the seam between the ranking pipeline and
//! whatever holds the tallies (in-memory map, JSON file, database), so the
//! backend can change without touching any listing code.
//!
//! [`VoteLedger`] holds the tallies and the toggle rules; stores wrap one
//! behind a lock and decide where it is kept.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Tool, VoteDirection, Votes};

/// Counters and per-viewer votes for one tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub downvotes: u32,
    #[serde(default)]
    pub viewers: BTreeMap<String, VoteDirection>,
}

impl Tally {
    fn add(&mut self, direction: VoteDirection) {
        match direction {
            VoteDirection::Up => self.upvotes = self.upvotes.saturating_add(1),
            VoteDirection::Down => self.downvotes = self.downvotes.saturating_add(1),
        }
    }

    fn retract(&mut self, direction: VoteDirection) {
        match direction {
            VoteDirection::Up => self.upvotes = self.upvotes.saturating_sub(1),
            VoteDirection::Down => self.downvotes = self.downvotes.saturating_sub(1),
        }
    }

    /// Counters as seen by `viewer`.
    pub fn votes_for(&self, viewer: Option<&str>) -> Votes {
        Votes {
            upvotes: self.upvotes,
            downvotes: self.downvotes,
            user_vote: viewer.and_then(|v| self.viewers.get(v).copied()),
        }
    }
}

/// All vote tallies, keyed by tool slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteLedger {
    #[serde(default)]
    pub tallies: BTreeMap<String, Tally>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install catalog counts as the baseline for slugs the ledger has not
    /// seen yet. Existing tallies are left alone.
    pub fn seed(&mut self, tools: &[Tool]) {
        for t in tools {
            self.tallies.entry(t.slug.clone()).or_insert_with(|| Tally {
                upvotes: t.votes.upvotes,
                downvotes: t.votes.downvotes,
                viewers: BTreeMap::new(),
            });
        }
    }

    /// Current counters for `slug`; zero when unknown.
    pub fn get(&self, slug: &str, viewer: Option<&str>) -> Votes {
        self.tallies
            .get(slug)
            .map(|t| t.votes_for(viewer))
            .unwrap_or_default()
    }

    /// Record `viewer` voting `direction` on `slug`.
    ///
    /// Voting the same direction twice clears the vote; voting the other
    /// direction moves it. Counters never drop below zero.
    pub fn apply(&mut self, slug: &str, viewer: &str, direction: VoteDirection) -> Votes {
        let tally = self.tallies.entry(slug.to_string()).or_default();
        let previous = tally.viewers.get(viewer).copied();
        if let Some(prev) = previous {
            tally.retract(prev);
        }
        if previous == Some(direction) {
            tally.viewers.remove(viewer);
        } else {
            tally.add(direction);
            tally.viewers.insert(viewer.to_string(), direction);
        }
        tally.votes_for(Some(viewer))
    }
}

/// Overlay ledger tallies and `viewer`'s own votes onto copies of `tools`.
///
/// Tools the ledger does not know keep their catalog counts.
pub fn merge_votes(tools: &[Tool], ledger: &VoteLedger, viewer: Option<&str>) -> Vec<Tool> {
    tools
        .iter()
        .map(|t| {
            let mut t = t.clone();
            match ledger.tallies.get(&t.slug) {
                Some(tally) => t.votes = tally.votes_for(viewer),
                None => t.votes.user_vote = None,
            }
            t
        })
        .collect()
}

/// Abstract vote backend.
///
/// Implementations must be `Send + Sync` so one store can serve every
/// request handler.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Counters for `slug`, with `viewer`'s own vote when given.
    async fn get(&self, slug: &str, viewer: Option<&str>) -> Result<Votes>;

    /// Apply a toggle vote and return the updated counters.
    async fn apply(&self, slug: &str, viewer: &str, direction: VoteDirection) -> Result<Votes>;

    /// A copy of every tally, for merging into listings.
    async fn snapshot(&self) -> Result<VoteLedger>;
}
