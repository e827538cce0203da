//! Shared directory operations for the CLI and HTTP frontends.
//!
//! A [`Directory`] owns the validated catalog and the vote store. Each
//! operation takes a vote snapshot, merges it onto a fresh copy of the
//! catalog, and runs the pure pipeline from `tooldex-core`. The catalog
//! itself is never mutated after loading.

use anyhow::{anyhow, bail, Result};
use std::sync::Arc;
use tooldex_core::featured::{select_featured, FeaturedPolicy};
use tooldex_core::models::{Tool, VoteDirection, Votes};
use tooldex_core::pipeline::{browse, BrowseRequest, BrowseResult};
use tooldex_core::recommend::{related_tools, Recommendation};
use tooldex_core::votes::{merge_votes, VoteStore};

use crate::catalog::{load_catalog, Catalog};
use crate::config::Config;
use crate::vote_file::open_vote_store;

#[derive(Clone)]
pub struct Directory {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub votes: Arc<dyn VoteStore>,
}

impl Directory {
    /// Load the catalog and open the vote store described by `config`.
    pub async fn open(config: &Config) -> Result<Self> {
        let catalog = load_catalog(config).await?;
        let votes = open_vote_store(config, &catalog.tools).await?;
        Ok(Self::new(config.clone(), catalog, votes))
    }

    pub fn new(config: Config, catalog: Catalog, votes: Arc<dyn VoteStore>) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            votes,
        }
    }

    /// Catalog tools with current tallies and `viewer`'s own votes.
    pub async fn tools_for(&self, viewer: Option<&str>) -> Result<Vec<Tool>> {
        let ledger = self.votes.snapshot().await?;
        Ok(merge_votes(&self.catalog.tools, &ledger, viewer))
    }

    /// Run a listing. A request without a limit gets `[ranking].list_limit`.
    pub async fn browse(&self, req: &BrowseRequest, viewer: Option<&str>) -> Result<BrowseResult> {
        let tools = self.tools_for(viewer).await?;
        let mut req = req.clone();
        if req.limit.is_none() {
            req.limit = Some(self.config.ranking.list_limit);
        }
        Ok(browse(&tools, &req))
    }

    pub async fn featured(
        &self,
        count: Option<usize>,
        policy: Option<FeaturedPolicy>,
    ) -> Result<Vec<Tool>> {
        let count = count.unwrap_or(self.config.ranking.featured_count);
        let policy = policy.unwrap_or(self.config.ranking.featured_policy);
        let tools = self.tools_for(None).await?;
        Ok(select_featured(&tools, count, policy))
    }

    pub async fn tool(&self, slug: &str, viewer: Option<&str>) -> Result<Tool> {
        let base = self.require(slug)?;
        let mut tool = base.clone();
        tool.votes = self.votes.get(slug, viewer).await?;
        Ok(tool)
    }

    pub async fn related(&self, slug: &str, limit: Option<usize>) -> Result<Vec<Recommendation>> {
        let base = self.require(slug)?;
        let limit = limit.unwrap_or(self.config.ranking.related_limit);
        let tools = self.tools_for(None).await?;
        Ok(related_tools(base, &tools, limit))
    }

    pub async fn vote(&self, slug: &str, viewer: &str, direction: VoteDirection) -> Result<Votes> {
        self.require(slug)?;
        if viewer.trim().is_empty() {
            bail!("viewer must not be empty");
        }
        let votes = self.votes.apply(slug, viewer, direction).await?;
        tracing::info!(
            slug,
            %direction,
            up = votes.upvotes,
            down = votes.downvotes,
            "vote applied"
        );
        Ok(votes)
    }

    fn require(&self, slug: &str) -> Result<&Tool> {
        self.catalog
            .find(slug)
            .ok_or_else(|| anyhow!("tool not found: {}", slug))
    }
}
