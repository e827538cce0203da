//! Predicate filters over tool collections.
//!
//! Every filter takes a slice and a criterion and returns the matching
//! subset in input order. An empty criterion (no tags, no pricing models,
//! minimum score of 1, flag not requested) returns the input unchanged, so
//! callers can compose filters without checking whether each one is active.
//!
//! Within a criterion matching is OR (any requested tag); across criteria it
//! is AND ([`ToolFilter::apply`]).

use serde::{Deserialize, Serialize};

use crate::models::{PricingModel, Tool, MIN_SCORE};

/// Keep tools carrying at least one of `tags`.
pub fn filter_by_tags(tools: &[Tool], tags: &[String]) -> Vec<Tool> {
    if tags.is_empty() {
        return tools.to_vec();
    }
    tools
        .iter()
        .filter(|t| t.tags.iter().any(|tag| tags.contains(tag)))
        .cloned()
        .collect()
}

/// Keep tools whose pricing model is one of `models`.
pub fn filter_by_pricing(tools: &[Tool], models: &[PricingModel]) -> Vec<Tool> {
    if models.is_empty() {
        return tools.to_vec();
    }
    tools
        .iter()
        .filter(|t| models.contains(&t.pricing_model))
        .cloned()
        .collect()
}

/// Keep tools with `consciousness_score >= min_score`.
pub fn filter_by_score(tools: &[Tool], min_score: u8) -> Vec<Tool> {
    if min_score <= MIN_SCORE {
        return tools.to_vec();
    }
    tools
        .iter()
        .filter(|t| t.consciousness_score >= min_score)
        .cloned()
        .collect()
}

/// Keep verified tools when `only` is set.
pub fn filter_verified(tools: &[Tool], only: bool) -> Vec<Tool> {
    if !only {
        return tools.to_vec();
    }
    tools.iter().filter(|t| t.is_verified).cloned().collect()
}

/// Keep curator picks when `only` is set.
pub fn filter_curator_picks(tools: &[Tool], only: bool) -> Vec<Tool> {
    if !only {
        return tools.to_vec();
    }
    tools.iter().filter(|t| t.is_curator_pick).cloned().collect()
}

/// All filter criteria for one browse request.
///
/// `ToolFilter::default()` matches every tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolFilter {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pricing: Vec<PricingModel>,
    #[serde(default = "default_min_score")]
    pub min_score: u8,
    #[serde(default)]
    pub verified_only: bool,
    #[serde(default)]
    pub curator_picks_only: bool,
}

fn default_min_score() -> u8 {
    MIN_SCORE
}

impl Default for ToolFilter {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            pricing: Vec::new(),
            min_score: MIN_SCORE,
            verified_only: false,
            curator_picks_only: false,
        }
    }
}

impl ToolFilter {
    /// True when no criterion would remove anything.
    pub fn is_noop(&self) -> bool {
        self.tags.is_empty()
            && self.pricing.is_empty()
            && self.min_score <= MIN_SCORE
            && !self.verified_only
            && !self.curator_picks_only
    }

    /// Single predicate equivalent to running every filter in sequence.
    pub fn matches(&self, tool: &Tool) -> bool {
        (self.tags.is_empty() || tool.tags.iter().any(|tag| self.tags.contains(tag)))
            && (self.pricing.is_empty() || self.pricing.contains(&tool.pricing_model))
            && tool.consciousness_score >= self.min_score
            && (!self.verified_only || tool.is_verified)
            && (!self.curator_picks_only || tool.is_curator_pick)
    }

    /// Apply every criterion conjunctively, preserving order.
    pub fn apply(&self, tools: &[Tool]) -> Vec<Tool> {
        tools.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
