//! Core data models for the tool directory.
//!
//! [`Tool`] is the only entity the ranking pipeline operates on. Optional
//! engagement fields are exposed through accessors on [`Tool`] that apply a
//! single default policy, so no consumer repeats its own fallback.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest consciousness score a resident tool may carry.
pub const MIN_SCORE: u8 = 1;
/// Highest consciousness score a resident tool may carry.
pub const MAX_SCORE: u8 = 5;

/// How a tool is priced or distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingModel {
    Free,
    Freemium,
    Paid,
    #[serde(rename = "Open Source")]
    OpenSource,
    #[serde(rename = "GitHub")]
    GitHub,
    #[serde(rename = "Google Colab")]
    GoogleColab,
}

impl PricingModel {
    pub const ALL: [PricingModel; 6] = [
        PricingModel::Free,
        PricingModel::Freemium,
        PricingModel::Paid,
        PricingModel::OpenSource,
        PricingModel::GitHub,
        PricingModel::GoogleColab,
    ];

    /// Display label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            PricingModel::Free => "Free",
            PricingModel::Freemium => "Freemium",
            PricingModel::Paid => "Paid",
            PricingModel::OpenSource => "Open Source",
            PricingModel::GitHub => "GitHub",
            PricingModel::GoogleColab => "Google Colab",
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PricingModel {
    type Err = String;

    /// Accepts the display label or a kebab/underscore variant, case-insensitively
    /// (`"Open Source"`, `"open-source"`, `"google_colab"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        PricingModel::ALL
            .iter()
            .copied()
            .find(|p| p.label().replace(' ', "").to_lowercase() == key)
            .ok_or_else(|| {
                format!(
                    "unknown pricing model: '{}'. Use one of: {}",
                    s,
                    PricingModel::ALL
                        .iter()
                        .map(|p| p.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// A single viewer's vote on a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl FromStr for VoteDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "upvote" => Ok(VoteDirection::Up),
            "down" | "downvote" => Ok(VoteDirection::Down),
            other => Err(format!("unknown vote direction: '{}'. Use up or down.", other)),
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteDirection::Up => f.write_str("up"),
            VoteDirection::Down => f.write_str("down"),
        }
    }
}

/// Vote counters for a tool, plus the current viewer's own vote.
///
/// `user_vote` is viewer-specific and never part of the canonical record;
/// it is filled in by [`crate::votes::merge_votes`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Votes {
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub downvotes: u32,
    #[serde(default)]
    pub user_vote: Option<VoteDirection>,
}

impl Votes {
    /// Upvotes minus downvotes.
    pub fn net(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}

/// A curator warning attached to a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsciousnessWarning {
    pub level: String,
    pub message: String,
    pub reason: String,
}

/// A time-limited partner offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialOffer {
    #[serde(default)]
    pub code: Option<String>,
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub discount: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// A short prompt example shown on a tool's page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTip {
    pub title: String,
    pub snippet: String,
}

/// A directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Unique, URL-safe identifier. The only stable join key.
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub screenshot_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub pricing_model: PricingModel,
    /// Curator rating, always within `[MIN_SCORE, MAX_SCORE]` once deserialized.
    #[serde(deserialize_with = "deserialize_score")]
    pub consciousness_score: u8,
    #[serde(default)]
    pub curator_note: String,
    #[serde(default)]
    pub is_curator_pick: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub consciousness_warning: Option<ConsciousnessWarning>,
    #[serde(default)]
    pub special_offer: Option<SpecialOffer>,
    #[serde(default)]
    pub votes: Votes,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub trending_score: Option<f64>,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub prompt_tips: Vec<PromptTip>,
}

impl Tool {
    /// Popularity counter, `0.0` when absent.
    pub fn popularity(&self) -> f64 {
        self.popularity.unwrap_or(0.0)
    }

    /// Trending score, `0.0` when absent.
    pub fn trending_score(&self) -> f64 {
        self.trending_score.unwrap_or(0.0)
    }

    /// Category, treating a blank string as absent.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// `dateAdded` as a Unix timestamp; missing or unparseable dates are epoch.
    pub fn date_added_ts(&self) -> i64 {
        self.date_added
            .as_deref()
            .and_then(parse_date_ts)
            .unwrap_or(0)
    }
}

/// Clamp an arbitrary rating into `[MIN_SCORE, MAX_SCORE]`.
pub fn clamp_score(raw: i64) -> u8 {
    raw.clamp(i64::from(MIN_SCORE), i64::from(MAX_SCORE)) as u8
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Ok(MIN_SCORE);
    }
    Ok(clamp_score(raw.round() as i64))
}

/// Parse an ISO 8601 date or timestamp into Unix seconds.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`), a naive timestamp
/// (`2024-05-01T10:00:00`), or a calendar date (`2024-05-01`).
pub fn parse_date_ts(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
}
