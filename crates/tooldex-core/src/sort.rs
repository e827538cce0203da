//! Sort strategies for tool listings.
//!
//! Every strategy returns a new vector and breaks ties on `slug` ascending,
//! so the resulting order is total and identical across runs. The one
//! exception is [`SortBy::Relevance`] with an active query, which keeps the
//! search-match order untouched.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Tool;

/// Selectable ordering for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Search-match order when a query is present, otherwise popularity.
    #[default]
    Relevance,
    /// Net votes (upvotes − downvotes), highest first.
    Votes,
    /// Popularity counter, highest first.
    Popularity,
    /// Trending score, highest first.
    Trending,
    /// Consciousness score, highest first.
    Consciousness,
    /// Most recently added first.
    Newest,
    /// Oldest first.
    Oldest,
    /// Name A→Z.
    NameAsc,
    /// Name Z→A.
    NameDesc,
}

impl SortBy {
    pub const ALL: [SortBy; 9] = [
        SortBy::Relevance,
        SortBy::Votes,
        SortBy::Popularity,
        SortBy::Trending,
        SortBy::Consciousness,
        SortBy::Newest,
        SortBy::Oldest,
        SortBy::NameAsc,
        SortBy::NameDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Votes => "votes",
            SortBy::Popularity => "popularity",
            SortBy::Trending => "trending",
            SortBy::Consciousness => "consciousness",
            SortBy::Newest => "newest",
            SortBy::Oldest => "oldest",
            SortBy::NameAsc => "name-asc",
            SortBy::NameDesc => "name-desc",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace('_', "-");
        SortBy::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == key)
            .ok_or_else(|| {
                format!(
                    "unknown sort: '{}'. Use one of: {}",
                    s,
                    SortBy::ALL
                        .iter()
                        .map(|v| v.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// Sort `tools` by `sort`.
///
/// `has_query` only affects [`SortBy::Relevance`].
pub fn sort_tools(tools: &[Tool], sort: SortBy, has_query: bool) -> Vec<Tool> {
    let mut out = tools.to_vec();
    if sort == SortBy::Relevance && has_query {
        return out;
    }
    out.sort_by(|a, b| compare(a, b, sort).then_with(|| a.slug.cmp(&b.slug)));
    out
}

/// Primary-key comparison for `sort`, without the slug tie-break.
pub fn compare(a: &Tool, b: &Tool, sort: SortBy) -> Ordering {
    match sort {
        SortBy::Votes => b.votes.net().cmp(&a.votes.net()),
        SortBy::Relevance | SortBy::Popularity => b.popularity().total_cmp(&a.popularity()),
        SortBy::Trending => b.trending_score().total_cmp(&a.trending_score()),
        SortBy::Consciousness => b.consciousness_score.cmp(&a.consciousness_score),
        SortBy::Newest => b.date_added_ts().cmp(&a.date_added_ts()),
        SortBy::Oldest => a.date_added_ts().cmp(&b.date_added_ts()),
        SortBy::NameAsc => compare_names(&a.name, &b.name),
        SortBy::NameDesc => compare_names(&b.name, &a.name),
    }
}

/// Case-folded comparison, falling back to the raw strings so that names
/// differing only in case still order deterministically.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
