//! Related-tool recommendations.
//!
//! A candidate's score against a base tool is a fixed weighted sum:
//!
//! ```text
//! 2 × shared tags
//! + max(0, 5 − |Δ consciousness score|)
//! + 3 if both have the same category
//! + 2 if the candidate is a curator pick
//! + 1 if the candidate's trending score is above 0.7
//! ```

use serde::Serialize;
use std::collections::HashSet;

use crate::models::Tool;

const TAG_WEIGHT: u32 = 2;
const SCORE_PROXIMITY_MAX: u32 = 5;
const CATEGORY_BONUS: u32 = 3;
const CURATOR_BONUS: u32 = 2;
const TRENDING_BONUS: u32 = 1;
/// Trending score above which a candidate earns the trending bonus.
pub const TRENDING_THRESHOLD: f64 = 0.7;

/// A scored candidate.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub score: u32,
    pub tool: Tool,
}

/// Similarity of `candidate` to `base`.
pub fn recommendation_score(base: &Tool, candidate: &Tool) -> u32 {
    let base_tags: HashSet<&str> = base.tags.iter().map(String::as_str).collect();
    let shared = candidate
        .tags
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>()
        .intersection(&base_tags)
        .count() as u32;

    let diff = u32::from(base.consciousness_score.abs_diff(candidate.consciousness_score));
    let proximity = SCORE_PROXIMITY_MAX.saturating_sub(diff);

    let same_category = matches!(
        (base.category(), candidate.category()),
        (Some(a), Some(b)) if a == b
    );

    TAG_WEIGHT * shared
        + proximity
        + if same_category { CATEGORY_BONUS } else { 0 }
        + if candidate.is_curator_pick { CURATOR_BONUS } else { 0 }
        + if candidate.trending_score() > TRENDING_THRESHOLD {
            TRENDING_BONUS
        } else {
            0
        }
}

/// Top `limit` tools related to `base`, best first.
///
/// The base tool (matched by slug) is never included. Equal scores keep
/// their input order.
pub fn related_tools(base: &Tool, tools: &[Tool], limit: usize) -> Vec<Recommendation> {
    let mut scored: Vec<Recommendation> = tools
        .iter()
        .filter(|t| t.slug != base.slug)
        .map(|t| Recommendation {
            score: recommendation_score(base, t),
            tool: t.clone(),
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}
