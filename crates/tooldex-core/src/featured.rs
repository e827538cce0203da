//! Featured-set selection.
//!
//! The featured strip is built from three tiers with a fixed budget each:
//!
//! 1. tools flagged `featured`, up to `ceil(0.4 × n)`, in input order;
//! 2. curator picks not already featured, up to `ceil(0.4 × n)`, in input order;
//! 3. the highest consciousness scores among the remaining tools.
//!
//! Under [`FeaturedPolicy::Strict`] the third tier only gets what is left of
//! `n` after both full tier budgets, so a tier that runs short of candidates
//! leaves its share empty. [`FeaturedPolicy::Spillover`] lets the third tier
//! fill the strip up to `n`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::models::Tool;
use crate::sort::{sort_tools, SortBy};

/// How unused tier budget is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeaturedPolicy {
    /// Fixed tier proportions; unused budget is dropped.
    #[default]
    Strict,
    /// The score tier absorbs whatever the first two tiers left unused.
    Spillover,
}

impl FromStr for FeaturedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(FeaturedPolicy::Strict),
            "spillover" => Ok(FeaturedPolicy::Spillover),
            other => Err(format!(
                "unknown featured policy: '{}'. Use strict or spillover.",
                other
            )),
        }
    }
}

impl fmt::Display for FeaturedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeaturedPolicy::Strict => f.write_str("strict"),
            FeaturedPolicy::Spillover => f.write_str("spillover"),
        }
    }
}

/// Budget for each of the first two tiers: `ceil(0.4 × n)`, in integer
/// arithmetic that cannot overflow for any `n`.
pub fn tier_budget(n: usize) -> usize {
    n / 5 * 2 + (n % 5 * 2).div_ceil(5)
}

/// Pick at most `n` tools for the featured strip.
///
/// Tier budgets follow the requested `n`; the strip itself can never hold
/// more than `tools.len()` entries.
pub fn select_featured(tools: &[Tool], n: usize, policy: FeaturedPolicy) -> Vec<Tool> {
    if n == 0 {
        return Vec::new();
    }
    let budget = tier_budget(n);
    let cap = n.min(tools.len());
    let mut out: Vec<Tool> = Vec::with_capacity(cap);
    let mut seen: HashSet<String> = HashSet::new();

    let featured = tools.iter().filter(|t| t.featured).take(budget.min(cap));
    push_unique(&mut out, &mut seen, featured);

    let room = budget.min(cap - out.len());
    let picks = tools
        .iter()
        .filter(|t| t.is_curator_pick && !t.featured)
        .take(room);
    push_unique(&mut out, &mut seen, picks);

    let score_room = match policy {
        FeaturedPolicy::Strict => n.saturating_sub(budget.saturating_mul(2)),
        FeaturedPolicy::Spillover => n,
    }
    .min(cap - out.len());
    if score_room == 0 {
        return out;
    }

    let rest: Vec<Tool> = tools
        .iter()
        .filter(|t| !seen.contains(&t.slug))
        .cloned()
        .collect();
    let ranked = sort_tools(&rest, SortBy::Consciousness, false);
    push_unique(&mut out, &mut seen, ranked.iter().take(score_room));
    out
}

fn push_unique<'a>(
    out: &mut Vec<Tool>,
    seen: &mut HashSet<String>,
    candidates: impl Iterator<Item = &'a Tool>,
) {
    for t in candidates {
        if seen.insert(t.slug.clone()) {
            out.push(t.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{slugs, tool};

    fn entry(slug: &str, featured: bool, pick: bool, score: u8) -> Tool {
        let mut t = tool(slug);
        t.featured = featured;
        t.is_curator_pick = pick;
        t.consciousness_score = score;
        t
    }

    fn catalog() -> Vec<Tool> {
        vec![
            entry("f1", true, false, 2),
            entry("p1", false, true, 3),
            entry("s1", false, false, 5),
            entry("f2", true, true, 3),
            entry("f3", true, false, 1),
            entry("p2", false, true, 2),
            entry("s2", false, false, 4),
            entry("p3", false, true, 5),
            entry("s3", false, false, 3),
        ]
    }

    #[test]
    fn test_tier_budget_rounds_up() {
        assert_eq!(tier_budget(1), 1);
        assert_eq!(tier_budget(5), 2);
        assert_eq!(tier_budget(6), 3);
        assert_eq!(tier_budget(10), 4);
        assert_eq!(tier_budget(15), 6);
        assert_eq!(tier_budget(0), 0);
        assert_eq!(tier_budget(7), 3);
        assert_eq!(tier_budget(usize::MAX), usize::MAX / 5 * 2);
    }

    #[test]
    fn test_huge_count_is_bounded_by_catalog() {
        for n in [1usize << 40, usize::MAX / 2 + 1, usize::MAX] {
            for policy in [FeaturedPolicy::Strict, FeaturedPolicy::Spillover] {
                let out = select_featured(&catalog(), n, policy);
                assert_eq!(out.len(), 9, "n={} policy={}", n, policy);
                assert_eq!(&slugs(&out)[..3], &["f1", "f2", "f3"]);
            }
        }
    }

    #[test]
    fn test_three_tiers_in_order() {
        // n = 6: budget 3 per tier, score tier gets 6 - 6 = 0.
        let out = select_featured(&catalog(), 6, FeaturedPolicy::Strict);
        assert_eq!(slugs(&out), vec!["f1", "f2", "f3", "p1", "p2", "p3"]);

        // n = 10: budget 4, featured has 3, picks have 3, score tier gets 2.
        let out = select_featured(&catalog(), 10, FeaturedPolicy::Strict);
        assert_eq!(
            slugs(&out),
            vec!["f1", "f2", "f3", "p1", "p2", "p3", "s1", "s2"]
        );
    }

    #[test]
    fn test_strict_underfills_when_picks_are_scarce() {
        let tools = vec![
            entry("f1", true, false, 1),
            entry("a", false, false, 5),
            entry("b", false, false, 4),
            entry("c", false, false, 3),
            entry("d", false, false, 2),
        ];
        // n = 5: budget 2; one featured, no picks, score tier capped at 1.
        let out = select_featured(&tools, 5, FeaturedPolicy::Strict);
        assert_eq!(slugs(&out), vec!["f1", "a"]);
    }

    #[test]
    fn test_spillover_fills_to_n() {
        let tools = vec![
            entry("f1", true, false, 1),
            entry("a", false, false, 5),
            entry("b", false, false, 4),
            entry("c", false, false, 3),
            entry("d", false, false, 2),
        ];
        let out = select_featured(&tools, 5, FeaturedPolicy::Spillover);
        assert_eq!(slugs(&out), vec!["f1", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_never_exceeds_n_or_duplicates() {
        let tools = catalog();
        for n in 0..=12 {
            for policy in [FeaturedPolicy::Strict, FeaturedPolicy::Spillover] {
                let out = select_featured(&tools, n, policy);
                assert!(out.len() <= n, "n={} policy={} len={}", n, policy, out.len());
                let unique: HashSet<&str> = out.iter().map(|t| t.slug.as_str()).collect();
                assert_eq!(unique.len(), out.len(), "duplicate slug for n={}", n);
            }
        }
    }

    #[test]
    fn test_single_slot_goes_to_featured() {
        let out = select_featured(&catalog(), 1, FeaturedPolicy::Strict);
        assert_eq!(slugs(&out), vec!["f1"]);
    }

    #[test]
    fn test_featured_curator_pick_counts_once() {
        // f2 is both featured and a curator pick; it must only appear in tier 1.
        let out = select_featured(&catalog(), 12, FeaturedPolicy::Spillover);
        assert_eq!(out.iter().filter(|t| t.slug == "f2").count(), 1);
        assert_eq!(out.len(), 9);
    }
}
