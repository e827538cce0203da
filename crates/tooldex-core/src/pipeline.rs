//! Browse pipeline: search → filter → sort → truncate.
//!
//! This is the single entry point the CLI and HTTP frontends use to produce
//! a listing. It never fails and never mutates its input.

use serde::{Deserialize, Serialize};

use crate::filter::ToolFilter;
use crate::models::Tool;
use crate::search::search_tools;
use crate::sort::{sort_tools, SortBy};

/// Inputs for one listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowseRequest {
    /// Free-text query; blank means no search.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filter: ToolFilter,
    #[serde(default)]
    pub sort: SortBy,
    /// Maximum tools to return; `None` returns everything that matched.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl BrowseRequest {
    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }
}

/// Result of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseResult {
    /// Matching tools after sorting and truncation.
    pub tools: Vec<Tool>,
    /// Number of matches before truncation.
    pub total: usize,
}

/// Run the full pipeline over `tools`.
pub fn browse(tools: &[Tool], req: &BrowseRequest) -> BrowseResult {
    let matched = search_tools(tools, &req.query);
    let filtered = req.filter.apply(&matched);
    let total = filtered.len();
    let mut sorted = sort_tools(&filtered, req.sort, req.has_query());
    if let Some(limit) = req.limit {
        sorted.truncate(limit);
    }
    BrowseResult {
        tools: sorted,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{slugs, tool};
    use crate::models::PricingModel;

    fn catalog() -> Vec<Tool> {
        let mut a = tool("assistant");
        a.name = "Code Assistant".to_string();
        a.tags = vec!["Coding".to_string()];
        a.popularity = Some(5.0);
        a.consciousness_score = 4;
        let mut b = tool("brush");
        b.name = "Brush".to_string();
        b.tags = vec!["Image".to_string()];
        b.popularity = Some(50.0);
        let mut c = tool("copilot-lite");
        c.name = "Copilot Lite".to_string();
        c.description = "Inline code completion".to_string();
        c.tags = vec!["Coding".to_string()];
        c.pricing_model = PricingModel::OpenSource;
        c.popularity = Some(20.0);
        c.consciousness_score = 5;
        vec![a, b, c]
    }

    #[test]
    fn test_default_request_returns_popularity_order() {
        let out = browse(&catalog(), &BrowseRequest::default());
        assert_eq!(out.total, 3);
        assert_eq!(slugs(&out.tools), vec!["brush", "copilot-lite", "assistant"]);
    }

    #[test]
    fn test_query_keeps_match_order_under_relevance() {
        let req = BrowseRequest {
            query: "code".to_string(),
            ..Default::default()
        };
        let out = browse(&catalog(), &req);
        assert_eq!(slugs(&out.tools), vec!["assistant", "copilot-lite"]);
    }

    #[test]
    fn test_filters_and_sort_compose() {
        let req = BrowseRequest {
            query: String::new(),
            filter: ToolFilter {
                tags: vec!["Coding".to_string()],
                min_score: 4,
                ..Default::default()
            },
            sort: SortBy::Consciousness,
            limit: Some(1),
        };
        let out = browse(&catalog(), &req);
        assert_eq!(out.total, 2);
        assert_eq!(slugs(&out.tools), vec!["copilot-lite"]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let req = BrowseRequest {
            query: "spreadsheet".to_string(),
            ..Default::default()
        };
        let out = browse(&catalog(), &req);
        assert_eq!(out.total, 0);
        assert!(out.tools.is_empty());
    }
}
