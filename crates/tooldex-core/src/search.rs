//! Case-insensitive substring search.
//!
//! Scans `name`, `summary`, `description`, each tag, and `curator_note`.
//! There is no tokenization, stemming, or relevance scoring: a tool either
//! contains the query or it does not, and matches keep their input order.

use crate::models::Tool;

/// Return the tools whose searchable text contains `query`.
///
/// An empty or whitespace-only query returns the whole collection.
pub fn search_tools(tools: &[Tool], query: &str) -> Vec<Tool> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return tools.to_vec();
    }
    tools
        .iter()
        .filter(|t| matches_query(t, &needle))
        .cloned()
        .collect()
}

/// True if any searchable field contains `needle`, which must already be
/// lower-cased.
pub fn matches_query(tool: &Tool, needle: &str) -> bool {
    let contains = |s: &str| s.to_lowercase().contains(needle);
    contains(&tool.name)
        || contains(&tool.summary)
        || contains(&tool.description)
        || tool.tags.iter().any(|tag| contains(tag))
        || contains(&tool.curator_note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{slugs, tool};

    fn corpus() -> Vec<Tool> {
        let mut tagged = tool("tagged");
        tagged.tags = vec!["GPT-4".to_string()];
        let mut described = tool("described");
        described.description = "A gpt-based writing assistant".to_string();
        let mut neither = tool("neither");
        neither.name = "Image Studio".to_string();
        neither.description = "Diffusion image generation".to_string();
        let mut noted = tool("noted");
        noted.curator_note = "Great for Rust refactors".to_string();
        vec![tagged, neither, described, noted]
    }

    #[test]
    fn test_query_matches_tag_and_description() {
        let out = search_tools(&corpus(), "GPT");
        assert_eq!(slugs(&out), vec!["tagged", "described"]);
    }

    #[test]
    fn test_query_matches_curator_note_case_insensitively() {
        let out = search_tools(&corpus(), "rust REFACTOR");
        assert_eq!(slugs(&out), vec!["noted"]);
    }

    #[test]
    fn test_blank_query_is_noop() {
        let tools = corpus();
        assert_eq!(search_tools(&tools, ""), tools);
        assert_eq!(search_tools(&tools, "   \t"), tools);
    }

    #[test]
    fn test_query_is_trimmed() {
        let out = search_tools(&corpus(), "  image studio ");
        assert_eq!(slugs(&out), vec!["neither"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(search_tools(&corpus(), "blockchain").is_empty());
    }
}
