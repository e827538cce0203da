//! Ingestion-time validation.
//!
//! The ranking pipeline assumes every resident [`Tool`] is sound. This
//! module is the boundary that makes that true: records with a malformed
//! slug, a duplicate slug, no name, or no tags are rejected; scores were
//! already clamped while deserializing; viewer votes are stripped; and
//! unparseable dates are accepted but reported.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{parse_date_ts, Tool};

/// Why a record was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("invalid slug '{0}': use lowercase letters, digits, and single hyphens")]
    InvalidSlug(String),
    #[error("duplicate slug '{0}'")]
    DuplicateSlug(String),
    #[error("tool '{0}' has an empty name")]
    EmptyName(String),
    #[error("tool '{0}' has no tags")]
    NoTags(String),
}

/// A refused record, with its position in the input.
#[derive(Debug, Clone)]
pub struct Rejection {
    pub index: usize,
    pub slug: String,
    pub reason: RejectReason,
}

/// Outcome of [`ingest`].
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Accepted tools, in input order.
    pub tools: Vec<Tool>,
    pub rejected: Vec<Rejection>,
    /// Slugs whose `dateAdded` could not be parsed; they sort as epoch.
    pub undated: Vec<String>,
}

/// True for `lowercase-words-123`: ASCII lowercase alphanumerics separated
/// by single hyphens, no leading or trailing hyphen.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|part| {
            !part.is_empty()
                && part
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        })
}

/// Check a single record, independent of the rest of the catalog.
pub fn validate_tool(tool: &Tool) -> Result<(), RejectReason> {
    if !is_valid_slug(&tool.slug) {
        return Err(RejectReason::InvalidSlug(tool.slug.clone()));
    }
    if tool.name.trim().is_empty() {
        return Err(RejectReason::EmptyName(tool.slug.clone()));
    }
    if tool.tags.iter().all(|t| t.trim().is_empty()) {
        return Err(RejectReason::NoTags(tool.slug.clone()));
    }
    Ok(())
}

/// Validate and normalize a batch of records.
///
/// The first record with a given slug wins; later ones are rejected.
pub fn ingest(records: Vec<Tool>) -> IngestReport {
    let mut report = IngestReport::default();
    let mut slugs: HashSet<String> = HashSet::new();

    for (index, mut tool) in records.into_iter().enumerate() {
        let verdict = validate_tool(&tool).and_then(|()| {
            if slugs.contains(&tool.slug) {
                Err(RejectReason::DuplicateSlug(tool.slug.clone()))
            } else {
                Ok(())
            }
        });
        if let Err(reason) = verdict {
            tracing::warn!(index, slug = %tool.slug, %reason, "rejected tool record");
            report.rejected.push(Rejection {
                index,
                slug: tool.slug,
                reason,
            });
            continue;
        }

        tool.tags.retain(|t| !t.trim().is_empty());
        tool.votes.user_vote = None;

        if let Some(date) = tool.date_added.as_deref() {
            if parse_date_ts(date).is_none() {
                tracing::warn!(slug = %tool.slug, date, "unparseable dateAdded, sorting as epoch");
                report.undated.push(tool.slug.clone());
            }
        }

        slugs.insert(tool.slug.clone());
        report.tools.push(tool);
    }

    report
}
