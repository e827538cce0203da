//! Tool catalog loading.
//!
//! The catalog is a JSON document holding tool records, read either from a
//! local file (`[catalog].path`) or fetched over HTTP (`[catalog].url`). Both
//! a bare array and an object with a `tools` array are accepted.
//!
//! Every record goes through [`tooldex_core::ingest::ingest`] before it
//! reaches the ranking pipeline; rejections are logged and kept on the
//! [`Catalog`] so `tooldex check` can report them.

use anyhow::{Context, Result};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tooldex_core::ingest::{ingest, Rejection};
use tooldex_core::models::Tool;

use crate::config::Config;

/// Validated, in-memory tool catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Accepted tools in catalog order.
    pub tools: Vec<Tool>,
    pub rejected: Vec<Rejection>,
    /// Slugs whose `dateAdded` could not be parsed.
    pub undated: Vec<String>,
    /// Hex SHA-256 of the raw catalog bytes.
    pub digest: String,
    /// Path or URL the catalog was read from.
    pub source: String,
}

impl Catalog {
    pub fn find(&self, slug: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.slug == slug)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Tool>),
    Wrapped { tools: Vec<Tool> },
}

/// Load the configured catalog.
pub async fn load_catalog(config: &Config) -> Result<Catalog> {
    let (bytes, source) = match (&config.catalog.path, &config.catalog.url) {
        (Some(path), _) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
            (bytes, path.display().to_string())
        }
        (None, Some(url)) => (fetch_remote(url, config.catalog.timeout_secs).await?, url.clone()),
        (None, None) => anyhow::bail!("catalog: one of path or url is required"),
    };
    let catalog = parse_catalog(&bytes, &source)?;
    tracing::info!(
        source = %catalog.source,
        accepted = catalog.tools.len(),
        rejected = catalog.rejected.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

async fn fetch_remote(url: &str, timeout_secs: u64) -> Result<Vec<u8>> {
    tracing::debug!(url, "fetching remote catalog");
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch catalog: {}", url))?
        .error_for_status()
        .with_context(|| format!("Catalog request failed: {}", url))?;
    Ok(resp.bytes().await?.to_vec())
}

/// Parse and validate raw catalog JSON.
pub fn parse_catalog(bytes: &[u8], source: &str) -> Result<Catalog> {
    let doc: CatalogDocument = serde_json::from_slice(bytes)
        .with_context(|| format!("Failed to parse catalog JSON: {}", source))?;
    let records = match doc {
        CatalogDocument::List(tools) => tools,
        CatalogDocument::Wrapped { tools } => tools,
    };

    let report = ingest(records);
    Ok(Catalog {
        tools: report.tools,
        rejected: report.rejected,
        undated: report.undated,
        digest: hex::encode(Sha256::digest(bytes)),
        source: source.to_string(),
    })
}
