use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tooldex_core::featured::FeaturedPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub votes: VotesConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the tool catalog comes from. Exactly one of `path` or `url`.
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct VotesConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for VotesConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: None,
        }
    }
}

fn default_backend() -> String {
    "memory".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
    #[serde(default)]
    pub featured_policy: FeaturedPolicy,
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            featured_count: default_featured_count(),
            featured_policy: FeaturedPolicy::default(),
            related_limit: default_related_limit(),
            list_limit: default_list_limit(),
        }
    }
}

fn default_featured_count() -> usize {
    6
}
fn default_related_limit() -> usize {
    4
}
fn default_list_limit() -> usize {
    50
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7340".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl VotesConfig {
    pub fn is_file(&self) -> bool {
        self.backend == "file"
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

/// Parse and validate a TOML config string.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    // Validate catalog
    match (&config.catalog.path, &config.catalog.url) {
        (Some(_), Some(_)) => bail!("catalog: set either path or url, not both"),
        (None, None) => bail!("catalog: one of path or url is required"),
        _ => {}
    }
    if config.catalog.timeout_secs == 0 {
        bail!("catalog.timeout_secs must be > 0");
    }

    // Validate votes
    match config.votes.backend.as_str() {
        "memory" => {}
        "file" => {
            if config.votes.path.is_none() {
                bail!("votes.path must be specified when backend is 'file'");
            }
        }
        other => bail!(
            "Unknown votes backend: '{}'. Must be memory or file.",
            other
        ),
    }

    // Validate ranking
    if config.ranking.featured_count < 1 {
        bail!("ranking.featured_count must be >= 1");
    }
    if config.ranking.related_limit < 1 {
        bail!("ranking.related_limit must be >= 1");
    }
    if config.ranking.list_limit < 1 {
        bail!("ranking.list_limit must be >= 1");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let cfg = parse_config("[catalog]\npath = \"tools.json\"\n").unwrap();
        assert_eq!(cfg.votes.backend, "memory");
        assert_eq!(cfg.ranking.featured_count, 6);
        assert_eq!(cfg.ranking.featured_policy, FeaturedPolicy::Strict);
        assert_eq!(cfg.ranking.related_limit, 4);
        assert_eq!(cfg.ranking.list_limit, 50);
        assert_eq!(cfg.server.bind, "127.0.0.1:7340");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_full_config() {
        let cfg = parse_config(
            r#"
[catalog]
url = "https://tools.example.com/tools.json"
timeout_secs = 5

[votes]
backend = "file"
path = "votes.json"

[ranking]
featured_count = 8
featured_policy = "spillover"
"#,
        )
        .unwrap();
        assert!(cfg.votes.is_file());
        assert_eq!(cfg.ranking.featured_policy, FeaturedPolicy::Spillover);
        assert_eq!(cfg.catalog.timeout_secs, 5);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(parse_config("[catalog]\n").is_err());
        assert!(parse_config("[catalog]\npath = \"a\"\nurl = \"http://b\"\n").is_err());
        assert!(parse_config("[catalog]\npath = \"a\"\n[votes]\nbackend = \"file\"\n").is_err());
        assert!(parse_config("[catalog]\npath = \"a\"\n[votes]\nbackend = \"redis\"\n").is_err());
        assert!(parse_config("[catalog]\npath = \"a\"\n[ranking]\nfeatured_count = 0\n").is_err());
    }
}
