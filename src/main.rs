//! # Tooldex CLI (`tooldex`)
//!
//! Browse, rank, and vote on a curated tool catalog from the terminal, or
//! serve it as a JSON API.
//!
//! ## Usage
//!
//! ```bash
//! tooldex --config ./config/tooldex.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tooldex list [QUERY]` | Search, filter, and sort the catalog |
//! | `tooldex featured` | Show the featured strip |
//! | `tooldex related <slug>` | Tools related to one tool |
//! | `tooldex show <slug>` | One tool in detail |
//! | `tooldex vote <slug> <up\|down>` | Toggle a vote |
//! | `tooldex check` | Validate the catalog |
//! | `tooldex serve` | Start the HTTP API |
//! | `tooldex completions <shell>` | Print shell completions |

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tooldex::{browse, catalog, check, config, directory::Directory, logging, server, vote};
use tooldex_core::featured::FeaturedPolicy;
use tooldex_core::filter::ToolFilter;
use tooldex_core::models::{PricingModel, VoteDirection, MIN_SCORE};
use tooldex_core::pipeline::BrowseRequest;
use tooldex_core::sort::SortBy;

/// Tooldex, a curated AI tool directory.
///
/// All commands except `completions` read a TOML configuration file given
/// by `--config`.
#[derive(Parser)]
#[command(
    name = "tooldex",
    about = "Tooldex — search, rank, and recommend tools from a curated catalog",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/tooldex.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter, and sort the catalog.
    ///
    /// Filters combine with AND; repeated `--tag` or `--pricing` values
    /// combine with OR.
    List {
        /// Case-insensitive text to look for in names, summaries,
        /// descriptions, tags, and curator notes.
        query: Option<String>,

        /// Keep tools with this tag (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Keep tools with this pricing model (repeatable), e.g. `free`, `open-source`.
        #[arg(long)]
        pricing: Vec<PricingModel>,

        /// Minimum consciousness score (1-5).
        #[arg(
            long,
            default_value_t = MIN_SCORE,
            value_parser = clap::value_parser!(u8).range(1..=5)
        )]
        min_score: u8,

        /// Only verified tools.
        #[arg(long)]
        verified: bool,

        /// Only curator picks.
        #[arg(long)]
        curator_picks: bool,

        /// Sort: relevance, votes, popularity, trending, consciousness,
        /// newest, oldest, name-asc, name-desc.
        #[arg(long, default_value = "relevance")]
        sort: SortBy,

        /// Maximum number of tools to print (defaults to `[ranking].list_limit`).
        #[arg(long)]
        limit: Option<usize>,

        /// Show this viewer's own votes.
        #[arg(long)]
        viewer: Option<String>,
    },

    /// Show the featured strip.
    Featured {
        /// Number of slots (defaults to `[ranking].featured_count`).
        #[arg(long)]
        count: Option<usize>,

        /// `strict` keeps tier proportions; `spillover` fills every slot.
        #[arg(long)]
        policy: Option<FeaturedPolicy>,
    },

    /// List tools related to one tool, with similarity scores.
    Related {
        slug: String,

        /// Maximum results (defaults to `[ranking].related_limit`).
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Print one tool in detail.
    Show {
        slug: String,

        #[arg(long)]
        viewer: Option<String>,
    },

    /// Toggle a vote. Voting the same way twice clears the vote.
    Vote {
        slug: String,

        /// `up` or `down`.
        direction: VoteDirection,

        /// Voter identity.
        #[arg(long)]
        viewer: String,
    },

    /// Validate the catalog and report rejected records.
    ///
    /// Exits with status 1 if any record was rejected.
    Check,

    /// Start the JSON HTTP API on `[server].bind`.
    Serve,

    /// Print shell completions to stdout.
    Completions {
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "tooldex", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;
    logging::init_tracing(&cfg.logging.level);

    match cli.command {
        Commands::Check => {
            let catalog = catalog::load_catalog(&cfg).await?;
            if !check::run_check(&catalog)? {
                std::process::exit(1);
            }
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        command => {
            let dir = Directory::open(&cfg).await?;
            run_directory_command(&dir, command).await?;
        }
    }

    Ok(())
}

async fn run_directory_command(dir: &Directory, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::List {
            query,
            tags,
            pricing,
            min_score,
            verified,
            curator_picks,
            sort,
            limit,
            viewer,
        } => {
            let req = BrowseRequest {
                query: query.unwrap_or_default(),
                filter: ToolFilter {
                    tags,
                    pricing,
                    min_score,
                    verified_only: verified,
                    curator_picks_only: curator_picks,
                },
                sort,
                limit,
            };
            browse::run_list(dir, &req, viewer.as_deref()).await?;
        }
        Commands::Featured { count, policy } => {
            browse::run_featured(dir, count, policy).await?;
        }
        Commands::Related { slug, limit } => {
            browse::run_related(dir, &slug, limit).await?;
        }
        Commands::Show { slug, viewer } => {
            browse::run_show(dir, &slug, viewer.as_deref()).await?;
        }
        Commands::Vote {
            slug,
            direction,
            viewer,
        } => {
            vote::run_vote(dir, &slug, &viewer, direction).await?;
        }
        Commands::Check | Commands::Serve | Commands::Completions { .. } => {
            // Handled in main before the directory is opened
            unreachable!()
        }
    }
    Ok(())
}
