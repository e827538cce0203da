//! # Tooldex
//!
//! **A curated AI tool directory with search, filtering, ranking, and
//! recommendations.**
//!
//! Tooldex loads a JSON catalog of tools, validates it at the boundary,
//! and serves filtered, sorted, featured, and related views of it through a
//! CLI and a JSON HTTP API. All ranking logic lives in `tooldex-core` and
//! is pure; this crate supplies configuration, catalog loading, vote
//! persistence, and the two frontends.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Catalog    │──▶│   Ingest     │──▶│  Directory   │◀── VoteStore
//! │ file / URL  │   │  validation  │   │  (pipeline)  │   memory / file
//! └─────────────┘   └──────────────┘   └──────┬───────┘
//!                                             │
//!                              ┌──────────────┤
//!                              ▼              ▼
//!                        ┌──────────┐   ┌──────────┐
//!                        │   CLI    │   │   HTTP   │
//!                        │(tooldex) │   │  (axum)  │
//!                        └──────────┘   └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! tooldex check                              # validate the catalog
//! tooldex list "gpt" --tag Coding --sort votes
//! tooldex featured --count 6
//! tooldex related chat-helper
//! tooldex vote chat-helper up --viewer alice
//! tooldex serve                              # start HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`catalog`] | Catalog loading and ingestion |
//! | [`directory`] | Shared operations for both frontends |
//! | [`vote_file`] | JSON-file vote store and backend selection |
//! | [`browse`] | `list`, `featured`, `related`, `show` commands |
//! | [`vote`] | `vote` command |
//! | [`check`] | `check` command |
//! | [`server`] | JSON HTTP API |
//! | [`logging`] | Tracing subscriber setup |

pub mod browse;
pub mod catalog;
pub mod check;
pub mod config;
pub mod directory;
pub mod logging;
pub mod server;
pub mod vote;
pub mod vote_file;
