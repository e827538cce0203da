//! # Tooldex Core
//!
//! Shared, I/O-free logic for Tooldex: tool models, ingestion validation,
//! predicate filters, text search, sort strategies, the featured-set
//! selector, the related-tools recommender, and the vote store abstraction.
//!
//! This crate contains no tokio, filesystem, or network dependencies. Every
//! pipeline function takes a slice of [`models::Tool`] and returns a fresh
//! `Vec`, so callers can run it once per request or keystroke without
//! coordinating.

pub mod featured;
pub mod filter;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod recommend;
pub mod search;
pub mod sort;
pub mod votes;
