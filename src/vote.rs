//! `tooldex vote`: apply a toggle vote.

use anyhow::Result;
use tooldex_core::models::VoteDirection;

use crate::directory::Directory;

pub async fn run_vote(
    dir: &Directory,
    slug: &str,
    viewer: &str,
    direction: VoteDirection,
) -> Result<()> {
    let votes = dir.vote(slug, viewer, direction).await?;
    let state = match votes.user_vote {
        Some(d) => format!("voted {}", d),
        None => "vote cleared".to_string(),
    };
    println!(
        "{}: {} (+{} / -{}, net {})",
        slug,
        state,
        votes.upvotes,
        votes.downvotes,
        votes.net()
    );
    if !dir.config.votes.is_file() {
        println!("note: votes backend is 'memory'; this vote is not persisted");
    }
    Ok(())
}
