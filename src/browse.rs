//! CLI listing commands: `list`, `featured`, `related`, `show`.

use anyhow::Result;
use tooldex_core::featured::FeaturedPolicy;
use tooldex_core::models::{Tool, VoteDirection};
use tooldex_core::pipeline::BrowseRequest;

use crate::directory::Directory;

pub async fn run_list(dir: &Directory, req: &BrowseRequest, viewer: Option<&str>) -> Result<()> {
    let result = dir.browse(req, viewer).await?;
    if result.tools.is_empty() {
        println!("No results.");
        return Ok(());
    }
    print_table(&result.tools);
    println!();
    println!(
        "{} of {} matching tools (sort: {})",
        result.tools.len(),
        result.total,
        req.sort
    );
    Ok(())
}

pub async fn run_featured(
    dir: &Directory,
    count: Option<usize>,
    policy: Option<FeaturedPolicy>,
) -> Result<()> {
    let tools = dir.featured(count, policy).await?;
    if tools.is_empty() {
        println!("No featured tools.");
        return Ok(());
    }
    print_table(&tools);
    Ok(())
}

pub async fn run_related(dir: &Directory, slug: &str, limit: Option<usize>) -> Result<()> {
    let recs = dir.related(slug, limit).await?;
    if recs.is_empty() {
        println!("No related tools.");
        return Ok(());
    }
    println!("{:>5}  {:<28} {:<18} TAGS", "SCORE", "SLUG", "CATEGORY");
    for r in &recs {
        println!(
            "{:>5}  {:<28} {:<18} {}",
            r.score,
            r.tool.slug,
            r.tool.category().unwrap_or("-"),
            r.tool.tags.join(", ")
        );
    }
    Ok(())
}

pub async fn run_show(dir: &Directory, slug: &str, viewer: Option<&str>) -> Result<()> {
    let tool = dir.tool(slug, viewer).await?;

    println!("--- Tool ---");
    println!("slug:          {}", tool.slug);
    println!("name:          {}", tool.name);
    println!("url:           {}", tool.url);
    println!("pricing:       {}", tool.pricing_model);
    println!("category:      {}", tool.category().unwrap_or("-"));
    println!("tags:          {}", tool.tags.join(", "));
    println!("score:         {}/5", tool.consciousness_score);
    println!("verified:      {}", tool.is_verified);
    println!("curator pick:  {}", tool.is_curator_pick);
    println!("featured:      {}", tool.featured);
    println!(
        "votes:         +{} / -{} (net {}){}",
        tool.votes.upvotes,
        tool.votes.downvotes,
        tool.votes.net(),
        match tool.votes.user_vote {
            Some(VoteDirection::Up) => " — you voted up",
            Some(VoteDirection::Down) => " — you voted down",
            None => "",
        }
    );
    if let Some(added) = &tool.date_added {
        println!("added:         {}", added);
    }
    if let Some(updated) = &tool.last_updated {
        println!("updated:       {}", updated);
    }
    if let Some(w) = &tool.consciousness_warning {
        println!("warning:       [{}] {} ({})", w.level, w.message, w.reason);
    }
    if let Some(offer) = &tool.special_offer {
        println!(
            "offer:         {}{}",
            offer.description,
            offer
                .code
                .as_deref()
                .map(|c| format!(" — code {}", c))
                .unwrap_or_default()
        );
    }
    println!();

    println!("--- Summary ---");
    println!("{}", tool.summary);
    println!();
    println!("--- Description ---");
    println!("{}", tool.description);
    if !tool.curator_note.is_empty() {
        println!();
        println!("--- Curator note ---");
        println!("{}", tool.curator_note);
    }
    if !tool.prompt_tips.is_empty() {
        println!();
        println!("--- Prompt tips ({}) ---", tool.prompt_tips.len());
        for tip in &tool.prompt_tips {
            println!("[{}]", tip.title);
            println!("{}", tip.snippet);
            println!();
        }
    }
    Ok(())
}

fn print_table(tools: &[Tool]) {
    println!(
        "{:<28} {:<13} {:>5} {:>6}  {:<5} NAME",
        "SLUG", "PRICING", "SCORE", "NET", "FLAGS"
    );
    for t in tools {
        println!(
            "{:<28} {:<13} {:>5} {:>6}  {:<5} {}",
            t.slug,
            t.pricing_model.label(),
            t.consciousness_score,
            t.votes.net(),
            flags(t),
            t.name
        );
    }
}

/// `F` featured, `C` curator pick, `V` verified.
fn flags(t: &Tool) -> String {
    let mut s = String::new();
    if t.featured {
        s.push('F');
    }
    if t.is_curator_pick {
        s.push('C');
    }
    if t.is_verified {
        s.push('V');
    }
    if s.is_empty() {
        s.push('-');
    }
    s
}
