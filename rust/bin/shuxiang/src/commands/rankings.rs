//! Ranking lists and collect-from-ranking.

use anyhow::Result;
use shuxiang_client::handlers::home::{self, CollectOutcome};
use shuxiang_client::site::site_display_name;
use shuxiang_client::App;

use super::{clip, failure, print_json, Output};

/// Home view: every monthly ranking, plus recent collections when logged in.
pub async fn list(app: &App, output: Output) -> Result<()> {
    let rankings = home::handle_load_rankings(app).await;
    let recent = home::handle_load_recent(app).await;

    if output == Output::Json {
        return print_json(&serde_json::json!({
            "rankings": rankings,
            "recent": recent,
        }));
    }

    if rankings.is_empty() {
        println!("No rankings yet. Run `shuxiang rankings fetch-all`.");
    }
    for ranking in &rankings {
        println!(
            "== {} · {} ({})",
            site_display_name(&ranking.site_name),
            ranking.title,
            ranking.ranking_type
        );
        for novel in ranking.novels.iter().take(10) {
            println!("{:>4}  {:<30}  {}", novel.rank, clip(&novel.title, 30), novel.author);
        }
        println!();
    }

    if !recent.is_empty() {
        println!("== Recently updated");
        for c in &recent {
            println!("{:>6}  {}", c.id, c.novel.title);
        }
    }
    Ok(())
}

pub async fn show(app: &App, site: &str, ranking_type: &str, output: Output) -> Result<()> {
    let ranking = home::handle_show_ranking(app, site, ranking_type)
        .await
        .ok_or_else(|| failure(app))?;

    match output {
        Output::Json => print_json(&ranking)?,
        Output::Table => {
            println!("{}  {}", site_display_name(&ranking.site_name), ranking.title);
            if let Some(at) = &ranking.updated_at {
                println!("updated {}", at);
            }
            println!("{:>4}  {:<30}  {:<16}  {}", "RANK", "TITLE", "AUTHOR", "URL");
            for novel in &ranking.novels {
                println!(
                    "{:>4}  {:<30}  {:<16}  {}",
                    novel.rank,
                    clip(&novel.title, 30),
                    clip(&novel.author, 16),
                    novel.source_url
                );
            }
        }
    }
    Ok(())
}

/// The ranking lists one site offers.
pub async fn site(app: &App, site: &str, output: Output) -> Result<()> {
    let summaries = home::handle_site_rankings(app, site)
        .await
        .ok_or_else(|| failure(app))?;

    match output {
        Output::Json => print_json(&summaries)?,
        Output::Table => {
            println!("{}", site_display_name(site));
            println!("{:<12}  {:<24}  {:>6}  {}", "TYPE", "TITLE", "NOVELS", "UPDATED");
            for s in &summaries {
                println!(
                    "{:<12}  {:<24}  {:>6}  {}",
                    s.ranking_type,
                    clip(&s.title, 24),
                    s.novel_count,
                    s.updated_at.as_deref().unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

pub async fn fetch(app: &App, site: &str, ranking_type: &str) -> Result<()> {
    if !home::handle_fetch_ranking(app, site, ranking_type).await {
        return Err(failure(app));
    }
    Ok(())
}

pub async fn fetch_all(app: &App) -> Result<()> {
    if !home::handle_fetch_all(app).await {
        return Err(failure(app));
    }
    Ok(())
}

/// Collect entry `rank` of a ranking list.
pub async fn collect(app: &App, site: &str, ranking_type: &str, rank: u32) -> Result<()> {
    let ranking = home::handle_show_ranking(app, site, ranking_type)
        .await
        .ok_or_else(|| failure(app))?;
    let Some(entry) = ranking.novels.iter().find(|n| n.rank == rank) else {
        anyhow::bail!("No entry ranked {} in {}/{}.", rank, site, ranking_type);
    };

    match home::handle_collect(app, entry).await {
        CollectOutcome::Deferred => {
            println!(
                "Not logged in. \"{}\" will be collected after `shuxiang login`.",
                entry.title
            );
            Ok(())
        }
        CollectOutcome::Collected(_) | CollectOutcome::Duplicate => Ok(()),
        CollectOutcome::Failed => Err(failure(app)),
    }
}
