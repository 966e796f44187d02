//! `shuxiang novels list|show`.

use anyhow::Result;
use shuxiang_client::handlers::novels;
use shuxiang_client::model::Id;
use shuxiang_client::site::site_display_name;
use shuxiang_client::App;

use super::{clip, failure, print_json, Output};

pub async fn list(app: &App, page: u32, size: u32, output: Output) -> Result<()> {
    let found = novels::handle_list(app, page, size)
        .await
        .ok_or_else(|| failure(app))?;

    match output {
        Output::Json => print_json(&found.content)?,
        Output::Table => {
            println!("{:>6}  {:<30}  {:<16}  {}", "ID", "TITLE", "AUTHOR", "SITE");
            for n in &found.content {
                println!(
                    "{:>6}  {:<30}  {:<16}  {}",
                    n.id,
                    clip(&n.title, 30),
                    clip(n.author.as_deref().unwrap_or(""), 16),
                    n.source_site.as_deref().map(site_display_name).unwrap_or("-"),
                );
            }
            println!("page {} · {} novels in total", page, found.total_elements);
        }
    }
    Ok(())
}

pub async fn show(app: &App, id: Id, output: Output) -> Result<()> {
    let novel = novels::handle_show(app, id).await.ok_or_else(|| failure(app))?;

    match output {
        Output::Json => print_json(&novel)?,
        Output::Table => {
            println!("title:     {}", novel.title);
            println!("author:    {}", novel.author.as_deref().unwrap_or("-"));
            println!("status:    {}", novel.status.as_deref().unwrap_or("-"));
            println!("chapters:  {}", novel.total_chapters);
            println!("source:    {}", novel.source_url);
            if let Some(description) = &novel.description {
                println!();
                println!("{}", description);
            }
        }
    }
    Ok(())
}
