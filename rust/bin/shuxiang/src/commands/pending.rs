//! Inspect or drop the collect waiting for login.

use anyhow::Result;
use shuxiang_client::{App, QueueState};

use super::{print_json, Output};

pub fn show(app: &App, output: Output) -> Result<()> {
    if app.pending.state()? == QueueState::Draining {
        println!("A pending collect is being replayed.");
        return Ok(());
    }
    match app.pending.peek() {
        Ok(Some(intent)) => match output {
            Output::Json => print_json(&intent)?,
            Output::Table => {
                println!("title:   {}", intent.title);
                println!("author:  {}", intent.author);
                println!("source:  {} ({})", intent.source_url, intent.source_site);
                println!("status:  {}", intent.status);
            }
        },
        Ok(None) => println!("No pending collect."),
        Err(e) => println!("Pending collect is unreadable ({}); it will be discarded at next login.", e),
    }
    Ok(())
}

pub fn clear(app: &App) -> Result<()> {
    app.pending.clear()?;
    println!("Pending collect cleared.");
    Ok(())
}
