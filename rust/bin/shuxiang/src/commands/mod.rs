pub mod auth;
pub mod categories;
pub mod collections;
pub mod context;
pub mod novels;
pub mod pending;
pub mod rankings;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shuxiang_client::{App, NoticeKind, DEFAULT_FAILURE};
use shuxiang_kv::{KVStore, MemoryKV, RedbStore};
use tracing::debug;

use crate::config::ClientConfig;

/// How list commands print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Table,
    Json,
}

impl Output {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(Output::Table),
            "json" => Ok(Output::Json),
            other => anyhow::bail!("Unknown output format \"{}\" (use table or json).", other),
        }
    }
}

/// Build the client over the configured storage.
///
/// Success and info notices are printed as they arrive; error notices are
/// left for the command to turn into its exit error.
pub fn open_app(config: &ClientConfig, ephemeral: bool) -> Result<App> {
    let kv: Arc<dyn KVStore> = if ephemeral {
        Arc::new(MemoryKV::new())
    } else {
        let path = config.storage_path();
        Arc::new(
            RedbStore::open(&path)
                .with_context(|| format!("cannot open client storage {}", path.display()))?,
        )
    };
    let app = App::new(config.api_url(), kv)?;
    debug!(api = app.api.base_url(), ephemeral, "client ready");
    app.on_notice(|notice| match notice.kind {
        NoticeKind::Success | NoticeKind::Info => println!("{}", notice.message),
        NoticeKind::Error => {}
    });
    Ok(app)
}

/// The error to exit with after a handler reported failure.
pub fn failure(app: &App) -> anyhow::Error {
    match app.last_notice() {
        Some(n) if n.kind == NoticeKind::Error => anyhow::anyhow!(n.message),
        _ => anyhow::anyhow!(DEFAULT_FAILURE),
    }
}

pub fn require_login(app: &App) -> Result<()> {
    if !app.session.is_authenticated() {
        anyhow::bail!("Not logged in. Run `shuxiang login` first.");
    }
    Ok(())
}

/// Ask before something destructive. `yes` skips the prompt.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    eprint!("{} [y/N]: ", prompt);
    std::io::stderr().flush()?;
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().eq_ignore_ascii_case("y"))
}

/// Read one line from stdin after a prompt.
pub fn prompt_line(prompt: &str) -> Result<String> {
    eprint!("{}", prompt);
    std::io::stderr().flush()?;
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Cut `s` to at most `max` characters for table cells.
pub fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
