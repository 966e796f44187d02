//! `shuxiang`: browse novel rankings and manage your collection.
//!
//! Collecting a ranking entry while logged out is remembered and finished
//! by the next `shuxiang login` (or `register`).

mod commands;
mod config;

use clap::{Parser, Subcommand};
use shuxiang_client::handlers::novels;
use shuxiang_client::model::{CollectionUpdate, NovelDraft, ReadingStatus};

use commands::Output;

/// Shuxiang novel collection CLI.
#[derive(Parser, Debug)]
#[command(name = "shuxiang", about = "Shuxiang novel collection client")]
struct Cli {
    /// Path to client config file (default: ~/.shuxiang/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    /// Keep session and pending collect in memory only for this run.
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in; finishes a pending collect if there is one.
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Password (prefer the interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and log in.
    Register {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the stored session.
    Logout,

    /// Show the logged-in user.
    Whoami,

    /// Ranking lists.
    Rankings {
        #[command(subcommand)]
        action: Option<RankingAction>,
    },

    /// Browse the shared novel catalogue.
    Novels {
        #[command(subcommand)]
        action: Option<NovelAction>,
    },

    /// Collect a ranking entry (deferred until login when logged out).
    Collect {
        /// Site key (qidian, zongheng, ...).
        site: String,
        /// Ranking type (monthly, ...).
        ranking_type: String,
        /// Rank of the entry within the list.
        rank: u32,
    },

    /// The collect waiting for login.
    Pending {
        #[command(subcommand)]
        action: Option<PendingAction>,
    },

    /// Your collections.
    Collections {
        #[command(subcommand)]
        action: Option<CollectionAction>,
    },

    /// Your categories.
    Categories {
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },

    /// Client configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum RankingAction {
    /// Every monthly ranking (the home view).
    List,
    /// The ranking lists one site offers.
    Site { site: String },
    /// One ranking list in full.
    Show { site: String, ranking_type: String },
    /// Ask the backend to re-crawl one list.
    Fetch { site: String, ranking_type: String },
    /// Ask the backend to re-crawl every list.
    FetchAll,
}

#[derive(Subcommand, Debug)]
enum NovelAction {
    /// One page of the catalogue, newest first.
    List {
        /// Page number, starting at 0.
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = novels::DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    Show { id: i64 },
}

#[derive(Subcommand, Debug)]
enum PendingAction {
    Show,
    Clear,
}

#[derive(Subcommand, Debug)]
enum CollectionAction {
    List {
        /// Match title or author (case-insensitive).
        #[arg(long)]
        search: Option<String>,
        /// Only this category id.
        #[arg(long)]
        category: Option<i64>,
    },
    /// Add a novel by hand.
    Add {
        title: String,
        /// Source page URL.
        #[arg(long)]
        url: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        cover: Option<String>,
        #[arg(long, default_value_t = 0)]
        chapters: u32,
        /// Serialization status shown on the novel.
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<i64>,
    },
    /// Change rating, status, progress, notes or category.
    Edit {
        id: i64,
        #[arg(long)]
        category: Option<i64>,
        /// 0-10.
        #[arg(long)]
        rating: Option<u8>,
        /// reading, completed or dropped.
        #[arg(long)]
        status: Option<ReadingStatus>,
        #[arg(long)]
        chapter: Option<u32>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete {
        id: i64,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CategoryAction {
    List,
    Add {
        name: String,
        /// Hex color, e.g. "#3b82f6".
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    Delete {
        id: i64,
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Show,
    Set {
        #[arg(long)]
        api_url: Option<String>,
        #[arg(long)]
        data_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::parse(&cli.output)?;

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);

    match cli.command {
        Commands::Config { action } => {
            return match action {
                ConfigAction::Show => commands::context::show(&config_path),
                ConfigAction::Set { api_url, data_dir } => {
                    commands::context::set(&config_path, api_url, data_dir)
                }
            };
        }
        Commands::Version => {
            println!("shuxiang cli v{}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let config = config::ClientConfig::load(&config_path)?;
    let app = commands::open_app(&config, cli.ephemeral)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&app, email, password).await?;
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            commands::auth::register(&app, username, email, password).await?;
        }
        Commands::Logout => commands::auth::logout(&app).await?,
        Commands::Whoami => commands::auth::whoami(&app, output).await?,

        Commands::Rankings { action } => match action.unwrap_or(RankingAction::List) {
            RankingAction::List => commands::rankings::list(&app, output).await?,
            RankingAction::Site { site } => commands::rankings::site(&app, &site, output).await?,
            RankingAction::Show { site, ranking_type } => {
                commands::rankings::show(&app, &site, &ranking_type, output).await?
            }
            RankingAction::Fetch { site, ranking_type } => {
                commands::rankings::fetch(&app, &site, &ranking_type).await?
            }
            RankingAction::FetchAll => commands::rankings::fetch_all(&app).await?,
        },

        Commands::Novels { action } => match action.unwrap_or(NovelAction::List {
            page: 0,
            size: novels::DEFAULT_PAGE_SIZE,
        }) {
            NovelAction::List { page, size } => {
                commands::novels::list(&app, page, size, output).await?
            }
            NovelAction::Show { id } => commands::novels::show(&app, id, output).await?,
        },

        Commands::Collect {
            site,
            ranking_type,
            rank,
        } => {
            commands::rankings::collect(&app, &site, &ranking_type, rank).await?;
        }

        Commands::Pending { action } => match action.unwrap_or(PendingAction::Show) {
            PendingAction::Show => commands::pending::show(&app, output)?,
            PendingAction::Clear => commands::pending::clear(&app)?,
        },

        Commands::Collections { action } => match action.unwrap_or(CollectionAction::List {
            search: None,
            category: None,
        }) {
            CollectionAction::List { search, category } => {
                commands::collections::list(&app, search.as_deref(), category, output).await?
            }
            CollectionAction::Add {
                title,
                url,
                author,
                description,
                cover,
                chapters,
                status,
                category,
            } => {
                let draft = NovelDraft {
                    title,
                    author,
                    description,
                    cover_url: cover,
                    source_url: url,
                    source_site: None,
                    total_chapters: chapters,
                    status,
                };
                commands::collections::add(&app, draft, category).await?
            }
            CollectionAction::Edit {
                id,
                category,
                rating,
                status,
                chapter,
                notes,
            } => {
                let update = CollectionUpdate {
                    category_id: category,
                    rating,
                    reading_status: status,
                    current_chapter: chapter,
                    notes,
                };
                commands::collections::edit(&app, id, update).await?
            }
            CollectionAction::Delete { id, yes } => {
                commands::collections::delete(&app, id, yes).await?
            }
        },

        Commands::Categories { action } => match action.unwrap_or(CategoryAction::List) {
            CategoryAction::List => commands::categories::list(&app, output).await?,
            CategoryAction::Add { name, color, icon } => {
                commands::categories::add(&app, name, color, icon).await?
            }
            CategoryAction::Edit {
                id,
                name,
                color,
                icon,
            } => commands::categories::edit(&app, id, name, color, icon).await?,
            CategoryAction::Delete { id, yes } => {
                commands::categories::delete(&app, id, yes).await?
            }
        },

        Commands::Config { .. } | Commands::Version => {}
    }

    Ok(())
}
