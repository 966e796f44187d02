//! Shuxiang novel-collection client.
//!
//! Talks to the Shuxiang backend (auth, novels, collections, categories,
//! rankings) and keeps all view state in a flux [`StateStore`], so any
//! front-end can drive it by calling handlers and subscribing to paths.
//!
//! The interesting part is the login handoff: collecting a ranking entry
//! while logged out stashes the intent in durable storage
//! ([`pending::PendingQueue`]), sends the user to login, and replays the
//! collect exactly once after authentication.
//!
//! # Usage
//!
//! ```ignore
//! let kv = Arc::new(RedbStore::open(&data_dir.join("client.redb"))?);
//! let app = App::new("http://localhost:8080/api", kv)?;
//! handlers::auth::handle_login(&app, &LoginRequest { email, password }).await;
//! ```
//!
//! [`StateStore`]: shuxiang_flux::StateStore

pub mod api;
pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod pending;
pub mod route;
pub mod session;
pub mod site;
pub mod state;

pub use api::{ApiClient, TokenSource, DEFAULT_BASE_URL};
pub use app::App;
pub use error::{ClientError, DEFAULT_FAILURE};
pub use pending::{DrainOutcome, PendingCollect, PendingQueue, QueueState};
pub use route::{Notice, NoticeKind, Route};
pub use session::{AuthState, Session, SessionStore};
