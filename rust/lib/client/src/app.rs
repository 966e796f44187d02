//! The application context handed to every handler.

use std::sync::Arc;

use shuxiang_flux::{StateStore, SubscriptionId};
use shuxiang_kv::KVStore;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::pending::PendingQueue;
use crate::route::{self, Notice, Route};
use crate::session::SessionStore;

/// Owns the state store, the session handle, the pending queue and the
/// gateway. The gateway reads its bearer token from the session handle,
/// so a login is visible to the very next request.
pub struct App {
    pub store: Arc<StateStore>,
    pub session: Arc<SessionStore>,
    pub pending: PendingQueue,
    pub api: ApiClient,
}

impl App {
    /// Wire everything over `kv` and restore any persisted session.
    pub fn new(base_url: impl Into<String>, kv: Arc<dyn KVStore>) -> Result<Self, ClientError> {
        let store = Arc::new(StateStore::new());
        let session = Arc::new(SessionStore::new(kv.clone(), store.clone()));
        let api = ApiClient::new(base_url, session.clone());
        let pending = PendingQueue::new(kv);
        session.load()?;
        Ok(Self { store, session, pending, api })
    }

    pub fn route(&self) -> Route {
        route::current(&self.store)
    }

    pub fn last_notice(&self) -> Option<Notice> {
        self.store.read::<Notice>()
    }

    /// Call `f` for every notice as it is published.
    pub fn on_notice<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&Notice) + Send + Sync + 'static,
    {
        self.store.subscribe(<Notice as shuxiang_flux::State>::PATH, move |_, value| {
            if let Some(notice) = value.downcast_ref::<Notice>() {
                f(notice);
            }
        })
    }
}
