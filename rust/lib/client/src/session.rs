//! Session Store: the auth token and user, persisted as a pair.
//!
//! The in-memory session is published at `auth/state`, so subscribers
//! hear about login and logout synchronously. `is_authenticated` is always
//! derived from that state.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shuxiang_flux::{State, StateStore, SubscriptionId};
use shuxiang_kv::{KVError, KVStore};
use tracing::{debug, info, warn};

use crate::api::TokenSource;
use crate::error::ClientError;
use crate::model::User;
use crate::route::{self, Route};

pub const TOKEN_KEY: &str = "auth:token";
pub const USER_KEY: &str = "auth:user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Authentication state. The UI reads this to decide what to show.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
}

impl State for AuthState {
    const PATH: &'static str = "auth/state";
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }
}

/// Handle to the current session. Shared via `Arc`.
pub struct SessionStore {
    kv: Arc<dyn KVStore>,
    store: Arc<StateStore>,
}

impl SessionStore {
    /// Create the handle. Nothing is read until [`SessionStore::load`].
    pub fn new(kv: Arc<dyn KVStore>, store: Arc<StateStore>) -> Self {
        Self { kv, store }
    }

    /// Restore the persisted pair.
    ///
    /// A pair that does not parse (or is half present) is cleared and the
    /// client carries on unauthenticated.
    pub fn load(&self) -> Result<Option<Session>, ClientError> {
        let token = self.kv.get(TOKEN_KEY)?;
        let user = self.kv.get(USER_KEY)?;

        let session = match (token, user) {
            (None, None) => None,
            (Some(token), Some(user)) => match decode_pair(token, &user) {
                Some(session) => Some(session),
                None => {
                    warn!("persisted session is corrupt, discarding");
                    self.clear_persisted()?;
                    None
                }
            },
            _ => {
                warn!("persisted session is incomplete, discarding");
                self.clear_persisted()?;
                None
            }
        };

        debug!(authenticated = session.is_some(), "session loaded");
        self.publish(session.clone());
        Ok(session)
    }

    /// Persist the pair, then publish it.
    pub fn login(&self, token: impl Into<String>, user: User) -> Result<(), ClientError> {
        let session = Session { token: token.into(), user };
        let user_json = serde_json::to_vec(&session.user)
            .map_err(|e| KVError::Serialization(e.to_string()))?;
        self.kv.batch_set(&[
            (TOKEN_KEY, session.token.as_bytes()),
            (USER_KEY, user_json.as_slice()),
        ])?;

        info!(user = %session.user.username, "logged in");
        self.publish(Some(session));
        Ok(())
    }

    /// Clear the pair, publish the empty session and go home.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.clear_persisted()?;
        info!("logged out");
        self.publish(None);
        route::navigate(&self.store, Route::Home);
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.store.read::<AuthState>().and_then(|s| s.session)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    pub fn user(&self) -> Option<User> {
        self.current().map(|s| s.user)
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|s| s.token)
    }

    /// Call `f` on every session change, on the thread making the change.
    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        self.store.subscribe(AuthState::PATH, move |_, value| {
            if let Some(state) = value.downcast_ref::<AuthState>() {
                f(state);
            }
        })
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.store.unsubscribe(id);
    }

    fn publish(&self, session: Option<Session>) {
        self.store.put(AuthState { session });
    }

    fn clear_persisted(&self) -> Result<(), ClientError> {
        self.kv.batch_delete(&[TOKEN_KEY, USER_KEY])?;
        Ok(())
    }
}

fn decode_pair(token: Vec<u8>, user: &[u8]) -> Option<Session> {
    let token = String::from_utf8(token).ok().filter(|t| !t.is_empty())?;
    let user = serde_json::from_slice::<User>(user).ok()?;
    Some(Session { token, user })
}

#[async_trait::async_trait]
impl TokenSource for SessionStore {
    async fn token(&self) -> Result<Option<String>, ClientError> {
        Ok(SessionStore::token(self))
    }
}
