//! Navigation, the route guard, and user-visible notices.
//!
//! The current view lives at `app/route`; blocking notifications are
//! published at `app/notice`. Front-ends subscribe to both.

use std::fmt;

use shuxiang_flux::{State, StateStore};
use tracing::debug;

use crate::session::AuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Collections,
    AddNovel,
    Categories,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Collections => "/collections",
            Route::AddNovel => "/collections/add",
            Route::Categories => "/categories",
        }
    }

    /// Views that require a session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Collections | Route::AddNovel | Route::Categories)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Current view.
#[derive(Debug, Clone, PartialEq)]
pub struct AppRoute(pub Route);

impl State for AppRoute {
    const PATH: &'static str = "app/route";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A blocking notification (the browser's `alert`).
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl State for Notice {
    const PATH: &'static str = "app/notice";
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }
}

pub fn navigate(store: &StateStore, route: Route) {
    debug!(%route, "navigate");
    store.put(AppRoute(route));
}

pub fn notify(store: &StateStore, notice: Notice) {
    store.put(notice);
}

/// Route currently shown; Home before any navigation.
pub fn current(store: &StateStore) -> Route {
    store.read::<AppRoute>().map(|r| r.0).unwrap_or(Route::Home)
}

/// The route guard: protected views resolve to Login without a session.
///
/// This is a UX convenience only; the backend rejects unauthorised calls
/// on its own.
pub fn guard(store: &StateStore, route: Route) -> Route {
    let authed = store
        .read::<AuthState>()
        .map(|s| s.is_authenticated())
        .unwrap_or(false);
    if route.is_protected() && !authed {
        Route::Login
    } else {
        route
    }
}

/// Navigate to `route` through the guard. Returns the route actually shown.
pub fn open(store: &StateStore, route: Route) -> Route {
    let shown = guard(store, route);
    navigate(store, shown);
    shown
}

/// Gate an action on a protected view. Without a session this navigates
/// to Login and returns false.
pub fn require(store: &StateStore, route: Route) -> bool {
    if guard(store, route) == route {
        true
    } else {
        navigate(store, Route::Login);
        false
    }
}
