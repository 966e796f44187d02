//! Login, register, logout.
//!
//! A successful login or register populates the session first, then
//! drains the pending queue exactly once and picks where to land.

use shuxiang_flux::State;
use tracing::warn;

use crate::app::App;
use crate::model::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::pending::DrainOutcome;
use crate::route::{self, Notice, Route};
use crate::state::{
    AddNovelForm, CategoriesPage, CollectionsPage, EditCollectionForm, HomePage, LoginForm,
    RegisterForm,
};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Handle the login form. Returns the drain outcome on success, `None`
/// when login failed (the reason is in [`LoginForm::error`]).
pub async fn handle_login(app: &App, req: &LoginRequest) -> Option<DrainOutcome> {
    app.store.put(LoginForm { busy: true, error: None });

    if req.email.trim().is_empty() || req.password.is_empty() {
        app.store.put(LoginForm {
            busy: false,
            error: Some("email and password are required".into()),
        });
        return None;
    }

    match app.api.auth().login(req).await {
        Ok(resp) => match establish(app, resp) {
            Ok(()) => {
                app.store.put(LoginForm::default());
                Some(after_auth(app).await)
            }
            Err(message) => {
                app.store.put(LoginForm { busy: false, error: Some(message) });
                None
            }
        },
        Err(e) => {
            warn!(error = %e, "login failed");
            app.store.put(LoginForm {
                busy: false,
                error: Some(e.user_message()),
            });
            None
        }
    }
}

/// Handle the register form. Passwords are checked locally first.
pub async fn handle_register(
    app: &App,
    req: &RegisterRequest,
    confirm_password: &str,
) -> Option<DrainOutcome> {
    let invalid = if req.username.trim().is_empty() || req.email.trim().is_empty() {
        Some("username and email are required")
    } else if req.password != confirm_password {
        Some("passwords do not match")
    } else if req.password.chars().count() < MIN_PASSWORD_LEN {
        Some("password must be at least 6 characters")
    } else {
        None
    };
    if let Some(message) = invalid {
        app.store.put(RegisterForm {
            busy: false,
            error: Some(message.into()),
        });
        return None;
    }

    app.store.put(RegisterForm { busy: true, error: None });
    match app.api.auth().register(req).await {
        Ok(resp) => match establish(app, resp) {
            Ok(()) => {
                app.store.put(RegisterForm::default());
                Some(after_auth(app).await)
            }
            Err(message) => {
                app.store.put(RegisterForm { busy: false, error: Some(message) });
                None
            }
        },
        Err(e) => {
            warn!(error = %e, "register failed");
            app.store.put(RegisterForm {
                busy: false,
                error: Some(e.user_message()),
            });
            None
        }
    }
}

/// Clear the session and every page that shows private data.
pub async fn handle_logout(app: &App) -> bool {
    if let Err(e) = app.session.logout() {
        warn!(error = %e, "logout failed");
        route::notify(&app.store, Notice::error(e.user_message()));
        return false;
    }
    app.store.remove(CollectionsPage::PATH);
    app.store.remove(CategoriesPage::PATH);
    app.store.remove(AddNovelForm::PATH);
    app.store.remove(EditCollectionForm::PATH);
    if app.store.read::<HomePage>().is_some() {
        app.store.update::<HomePage, _>(|home| home.recent.clear());
    }
    true
}

/// Ask the backend who the token belongs to.
pub async fn handle_me(app: &App) -> Option<User> {
    match app.api.auth().me().await {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "me failed");
            route::notify(&app.store, Notice::error(e.user_message()));
            None
        }
    }
}

fn establish(app: &App, resp: AuthResponse) -> Result<(), String> {
    app.session.login(resp.token, resp.user).map_err(|e| {
        warn!(error = %e, "cannot persist session");
        e.user_message()
    })
}

/// Drain the pending collect and land on the right view.
async fn after_auth(app: &App) -> DrainOutcome {
    let outcome = app.pending.drain(&app.api).await;
    match &outcome {
        DrainOutcome::Collected { title, .. } => {
            route::notify(&app.store, Notice::success(format!("Collected \"{}\"", title)));
            route::navigate(&app.store, Route::Collections);
        }
        _ => route::navigate(&app.store, Route::Home),
    }
    outcome
}
