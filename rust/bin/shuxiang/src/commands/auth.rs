//! Login / register / logout / whoami.

use anyhow::Result;
use shuxiang_client::handlers::auth;
use shuxiang_client::model::{LoginRequest, RegisterRequest};
use shuxiang_client::state::{LoginForm, RegisterForm};
use shuxiang_client::{App, DrainOutcome, Route};

use super::{failure, prompt_line, Output};

pub async fn login(app: &App, email: Option<String>, password: Option<String>) -> Result<()> {
    let email = match email {
        Some(e) => e,
        None => prompt_line("Email: ")?,
    };
    let password = match password {
        Some(p) => p,
        None => rpassword::prompt_password("Password: ")?,
    };

    let req = LoginRequest { email, password };
    let announce = app.session.subscribe(|state| {
        if let Some(user) = state.user() {
            println!("Logged in as {}.", user.username);
        }
    });
    let outcome = auth::handle_login(app, &req).await;
    app.session.unsubscribe(announce);

    match outcome {
        Some(outcome) => {
            report_drain(app, &outcome);
            Ok(())
        }
        None => {
            let form = app.store.read::<LoginForm>().unwrap_or_default();
            anyhow::bail!("Login failed: {}", form.error.unwrap_or_else(|| "unknown error".into()))
        }
    }
}

pub async fn register(
    app: &App,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt_line("Username: ")?,
    };
    let email = match email {
        Some(e) => e,
        None => prompt_line("Email: ")?,
    };
    let (password, confirm) = match password {
        Some(p) => (p.clone(), p),
        None => (
            rpassword::prompt_password("Password: ")?,
            rpassword::prompt_password("Confirm password: ")?,
        ),
    };

    let req = RegisterRequest { username, email, password };
    match auth::handle_register(app, &req, &confirm).await {
        Some(outcome) => {
            println!("Registered as {}.", req.username);
            report_drain(app, &outcome);
            Ok(())
        }
        None => {
            let form = app.store.read::<RegisterForm>().unwrap_or_default();
            anyhow::bail!(
                "Registration failed: {}",
                form.error.unwrap_or_else(|| "unknown error".into())
            )
        }
    }
}

pub async fn logout(app: &App) -> Result<()> {
    if !app.session.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    if !auth::handle_logout(app).await {
        return Err(failure(app));
    }
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(app: &App, output: Output) -> Result<()> {
    if !app.session.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    let user = auth::handle_me(app).await.ok_or_else(|| failure(app))?;
    match output {
        Output::Json => super::print_json(&user)?,
        Output::Table => println!("{} <{}> (id {})", user.username, user.email, user.id),
    }
    Ok(())
}

/// The replayed collect speaks for itself through its notice; a failed
/// or corrupt one stays quiet.
fn report_drain(app: &App, outcome: &DrainOutcome) {
    if outcome.is_collected() && app.route() == Route::Collections {
        println!("Run `shuxiang collections` to see it.");
    }
    if let DrainOutcome::Busy = outcome {
        eprintln!("A pending collect is already being replayed.");
    }
}
