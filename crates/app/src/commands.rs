//! Command dispatch.
//!
//! Every directory command opens a fresh screen, so each invocation resolves
//! the stored session once and owns its own cache.

use std::process::ExitCode;
use std::sync::Arc;

use studex_application::auth::{LoginRequest, RegistrationRequest};
use studex_application::{ApplicationError, ClientContext, DirectoryScreen};
use studex_domain::{FailureKind, StudentId, StudentRecord, ViewState};
use tracing::debug;

use crate::cli::Command;
use crate::render;

pub async fn run(command: Command, ctx: &ClientContext) -> ExitCode {
    match command {
        Command::Login { username, password } => login(ctx, &username, password).await,
        Command::Register {
            name,
            email,
            password,
        } => register(ctx, RegistrationRequest::new(name, email, password)).await,
        Command::Roster => {
            let screen = DirectoryScreen::open(ctx).await;
            let state = screen.roster().await;
            list(&screen, state, "No students found.")
        }
        Command::Birthdays => {
            let screen = DirectoryScreen::open(ctx).await;
            let state = screen.birthdays().await;
            list(&screen, state, "No birthdays today.")
        }
        Command::Search { id } => search(ctx, &id).await,
        Command::ImageUrl { id } => {
            println!("{}", ctx.settings.image_url(StudentId(id)));
            ExitCode::SUCCESS
        }
        Command::Logout { forget } => logout(ctx, forget).await,
    }
}

async fn login(ctx: &ClientContext, username: &str, password: String) -> ExitCode {
    let request = LoginRequest::new(username, password);
    match ctx.authenticator().login(&request).await {
        Ok(_) => {
            println!("Logged in as {username}.");
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

async fn register(ctx: &ClientContext, request: RegistrationRequest) -> ExitCode {
    match ctx.authenticator().register(&request).await {
        Ok(()) => {
            println!("Registered {}. You can now log in.", request.email);
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn list(
    screen: &DirectoryScreen,
    state: ViewState<Arc<Vec<StudentRecord>>>,
    empty: &str,
) -> ExitCode {
    match state {
        ViewState::Loaded(records) => {
            print!("{}", render::roster(&records, empty, |r| screen.image_url(r)));
            ExitCode::SUCCESS
        }
        other => report(&other),
    }
}

async fn search(ctx: &ClientContext, id: &str) -> ExitCode {
    let mut screen = DirectoryScreen::open(ctx).await;
    let state = screen.search(id).await;
    match (&state, screen.selection().selected()) {
        (ViewState::Loaded(_), Some(selected)) => {
            print!("{}", render::detail(selected, &screen.image_url(selected)));
            ExitCode::SUCCESS
        }
        _ => report(&state),
    }
}

async fn logout(ctx: &ClientContext, forget: bool) -> ExitCode {
    let screen = DirectoryScreen::open(ctx).await;
    let was_authenticated = screen.session().is_authenticated();
    screen.logout();

    if forget {
        if let Err(e) = ctx.authenticator().forget_credential().await {
            return fail(&e);
        }
        println!("Logged out and cleared stored credentials.");
    } else if was_authenticated {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    ExitCode::SUCCESS
}

fn report<T>(state: &ViewState<T>) -> ExitCode {
    match state {
        ViewState::Failed { kind, message } => eprintln!("{}", render::failure(*kind, message)),
        ViewState::Unauthorized => eprintln!("{}", ApplicationError::SessionAbsent.user_message()),
        ViewState::AwaitingSession => {
            // An opened screen has always resolved its session.
            debug!("session still resolving after open");
            eprintln!("{}", ApplicationError::SessionUnresolved.user_message());
        }
        ViewState::Loaded(_) => debug!("loaded state reported as failure"),
    }
    ExitCode::FAILURE
}

fn fail(error: &ApplicationError) -> ExitCode {
    debug!(error = %error, "command failed");
    let kind = error.kind().unwrap_or(FailureKind::Auth);
    eprintln!("{}", render::failure(kind, error.user_message()));
    ExitCode::FAILURE
}
