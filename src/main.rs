//! postline: terminal front-end for a blog kept in a JSON REST collection.
#![deny(clippy::all, clippy::pedantic)]

use std::{process, sync::Arc};

use postline::{
    application::{action::Action, app::App, error::AppError},
    config::{self, Command, SiteSettings},
    infra::{http::HttpPostsRepo, telemetry},
    presentation::views::{LayoutChrome, render_page},
};
use tracing::{Dispatch, Level, debug, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

mod shell;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging)?;

    let repo = HttpPostsRepo::new(settings.api.base_url.as_str())?;
    debug!(api = %repo.base(), "mounting application");
    let mut app = App::mount(Arc::new(repo));

    match cli_args.command.unwrap_or(Command::Shell) {
        Command::Shell => shell::run(&mut app, &settings.site).await,
        command => run_once(&mut app, &settings.site, command).await,
    }
}

async fn run_once(app: &mut App, site: &SiteSettings, command: Command) -> Result<(), AppError> {
    app.settle().await;
    for action in script(command) {
        app.dispatch(action).await;
    }
    println!("{}", render(app, site)?);
    Ok(())
}

/// The user interactions a one-shot command stands for.
fn script(command: Command) -> Vec<Action> {
    match command {
        Command::Shell => Vec::new(),
        Command::Home { search } => vec![
            Action::Navigate("/".into()),
            Action::Search(search.unwrap_or_default()),
        ],
        Command::Show { id } => vec![Action::Navigate(format!("/post/{id}"))],
        Command::New { title, body } => vec![
            Action::Navigate("/post".into()),
            Action::SetTitle(title),
            Action::SetBody(body),
            Action::Submit,
        ],
        Command::Edit { id, title, body } => {
            let mut actions = vec![Action::Navigate(format!("/edit/{id}"))];
            if let Some(title) = title {
                actions.push(Action::SetTitle(title));
            }
            if let Some(body) = body {
                actions.push(Action::SetBody(body));
            }
            actions.push(Action::Submit);
            actions
        }
        Command::Delete { id } => vec![Action::Navigate(format!("/post/{id}")), Action::Delete],
        Command::About => vec![Action::Navigate("/about".into())],
        Command::Open { path } => vec![Action::Navigate(path)],
    }
}

fn render(app: &App, site: &SiteSettings) -> Result<String, AppError> {
    let chrome = LayoutChrome::current(&site.title, app.search());
    Ok(render_page(app, chrome)?)
}
