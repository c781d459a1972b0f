//! Line-oriented interactive loop over stdin.
#![deny(clippy::all, clippy::pedantic)]

use std::io::{IsTerminal, Write};

use postline::{
    application::{
        action::{SHELL_HELP, ShellCommand},
        app::App,
        error::AppError,
    },
    config::SiteSettings,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::render;

enum Input {
    Line(Option<String>),
    Fetched,
}

/// Commands are accepted while the initial fetch is still in flight; the
/// page is re-rendered once it settles.
pub async fn run(app: &mut App, site: &SiteSettings) -> Result<(), AppError> {
    let interactive = std::io::stdin().is_terminal();

    println!("{}", render(app, site)?);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("> ");
            std::io::stdout().flush()?;
        }

        let input = if app.is_loading() {
            tokio::select! {
                line = lines.next_line() => Input::Line(line?),
                () = app.settle() => Input::Fetched,
            }
        } else {
            Input::Line(lines.next_line().await?)
        };

        let line = match input {
            Input::Fetched => {
                debug!("initial fetch settled; refreshing page");
                if interactive {
                    println!();
                }
                println!("{}", render(app, site)?);
                continue;
            }
            Input::Line(Some(line)) => line,
            Input::Line(None) => {
                debug!("stdin closed; leaving shell");
                break;
            }
        };

        match ShellCommand::parse(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(ShellCommand::Help)) => println!("{SHELL_HELP}"),
            Ok(Some(ShellCommand::Action(action))) => {
                app.dispatch(action).await;
                println!("{}", render(app, site)?);
            }
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}
