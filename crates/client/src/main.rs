//! `notes-client` -- terminal front end for the notes API.
//!
//! Reads one command per line from stdin and prints the rendered view after
//! each change. Saves and deletes run on spawned tasks, so further commands
//! are accepted while requests are in flight.
//!
//! # Environment variables
//!
//! | Variable        | Required | Description                                  |
//! |-----------------|----------|----------------------------------------------|
//! | `NOTES_API_URL` | yes      | Base URL of the notes API, e.g. `http://localhost:4000` |
//! | `RUST_LOG`      | no       | Log filter (default `notes_client=warn`), logs go to stderr |

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes_client::api::ApiClient;
use notes_client::config::ClientConfig;
use notes_client::controller::NotesController;
use notes_core::notes::TITLE_AND_CONTENT_REQUIRED;
use notes_core::types::DbId;

type Controller = NotesController<ApiClient>;

const HELP: &str = "\
Commands:
  title <text>     set the form title
  content <text>   set the form content
  save             add the note, or save changes in edit mode
  edit <id>        load a note into the form
  cancel           leave edit mode and clear the form
  delete <id>      delete a note
  reload           fetch all notes again
  show             print the current view
  help             print this help
  quit             exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Title(String),
    Content(String),
    Save,
    Edit(DbId),
    Cancel,
    Delete(DbId),
    Reload,
    Show,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let id = || {
            rest.parse::<DbId>()
                .map_err(|_| format!("'{word}' needs a numeric note id"))
        };

        match word {
            "title" => Ok(Self::Title(rest.to_string())),
            "content" => Ok(Self::Content(rest.to_string())),
            "save" => Ok(Self::Save),
            "edit" => id().map(Self::Edit),
            "cancel" => Ok(Self::Cancel),
            "delete" => id().map(Self::Delete),
            "reload" => Ok(Self::Reload),
            "show" | "" => Ok(Self::Show),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("Unknown command '{other}'. Type 'help'.")),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env().context("Invalid client configuration")?;
    tracing::info!(api_url = %config.api_url, "Starting notes-client");

    let controller = Arc::new(NotesController::new(ApiClient::new(&config.api_url)));

    controller.load().await;
    print!("{}", controller.view().await);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => run(command, &controller).await,
            Err(message) => println!("{message}"),
        }
    }

    Ok(())
}

async fn run(command: Command, controller: &Arc<Controller>) {
    match command {
        Command::Title(text) => {
            controller.set_title(text).await;
            show(controller).await;
        }
        Command::Content(text) => {
            controller.set_content(text).await;
            show(controller).await;
        }
        Command::Save => {
            let state = controller.snapshot().await;
            if state.saving {
                println!("A save is already in progress.");
                return;
            }
            if !state.can_submit() {
                println!("Cannot save: {TITLE_AND_CONTENT_REQUIRED}.");
                return;
            }
            let controller = Arc::clone(controller);
            tokio::spawn(async move {
                if controller.submit().await {
                    show(&controller).await;
                }
            });
        }
        Command::Edit(id) => {
            let view = controller.view().await;
            match view.cards.iter().find(|card| card.id == id) {
                None => println!("No note #{id}."),
                Some(card) if card.edit.disabled => println!("Note #{id} is busy."),
                Some(_) => {
                    controller.start_edit(id).await;
                    show(controller).await;
                }
            }
        }
        Command::Cancel => {
            if controller.snapshot().await.saving {
                println!("Cannot cancel while saving.");
                return;
            }
            controller.reset_form().await;
            show(controller).await;
        }
        Command::Delete(id) => {
            let view = controller.view().await;
            match view.cards.iter().find(|card| card.id == id) {
                None => {
                    println!("No note #{id}.");
                    return;
                }
                Some(card) if card.delete.disabled => {
                    println!("Note #{id} is busy.");
                    return;
                }
                Some(_) => {}
            }
            let controller = Arc::clone(controller);
            tokio::spawn(async move {
                if controller.delete(id).await {
                    show(&controller).await;
                } else {
                    println!("Note #{id} is busy.");
                }
            });
        }
        Command::Reload => {
            controller.load().await;
            show(controller).await;
        }
        Command::Show => show(controller).await,
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}

async fn show(controller: &Controller) {
    println!();
    print!("{}", controller.view().await);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_commands() {
        assert_eq!(
            Command::parse("title  Shopping list "),
            Ok(Command::Title("Shopping list".into()))
        );
        assert_eq!(Command::parse("content"), Ok(Command::Content(String::new())));
    }

    #[test]
    fn parses_id_commands() {
        assert_eq!(Command::parse("delete 12"), Ok(Command::Delete(12)));
        assert_eq!(Command::parse("edit 3"), Ok(Command::Edit(3)));
        assert!(Command::parse("edit three").is_err());
    }

    #[test]
    fn blank_line_shows_view() {
        assert_eq!(Command::parse("   "), Ok(Command::Show));
    }

    #[test]
    fn unknown_command_rejected() {
        assert!(Command::parse("frobnicate").is_err());
    }
}
