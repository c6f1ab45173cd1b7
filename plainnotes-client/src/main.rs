mod cli;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use clap::Parser;
use data::validation::NoteField;
use data::{Note, NoteId};
use plainnotes_client::{HttpNotesApi, NotesApi, NotesView, SubmitOutcome};
use crate::cli::{CliCommand, CliConfig};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let cli_config = CliConfig::parse();
    let mut view = NotesView::new(HttpNotesApi::new(cli_config.api_url));

    let is_ok = match cli_config.command {
        CliCommand::Show { id } => show(view.api(), id).await,
        CliCommand::List => {
            let is_mounted = mount(&mut view).await;
            if is_mounted {
                view.notes().iter().for_each(print_note_line);
            }
            is_mounted
        },
        CliCommand::Create { title, description } => {
            if !mount(&mut view).await {
                return ExitCode::FAILURE
            }
            view.open_create();
            view.set_field(NoteField::Title, title);
            view.set_field(NoteField::Description, description);
            submit(&mut view).await
        },
        CliCommand::Edit { id, title, description } => {
            if !mount(&mut view).await {
                return ExitCode::FAILURE
            }
            if view.open_edit(id) {
                if let Some(title) = title {
                    view.set_field(NoteField::Title, title);
                }
                if let Some(description) = description {
                    view.set_field(NoteField::Description, description);
                }
                submit(&mut view).await
            } else {
                eprintln!("Note not found");
                false
            }
        },
        CliCommand::Delete { id, yes } => {
            mount(&mut view).await && delete(&mut view, id, yes).await
        },
    };
    if is_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn show(api: &impl NotesApi, id: NoteId) -> bool {
    match api.get(id).await {
        Ok(note) => {
            print_note(&note);
            true
        },
        Err(e) => {
            eprintln!("{e}");
            false
        },
    }
}

async fn mount<A: NotesApi>(view: &mut NotesView<A>) -> bool {
    view.mount().await;
    match view.error() {
        Some(message) => {
            eprintln!("{message}");
            false
        },
        None => true,
    }
}

async fn submit<A: NotesApi>(view: &mut NotesView<A>) -> bool {
    match view.submit().await {
        SubmitOutcome::Saved(note) => {
            print_note(&note);
            true
        },
        SubmitOutcome::Invalid => {
            for field in NoteField::ALL {
                if let Some(message) = view.form().error(field) {
                    eprintln!("{message}");
                }
            }
            false
        },
        SubmitOutcome::Failed | SubmitOutcome::NoDialog => {
            if let Some(message) = view.error() {
                eprintln!("{message}");
            }
            false
        },
    }
}

async fn delete<A: NotesApi>(view: &mut NotesView<A>, id: NoteId, yes: bool) -> bool {
    view.request_delete(id);
    if !yes && !confirm(&format!("Delete note {id}? This cannot be undone. [y/N] ")) {
        view.cancel_delete();
        eprintln!("Cancelled");
        return true
    }
    if view.confirm_delete().await {
        true
    } else {
        if let Some(message) = view.error() {
            eprintln!("{message}");
        }
        false
    }
}

fn confirm(prompt: &str) -> bool {
    eprint!("{prompt}");
    if io::stderr().flush().is_err() {
        return false
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

fn print_note_line(note: &Note) {
    println!("{}  {}", note.id, note.title);
}

fn print_note(note: &Note) {
    println!("id:          {}", note.id);
    println!("title:       {}", note.title);
    println!("description: {}", note.description);
    println!("created:     {}", note.created_at);
    if let Some(updated_at) = note.updated_at {
        println!("updated:     {updated_at}");
    }
}

fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init()
}
