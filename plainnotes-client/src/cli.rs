use clap::{Parser, Subcommand};
use data::NoteId;
use plainnotes_client::constants::DEFAULT_API_URL;

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, author, about)]
pub struct CliConfig {
    /// Root of the notes API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum CliCommand {
    /// List all notes
    List,

    /// Print a single note
    Show {
        id: NoteId,
    },

    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,
    },

    /// Replace the title and/or description of a note
    Edit {
        id: NoteId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    Delete {
        id: NoteId,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y', default_value_t = false)]
        yes: bool,
    },
}
