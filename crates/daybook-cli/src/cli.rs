use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Write journal entries and keep to-dos and goals from the command line")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Journal backend URL (overrides config file and environment)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Send attachment data with entries
    #[arg(long, global = true)]
    pub include_media: bool,

    /// Path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a journal entry
    Entry {
        /// Entry title
        #[arg(long, default_value = "")]
        title: String,
        /// Blocks in order: text:..., image:PATH, video:PATH, voice:PATH,
        /// document:PATH or file:PATH; append #caption to a path to caption it
        #[arg(value_name = "BLOCK")]
        blocks: Vec<String>,
    },
    /// Manage the to-do list
    Todos {
        #[command(subcommand)]
        command: TodosCommands,
    },
    /// Manage goals
    Goals {
        #[command(subcommand)]
        command: GoalsCommands,
    },
    /// Inspect or save the canvas
    Canvas {
        #[command(subcommand)]
        command: CanvasCommands,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum TodosCommands {
    /// Show the to-do list
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a to-do
    Add {
        /// To-do text
        text: Vec<String>,
    },
    /// Mark a to-do as done
    Done {
        /// Position shown by `todos list`
        index: usize,
    },
    /// Mark a to-do as not done
    Undo {
        /// Position shown by `todos list`
        index: usize,
    },
    /// Remove a to-do
    #[command(alias = "rm")]
    Remove {
        /// Position shown by `todos list`
        index: usize,
    },
}

#[derive(Subcommand)]
pub enum GoalsCommands {
    /// Show goals
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a goal
    Add {
        /// Goal title
        title: String,
        /// Optional description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Remove a goal
    #[command(alias = "rm")]
    Remove {
        /// Position shown by `goals list`
        index: usize,
    },
}

#[derive(Subcommand)]
pub enum CanvasCommands {
    /// Print stored canvas elements as JSON
    Show,
    /// Save the canvas
    Save,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write backend settings to the config file
    Init {
        /// Journal backend URL
        #[arg(long, value_name = "URL")]
        api_url: String,
        /// Optional bearer token
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,
        /// Send attachment data with entries by default
        #[arg(long)]
        include_media: bool,
    },
    /// Print the effective configuration
    Show,
}
