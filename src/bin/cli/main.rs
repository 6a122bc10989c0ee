mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashdeck-cli", about = "Manage and study flashcards", version)]
struct Cli {
    /// Config file (default: <config dir>/flashdeck/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding flashcards.json (local mode)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use the REST resource at this URL instead of local storage
    #[arg(long, global = true)]
    remote: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List cards, sorted by category then term
    List {
        /// Only cards in this category (exact match)
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive text to look for in term or definition
        #[arg(long, default_value = "")]
        search: String,
    },

    /// List categories
    Categories,

    /// Show one card
    Show {
        id: String,
    },

    /// Add a card
    Add {
        #[arg(long)]
        category: String,
        #[arg(long)]
        term: String,
        #[arg(long)]
        definition: String,
        #[arg(long, default_value = "")]
        example: String,
    },

    /// Change some fields of a card
    Edit {
        id: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        term: Option<String>,
        #[arg(long)]
        definition: Option<String>,
        #[arg(long)]
        example: Option<String>,
    },

    /// Delete a card
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Interactive study session
    Study {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "")]
        search: String,
        /// Start with a shuffled deck
        #[arg(long)]
        shuffle: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    let settings = app::Settings {
        config_path: cli.config,
        data_dir: cli.data_dir,
        remote: cli.remote,
    };
    let mut app = app::App::open(&settings).await?;

    match cli.command {
        Command::List { category, search } => {
            commands::list::run(&app, category.as_deref(), &search, &cli.format, use_color)?;
        }
        Command::Categories => {
            commands::list::run_categories(&app, &cli.format)?;
        }
        Command::Show { id } => {
            commands::show::run(&app, &id, &cli.format, use_color)?;
        }
        Command::Add { category, term, definition, example } => {
            let fields = flashdeck_lib::flashcards::NewCard {
                category,
                term,
                definition,
                example,
            };
            commands::edit::run_add(&mut app, fields, &cli.format, use_color).await?;
        }
        Command::Edit { id, category, term, definition, example } => {
            let changes = flashdeck_lib::flashcards::CardUpdate {
                category,
                term,
                definition,
                example,
            };
            commands::edit::run_edit(&mut app, &id, changes, &cli.format, use_color).await?;
        }
        Command::Delete { id, yes } => {
            let mut confirm = commands::delete::Confirm::new(yes);
            commands::delete::run(&mut app, &id, &mut confirm, &cli.format).await?;
        }
        Command::Study { category, search, shuffle } => {
            let stdin = std::io::stdin();
            commands::study::run(
                &app,
                category.as_deref(),
                &search,
                shuffle,
                &mut stdin.lock(),
                &mut std::io::stdout(),
                use_color,
            )?;
        }
    }

    Ok(())
}
