mod commands;
mod config;
mod error;
mod gate;
mod library;
mod markup;
mod tui;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::FieldArgs,
    config::Config,
    error::Result,
    library::{MemoryStorage, ProofStore},
};

#[derive(Parser)]
#[command(name = "qed")]
#[command(about = "Q.E.D. Library: a terminal library of mathematical proofs")]
struct Cli {
    /// Directory holding the library (default: $QED_DATA_DIR or the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Log file (default: platform cache dir)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the library interactively
    Tui {
        /// Browse a scratch copy of the example proofs that is discarded on exit
        #[arg(long)]
        scratch: bool,
    },
    /// List proofs, optionally searched and filtered by tag
    List {
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long, short)]
        tag: Option<String>,
        /// Print matching records as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every tag in use
    Tags,
    /// Show a proof with its math typeset
    Show {
        id: String,
        /// Print the markup instead of rendering it
        #[arg(long)]
        raw: bool,
    },
    /// Render markup from a file or stdin
    Render {
        file: Option<PathBuf>,
        /// Emit the web (HTML) form
        #[arg(long)]
        html: bool,
    },
    /// Add a proof (requires the owner passphrase)
    Add {
        #[command(flatten)]
        fields: FieldFlags,
        #[arg(long)]
        passphrase: String,
    },
    /// Edit a proof (requires the owner passphrase)
    Edit {
        id: String,
        #[command(flatten)]
        fields: FieldFlags,
        #[arg(long)]
        passphrase: String,
    },
    /// Delete a proof (requires the owner passphrase)
    Delete {
        id: String,
        #[arg(long)]
        passphrase: String,
    },
}

#[derive(Args)]
struct FieldFlags {
    #[arg(long)]
    title: Option<String>,
    #[arg(long = "abstract")]
    summary: Option<String>,
    /// Blank means "Anonymous"
    #[arg(long)]
    author: Option<String>,
    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,
    /// Markup file for the proof body, `-` for stdin
    #[arg(long)]
    content_file: Option<PathBuf>,
}

impl FieldFlags {
    fn as_args(&self) -> FieldArgs<'_> {
        FieldArgs {
            title: self.title.clone(),
            summary: self.summary.clone(),
            author: self.author.clone(),
            tags: self.tags.clone(),
            content_file: self.content_file.as_deref(),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = Config::resolve(cli.data_dir, cli.log_file);

    // The terminal belongs to the TUI, so logs always go to a file
    if let Err(e) = init_logging(&config) {
        eprintln!("Warning: logging disabled: {e}");
    }
    tracing::info!("Library at {}", config.data_file().display());

    if let Err(e) = run(&config, cli.command).await {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(config: &Config, command: Commands) -> Result<()> {
    let mut store = config.open_store();
    let mut out = io::stdout();

    match command {
        Commands::Tui { scratch: false } => tui::run(store).await,
        Commands::Tui { scratch: true } => tui::run(ProofStore::new(MemoryStorage::new())).await,
        Commands::List { search, tag, json } => {
            commands::list(&mut store, &mut out, &search, tag.as_deref(), json)
        }
        Commands::Tags => commands::tags(&mut store, &mut out),
        Commands::Show { id, raw } => commands::show(&mut store, &mut out, &id, raw),
        Commands::Render { file, html } => commands::render(file.as_deref(), &mut out, html),
        Commands::Add { fields, passphrase } => {
            commands::add(&mut store, &mut out, &passphrase, fields.as_args())
        }
        Commands::Edit {
            id,
            fields,
            passphrase,
        } => commands::edit(&mut store, &mut out, &id, &passphrase, fields.as_args()),
        Commands::Delete { id, passphrase } => {
            commands::delete(&mut store, &mut out, &id, &passphrase)
        }
    }?;
    out.flush()?;
    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    if let Some(parent) = config.log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(
        "qed=info"
            .parse::<tracing_subscriber::filter::Directive>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}
