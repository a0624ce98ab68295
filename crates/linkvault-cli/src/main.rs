//! LinkVault CLI
//!
//! Command-line interface for LinkVault - a personal collection of links.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use linkvault_core::{Config, LinkDraft, LinkPatch, StorageError, Store, ValidationError};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "linkvault")]
#[command(about = "LinkVault - Your personal collection of important links")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a new link
    #[command(alias = "create")]
    Add {
        /// URL to save (https:// is added when no scheme is given)
        url: String,
        /// Link title
        #[arg(short, long)]
        title: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
        /// Category (defaults to the configured default category)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List links, newest first
    #[command(alias = "ls")]
    List {
        /// Only links whose title, URL or description contain this text
        #[arg(short, long)]
        search: Option<String>,
        /// Only links in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show link details
    Show {
        /// Link ID (full ID or prefix)
        id: String,
    },
    /// Edit a link (prompts for each field when no flags are given)
    Edit {
        /// Link ID (full ID or prefix)
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New URL
        #[arg(short, long)]
        url: Option<String>,
        /// New description (empty string clears it)
        #[arg(short, long)]
        description: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID (full ID or prefix)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Open a link in the default browser
    Open {
        /// Link ID (full ID or prefix)
        id: String,
    },
    /// Search links by title, URL and description
    Search {
        /// Search text
        query: String,
    },
    /// List categories in use with link counts
    Categories,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Remove all saved links
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, storage_key, categories, default_category)
        key: String,
        /// Configuration value (comma-separated for categories)
        value: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    init_logging(cli.verbose);

    match run(cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, &output);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    let categories = config.categories()?;
    debug!(path = %config.links_path().display(), "Opening store");

    let mut store = Store::open_with_config(&config);

    match cli.command.unwrap_or(Commands::List {
        search: None,
        category: None,
    }) {
        Commands::Add {
            url,
            title,
            description,
            category,
        } => {
            let draft = LinkDraft {
                title,
                url,
                description,
                category,
            };
            commands::link::add(&mut store, &categories, draft, output)
        }
        Commands::List { search, category } => {
            commands::link::list(&store, search, category, output)
        }
        Commands::Show { id } => commands::link::show(&store, id, output),
        Commands::Edit {
            id,
            title,
            url,
            description,
            category,
        } => {
            let patch = LinkPatch {
                title,
                url,
                description,
                category,
            };
            commands::link::edit(&mut store, &categories, id, patch, output)
        }
        Commands::Delete { id, yes } => commands::link::delete(&mut store, id, yes, output),
        Commands::Open { id } => commands::link::open(&store, id, output),
        Commands::Search { query } => commands::link::search(&store, query, output),
        Commands::Categories => commands::link::categories(&store, output),
        Commands::Reset { yes } => commands::link::reset(&mut store, yes, output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Print an error as a user-facing notification
///
/// Validation failures are shown on their own; other errors include their
/// cause chain and, for storage problems, a recovery suggestion.
fn report_error(error: &anyhow::Error, output: &Output) {
    if let Some(validation) = error.downcast_ref::<ValidationError>() {
        output.error(&validation.to_string(), None);
        return;
    }

    let hint = error
        .chain()
        .find_map(|cause| cause.downcast_ref::<StorageError>())
        .and_then(StorageError::recovery_suggestion);
    output.error(&format!("{:#}", error), hint);
}

/// Initialize stderr logging
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug with --verbose.
fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("linkvault_core={},linkvault={}", log_level, log_level))
    });

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_writer(std::io::stderr)
        .try_init();
}
