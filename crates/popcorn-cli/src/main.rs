use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;
mod logging;
mod output;

use commands::{browse, config, movie, search, watched};

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "Popcorn - search movies, rate them, keep a watched list")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Also write logs to this file (daily rotation)
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the movie database by title
    Search {
        /// Free-text title query (2 characters minimum)
        query: String,
    },
    /// Show full details for one movie
    Movie {
        /// IMDb id, e.g. tt1375666
        id: String,
    },
    /// Manage the watched list
    Watched {
        #[command(subcommand)]
        action: WatchedAction,
    },
    /// Interactive search / rate / watch loop
    Browse,
    /// Inspect or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum WatchedAction {
    /// List all watched movies with aggregate statistics
    List,
    /// Show only the aggregate statistics
    Stats,
    /// Remove one movie from the watched list
    Remove {
        /// IMDb id of the entry to remove
        id: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the active configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Store the OMDb API key (prompts when not passed)
    SetKey {
        /// API key; omit to be prompted without echo
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let out = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(&query, &out).await,
        Commands::Movie { id } => movie::run_movie(&id, &out).await,
        Commands::Watched { action } => match action {
            WatchedAction::List => watched::run_list(&out),
            WatchedAction::Stats => watched::run_stats(&out),
            WatchedAction::Remove { id } => watched::run_remove(&id, &out),
        },
        Commands::Browse => browse::run_browse(&out).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => config::run_show(&out),
            ConfigAction::Path => config::run_path(&out),
            ConfigAction::SetKey { api_key } => config::run_set_key(api_key, &out),
        },
    }
}
