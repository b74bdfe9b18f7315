use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use sparkify_etl::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "sparkify", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the database (default: sparkifydb.sqlite in the working directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Load song and log data into the star schema (the default)
    ///
    /// Walks the song data directory, then the log data directory, and loads
    /// every JSON file found:
    ///
    /// - Song files add one artist and one song each
    /// - Log files add a time, user and songplay row per NextSong event
    /// - Plays are matched to catalog songs by exact title and artist name
    ///
    /// Each file is committed on its own. The run stops at the first bad
    /// file; files already committed stay loaded, and rerunning is safe
    /// because every insert tolerates conflicts.
    Run,
    /// Drop and recreate the star-schema tables
    Reset,
    /// Show row counts for every table
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if it does not exist
    Init,
}

fn load_config(db: Option<PathBuf>) -> Result<Config> {
    match db {
        Some(path) => Config::load_with_db_path(path),
        None => Config::load(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let config = load_config(cli.db)?;
            commands::run_load(&config)?;
        }
        Commands::Reset => {
            let config = load_config(cli.db)?;
            commands::reset_tables(&config.database_path)?;
        }
        Commands::Status => {
            let config = load_config(cli.db)?;
            commands::show_status(&config.database_path)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show_config(cli.db)?,
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Example => commands::config::show_example(),
            ConfigAction::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
