//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::session::Session;
use super::{drawer_cmd, record_cmd, room_cmd};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "locker")]
#[command(author, version, about = "Record store backed by plain text files")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Base directory holding rooms and drawers
    #[arg(long, short = 'b', global = true, env = "LOCKER_BASE")]
    pub base: Option<PathBuf>,

    /// Room to work in (a subdirectory of the base)
    #[arg(long, short = 'r', global = true, env = "LOCKER_ROOM")]
    pub room: Option<String>,

    /// Create missing directories and drawers
    #[arg(long, global = true)]
    pub create: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "LOCKER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a record, replacing any record with the same name
    ///
    /// Examples:
    ///   locker put stats.txt alice 30 true 2.5   # integer, boolean, float
    ///   locker put stats.txt motto '"42"'        # quoted: text
    ///   locker put stats.txt code 007 --text     # every value as text
    Put {
        /// Drawer file name
        drawer: String,

        /// Record name
        name: String,

        /// Record values
        #[arg(allow_negative_numbers = true)]
        values: Vec<String>,

        /// Store every value as text
        #[arg(long)]
        text: bool,
    },

    /// Show a record (prints no values if it is not stored)
    Take {
        /// Drawer file name
        drawer: String,

        /// Record name
        name: String,
    },

    /// Show a single value of a record
    Read {
        /// Drawer file name
        drawer: String,

        /// Record name
        name: String,

        /// Value index
        #[arg(long, short, default_value = "0")]
        index: usize,
    },

    /// Remove a record
    Remove {
        /// Drawer file name
        drawer: String,

        /// Record name
        name: String,
    },

    /// Show every record in a drawer
    List {
        /// Drawer file name
        drawer: String,
    },

    /// Drop duplicate and blank lines from a drawer
    Compact {
        /// Drawer file name
        drawer: String,
    },

    /// Manage drawers
    #[command(subcommand)]
    Drawer(drawer_cmd::DrawerCommands),

    /// Manage rooms
    #[command(subcommand)]
    Room(room_cmd::RoomCommands),
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let format = cli
        .format
        .unwrap_or_else(|| config.default_format.into());
    let output = Output::new(format, cli.verbose);

    let session = Session::new(cli.base, cli.room, cli.create, &config);
    output.verbose(&format!("Session: {:?}", session));

    match cli.command {
        Commands::Put {
            drawer,
            name,
            values,
            text,
        } => record_cmd::put(&session, &output, &drawer, &name, &values, text)?,

        Commands::Take { drawer, name } => record_cmd::take(&session, &output, &drawer, &name)?,

        Commands::Read {
            drawer,
            name,
            index,
        } => record_cmd::read(&session, &output, &drawer, &name, index)?,

        Commands::Remove { drawer, name } => {
            record_cmd::remove(&session, &output, &drawer, &name)?
        }

        Commands::List { drawer } => record_cmd::list(&session, &output, &drawer)?,

        Commands::Compact { drawer } => record_cmd::compact(&session, &output, &drawer)?,

        Commands::Drawer(cmd) => drawer_cmd::run(cmd, &session, &output)?,
        Commands::Room(cmd) => room_cmd::run(cmd, &session, &output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
