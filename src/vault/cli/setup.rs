use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vault::config::parse_backend;
use vault::store::BackendKind;

#[derive(Parser, Debug)]
#[command(name = "vault", bin_name = "vault", version, disable_help_subcommand = true)]
#[command(about = "Personal record vault", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Storage backend (overrides config and VAULT_BACKEND)
    #[arg(long, global = true, value_name = "file|remote", value_parser = parse_backend, help_heading = "Options")]
    pub backend: Option<BackendKind>,

    /// Data file for the file backend
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Config file (default: $VAULT_HOME/config.json)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Skip writing backups for this invocation
    #[arg(long, global = true, help_heading = "Options")]
    pub no_backup: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a record
    Add { name: String, value: String },

    /// List all records
    #[command(alias = "ls")]
    List,

    /// Replace a record's name and value
    Update {
        id: String,
        name: String,
        value: String,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete { id: String },

    /// Find records by name or exact id
    Search { keyword: String },

    /// Show records ordered by name or creation time
    Sort {
        /// name or created
        field: String,
        /// ascending, descending or stable-descending
        #[arg(default_value = "ascending")]
        order: String,
    },

    /// Write a text report of every record
    Export {
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show vault statistics
    Stats,

    /// Interactive menu (the default)
    Menu,
}
