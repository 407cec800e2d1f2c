use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::data::{AmbiguityPolicy, LogLevel};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Find a directory by name and reveal it")]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// The workspace root to search
    #[clap(long, short, default_value = ".", global = true)]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Find a directory by name (ignoring case) and print its path
    Find {
        name: String,
        /// How to settle several matches; overrides dirfind.yaml
        #[clap(long, short, value_enum, conflicts_with = "all")]
        pick: Option<AmbiguityPolicy>,
        /// Print every match instead of revealing one
        #[clap(long, short)]
        all: bool,
    },
    /// List the entries directly inside a directory of the workspace
    Ls {
        /// Directory relative to the workspace root
        dir: Option<PathBuf>,
    },
}
