//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::MatchPolicyKind;

/// Hierarchical outline differ: turn two indented tree snapshots into ordered edit steps
#[derive(Parser, Debug)]
#[command(name = "outdiff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .outdiff.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the steps converting BEFORE into AFTER
    Diff {
        /// Outline snapshot to convert from (default: config `before`)
        #[arg(value_hint = ValueHint::FilePath)]
        before: Option<PathBuf>,
        /// Outline snapshot to convert to (default: config `after`)
        #[arg(value_hint = ValueHint::FilePath)]
        after: Option<PathBuf>,
        /// Write the report to this file instead of stdout
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Node matching: exact | normalized
        #[arg(short, long)]
        match_policy: Option<MatchPolicyKind>,
        /// Omit the "Steps to convert" header line
        #[arg(long)]
        no_header: bool,
    },

    /// Show a parsed outline as tree
    Tree {
        /// Outline file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// List every path of an outline with its parent and children
    Paths {
        /// Outline file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Group paths by match key instead
        #[arg(long)]
        by_name: bool,
        /// Node matching used for --by-name
        #[arg(short, long)]
        match_policy: Option<MatchPolicyKind>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
    /// Print a commented template
    Template,
    /// Write the template to the global (or local) config file
    Init {
        /// Write <project_dir>/.outdiff.toml instead
        #[arg(long)]
        local: bool,
    },
}
