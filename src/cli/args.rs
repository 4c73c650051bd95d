//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `export`: Write translator sheets (CSV) for every script and string table
//! - `check`: Parse everything and report problems without writing
//! - `init`: Create a `.dlgsheetrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Export(cmd)) => cmd.args.common.verbose,
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project directory; config lookup and relative roots start here
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Directory holding .d scripts (overrides config file)
    #[arg(long)]
    pub dialog_root: Option<PathBuf>,

    /// Directory holding .tra string tables (overrides config file)
    #[arg(long)]
    pub strings_root: Option<PathBuf>,

    /// Language sub-directory of the strings root, e.g. "english"
    #[arg(long)]
    pub language: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct ExportArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory for the sheets (overrides config file)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Suffix of the text columns, e.g. "en" for npc_text_en
    #[arg(long)]
    pub locale: Option<String>,

    /// Skip files that fail to parse and export the rest
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Debug, Args)]
pub struct ExportCommand {
    #[command(flatten)]
    pub args: ExportArgs,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Rules that can be selected on `check`. Parse errors are always reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    MissingText,
    UnusedText,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![CheckRule::MissingText, CheckRule::UnusedText]
    }
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Export dialogue scripts and string tables to CSV sheets
    Export(ExportCommand),
    /// Check for parse errors, missing texts and unused texts
    Check(CheckCommand),
    /// Initialize a new .dlgsheetrc.json configuration file
    Init,
}
