//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `resolve`: Resolve one document and print the result
//! - `check`: Resolve many documents and report which ones fail
//! - `init`: Initialize an incjson configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::ResolverConfig;

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
            Some(Command::Resolve(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands that resolve documents.
///
/// Every flag overrides the matching field of the configuration file.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Key whose falsy value disables the enclosing object
    #[arg(long, env = "INCJSON_ENABLE_KEY")]
    pub enable_key: Option<String>,

    /// Strip text from this prefix to end of line before parsing
    #[arg(long)]
    pub comment_prefix: Option<String>,

    /// Leave path-annotation keys untouched
    #[arg(long)]
    pub no_path_annotations: bool,

    /// Key prefix marking path annotations
    #[arg(long)]
    pub path_prefix: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn apply(&self, config: &mut ResolverConfig) {
        if let Some(enable_key) = &self.enable_key {
            config.enable_key = enable_key.clone();
        }
        if let Some(prefix) = &self.comment_prefix {
            config.comment_prefix = Some(prefix.clone());
        }
        if self.no_path_annotations {
            config.resolve_path_annotations = false;
        }
        if let Some(prefix) = &self.path_prefix {
            config.path_annotation_prefix = prefix.clone();
        }
    }
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Document to resolve
    pub file: PathBuf,

    /// Print the result on a single line
    #[arg(long)]
    pub compact: bool,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Files or directories to check (directories are searched for *.json)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve all directives in a document and print the result
    Resolve(ResolveCommand),
    /// Resolve every given document and report failures
    Check(CheckCommand),
    /// Initialize a new .incjsonrc.json configuration file
    Init,
}
