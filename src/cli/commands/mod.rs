pub mod check;
mod command_result;
pub mod helper;
pub mod init;
pub mod resolve;

use std::path::PathBuf;

pub use command_result::*;

#[derive(Debug)]
pub enum CommandSummary {
    Resolve(ResolveSummary),
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ResolveSummary {
    /// Rendered document, printed to stdout when no output file was given.
    pub rendered: String,
    pub output: Option<PathBuf>,
}

#[derive(Debug)]
pub struct CheckSummary {
    pub files: Vec<FileCheck>,
}

/// Outcome of resolving one file during `check`.
#[derive(Debug)]
pub struct FileCheck {
    pub path: PathBuf,
    /// Error chain when resolution failed.
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}
