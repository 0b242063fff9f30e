//! Report formatting and printing utilities.
//!
//! Kept separate from the commands so the library can be used without
//! any terminal output.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CheckSummary, CommandResult, CommandSummary, InitSummary, ResolveSummary};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print a command result: documents go to stdout, status lines to stderr
/// unless the command's whole output is the status (`check`, `init`).
pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Resolve(summary) => {
            print_resolve(summary, &mut io::stdout().lock(), &mut io::stderr().lock())
        }
        CommandSummary::Check(summary) => print_check_to(summary, verbose, &mut io::stdout().lock()),
        CommandSummary::Init(summary) => print_init(summary),
    }
}

fn print_resolve<W: Write, E: Write>(summary: &ResolveSummary, out: &mut W, err: &mut E) {
    match &summary.output {
        Some(path) => {
            let _ = writeln!(
                err,
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Wrote {}", path.display()).green()
            );
        }
        None => {
            let _ = writeln!(out, "{}", summary.rendered);
        }
    }
}

/// Print one line per checked file followed by a summary line.
///
/// Successful files are only listed in verbose mode.
pub fn print_check_to<W: Write>(summary: &CheckSummary, verbose: bool, writer: &mut W) {
    let failed = summary.files.iter().filter(|f| f.error.is_some()).count();

    for file in &summary.files {
        match &file.error {
            Some(error) => {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    FAILURE_MARK.red(),
                    file.path.display().to_string().bold()
                );
                let _ = writeln!(writer, "  {} {}", "=".blue(), error);
            }
            None if verbose => {
                let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), file.path.display());
            }
            None => {}
        }
    }

    let total = summary.files.len();
    let noun = if total == 1 { "file" } else { "files" };
    if failed == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Resolved {} {} - no errors", total, noun).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("{} of {} {} failed to resolve", failed, total, noun).red()
        );
    }
}

fn print_init(summary: &InitSummary) {
    if let Some(error) = &summary.error {
        eprintln!("Error: {}", error);
    } else if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}
