use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, init::init, resolve::resolve},
};

/// Dispatches to the command handler for the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with the summary to print and its error count
/// - `Err` if the command itself fails (unreadable config, resolution error
///   in `resolve`, unwritable output file)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Resolve(cmd)) => resolve(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
