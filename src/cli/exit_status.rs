use std::process::ExitCode;

use super::commands::CommandResult;

/// Exit status of the incjson binary.
///
/// - `Success` (0): every requested document resolved
/// - `Failure` (1): the command ran but some documents failed to resolve
/// - `Error` (2): the command itself could not run (bad config, unreadable input)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub(crate) fn from_result(result: &CommandResult) -> Self {
        if result.exit_on_errors && result.error_count > 0 {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
