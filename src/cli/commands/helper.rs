use std::env;

use anyhow::{Context, Result};
use tracing::debug;

use super::super::args::CommonArgs;
use super::{CommandResult, CommandSummary, InitSummary};
use crate::{Resolver, config::load_config};

/// Build a resolver from the nearest config file plus CLI overrides.
pub fn build_resolver(common: &CommonArgs) -> Result<Resolver> {
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    let loaded = load_config(&cwd)?;
    debug!(from_file = loaded.from_file, "configuration loaded");

    let mut config = loaded.config;
    common.apply(&mut config);
    Resolver::new(config).context("Invalid resolver configuration")
}

pub fn finish(summary: CommandSummary, exit_on_errors: bool) -> CommandResult {
    let error_count = match &summary {
        CommandSummary::Check(check) => check.files.iter().filter(|f| f.error.is_some()).count(),
        CommandSummary::Init(InitSummary { error, .. }) => usize::from(error.is_some()),
        CommandSummary::Resolve(_) => 0,
    };

    CommandResult {
        summary,
        error_count,
        exit_on_errors,
    }
}
