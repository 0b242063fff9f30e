use std::fs;

use anyhow::{Context, Result};

use super::super::args::ResolveCommand;
use super::helper::{build_resolver, finish};
use super::{CommandResult, CommandSummary, ResolveSummary};

pub fn resolve(cmd: ResolveCommand) -> Result<CommandResult> {
    let resolver = build_resolver(&cmd.common)?;
    let value = resolver
        .resolve(&cmd.file)
        .with_context(|| format!("Failed to resolve {}", cmd.file.display()))?;

    let rendered = if cmd.compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    }
    .context("Failed to serialize resolved document")?;

    if let Some(output) = &cmd.output {
        fs::write(output, format!("{rendered}\n"))
            .with_context(|| format!("Failed to write file: {}", output.display()))?;
    }

    Ok(finish(
        CommandSummary::Resolve(ResolveSummary {
            rendered,
            output: cmd.output,
        }),
        true,
    ))
}
