use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use walkdir::WalkDir;

use super::super::args::CheckCommand;
use super::helper::{build_resolver, finish};
use super::{CheckSummary, CommandResult, CommandSummary, FileCheck};
use crate::config::CONFIG_FILE_NAME;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let resolver = build_resolver(&cmd.common)?;
    let files = collect_files(&cmd.paths)?;

    let files = files
        .into_iter()
        .map(|path| {
            debug!(path = %path.display(), "checking");
            let error = resolver.resolve(&path).err().map(|e| e.to_string());
            FileCheck { path, error }
        })
        .collect();

    Ok(finish(CommandSummary::Check(CheckSummary { files }), true))
}

/// Expand directories into the `*.json` documents below them, sorted by path.
/// Explicit file arguments are kept as given.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry
                    .with_context(|| format!("Failed to read directory: {}", path.display()))?;
                if entry.file_type().is_file() && is_document(entry.path()) {
                    found.push(entry.into_path());
                }
            }
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn is_document(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
        && path.file_name().and_then(|n| n.to_str()) != Some(CONFIG_FILE_NAME)
}
