//! Error types for document resolution.

use std::{io, path::PathBuf};

/// Every failure that can abort a resolution.
///
/// There is no partial-result mode: the first error met in traversal order
/// is returned and the partially rewritten tree is dropped.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The resolver was configured with invalid settings.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// A document could not be read from disk.
    #[error("failed to read '{}': {source}", path.display())]
    FileLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A document was read but is not valid JSON after comment stripping.
    #[error("failed to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An `include` or `replace_value` directive is malformed.
    #[error("invalid '{directive}' directive: {message}")]
    InvalidSpec {
        directive: &'static str,
        message: String,
    },

    /// A `keys_path`, `key` or `keys` entry does not exist in the loaded document.
    #[error("key path '{path}' not found in '{}': {reason}", file.display())]
    KeyPath {
        path: String,
        file: PathBuf,
        reason: String,
    },

    /// A document includes itself, directly or through other documents.
    #[error("cyclic include: {}", format_chain(chain))]
    CyclicInclude { chain: Vec<PathBuf> },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
