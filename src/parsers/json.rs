use std::{fs, path::Path};

use serde_json::Value;

use super::comment::strip_comments;
use crate::error::{Error, Result};

/// Reads one document from disk and parses it into a tree.
///
/// The resolver calls back into this for every `include` and `replace_value`,
/// so an implementation only has to deal with a single file.
pub trait FileLoader {
    fn load(&self, path: &Path) -> Result<Value>;
}

/// Loads strict JSON, optionally stripping line comments first.
#[derive(Debug, Clone, Default)]
pub struct JsonFileLoader {
    comment_prefix: Option<String>,
}

impl JsonFileLoader {
    pub fn new(comment_prefix: Option<String>) -> Self {
        Self { comment_prefix }
    }

    pub fn comment_prefix(&self) -> Option<&str> {
        self.comment_prefix.as_deref()
    }

    /// Parse raw document bytes. Invalid UTF-8 is a parse error.
    pub fn parse_bytes(&self, content: &[u8], path: &Path) -> Result<Value> {
        match &self.comment_prefix {
            Some(_) => {
                let text = std::str::from_utf8(content).map_err(|err| Error::Parse {
                    path: path.to_path_buf(),
                    source: serde::de::Error::custom(err),
                })?;
                self.parse_str(text, path)
            }
            None => serde_json::from_slice(content).map_err(|source| Error::Parse {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Parse already-read document text.
    pub fn parse_str(&self, content: &str, path: &Path) -> Result<Value> {
        let parsed = match &self.comment_prefix {
            Some(prefix) => serde_json::from_str(&strip_comments(content, prefix)),
            None => serde_json::from_str(content),
        };
        parsed.map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FileLoader for JsonFileLoader {
    fn load(&self, path: &Path) -> Result<Value> {
        let content = fs::read(path).map_err(|source| Error::FileLoad {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_bytes(&content, path)
    }
}
