use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const CONFIG_FILE_NAME: &str = ".incjsonrc.json";

pub const DEFAULT_ENABLE_KEY: &str = "enabled";

pub const DEFAULT_PATH_ANNOTATION_PREFIX: &str = "@path:";

/// Settings that control how directives are recognized.
///
/// Immutable once handed to a [`Resolver`](crate::Resolver); the resolver
/// validates it on construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Key whose falsy value disables the Mapping that holds it.
    #[serde(default = "default_enable_key")]
    pub enable_key: String,
    /// When set, text from this prefix to end-of-line is dropped before parsing.
    #[serde(default)]
    pub comment_prefix: Option<String>,
    #[serde(default = "default_resolve_path_annotations")]
    pub resolve_path_annotations: bool,
    #[serde(default = "default_path_annotation_prefix")]
    pub path_annotation_prefix: String,
    /// Fail with a cyclic-include error instead of recursing forever.
    #[serde(default = "default_detect_cycles")]
    pub detect_cycles: bool,
}

fn default_enable_key() -> String {
    DEFAULT_ENABLE_KEY.to_string()
}

fn default_resolve_path_annotations() -> bool {
    true
}

fn default_path_annotation_prefix() -> String {
    DEFAULT_PATH_ANNOTATION_PREFIX.to_string()
}

fn default_detect_cycles() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            enable_key: default_enable_key(),
            comment_prefix: None,
            resolve_path_annotations: default_resolve_path_annotations(),
            path_annotation_prefix: default_path_annotation_prefix(),
            detect_cycles: default_detect_cycles(),
        }
    }
}

impl ResolverConfig {
    /// Validate configuration values.
    ///
    /// Returns [`Error::Config`] for an empty path-annotation prefix, enable
    /// key or comment prefix.
    pub fn validate(&self) -> Result<(), Error> {
        if self.path_annotation_prefix.is_empty() {
            return Err(Error::Config {
                message: "path_annotation_prefix cannot be empty".to_string(),
            });
        }
        if self.enable_key.is_empty() {
            return Err(Error::Config {
                message: "enable_key cannot be empty".to_string(),
            });
        }
        if self.comment_prefix.as_deref() == Some("") {
            return Err(Error::Config {
                message: "comment_prefix cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = ResolverConfig::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: ResolverConfig,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: ResolverConfig = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: ResolverConfig::default(),
            from_file: false,
        }),
    }
}
