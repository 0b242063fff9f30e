//! incjson - include and path directives for JSON documents
//!
//! incjson is a CLI tool and library that preprocesses JSON documents before
//! they reach their consumer. It resolves a small set of directives embedded
//! in the document:
//!
//! - `include`: merge (parts of) other documents into an object, or splice
//!   them into an array
//! - `replace_value`: replace an object with a value taken from another document
//! - `enabled`: drop any object whose `enabled` key is falsy
//! - `@path:name`: turn a path relative to the document into an absolute one
//!
//! Included documents are resolved recursively, each relative to its own
//! directory.
//!
//! ```no_run
//! use incjson::{Resolver, ResolverConfig};
//!
//! let resolver = Resolver::new(ResolverConfig::default())?;
//! let config = resolver.resolve("config/app.json")?;
//! # Ok::<(), incjson::Error>(())
//! ```
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Resolver settings and configuration file loading
//! - `error`: Error taxonomy
//! - `parsers`: Comment stripping and the JSON file loader
//! - `resolve`: The directive resolver

pub mod cli;
pub mod config;
pub mod error;
pub mod parsers;
pub mod resolve;

use std::path::Path;

pub use config::ResolverConfig;
pub use error::{Error, Result};
pub use parsers::{FileLoader, JsonFileLoader};
pub use resolve::{
    Resolver,
    spec::{FragmentSpec, Segment, SegmentPath, Selection},
};

/// A parsed document, as produced by a [`FileLoader`] and returned by resolution.
pub type Tree = serde_json::Value;

/// Load and fully resolve the document at `path`.
pub fn load(path: impl AsRef<Path>, config: ResolverConfig) -> Result<Tree> {
    Resolver::new(config)?.resolve(path)
}
