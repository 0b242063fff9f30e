//! Directive resolution.
//!
//! A document is resolved in three passes:
//!
//! 1. **Enable filter** ([`enable`]): disabled Mappings are dropped, so a
//!    disabled `include` never touches the filesystem.
//! 2. **Directive walk**: `include` merges loaded documents into the
//!    enclosing Mapping (or splices them into the enclosing Sequence) and
//!    `replace_value` substitutes the whole enclosing Mapping. Every loaded
//!    document goes through all three passes relative to its own directory
//!    before it is merged.
//! 3. **Path annotations** ([`paths`]): `@path:name` keys become `name` with
//!    an absolute path value.

pub mod enable;
pub mod lookup;
pub mod paths;
pub mod spec;


use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    config::ResolverConfig,
    error::{Error, Result},
    parsers::{FileLoader, JsonFileLoader},
};
use enable::filter_enabled;
use paths::resolve_path_annotations;
use spec::{FragmentSpec, INCLUDE_KEY, REPLACE_VALUE_KEY, include_specs};

/// Resolves directives in documents loaded through `L`.
#[derive(Debug, Clone)]
pub struct Resolver<L = JsonFileLoader> {
    config: ResolverConfig,
    loader: L,
}

impl Resolver<JsonFileLoader> {
    /// Build a resolver reading JSON from disk.
    ///
    /// Fails with [`Error::Config`] if `config` does not validate.
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let loader = JsonFileLoader::new(config.comment_prefix.clone());
        Self::with_loader(config, loader)
    }
}

impl<L: FileLoader> Resolver<L> {
    pub fn with_loader(config: ResolverConfig, loader: L) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, loader })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Load the document at `path` and resolve it completely.
    pub fn resolve(&self, path: impl AsRef<Path>) -> Result<Value> {
        Resolution::new(self).resolve_file(path.as_ref())
    }

    /// Load the file a single spec points at, relative to `base_dir`, and
    /// apply its `keys_path` and key selection.
    pub fn resolve_fragment(&self, spec: &FragmentSpec, base_dir: &Path) -> Result<Value> {
        Resolution::new(self).load_fragment(spec, base_dir)
    }

    /// Resolve an in-memory tree as if it had been read from a file in `base_dir`.
    pub fn process(&self, tree: Value, base_dir: &Path) -> Result<Value> {
        Resolution::new(self).process(tree, base_dir)
    }
}

/// State of one top-level call: the files currently being resolved.
struct Resolution<'r, L> {
    resolver: &'r Resolver<L>,
    active: Vec<PathBuf>,
}

impl<'r, L: FileLoader> Resolution<'r, L> {
    fn new(resolver: &'r Resolver<L>) -> Self {
        Self {
            resolver,
            active: Vec::new(),
        }
    }

    fn config(&self) -> &ResolverConfig {
        &self.resolver.config
    }

    fn resolve_file(&mut self, path: &Path) -> Result<Value> {
        let identity = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.config().detect_cycles && self.active.contains(&identity) {
            let mut chain = self.active.clone();
            chain.push(identity);
            return Err(Error::CyclicInclude { chain });
        }

        debug!(path = %path.display(), depth = self.active.len(), "loading document");
        let tree = self.resolver.loader.load(path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

        self.active.push(identity);
        let result = self.process(tree, &base_dir);
        self.active.pop();
        result
    }

    fn process(&mut self, mut tree: Value, base_dir: &Path) -> Result<Value> {
        filter_enabled(&mut tree, &self.config().enable_key);
        let mut tree = self.walk(tree, base_dir)?;
        if self.config().resolve_path_annotations {
            resolve_path_annotations(&mut tree, base_dir, &self.config().path_annotation_prefix);
        }
        Ok(tree)
    }

    fn walk(&mut self, tree: Value, base_dir: &Path) -> Result<Value> {
        match tree {
            Value::Array(items) => self.walk_sequence(items, base_dir).map(Value::Array),
            Value::Object(map) => self.walk_mapping(map, base_dir),
            scalar @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)) => {
                Ok(scalar)
            }
        }
    }

    fn walk_sequence(&mut self, items: Vec<Value>, base_dir: &Path) -> Result<Vec<Value>> {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Object(mut map) if map.contains_key(INCLUDE_KEY) => {
                    let directive = map.shift_remove(INCLUDE_KEY).unwrap_or_default();
                    for spec in include_specs(&directive)? {
                        match self.load_fragment(&spec, base_dir)? {
                            Value::Array(included) => out.extend(included),
                            included => out.push(included),
                        }
                    }
                }
                other => out.push(self.walk(other, base_dir)?),
            }
        }
        Ok(out)
    }

    fn walk_mapping(&mut self, mut map: Map<String, Value>, base_dir: &Path) -> Result<Value> {
        if let Some(directive) = map.shift_remove(INCLUDE_KEY) {
            for spec in include_specs(&directive)? {
                trace!(filename = %spec.filename.display(), "include");
                match self.load_fragment(&spec, base_dir)? {
                    Value::Object(included) => {
                        for (key, value) in included {
                            map.insert(key, value);
                        }
                    }
                    included => {
                        map.insert(spec.store_key(), included);
                    }
                }
            }
        }

        if let Some(directive) = map.get(REPLACE_VALUE_KEY) {
            let spec = FragmentSpec::replace(directive)?;
            trace!(filename = %spec.filename.display(), "replace_value");
            return self.load_fragment(&spec, base_dir);
        }

        for value in map.values_mut() {
            if value.is_object() || value.is_array() {
                let child = std::mem::take(value);
                *value = self.walk(child, base_dir)?;
            }
        }
        Ok(Value::Object(map))
    }

    fn load_fragment(&mut self, spec: &FragmentSpec, base_dir: &Path) -> Result<Value> {
        let path = base_dir.join(&spec.filename);
        let loaded = self.resolve_file(&path)?;
        lookup::extract(loaded, spec).map_err(|failure| Error::KeyPath {
            path: failure.path,
            file: path,
            reason: failure.reason,
        })
    }
}
