//! Parsing of `include` / `replace_value` directive bodies.
//!
//! Both accepted encodings of a path (`"a/b/c"` and `["a", "b", "c"]`) are
//! turned into a [`SegmentPath`] here; nothing past this module looks at the
//! raw directive JSON again.

use std::{fmt, path::PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub const INCLUDE_KEY: &str = "include";
pub const REPLACE_VALUE_KEY: &str = "replace_value";
/// Key a non-Mapping include result is stored under when no `keys_path` was given.
pub const DEFAULT_INCLUDED_KEY: &str = "included";

const FILENAME_FIELD: &str = "filename";
const KEYS_PATH_FIELD: &str = "keys_path";
const KEYS_FIELD: &str = "keys";
const KEY_FIELD: &str = "key";

/// One step into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(i64),
}

impl Segment {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Segment::Key(s.clone())),
            Value::Number(n) => n.as_i64().map(Segment::Index),
            _ => None,
        }
    }

    /// Name used when a selected value is re-keyed by this segment.
    pub fn to_key(&self) -> String {
        match self {
            Segment::Key(key) => key.clone(),
            Segment::Index(idx) => idx.to_string(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(idx) => write!(f, "{idx}"),
        }
    }
}

/// Ordered list of segments addressing a value inside a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentPath(Vec<Segment>);

impl SegmentPath {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    /// Parse a `/`-separated path. Empty segments are skipped.
    pub fn parse_str(path: &str) -> Self {
        Self(
            path.split('/')
                .filter(|s| !s.is_empty())
                .map(|s| Segment::Key(s.to_string()))
                .collect(),
        )
    }

    /// Accepts a `/`-separated string, a single integer, or a list of
    /// string/integer segments.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::parse_str(s)),
            Value::Number(_) => Segment::from_value(value).map(|seg| Self(vec![seg])),
            Value::Array(items) => items
                .iter()
                .map(Segment::from_value)
                .collect::<Option<Vec<_>>>()
                .map(Self),
            _ => None,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The single index this path consists of, if that is all it is.
    pub fn as_index(&self) -> Option<i64> {
        match self.0.as_slice() {
            [Segment::Index(idx)] => Some(*idx),
            _ => None,
        }
    }
}

impl fmt::Display for SegmentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// What to take from a loaded document after `keys_path` navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Whole,
    /// `key` of a `replace_value`: a single value.
    Key(SegmentPath),
    /// `keys`: several values, re-keyed by their last segment.
    Keys(Vec<SegmentPath>),
}

/// A parsed `include` or `replace_value` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentSpec {
    pub filename: PathBuf,
    pub keys_path: SegmentPath,
    pub selection: Selection,
}

impl FragmentSpec {
    /// Parse one include spec. `key` is not recognized here.
    pub fn include(value: &Value) -> Result<Self> {
        let fields = expect_mapping(value, INCLUDE_KEY)?;
        Self::parse(fields, INCLUDE_KEY, false)
    }

    /// Parse a `replace_value` spec; `key` takes precedence over `keys`.
    pub fn replace(value: &Value) -> Result<Self> {
        let fields = expect_mapping(value, REPLACE_VALUE_KEY)?;
        Self::parse(fields, REPLACE_VALUE_KEY, true)
    }

    fn parse(fields: &Map<String, Value>, directive: &'static str, allow_key: bool) -> Result<Self> {
        let filename = match fields.get(FILENAME_FIELD) {
            Some(Value::String(name)) => PathBuf::from(name),
            Some(other) => {
                return Err(invalid(
                    directive,
                    format!("'filename' must be a string, found {}", kind_of(other)),
                ));
            }
            None => return Err(invalid(directive, "missing required field 'filename'")),
        };

        let keys_path = match fields.get(KEYS_PATH_FIELD) {
            Some(value) => parse_path(value, directive, KEYS_PATH_FIELD)?,
            None => SegmentPath::default(),
        };

        let selection = match (fields.get(KEY_FIELD), fields.get(KEYS_FIELD)) {
            (Some(key), _) if allow_key => Selection::Key(parse_path(key, directive, KEY_FIELD)?),
            (_, Some(keys)) => Selection::Keys(parse_keys(keys, directive)?),
            _ => Selection::Whole,
        };

        Ok(Self {
            filename,
            keys_path,
            selection,
        })
    }

    /// Key a non-Mapping include result is stored under.
    pub fn store_key(&self) -> String {
        self.keys_path
            .last()
            .map(Segment::to_key)
            .unwrap_or_else(|| DEFAULT_INCLUDED_KEY.to_string())
    }
}

/// Specs carried by an `include` value: one Mapping or a list of them.
pub fn include_specs(value: &Value) -> Result<Vec<FragmentSpec>> {
    match value {
        Value::Object(_) => Ok(vec![FragmentSpec::include(value)?]),
        Value::Array(items) => items.iter().map(FragmentSpec::include).collect(),
        other => Err(invalid(
            INCLUDE_KEY,
            format!("expected a mapping or a list of mappings, found {}", kind_of(other)),
        )),
    }
}

fn expect_mapping<'a>(value: &'a Value, directive: &'static str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        invalid(
            directive,
            format!("expected a mapping, found {}", kind_of(value)),
        )
    })
}

fn parse_path(value: &Value, directive: &'static str, field: &str) -> Result<SegmentPath> {
    SegmentPath::from_value(value).ok_or_else(|| {
        invalid(
            directive,
            format!(
                "'{field}' must be a '/'-separated string or a list of keys and indices, found {}",
                kind_of(value)
            ),
        )
    })
}

fn parse_keys(value: &Value, directive: &'static str) -> Result<Vec<SegmentPath>> {
    let Value::Array(entries) = value else {
        return Err(invalid(
            directive,
            format!("'keys' must be a list, found {}", kind_of(value)),
        ));
    };

    entries
        .iter()
        .map(|entry| {
            let path = parse_path(entry, directive, KEYS_FIELD)?;
            if path.is_empty() {
                return Err(invalid(directive, "'keys' entries cannot be empty paths"));
            }
            Ok(path)
        })
        .collect()
}

fn invalid(directive: &'static str, message: impl Into<String>) -> Error {
    Error::InvalidSpec {
        directive,
        message: message.into(),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
