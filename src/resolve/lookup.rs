//! Navigation into loaded documents (`keys_path`, `key`, `keys`).

use serde_json::{Map, Value};

use super::spec::{FragmentSpec, Segment, SegmentPath, Selection, kind_of};

/// Why a path could not be followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    /// The path as written in the directive.
    pub path: String,
    pub reason: String,
}

impl LookupFailure {
    fn new(path: &SegmentPath, reason: String) -> Self {
        Self {
            path: path.to_string(),
            reason,
        }
    }
}

/// Apply a spec's `keys_path` and selection to an already resolved document.
pub fn extract(tree: Value, spec: &FragmentSpec) -> Result<Value, LookupFailure> {
    let target = take_path(tree, &spec.keys_path)?;
    match &spec.selection {
        Selection::Whole => Ok(target),
        Selection::Key(path) => take_path(target, path),
        Selection::Keys(entries) => select_keys(&target, entries),
    }
}

/// Follow `path` and return the value it ends at, consuming the tree.
pub fn take_path(tree: Value, path: &SegmentPath) -> Result<Value, LookupFailure> {
    let mut current = tree;
    for segment in path.segments() {
        current = match current {
            Value::Object(mut map) => {
                let key = segment.to_key();
                map.shift_remove(&key)
                    .ok_or_else(|| LookupFailure::new(path, format!("no key '{key}'")))?
            }
            Value::Array(mut items) => {
                let idx = sequence_index(segment, items.len())
                    .map_err(|reason| LookupFailure::new(path, reason))?;
                items.swap_remove(idx)
            }
            scalar => {
                return Err(LookupFailure::new(
                    path,
                    format!("cannot look up '{segment}' in {}", kind_of(&scalar)),
                ));
            }
        };
    }
    Ok(current)
}

/// Follow `path` by reference.
pub fn get_path<'a>(tree: &'a Value, path: &SegmentPath) -> Result<&'a Value, LookupFailure> {
    let mut current = tree;
    for segment in path.segments() {
        current = match current {
            Value::Object(map) => {
                let key = segment.to_key();
                map.get(&key)
                    .ok_or_else(|| LookupFailure::new(path, format!("no key '{key}'")))?
            }
            Value::Array(items) => {
                let idx = sequence_index(segment, items.len())
                    .map_err(|reason| LookupFailure::new(path, reason))?;
                &items[idx]
            }
            scalar => {
                return Err(LookupFailure::new(
                    path,
                    format!("cannot look up '{segment}' in {}", kind_of(scalar)),
                ));
            }
        };
    }
    Ok(current)
}

/// Build the result of a `keys` selection.
///
/// A Sequence target addressed only by bare integer indices yields a
/// Sequence; everything else yields a Mapping keyed by each entry's last
/// segment.
pub fn select_keys(target: &Value, entries: &[SegmentPath]) -> Result<Value, LookupFailure> {
    if let Value::Array(items) = target {
        let indices: Option<Vec<i64>> = entries.iter().map(SegmentPath::as_index).collect();
        if let Some(indices) = indices {
            return indices
                .into_iter()
                .zip(entries)
                .map(|(idx, entry)| {
                    let idx = sequence_index(&Segment::Index(idx), items.len())
                        .map_err(|reason| LookupFailure::new(entry, reason))?;
                    Ok(items[idx].clone())
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }
    }

    if !(target.is_object() || target.is_array()) {
        let path = entries.first().cloned().unwrap_or_default();
        return Err(LookupFailure::new(
            &path,
            format!("cannot select keys from {}", kind_of(target)),
        ));
    }

    let mut selected = Map::new();
    for entry in entries {
        let value = get_path(target, entry)?;
        // Entries are never empty, see `spec::parse_keys`.
        let name = entry.last().map(Segment::to_key).unwrap_or_default();
        selected.insert(name, value.clone());
    }
    Ok(Value::Object(selected))
}

/// Resolve a segment against a Sequence of `len` elements.
///
/// Key segments must parse as integers; negative indices count from the end.
fn sequence_index(segment: &Segment, len: usize) -> Result<usize, String> {
    let idx = match segment {
        Segment::Index(idx) => *idx,
        Segment::Key(key) => key
            .parse::<i64>()
            .map_err(|_| format!("expected an index into a list, found '{key}'"))?,
    };

    let resolved = if idx < 0 {
        i64::try_from(len).ok().and_then(|len| {
            let from_end = len + idx;
            usize::try_from(from_end).ok()
        })
    } else {
        usize::try_from(idx).ok()
    };

    match resolved {
        Some(i) if i < len => Ok(i),
        _ => Err(format!("index {idx} out of range for list of length {len}")),
    }
}
