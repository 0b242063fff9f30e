//! `@path:` annotations: keys whose string value is a filesystem path
//! relative to the document that contains them.

use std::path::{Component, Path, PathBuf};

use serde_json::{Map, Value};

/// Whether any Mapping in `tree` has a key starting with `prefix`.
pub fn has_path_annotations(tree: &Value, prefix: &str) -> bool {
    match tree {
        Value::Object(map) => map
            .iter()
            .any(|(key, value)| key.starts_with(prefix) || has_path_annotations(value, prefix)),
        Value::Array(items) => items.iter().any(|item| has_path_annotations(item, prefix)),
        _ => false,
    }
}

/// Rewrite every string-valued annotation under `tree` into a plain key
/// holding the resolved path.
///
/// Subtrees without annotations are skipped entirely.
pub fn resolve_path_annotations(tree: &mut Value, base_dir: &Path, prefix: &str) {
    if has_path_annotations(tree, prefix) {
        rewrite_annotations(tree, base_dir, prefix);
    }
}

fn rewrite_annotations(tree: &mut Value, base_dir: &Path, prefix: &str) {
    match tree {
        Value::Object(map) => {
            if map
                .iter()
                .any(|(key, value)| key.starts_with(prefix) && value.is_string())
            {
                *map = rename_annotations(std::mem::take(map), base_dir, prefix);
            }
            for value in map.values_mut() {
                rewrite_annotations(value, base_dir, prefix);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                rewrite_annotations(item, base_dir, prefix);
            }
        }
        _ => {}
    }
}

/// Rebuild `map` with annotations renamed in place.
///
/// A resolved annotation wins over a plain key of the same name, wherever
/// that key sits. Non-string annotation values keep their prefixed key.
fn rename_annotations(map: Map<String, Value>, base_dir: &Path, prefix: &str) -> Map<String, Value> {
    let mut annotated = Vec::new();
    for (key, value) in &map {
        if let (Some(name), Value::String(_)) = (key.strip_prefix(prefix), value) {
            annotated.push(name.to_string());
        }
    }

    let mut out = Map::with_capacity(map.len());
    for (key, value) in map {
        let renamed = match (key.strip_prefix(prefix), &value) {
            (Some(name), Value::String(raw)) => {
                Some((name.to_string(), resolve_annotated_path(raw, base_dir)))
            }
            _ => None,
        };
        match renamed {
            Some((name, path)) => {
                out.insert(name, Value::String(path));
            }
            None if annotated.contains(&key) => {}
            None => {
                out.insert(key, value);
            }
        }
    }
    out
}

/// Resolve one annotation value against `base_dir`.
///
/// Empty strings stay empty and absolute paths are returned untouched.
pub fn resolve_annotated_path(raw: &str, base_dir: &Path) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let path = Path::new(raw);
    if path.is_absolute() {
        return raw.to_string();
    }

    let joined = base_dir.join(path);
    let absolute = std::path::absolute(&joined).unwrap_or(joined);
    normalize_path(&absolute).to_string_lossy().into_owned()
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component. Symlinks are not consulted.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
