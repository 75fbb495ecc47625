//! Format codec: file bytes <-> structured documents.
//!
//! Loading distinguishes "file absent" from "file present but unparseable"
//! so callers apply the fail-open policy explicitly instead of hiding it in
//! a catch-all default.

use std::fs;
use std::path::Path;

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::error::Error;

/// Outcome of loading one client config file.
#[derive(Debug)]
pub enum LoadOutcome<T> {
    /// No file at the path.
    Missing,
    Loaded(T),
    /// The file exists but could not be read or parsed.
    Unreadable { error: String },
}

impl<T> LoadOutcome<T> {
    /// Apply the fail-open policy: missing and unreadable files both start
    /// from an empty baseline, but an unreadable one is worth a warning
    /// since saving will discard whatever the file held.
    pub fn or_baseline(self, path: &Path, baseline: impl FnOnce() -> T) -> T {
        match self {
            Self::Loaded(doc) => doc,
            Self::Missing => baseline(),
            Self::Unreadable { error } => {
                log::warn!(
                    "could not read existing config {}: {error}; starting from an empty document",
                    path.display()
                );
                baseline()
            }
        }
    }
}

/// Read the raw text of a config file. Used by the comment-preserving
/// variants, which patch the original text instead of re-serializing.
pub fn load_text(path: &Path) -> LoadOutcome<String> {
    match fs::read_to_string(path) {
        Ok(text) => LoadOutcome::Loaded(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => LoadOutcome::Missing,
        Err(e) => LoadOutcome::Unreadable {
            error: e.to_string(),
        },
    }
}

pub fn load_json(path: &Path) -> LoadOutcome<JsonValue> {
    match load_text(path) {
        LoadOutcome::Loaded(text) => match serde_json::from_str(&text) {
            Ok(value) => LoadOutcome::Loaded(value),
            Err(e) => LoadOutcome::Unreadable {
                error: e.to_string(),
            },
        },
        LoadOutcome::Missing => LoadOutcome::Missing,
        LoadOutcome::Unreadable { error } => LoadOutcome::Unreadable { error },
    }
}

pub fn load_yaml(path: &Path) -> LoadOutcome<YamlValue> {
    match load_text(path) {
        LoadOutcome::Loaded(text) => match serde_yaml::from_str(&text) {
            Ok(value) => LoadOutcome::Loaded(value),
            Err(e) => LoadOutcome::Unreadable {
                error: e.to_string(),
            },
        },
        LoadOutcome::Missing => LoadOutcome::Missing,
        LoadOutcome::Unreadable { error } => LoadOutcome::Unreadable { error },
    }
}

/// Write raw text, creating the parent directory first. Writes are plain
/// overwrites; a single short-lived user invocation owns each file.
pub fn save_text(path: &Path, text: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, text).map_err(|e| Error::io(path, e))
}

/// Serialize with two-space indent and a trailing newline.
pub fn save_json(path: &Path, value: &JsonValue) -> Result<(), Error> {
    let mut text =
        serde_json::to_string_pretty(value).map_err(|e| Error::JsonSerialize { source: e })?;
    text.push('\n');
    save_text(path, &text)
}

pub fn save_yaml(path: &Path, value: &YamlValue) -> Result<(), Error> {
    let text = serde_yaml::to_string(value).map_err(|e| Error::YamlSerialize { source: e })?;
    save_text(path, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_loads_as_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            load_json(&dir.path().join("absent.json")),
            LoadOutcome::Missing
        ));
    }

    #[test]
    fn corrupt_json_loads_as_unreadable() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"mcpServers\":").expect("seed file");
        assert!(matches!(
            load_json(&path),
            LoadOutcome::Unreadable { .. }
        ));
    }

    #[test]
    fn missing_and_unreadable_share_the_baseline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let good = LoadOutcome::<JsonValue>::Missing
            .or_baseline(&dir.path().join("a.json"), || json!({}));
        let bad = (LoadOutcome::Unreadable {
            error: "oops".into(),
        })
        .or_baseline(&dir.path().join("b.json"), || json!({}));
        assert_eq!(good, bad);
    }

    #[test]
    fn save_json_writes_pretty_with_trailing_newline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("out.json");
        save_json(&path, &json!({ "a": 1 })).expect("save");
        let text = fs::read_to_string(&path).expect("read back");
        assert_eq!(text, "{\n  \"a\": 1\n}\n");
    }
}
