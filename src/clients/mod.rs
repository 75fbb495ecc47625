//! Per-client adapters and the static registry.
//!
//! Every adapter runs the same pipeline — resolve path, load, transform,
//! upsert, save — and differs only in its path rule, container key,
//! container shape, serialization format and entry vocabulary.

mod claude_code;
mod claude_desktop;
mod codex;
mod continue_dev;
mod cursor;
mod gemini;
mod goose;
mod opencode;
mod vscode;
mod windsurf;
mod zed;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::{json, Value as JsonValue};
use serde_yaml::Value as YamlValue;

use crate::descriptor::{Scope, ServerDescriptor};
use crate::document::{load_json, load_text, load_yaml, save_json, save_text, save_yaml};
use crate::error::Error;
use crate::jsonc::JsoncDocument;
use crate::merge::{upsert_json_map, upsert_yaml_list, upsert_yaml_map};
use crate::platform::Platform;

/// One client application: a path rule, an entry transform on the generic
/// descriptor, and a container-specific write.
pub trait ClientAdapter: Send + Sync {
    /// Lowercase registry key.
    fn id(&self) -> &'static str;

    /// Human-readable client name.
    fn label(&self) -> &'static str;

    fn supports(&self, _scope: Scope) -> bool {
        true
    }

    /// Absolute config file path for this client and scope. Pure except for
    /// the opencode extension probe.
    fn config_path(&self, platform: &Platform, scope: Scope) -> Result<PathBuf, Error>;

    /// Transform the generic descriptor into this client's entry shape.
    fn entry(&self, descriptor: &ServerDescriptor) -> JsonValue;

    /// Load the existing document, upsert `entry` under `name`, save.
    fn write(&self, path: &Path, name: &str, entry: JsonValue) -> Result<(), Error>;

    /// The full pipeline for one client. Failures stay inside the adapter's
    /// result; the orchestrator never sees a panic.
    fn apply(
        &self,
        descriptor: &ServerDescriptor,
        platform: &Platform,
        scope: Scope,
    ) -> Result<PathBuf, Error> {
        if !self.supports(scope) {
            return Err(Error::UnsupportedScope {
                client: self.id(),
                scope,
            });
        }
        let path = self.config_path(platform, scope)?;
        let entry = self.entry(descriptor);
        self.write(&path, descriptor.name(), entry)?;
        log::info!(
            "registered MCP server '{}' for {} at {}",
            descriptor.name(),
            self.label(),
            path.display()
        );
        Ok(path)
    }
}

static REGISTRY: Lazy<BTreeMap<&'static str, Box<dyn ClientAdapter>>> = Lazy::new(|| {
    let adapters: Vec<Box<dyn ClientAdapter>> = vec![
        Box::new(claude_desktop::ClaudeDesktop),
        Box::new(claude_code::ClaudeCode),
        Box::new(cursor::Cursor),
        Box::new(windsurf::Windsurf),
        Box::new(vscode::VsCode),
        Box::new(opencode::Opencode),
        Box::new(continue_dev::Continue),
        Box::new(goose::Goose),
        Box::new(codex::Codex),
        Box::new(gemini::Gemini),
        Box::new(zed::Zed),
    ];
    adapters.into_iter().map(|a| (a.id(), a)).collect()
});

/// Case-insensitive adapter lookup.
pub fn adapter_for(id: &str) -> Option<&'static dyn ClientAdapter> {
    REGISTRY
        .get(id.trim().to_ascii_lowercase().as_str())
        .map(|a| a.as_ref())
}

/// Sorted list of valid client ids, for input validation and listing.
pub fn client_ids() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

/// Optional string maps become JSON objects only when non-empty; the
/// callers decide the field name per client vocabulary.
pub(crate) fn string_map(map: &IndexMap<String, String>) -> JsonValue {
    json!(map)
}

// ---------------------------------------------------------------------------
// Shared container writes
// ---------------------------------------------------------------------------

/// Mapping-by-name upsert into a plain JSON file.
pub(crate) fn write_json_map(
    path: &Path,
    container: &[&str],
    name: &str,
    entry: JsonValue,
) -> Result<(), Error> {
    let mut root = load_json(path).or_baseline(path, || json!({}));
    if !root.is_object() {
        log::warn!(
            "config root at {} is not an object; replacing it",
            path.display()
        );
        root = json!({});
    }
    upsert_json_map(&mut root, container, name, entry)?;
    save_json(path, &root)
}

/// Mapping-by-name upsert into a YAML file.
pub(crate) fn write_yaml_map(
    path: &Path,
    container: &[&str],
    name: &str,
    entry: JsonValue,
) -> Result<(), Error> {
    let mut root = load_yaml(path).or_baseline(path, || YamlValue::Mapping(Default::default()));
    let entry = serde_yaml::to_value(entry).map_err(|e| Error::YamlSerialize { source: e })?;
    upsert_yaml_map(&mut root, container, name, entry)?;
    save_yaml(path, &root)
}

/// List-with-name-field upsert into a YAML file.
pub(crate) fn write_yaml_list(
    path: &Path,
    container: &[&str],
    name: &str,
    entry: JsonValue,
) -> Result<(), Error> {
    let mut root = load_yaml(path).or_baseline(path, || YamlValue::Mapping(Default::default()));
    let entry = serde_yaml::to_value(entry).map_err(|e| Error::YamlSerialize { source: e })?;
    upsert_yaml_list(&mut root, container, name, entry)?;
    save_yaml(path, &root)
}

/// Comment-preserving upsert: bootstrap keys are set only when absent, then
/// the entry lands at `[container.., name]` as a textual patch.
pub(crate) fn write_jsonc_map(
    path: &Path,
    bootstrap: &[(&[&str], JsonValue)],
    container: &[&str],
    name: &str,
    entry: JsonValue,
) -> Result<(), Error> {
    let mut doc = match load_text(path) {
        crate::document::LoadOutcome::Loaded(text) => match JsoncDocument::parse(&text) {
            Some(doc) => doc,
            None => {
                log::warn!(
                    "config at {} is not a JSON(C) object; starting from an empty document",
                    path.display()
                );
                JsoncDocument::new()
            }
        },
        crate::document::LoadOutcome::Missing => JsoncDocument::new(),
        crate::document::LoadOutcome::Unreadable { error } => {
            log::warn!(
                "could not read existing config {}: {error}; starting from an empty document",
                path.display()
            );
            JsoncDocument::new()
        }
    };
    for (keys, value) in bootstrap {
        doc.set_if_missing(keys, value);
    }
    let mut full_path: Vec<&str> = container.to_vec();
    full_path.push(name);
    doc.set(&full_path, &entry);
    let mut text = doc.text().to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }
    save_text(path, &text)
}
