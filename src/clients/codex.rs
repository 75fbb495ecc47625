use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use toml_edit::{Array, DocumentMut, Item, Table};

use super::{string_map, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::document::{load_text, save_text, LoadOutcome};
use crate::error::Error;
use crate::platform::Platform;

/// Codex: `[mcp_servers.<name>]` tables in `~/.codex/config.toml`, global
/// only. Edits go through `toml_edit` so comments, ordering and whitespace
/// in the rest of the file survive. Remote headers use Codex's
/// `http_headers` key.
pub struct Codex;

impl ClientAdapter for Codex {
    fn id(&self) -> &'static str {
        "codex"
    }

    fn label(&self) -> &'static str {
        "Codex"
    }

    fn supports(&self, scope: Scope) -> bool {
        scope == Scope::Global
    }

    fn config_path(&self, platform: &Platform, _scope: Scope) -> Result<PathBuf, Error> {
        Ok(platform.home()?.join(".codex").join("config.toml"))
    }

    fn entry(&self, descriptor: &ServerDescriptor) -> Value {
        match descriptor {
            ServerDescriptor::Local {
                command, args, env, ..
            } => {
                let mut entry = serde_json::Map::new();
                entry.insert("command".into(), json!(command));
                entry.insert("args".into(), json!(args));
                if !env.is_empty() {
                    entry.insert("env".into(), string_map(env));
                }
                Value::Object(entry)
            }
            ServerDescriptor::Remote { url, headers, .. } => {
                let mut entry = serde_json::Map::new();
                entry.insert("url".into(), json!(url));
                if !headers.is_empty() {
                    entry.insert("http_headers".into(), string_map(headers));
                }
                Value::Object(entry)
            }
        }
    }

    fn write(&self, path: &Path, name: &str, entry: Value) -> Result<(), Error> {
        let mut doc = match load_text(path) {
            LoadOutcome::Loaded(text) => match text.parse::<DocumentMut>() {
                Ok(doc) => doc,
                Err(e) => {
                    log::warn!(
                        "could not parse existing config {}: {e}; starting from an empty document",
                        path.display()
                    );
                    DocumentMut::new()
                }
            },
            LoadOutcome::Missing => DocumentMut::new(),
            LoadOutcome::Unreadable { error } => {
                log::warn!(
                    "could not read existing config {}: {error}; starting from an empty document",
                    path.display()
                );
                DocumentMut::new()
            }
        };

        let servers_is_table = doc
            .get("mcp_servers")
            .map_or(false, |item| item.is_table_like());
        if !servers_is_table {
            if doc.contains_key("mcp_servers") {
                log::warn!(
                    "mcp_servers in {} is not a table; replacing it",
                    path.display()
                );
            }
            doc["mcp_servers"] = toml_edit::table();
        }
        doc["mcp_servers"][name] = Item::Table(entry_to_table(&entry));

        save_text(path, &doc.to_string())
    }
}

/// Convert one JSON entry into a `toml_edit` table. Entries built by this
/// adapter only contain strings, string arrays and string maps.
fn entry_to_table(entry: &Value) -> Table {
    let mut t = Table::new();
    let Some(obj) = entry.as_object() else {
        return t;
    };
    for (key, value) in obj {
        match value {
            Value::String(s) => t[key.as_str()] = toml_edit::value(s.as_str()),
            Value::Bool(b) => t[key.as_str()] = toml_edit::value(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    t[key.as_str()] = toml_edit::value(i);
                }
            }
            Value::Array(items) => {
                let mut arr = Array::default();
                for item in items.iter().filter_map(|v| v.as_str()) {
                    arr.push(item);
                }
                t[key.as_str()] = Item::Value(toml_edit::Value::Array(arr));
            }
            Value::Object(map) => {
                let mut sub = Table::new();
                for (k, v) in map {
                    if let Some(s) = v.as_str() {
                        sub[k.as_str()] = toml_edit::value(s);
                    }
                }
                t[key.as_str()] = Item::Table(sub);
            }
            Value::Null => {}
        }
    }
    t
}
