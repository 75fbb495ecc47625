use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{string_map, write_json_map, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::error::Error;
use crate::platform::Platform;

/// Gemini CLI: `mcpServers` map in `~/.gemini/settings.json`, global only.
/// Gemini carries no `type` discriminator — transport is inferred from the
/// field name, and HTTP endpoints are stored as `httpUrl`.
pub struct Gemini;

impl ClientAdapter for Gemini {
    fn id(&self) -> &'static str {
        "gemini"
    }

    fn label(&self) -> &'static str {
        "Gemini CLI"
    }

    fn supports(&self, scope: Scope) -> bool {
        scope == Scope::Global
    }

    fn config_path(&self, platform: &Platform, _scope: Scope) -> Result<PathBuf, Error> {
        Ok(platform.home()?.join(".gemini").join("settings.json"))
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
                entry.insert("httpUrl".into(), json!(url));
                if !headers.is_empty() {
                    entry.insert("headers".into(), string_map(headers));
                }
                Value::Object(entry)
            }
        }
    }

    fn write(&self, path: &Path, name: &str, entry: Value) -> Result<(), Error> {
        write_json_map(path, &["mcpServers"], name, entry)
    }
}
