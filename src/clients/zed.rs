use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{string_map, write_jsonc_map, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::error::Error;
use crate::platform::Platform;

/// Zed: `context_servers` map inside the main `settings.json` under the
/// XDG config dir, global only. Zed settings are JSONC and usually full of
/// user comments, so the entry is applied as a textual patch.
pub struct Zed;

impl ClientAdapter for Zed {
    fn id(&self) -> &'static str {
        "zed"
    }

    fn label(&self) -> &'static str {
        "Zed"
    }

    fn supports(&self, scope: Scope) -> bool {
        scope == Scope::Global
    }

    fn config_path(&self, platform: &Platform, _scope: Scope) -> Result<PathBuf, Error> {
        Ok(platform.config_dir()?.join("zed").join("settings.json"))
    }

    fn entry(&self, descriptor: &ServerDescriptor) -> Value {
        match descriptor {
            ServerDescriptor::Local {
                command, args, env, ..
            } => {
                let mut entry = serde_json::Map::new();
                entry.insert("source".into(), json!("custom"));
                entry.insert("command".into(), json!(command));
                entry.insert("args".into(), json!(args));
                if !env.is_empty() {
                    entry.insert("env".into(), string_map(env));
                }
                Value::Object(entry)
            }
            ServerDescriptor::Remote { url, headers, .. } => {
                // Zed has no remote transport yet; keep a forward-compatible
                // shape alongside the source marker.
                let mut entry = serde_json::Map::new();
                entry.insert("source".into(), json!("custom"));
                entry.insert("url".into(), json!(url));
                if !headers.is_empty() {
                    entry.insert("headers".into(), string_map(headers));
                }
                Value::Object(entry)
            }
        }
    }

    fn write(&self, path: &Path, name: &str, entry: Value) -> Result<(), Error> {
        write_jsonc_map(path, &[], &["context_servers"], name, entry)
    }
}
