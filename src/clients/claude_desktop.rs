use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{string_map, write_json_map, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::error::Error;
use crate::platform::Platform;

/// Claude Desktop: `mcpServers` map in the platform app-support dir.
/// Global only, and no native remote entry shape — remote descriptors are
/// stored as bare `url`/`headers` so a future client version can pick them
/// up.
pub struct ClaudeDesktop;

impl ClientAdapter for ClaudeDesktop {
    fn id(&self) -> &'static str {
        "claude"
    }

    fn label(&self) -> &'static str {
        "Claude Desktop"
    }

    fn supports(&self, scope: Scope) -> bool {
        scope == Scope::Global
    }

    fn config_path(&self, platform: &Platform, _scope: Scope) -> Result<PathBuf, Error> {
        Ok(platform
            .app_support_dir()?
            .join("Claude")
            .join("claude_desktop_config.json"))
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
