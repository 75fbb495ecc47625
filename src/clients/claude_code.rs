use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{string_map, write_json_map, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::error::Error;
use crate::platform::Platform;

/// Claude Code: `mcpServers` map in `~/.claude.json` (global) or the
/// project-shared `./.mcp.json`. Entries carry a `type` discriminator.
pub struct ClaudeCode;

impl ClientAdapter for ClaudeCode {
    fn id(&self) -> &'static str {
        "claude-code"
    }

    fn label(&self) -> &'static str {
        "Claude Code"
    }

    fn config_path(&self, platform: &Platform, scope: Scope) -> Result<PathBuf, Error> {
        match scope {
            Scope::Global => Ok(platform.home()?.join(".claude.json")),
            Scope::Project => Ok(platform.cwd.join(".mcp.json")),
        }
    }

    fn entry(&self, descriptor: &ServerDescriptor) -> Value {
        match descriptor {
            ServerDescriptor::Local {
                command, args, env, ..
            } => {
                let mut entry = serde_json::Map::new();
                entry.insert("type".into(), json!("stdio"));
                entry.insert("command".into(), json!(command));
                entry.insert("args".into(), json!(args));
                if !env.is_empty() {
                    entry.insert("env".into(), string_map(env));
                }
                Value::Object(entry)
            }
            ServerDescriptor::Remote { url, headers, .. } => {
                let mut entry = serde_json::Map::new();
                entry.insert("type".into(), json!("sse"));
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
