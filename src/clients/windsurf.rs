use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{string_map, write_json_map, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::error::Error;
use crate::platform::Platform;

/// Windsurf: `mcpServers` map in `~/.codeium/windsurf/mcp_config.json`.
/// Project scope resolves to `./.windsurf/mcp.json`, though the client
/// itself only reads the global file today. Remote entries name the
/// endpoint `serverUrl`.
pub struct Windsurf;

impl ClientAdapter for Windsurf {
    fn id(&self) -> &'static str {
        "windsurf"
    }

    fn label(&self) -> &'static str {
        "Windsurf"
    }

    fn config_path(&self, platform: &Platform, scope: Scope) -> Result<PathBuf, Error> {
        match scope {
            Scope::Global => Ok(platform
                .home()?
                .join(".codeium")
                .join("windsurf")
                .join("mcp_config.json")),
            Scope::Project => Ok(platform.cwd.join(".windsurf").join("mcp.json")),
        }
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
                entry.insert("serverUrl".into(), json!(url));
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
