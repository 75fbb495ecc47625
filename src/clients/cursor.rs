use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{string_map, write_json_map, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::error::Error;
use crate::platform::Platform;

/// Cursor: `mcpServers` map in `.cursor/mcp.json`, under the home dir or
/// the project dir. No `type` discriminator in either entry shape.
pub struct Cursor;

impl ClientAdapter for Cursor {
    fn id(&self) -> &'static str {
        "cursor"
    }

    fn label(&self) -> &'static str {
        "Cursor"
    }

    fn config_path(&self, platform: &Platform, scope: Scope) -> Result<PathBuf, Error> {
        let base = match scope {
            Scope::Global => platform.home()?.to_path_buf(),
            Scope::Project => platform.cwd.clone(),
        };
        Ok(base.join(".cursor").join("mcp.json"))
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
