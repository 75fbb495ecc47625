use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{string_map, write_json_map, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::error::Error;
use crate::platform::Platform;

/// VS Code: `servers` map in the user-data `mcp.json`
/// (`~/Library/Application Support/Code/User`, `%APPDATA%\Code\User` or
/// `~/.config/Code/User`) or the workspace `./.vscode/mcp.json`.
pub struct VsCode;

impl ClientAdapter for VsCode {
    fn id(&self) -> &'static str {
        "vscode"
    }

    fn label(&self) -> &'static str {
        "VS Code"
    }

    fn config_path(&self, platform: &Platform, scope: Scope) -> Result<PathBuf, Error> {
        match scope {
            Scope::Global => Ok(platform
                .app_support_dir()?
                .join("Code")
                .join("User")
                .join("mcp.json")),
            Scope::Project => Ok(platform.cwd.join(".vscode").join("mcp.json")),
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
                entry.insert("type".into(), json!("http"));
                entry.insert("url".into(), json!(url));
                if !headers.is_empty() {
                    entry.insert("headers".into(), string_map(headers));
                }
                Value::Object(entry)
            }
        }
    }

    fn write(&self, path: &Path, name: &str, entry: Value) -> Result<(), Error> {
        write_json_map(path, &["servers"], name, entry)
    }
}
