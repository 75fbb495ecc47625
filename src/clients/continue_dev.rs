use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{string_map, write_yaml_list, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::error::Error;
use crate::platform::Platform;

/// Continue: the one list-shaped client. `mcpServers` in
/// `.continue/config.yaml` is a sequence of entries that each carry their
/// own `name` field; updates replace the matching element in place.
pub struct Continue;

impl ClientAdapter for Continue {
    fn id(&self) -> &'static str {
        "continue"
    }

    fn label(&self) -> &'static str {
        "Continue"
    }

    fn config_path(&self, platform: &Platform, scope: Scope) -> Result<PathBuf, Error> {
        let base = match scope {
            Scope::Global => platform.home()?.to_path_buf(),
            Scope::Project => platform.cwd.clone(),
        };
        Ok(base.join(".continue").join("config.yaml"))
    }

    fn entry(&self, descriptor: &ServerDescriptor) -> Value {
        match descriptor {
            ServerDescriptor::Local {
                name,
                command,
                args,
                env,
            } => {
                let mut entry = serde_json::Map::new();
                entry.insert("name".into(), json!(name));
                entry.insert("command".into(), json!(command));
                entry.insert("args".into(), json!(args));
                if !env.is_empty() {
                    entry.insert("env".into(), string_map(env));
                }
                Value::Object(entry)
            }
            ServerDescriptor::Remote { name, url, headers } => {
                let mut entry = serde_json::Map::new();
                entry.insert("name".into(), json!(name));
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
        write_yaml_list(path, &["mcpServers"], name, entry)
    }
}
