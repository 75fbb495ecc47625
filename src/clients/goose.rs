use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{string_map, write_yaml_map, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::error::Error;
use crate::platform::Platform;

/// goose: `extensions` map in `~/.config/goose/config.yaml`, global only.
/// Entries use goose vocabulary (`cmd`, `envs`, `uri`) and carry the fixed
/// `enabled: true` / `timeout: 300` fields the client expects.
pub struct Goose;

const DEFAULT_TIMEOUT_SECS: u64 = 300;

impl ClientAdapter for Goose {
    fn id(&self) -> &'static str {
        "goose"
    }

    fn label(&self) -> &'static str {
        "goose"
    }

    fn supports(&self, scope: Scope) -> bool {
        scope == Scope::Global
    }

    fn config_path(&self, platform: &Platform, _scope: Scope) -> Result<PathBuf, Error> {
        Ok(platform
            .home()?
            .join(".config")
            .join("goose")
            .join("config.yaml"))
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
                entry.insert("enabled".into(), json!(true));
                entry.insert("type".into(), json!("stdio"));
                entry.insert("cmd".into(), json!(command));
                entry.insert("args".into(), json!(args));
                if !env.is_empty() {
                    entry.insert("envs".into(), string_map(env));
                }
                entry.insert("timeout".into(), json!(DEFAULT_TIMEOUT_SECS));
                Value::Object(entry)
            }
            ServerDescriptor::Remote { name, url, headers } => {
                let mut entry = serde_json::Map::new();
                entry.insert("name".into(), json!(name));
                entry.insert("enabled".into(), json!(true));
                entry.insert("type".into(), json!("streamable_http"));
                entry.insert("uri".into(), json!(url));
                if !headers.is_empty() {
                    entry.insert("headers".into(), string_map(headers));
                }
                entry.insert("timeout".into(), json!(DEFAULT_TIMEOUT_SECS));
                Value::Object(entry)
            }
        }
    }

    fn write(&self, path: &Path, name: &str, entry: Value) -> Result<(), Error> {
        write_yaml_map(path, &["extensions"], name, entry)
    }
}
