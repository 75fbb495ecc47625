use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use super::{string_map, write_jsonc_map, ClientAdapter};
use crate::descriptor::{Scope, ServerDescriptor};
use crate::error::Error;
use crate::platform::Platform;

/// opencode: `mcp` map in `opencode.json`, global under the XDG config dir
/// or project-local. Users may keep the file as `opencode.jsonc`; if that
/// file already exists it wins (the one read-only filesystem probe in path
/// resolution). Writes go through the comment-preserving patch codec either
/// way, and a `$schema` marker is bootstrapped once.
///
/// Local entries fold command and args into a single ordered `command`
/// array, per opencode's own schema.
pub struct Opencode;

const SCHEMA_URL: &str = "https://opencode.ai/config.json";

impl ClientAdapter for Opencode {
    fn id(&self) -> &'static str {
        "opencode"
    }

    fn label(&self) -> &'static str {
        "opencode"
    }

    fn config_path(&self, platform: &Platform, scope: Scope) -> Result<PathBuf, Error> {
        let dir = match scope {
            Scope::Global => platform.config_dir()?.join("opencode"),
            Scope::Project => platform.cwd.clone(),
        };
        let jsonc = dir.join("opencode.jsonc");
        if jsonc.exists() {
            return Ok(jsonc);
        }
        Ok(dir.join("opencode.json"))
    }

    fn entry(&self, descriptor: &ServerDescriptor) -> Value {
        match descriptor {
            ServerDescriptor::Local {
                command, args, env, ..
            } => {
                let mut argv = vec![command.clone()];
                argv.extend(args.iter().cloned());
                let mut entry = serde_json::Map::new();
                entry.insert("type".into(), json!("local"));
                entry.insert("command".into(), json!(argv));
                entry.insert("enabled".into(), json!(true));
                if !env.is_empty() {
                    entry.insert("environment".into(), string_map(env));
                }
                Value::Object(entry)
            }
            ServerDescriptor::Remote { url, headers, .. } => {
                let mut entry = serde_json::Map::new();
                entry.insert("type".into(), json!("remote"));
                entry.insert("url".into(), json!(url));
                entry.insert("enabled".into(), json!(true));
                if !headers.is_empty() {
                    entry.insert("headers".into(), string_map(headers));
                }
                Value::Object(entry)
            }
        }
    }

    fn write(&self, path: &Path, name: &str, entry: Value) -> Result<(), Error> {
        let bootstrap: &[(&[&str], Value)] = &[(&["$schema"], json!(SCHEMA_URL))];
        write_jsonc_map(path, bootstrap, &["mcp"], name, entry)
    }
}
