use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Server names double as document keys in every client file, so the
/// character set is restricted to what all of them tolerate.
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid regex"));

/// Whether a registration targets the per-user config or the current project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Project,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Project => "project",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "project" => Ok(Self::Project),
            other => Err(Error::InvalidInput(format!(
                "unsupported scope: {other} (global|project)"
            ))),
        }
    }
}

/// Generic, client-agnostic description of one MCP server registration.
/// Built once per invocation from validated inputs; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ServerDescriptor {
    /// A server launched as a local subprocess over stdio.
    Local {
        name: String,
        command: String,
        args: Vec<String>,
        #[serde(default)]
        env: IndexMap<String, String>,
    },
    /// A server reached over HTTP/SSE.
    Remote {
        name: String,
        url: String,
        #[serde(default)]
        headers: IndexMap<String, String>,
    },
}

impl ServerDescriptor {
    /// Build a local descriptor from a full command line. The line is
    /// whitespace-tokenized once here; the first token becomes the command.
    pub fn local(
        name: &str,
        command_line: &str,
        env: IndexMap<String, String>,
    ) -> Result<Self, Error> {
        let name = validate_name(name)?;
        let mut tokens = command_line.split_whitespace().map(str::to_string);
        let command = tokens
            .next()
            .ok_or_else(|| Error::InvalidInput("command must not be empty".into()))?;
        Ok(Self::Local {
            name,
            command,
            args: tokens.collect(),
            env,
        })
    }

    pub fn remote(name: &str, url: &str, headers: IndexMap<String, String>) -> Result<Self, Error> {
        let name = validate_name(name)?;
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::InvalidInput("url must not be empty".into()));
        }
        Ok(Self::Remote {
            name,
            url: url.to_string(),
            headers,
        })
    }

    /// The unique key under which the entry is stored in every client file.
    pub fn name(&self) -> &str {
        match self {
            Self::Local { name, .. } | Self::Remote { name, .. } => name,
        }
    }
}

fn validate_name(name: &str) -> Result<String, Error> {
    let name = name.trim();
    if !NAME_RE.is_match(name) {
        return Err(Error::InvalidInput(format!(
            "invalid server name '{name}': only letters, digits, '-' and '_' are allowed"
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_tokenizes_command_line() {
        let desc = ServerDescriptor::local("fs", "npx -y server-fs /tmp", IndexMap::new())
            .expect("valid descriptor");
        match desc {
            ServerDescriptor::Local { command, args, .. } => {
                assert_eq!(command, "npx");
                assert_eq!(args, vec!["-y", "server-fs", "/tmp"]);
            }
            _ => panic!("expected local descriptor"),
        }
    }

    #[test]
    fn empty_command_line_is_rejected() {
        let err = ServerDescriptor::local("fs", "   ", IndexMap::new())
            .expect_err("blank command should fail");
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn name_charset_is_enforced() {
        assert!(ServerDescriptor::remote("my server", "http://x", IndexMap::new()).is_err());
        assert!(ServerDescriptor::remote("", "http://x", IndexMap::new()).is_err());
        assert!(ServerDescriptor::remote("my_server-2", "http://x", IndexMap::new()).is_ok());
    }

    #[test]
    fn scope_parses_case_insensitively() {
        assert_eq!("Global".parse::<Scope>().expect("parse"), Scope::Global);
        assert_eq!("project".parse::<Scope>().expect("parse"), Scope::Project);
        assert!("user".parse::<Scope>().is_err());
    }
}
