//! mcp-enroll — persist one MCP server registration into the config files
//! of multiple AI client applications.
//!
//! Each client keeps its registrations at a different path, under a
//! different container key, in a different format (JSON, comment-preserving
//! JSON, YAML or TOML) and with its own entry vocabulary. This crate turns
//! one generic [`ServerDescriptor`] into the per-client document mutations,
//! applied losslessly (unrelated content preserved) and idempotently (safe
//! to re-run), with per-client failure isolation.
//!
//! ```no_run
//! use mcp_enroll::{apply_to_clients, Platform, Scope, ServerDescriptor};
//!
//! let descriptor = ServerDescriptor::local(
//!     "fs",
//!     "npx -y @modelcontextprotocol/server-filesystem /tmp",
//!     Default::default(),
//! )?;
//! let results = apply_to_clients(
//!     &descriptor,
//!     Scope::Global,
//!     &["claude-code".into(), "cursor".into()],
//!     &Platform::current(),
//! );
//! for r in &results {
//!     println!("{}: {} ({})", r.client, if r.success { "ok" } else { "failed" }, r.path);
//! }
//! # Ok::<(), mcp_enroll::Error>(())
//! ```

mod clients;
mod descriptor;
mod document;
mod error;
mod jsonc;
mod merge;
mod orchestrator;
mod platform;

pub use clients::{adapter_for, client_ids, ClientAdapter};
pub use descriptor::{Scope, ServerDescriptor};
pub use document::{load_json, load_text, load_yaml, LoadOutcome};
pub use error::Error;
pub use jsonc::{strip_jsonc_comments, JsoncDocument};
pub use orchestrator::{apply_to_clients, AdapterResult};
pub use platform::{Os, Platform};
