//! Applies one descriptor across a selection of clients.
//!
//! Strictly sequential: every client owns a distinct file, and processing
//! them in caller order keeps the result list and any logging
//! deterministic. One failing client never stops the rest.

use serde::Serialize;

use crate::clients::adapter_for;
use crate::descriptor::{Scope, ServerDescriptor};
use crate::platform::Platform;

/// Outcome of one adapter invocation. Immutable once produced.
#[derive(Debug, Clone, Serialize)]
pub struct AdapterResult {
    pub client: String,
    pub success: bool,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Apply `descriptor` to each requested client in order.
///
/// Unknown ids are skipped silently — the caller validates ids against
/// [`crate::clients::client_ids`] before getting here. Results come back in
/// request order, one per recognized client, and a failure for one client
/// is recorded in its result rather than aborting the run.
pub fn apply_to_clients(
    descriptor: &ServerDescriptor,
    scope: Scope,
    client_ids: &[String],
    platform: &Platform,
) -> Vec<AdapterResult> {
    let mut results = Vec::with_capacity(client_ids.len());

    for id in client_ids {
        let key = id.trim().to_ascii_lowercase();
        let Some(adapter) = adapter_for(&key) else {
            log::debug!("skipping unknown client id '{id}'");
            continue;
        };

        match adapter.apply(descriptor, platform, scope) {
            Ok(path) => results.push(AdapterResult {
                client: key,
                success: true,
                path: path.display().to_string(),
                error: None,
            }),
            Err(err) => {
                log::warn!("failed to update {}: {err}", adapter.label());
                let path = adapter
                    .config_path(platform, scope)
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                results.push(AdapterResult {
                    client: key,
                    success: false,
                    path,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    results
}
