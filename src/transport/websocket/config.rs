//! Channel URL derivation and transport constants

use std::time::Duration;

use url::Url;

use crate::error::{LinkError, Result};

/// Path of the message channel on the assistant host
pub const CHANNEL_PATH: &str = "/ws";

/// Upper bound on a single open attempt
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Derive the channel URL from the configured endpoint
///
/// Keeps host and port, replaces the path with `/ws`, and upgrades the scheme
/// to `wss` when the endpoint is `https`, `ws` otherwise.
///
/// # Errors
/// Returns error if the endpoint cannot be parsed or has no host
pub fn channel_url(endpoint: &str) -> Result<Url> {
    let endpoint = Url::parse(endpoint.trim())?;
    let host = endpoint
        .host_str()
        .ok_or_else(|| LinkError::invalid_config(format!("endpoint has no host: {endpoint}")))?;

    let scheme = match endpoint.scheme() {
        "https" | "wss" => "wss",
        _ => "ws",
    };
    let authority = match endpoint.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    Ok(Url::parse(&format!("{scheme}://{authority}{CHANNEL_PATH}"))?)
}
