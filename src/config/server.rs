//! Server bind configuration.
//!
//! Defaults can be overridden at startup with `SCAVENGER_HOST` and `SCAVENGER_PORT`.

use log::warn;

/// Host the HTTP server binds to when `SCAVENGER_HOST` is not set.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the HTTP server binds to when `SCAVENGER_PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Username given to players who connect without one.
pub const DEFAULT_USERNAME: &str = "Scavenger";

/// Resolve the bind address from the process environment.
pub fn server_address() -> (String, u16) {
    resolve_address(
        std::env::var("SCAVENGER_HOST").ok(),
        std::env::var("SCAVENGER_PORT").ok(),
    )
}

/// Resolve the bind address from optional overrides, falling back to the defaults.
pub fn resolve_address(host: Option<String>, port: Option<String>) -> (String, u16) {
    let host = host
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = match port {
        Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
            warn!("[Config] Invalid SCAVENGER_PORT '{}', using {}", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    };

    (host, port)
}
