// crates/gatehub-core/src/routes.rs
// ============================================================================
// Module: Gatehub Routes
// Description: Routing model and externally reachable URL composition.
// Purpose: Compute public and per-user URLs under both routing modes.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The hub is reachable either through per-user subdomains or through paths
//! under the proxy's public host. These helpers are pure functions over the
//! routing snapshot a hub application reports once it is serving; they never
//! touch the network.
//!
//! The scheme is fixed to `http`: the harness always talks to a loopback
//! endpoint and TLS termination is a proxy concern.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Routing Model
// ============================================================================

/// Public-facing routes of the proxy fronting the hub.
///
/// # Invariants
/// - `host` carries no scheme and may include a port (`127.0.0.1:8081`).
/// - `base_path` begins with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyRoutes {
    /// Host (and optional port) of the proxy's public server.
    pub host: String,
    /// Base path under which the hub is mounted.
    pub base_path: String,
}

/// Routes of one user's server.
///
/// # Invariants
/// - `host` carries no scheme and may include a port.
/// - `base_path` begins with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRoutes {
    /// The user's own host, used only under subdomain routing.
    pub host: String,
    /// Base path of the user's server.
    pub base_path: String,
}

/// Routing snapshot reported by a running hub application.
///
/// # Invariants
/// - `subdomain_host`, when present, carries no scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubRoutes {
    /// Shared subdomain host; `None` selects path-based routing.
    pub subdomain_host: Option<String>,
    /// Routes of the fronting proxy.
    pub proxy: ProxyRoutes,
}

impl HubRoutes {
    /// Returns true when subdomain routing is configured.
    #[must_use]
    pub const fn use_subdomains(&self) -> bool {
        self.subdomain_host.is_some()
    }
}

// ============================================================================
// SECTION: URL Composition
// ============================================================================

/// Returns the externally reachable host for the hub.
#[must_use]
pub fn public_host(routes: &HubRoutes) -> &str {
    match routes.subdomain_host.as_deref() {
        Some(host) => host,
        None => &routes.proxy.host,
    }
}

/// Returns the externally reachable base URL for the hub.
#[must_use]
pub fn public_url(routes: &HubRoutes) -> String {
    format!("http://{}{}", public_host(routes), routes.proxy.base_path)
}

/// Returns the externally reachable base URL for one user's server.
///
/// Subdomain routing uses the user's own host; path routing mounts the
/// user's base path under the public host.
#[must_use]
pub fn user_url(user: &UserRoutes, routes: &HubRoutes) -> String {
    let host = if routes.use_subdomains() { &user.host } else { public_host(routes) };
    url_path_join(&format!("http://{host}"), &user.base_path)
}

/// Joins a base URL and a path with exactly one separator between them.
#[must_use]
pub fn url_path_join(base: &str, path: &str) -> String {
    let trimmed_base = base.trim_end_matches('/');
    let trimmed_path = path.trim_start_matches('/');
    if trimmed_path.is_empty() {
        return format!("{trimmed_base}/");
    }
    format!("{trimmed_base}/{trimmed_path}")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
