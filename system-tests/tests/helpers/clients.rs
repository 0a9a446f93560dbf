// system-tests/tests/helpers/clients.rs
// ============================================================================
// Module: Test HTTP Clients
// Description: Blocking HTTP client utilities for the system-test suites.
// Purpose: Issue form posts against the running hub without redirects.
// Dependencies: gatehub-core, reqwest
// ============================================================================

//! ## Overview
//! The suites run on the synchronous side of the harness, so they use
//! blocking clients with redirects disabled, mirroring the session helper.

use gatehub_core::url_path_join;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;

/// Spawn endpoint path relative to the hub's public base URL.
pub const SPAWN_PATH: &str = "hub/spawn";

/// Builds a blocking client that never follows redirects.
pub fn blocking_client() -> Result<Client, String> {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .map_err(|err| format!("client build failed: {err}"))
}

/// Posts form fields to a path under the hub's public base URL.
pub fn post_form(
    public_url: &str,
    path: &str,
    fields: &[(&str, &str)],
) -> Result<Response, String> {
    let client = blocking_client()?;
    client
        .post(url_path_join(public_url, path))
        .form(fields)
        .send()
        .map_err(|err| format!("post to {path} failed: {err}"))
}
