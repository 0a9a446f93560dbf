// crates/gatehub-harness/src/session.rs
// ============================================================================
// Module: Session Helper
// Description: Logs a test user into the running hub and captures cookies.
// Purpose: Hand test clients a session credential without redirect handling.
// Dependencies: gatehub-core, reqwest
// ============================================================================

//! ## Overview
//! The helper posts the username as both form fields, matching the mock
//! authenticator's equality rule, with redirects disabled so the raw
//! `Set-Cookie` response is observable. An empty cookie set is a harness or
//! hub misconfiguration, not a legitimate authentication failure, and is
//! surfaced as a hard error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gatehub_core::HubRoutes;
use gatehub_core::public_url;
use gatehub_core::url_path_join;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::harness::HarnessError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Login endpoint path relative to the hub's public base URL.
pub const LOGIN_PATH: &str = "hub/login";

// ============================================================================
// SECTION: Session Credential
// ============================================================================

/// One cookie from a successful login response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
}

// ============================================================================
// SECTION: Login
// ============================================================================

/// Logs `name` into the hub and returns the session cookie set.
///
/// # Errors
///
/// Returns [`HarnessError::Login`] when the request cannot be issued and
/// [`HarnessError::MissingSessionCookie`] when the response carries no
/// cookies.
pub fn login_user(routes: &HubRoutes, name: &str) -> Result<Vec<SessionCookie>, HarnessError> {
    let client = Client::builder()
        .redirect(Policy::none())
        .build()
        .map_err(|err| HarnessError::Login(err.to_string()))?;
    let url = url_path_join(&public_url(routes), LOGIN_PATH);
    let response = client
        .post(url)
        .form(&[("username", name), ("password", name)])
        .send()
        .map_err(|err| HarnessError::Login(err.to_string()))?;
    let cookies: Vec<SessionCookie> = response
        .cookies()
        .map(|cookie| SessionCookie {
            name: cookie.name().to_string(),
            value: cookie.value().to_string(),
        })
        .collect();
    if cookies.is_empty() {
        return Err(HarnessError::MissingSessionCookie);
    }
    Ok(cookies)
}
