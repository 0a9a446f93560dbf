// crates/gatehub-core/src/auth.rs
// ============================================================================
// Module: Gatehub Auth Interfaces
// Description: Credential-check capability and authenticator contract.
// Purpose: Define the seams where the harness substitutes fake credentials.
// Dependencies: async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! The real hub authenticates against system accounts. The harness replaces
//! exactly the low-level calls (authenticate, open session, close session)
//! through the [`CredentialCheck`] capability while the surrounding
//! orchestration keeps its shape. There is no global patching: the capability
//! is injected at authenticator construction.
//!
//! Security posture: credentials are untrusted; implementations must not log
//! passwords and must fail closed on mismatch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Authentication failures.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials were rejected by the credential-check backend.
    #[error("authentication failed: {0}")]
    CredentialsRejected(String),
    /// The account does not exist for this authenticator.
    #[error("unknown account: {0}")]
    UnknownAccount(String),
    /// Session bookkeeping around the credential check failed.
    #[error("session hook failed: {0}")]
    SessionHook(String),
}

// ============================================================================
// SECTION: Credential Check Capability
// ============================================================================

/// Low-level credential and session calls an authenticator delegates to.
///
/// The production implementation talks to the system authentication stack;
/// the harness injects an equality-based fake.
pub trait CredentialCheck: Send + Sync {
    /// Validates a username/password pair for a service.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::CredentialsRejected`] on mismatch.
    fn authenticate(&self, username: &str, password: &str, service: &str)
    -> Result<(), AuthError>;

    /// Opens a login session for the user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionHook`] when session setup fails.
    fn open_session(&self, username: &str, service: &str) -> Result<(), AuthError>;

    /// Closes a previously opened login session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionHook`] when session teardown fails.
    fn close_session(&self, username: &str, service: &str) -> Result<(), AuthError>;
}

// ============================================================================
// SECTION: Authenticator Contract
// ============================================================================

/// Outcome of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Authenticated username.
    pub name: String,
    /// Whether the user is in the authenticator's admin set.
    pub admin: bool,
}

/// Authenticator contract consumed by the hub's login endpoint.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Authenticates a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the account is unknown or the credentials
    /// are rejected.
    async fn authenticate(&self, username: &str, password: &str)
    -> Result<AuthenticatedUser, AuthError>;

    /// Reports whether an account exists for this authenticator.
    fn user_exists(&self, username: &str) -> bool;

    /// Returns the admin username set.
    fn admin_users(&self) -> &BTreeSet<String>;
}
