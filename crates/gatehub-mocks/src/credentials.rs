// crates/gatehub-mocks/src/credentials.rs
// ============================================================================
// Module: Fake Credential Checker
// Description: Equality-based stand-in for system-account authentication.
// Purpose: Make credential checks instant and deterministic in tests.
// Dependencies: gatehub-core
// ============================================================================

//! ## Overview
//! The fake accepts a login iff the password equals the username and rejects
//! everything else with a fixed diagnostic. Session open/close are no-ops.
//! Tests derive valid credentials from any username without provisioning
//! system accounts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use gatehub_core::AuthError;
use gatehub_core::CredentialCheck;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed diagnostic carried by every fake rejection.
pub const FAKE_REJECTION: &str = "fake credential check rejected the password";

// ============================================================================
// SECTION: Fake Credential Checker
// ============================================================================

/// Equality-based credential checker.
///
/// # Invariants
/// - `authenticate` succeeds iff password equals username.
/// - Session hooks never fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeCredentialCheck;

impl CredentialCheck for FakeCredentialCheck {
    fn authenticate(
        &self,
        username: &str,
        password: &str,
        _service: &str,
    ) -> Result<(), AuthError> {
        if password == username {
            Ok(())
        } else {
            Err(AuthError::CredentialsRejected(FAKE_REJECTION.to_string()))
        }
    }

    fn open_session(&self, _username: &str, _service: &str) -> Result<(), AuthError> {
        Ok(())
    }

    fn close_session(&self, _username: &str, _service: &str) -> Result<(), AuthError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
