// crates/gatehub-mocks/src/authenticator.rs
// ============================================================================
// Module: Mock Authenticator
// Description: Authenticator with injected fake credentials and stubbed
// account checks.
// Purpose: Keep the real authentication orchestration while skipping system
// calls.
// Dependencies: async-trait, gatehub-core
// ============================================================================

//! ## Overview
//! The mock preserves the production call order (credential authenticate,
//! session open, session close, admin lookup) and substitutes only the
//! low-level calls through the injected [`CredentialCheck`] capability.
//! Account existence is decided by a reserved name prefix so no system
//! account database is consulted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use gatehub_core::AuthError;
use gatehub_core::AuthenticatedUser;
use gatehub_core::Authenticator;
use gatehub_core::CredentialCheck;

use crate::credentials::FakeCredentialCheck;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Reserved prefix marking accounts that must be treated as missing.
pub const DOES_NOT_EXIST_PREFIX: &str = "dne";

/// Service name the mock reports to its credential backend.
const LOGIN_SERVICE: &str = "login";

/// Administrator seeded into every mock authenticator.
const SEED_ADMIN: &str = "admin";

// ============================================================================
// SECTION: Mock Authenticator
// ============================================================================

/// Authenticator backed by an injected credential-check capability.
///
/// # Invariants
/// - The admin set always contains the seeded administrator.
/// - `user_exists` never touches system accounts.
pub struct MockAuthenticator {
    /// Admin username set, seeded at construction.
    admin_users: BTreeSet<String>,
    /// Injected low-level credential calls.
    credentials: Arc<dyn CredentialCheck>,
}

impl MockAuthenticator {
    /// Builds a mock authenticator over an explicit credential capability.
    #[must_use]
    pub fn with_credentials(credentials: Arc<dyn CredentialCheck>) -> Self {
        let mut admin_users = BTreeSet::new();
        admin_users.insert(SEED_ADMIN.to_string());
        Self {
            admin_users,
            credentials,
        }
    }
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self::with_credentials(Arc::new(FakeCredentialCheck))
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        if !self.user_exists(username) {
            return Err(AuthError::UnknownAccount(username.to_string()));
        }
        self.credentials.authenticate(username, password, LOGIN_SERVICE)?;
        self.credentials.open_session(username, LOGIN_SERVICE)?;
        self.credentials.close_session(username, LOGIN_SERVICE)?;
        Ok(AuthenticatedUser {
            name: username.to_string(),
            admin: self.admin_users.contains(username),
        })
    }

    fn user_exists(&self, username: &str) -> bool {
        !username.starts_with(DOES_NOT_EXIST_PREFIX)
    }

    fn admin_users(&self) -> &BTreeSet<String> {
        &self.admin_users
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
