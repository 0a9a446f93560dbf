// crates/gatehub-mocks/src/lib.rs
// ============================================================================
// Module: Gatehub Mocks Library
// Description: Substitute collaborators for exercising the hub under test.
// Purpose: Provide fake credentials, a mock authenticator, and mock spawners.
// Dependencies: async-trait, gatehub-core, tokio
// ============================================================================

//! ## Overview
//! The real hub's collaborators are slow or privileged: system-account
//! authentication and privileged process launch. This crate substitutes
//! deterministic equivalents whose timing and failure behavior can be dialed
//! precisely, so the hub's own timeout and state-machine logic can be
//! validated from tests.
//!
//! Security posture: mocks accept untrusted usernames and form data; they
//! never touch system accounts or privileged OS primitives.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod authenticator;
pub mod credentials;
pub mod spawner;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use authenticator::DOES_NOT_EXIST_PREFIX;
pub use authenticator::MockAuthenticator;
pub use credentials::FAKE_REJECTION;
pub use credentials::FakeCredentialCheck;
pub use spawner::LaunchStyle;
pub use spawner::MockSpawner;
pub use spawner::NEVER_START_TIMEOUT;
pub use spawner::SLOW_SPAWN_DELAY;
