// crates/gatehub-core/src/lib.rs
// ============================================================================
// Module: Gatehub Core Library
// Description: Contract surfaces shared by the Gatehub test harness and mocks.
// Purpose: Define routing, authentication, spawning, and hub-app interfaces.
// Dependencies: async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! Gatehub core defines the interfaces the test harness consumes from the
//! orchestration hub and its collaborators, plus the pure routing helpers
//! used to compose externally reachable URLs. Nothing in this crate performs
//! I/O; implementations live in `gatehub-mocks`, `gatehub-harness`, and the
//! system-tests stub hub.
//!
//! Security posture: usernames and form submissions are untrusted inputs and
//! are never interpreted beyond the documented coercions.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod app;
pub mod auth;
pub mod routes;
pub mod spawn;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use app::HubApp;
pub use app::HubArgs;
pub use app::HubError;
pub use auth::AuthError;
pub use auth::AuthenticatedUser;
pub use auth::Authenticator;
pub use auth::CredentialCheck;
pub use routes::HubRoutes;
pub use routes::ProxyRoutes;
pub use routes::UserRoutes;
pub use routes::public_host;
pub use routes::public_url;
pub use routes::url_path_join;
pub use routes::user_url;
pub use spawn::FormData;
pub use spawn::OptionValue;
pub use spawn::SpawnError;
pub use spawn::SpawnOptions;
pub use spawn::Spawner;
pub use spawn::SpawnerState;
