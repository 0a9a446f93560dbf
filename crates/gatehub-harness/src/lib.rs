// crates/gatehub-harness/src/lib.rs
// ============================================================================
// Module: Gatehub Harness Library
// Description: Thread-bridged lifecycle controller for the hub under test.
// Purpose: Let synchronous test code drive the asynchronous hub
// deterministically.
// Dependencies: gatehub-core, reqwest, tempfile, thiserror, tokio
// ============================================================================

//! ## Overview
//! The harness runs a hub application on a dedicated worker thread that owns
//! a private single-threaded event loop. The only cross-thread interactions
//! are the readiness handoff during `start` and the thread join during
//! `stop`; all hub-internal asynchronous work stays on the loop.
//!
//! Security posture: the harness binds loopback-only endpoints and owns its
//! temporary storage exclusively; nothing here is production hardening.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod harness;
pub mod session;
pub mod telemetry;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use harness::DEFAULT_SEED_USER;
pub use harness::DEFAULT_START_TIMEOUT;
pub use harness::Harness;
pub use harness::HarnessConfig;
pub use harness::HarnessError;
pub use session::LOGIN_PATH;
pub use session::SessionCookie;
pub use session::login_user;
pub use telemetry::HarnessEvent;
pub use telemetry::HarnessObserver;
pub use telemetry::NullObserver;
pub use telemetry::RecordingObserver;
