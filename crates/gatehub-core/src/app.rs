// crates/gatehub-core/src/app.rs
// ============================================================================
// Module: Gatehub Application Interface
// Description: Hub application contract consumed by the test harness.
// Purpose: Define the lifecycle operations the harness schedules on its loop.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! The orchestration hub is out of scope for this project; the harness only
//! depends on the asynchronous lifecycle surface below. All operations are
//! scheduled on the harness's worker loop and execute in strict order:
//! initialize, seed, start, wait until reachable.
//!
//! The storage URL is an opaque `sqlite:///`-prefixed string; the harness
//! creates the backing file and the application decides how to use it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::routes::HubRoutes;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix of harness-issued storage URLs.
pub const STORAGE_URL_PREFIX: &str = "sqlite:///";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Hub application failures.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum HubError {
    /// Storage backend error.
    #[error("hub storage error: {0}")]
    Storage(String),
    /// Network bind or serve error.
    #[error("hub network error: {0}")]
    Network(String),
    /// Spawner invocation error.
    #[error("hub spawn error: {0}")]
    Spawn(String),
    /// Operation requires a running hub.
    #[error("hub is not running")]
    NotRunning,
}

// ============================================================================
// SECTION: Initialization Arguments
// ============================================================================

/// Arguments handed to [`HubApp::initialize`].
///
/// # Invariants
/// - `storage_url` begins with [`STORAGE_URL_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubArgs {
    /// Opaque storage URL for the hub's database.
    pub storage_url: String,
    /// Address the hub binds its public endpoint to.
    pub bind_ip: IpAddr,
    /// Extra command-line style arguments.
    pub argv: Vec<String>,
}

impl HubArgs {
    /// Builds arguments for a storage path with the default loopback bind.
    #[must_use]
    pub fn for_storage_path(path: &Path) -> Self {
        Self {
            storage_url: storage_url_for_path(path),
            bind_ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            argv: Vec::new(),
        }
    }
}

/// Formats a filesystem path as an opaque storage URL.
#[must_use]
pub fn storage_url_for_path(path: &Path) -> String {
    format!("{STORAGE_URL_PREFIX}{}", path.display())
}

/// Extracts the filesystem path from a harness-issued storage URL.
#[must_use]
pub fn storage_path_from_url(url: &str) -> Option<PathBuf> {
    url.strip_prefix(STORAGE_URL_PREFIX).map(PathBuf::from)
}

// ============================================================================
// SECTION: Application Contract
// ============================================================================

/// Lifecycle surface of the hub application under test.
///
/// # Invariants
/// - Operations run on the harness worker loop, never the caller's thread.
/// - `routes` is only meaningful after `start` has succeeded.
#[async_trait]
pub trait HubApp: Send + 'static {
    /// Prepares storage and internal state.
    ///
    /// # Errors
    ///
    /// Returns [`HubError`] when the storage backend cannot be prepared.
    async fn initialize(&mut self, args: &HubArgs) -> Result<(), HubError>;

    /// Records one baseline user in storage.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] when the record cannot be written.
    async fn seed_user(&mut self, name: &str) -> Result<(), HubError>;

    /// Starts serving the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Network`] when the endpoint cannot be served.
    async fn start(&mut self) -> Result<(), HubError>;

    /// Resolves once the public endpoint answers requests.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Network`] when the endpoint never becomes
    /// reachable.
    async fn wait_until_reachable(&self) -> Result<(), HubError>;

    /// Stops serving.
    ///
    /// # Errors
    ///
    /// Returns [`HubError`] when shutdown fails.
    async fn stop(&mut self) -> Result<(), HubError>;

    /// Releases resources after the serving loop has exited.
    ///
    /// The harness runs this on a throwaway loop after joining its worker
    /// thread; it must be safe to call exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`HubError`] when resource release fails.
    async fn cleanup(&mut self) -> Result<(), HubError>;

    /// Routing snapshot for composing externally reachable URLs.
    fn routes(&self) -> HubRoutes;
}

// ============================================================================
// SECTION: Tests
// ============================================================================
