// crates/gatehub-harness/src/harness.rs
// ============================================================================
// Module: Harness Lifecycle Controller
// Description: Starts the hub on a dedicated loop thread and tears it down.
// Purpose: Bridge synchronous tests to the asynchronous hub without races or
// leaks.
// Dependencies: gatehub-core, tempfile, thiserror, tokio
// ============================================================================

//! ## Overview
//! `start` allocates fresh temporary storage, spawns one worker thread
//! running a current-thread event loop, and blocks the caller until the hub
//! signals readiness or the bound elapses. Inside the loop the sequence is
//! strict: initialize, seed one baseline user, start, wait until the public
//! endpoint answers. `stop` is equally strict: hub stop, thread join,
//! synchronous cleanup on a throwaway loop, storage deletion.
//!
//! A second `stop` is a guarded no-op: every teardown resource is held in an
//! `Option` consumed on the first call, and `Drop` reuses the same path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use gatehub_core::HubApp;
use gatehub_core::HubArgs;
use gatehub_core::HubError;
use gatehub_core::HubRoutes;
use gatehub_core::public_url;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

use crate::telemetry::HarnessEvent;
use crate::telemetry::HarnessObserver;
use crate::telemetry::NullObserver;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Bound on the caller's wait for the readiness signal.
pub const DEFAULT_START_TIMEOUT: Duration = Duration::from_secs(10);

/// Baseline user seeded into every harness-managed hub.
pub const DEFAULT_SEED_USER: &str = "user";

/// Name of the worker thread owning the event loop.
const WORKER_THREAD_NAME: &str = "gatehub-harness";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Harness failures observable on the calling thread.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Readiness was not signaled within the bound; fatal, never retried.
    #[error("hub readiness not signaled within {waited:?}")]
    StartTimeout {
        /// The bound that elapsed.
        waited: Duration,
    },
    /// The worker thread panicked before or during teardown.
    #[error("harness worker thread panicked")]
    WorkerPanicked,
    /// A runtime could not be built on the calling thread.
    #[error("harness runtime error: {0}")]
    Runtime(String),
    /// The hub's synchronous cleanup pass failed.
    #[error("hub cleanup failed: {0}")]
    Cleanup(String),
    /// The temporary storage backend could not be created or deleted.
    #[error("harness storage error: {0}")]
    Storage(String),
    /// The login request could not be issued or answered.
    #[error("login request failed: {0}")]
    Login(String),
    /// Login succeeded at the transport level but set no session cookies.
    #[error("login returned no session cookies")]
    MissingSessionCookie,
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Harness construction parameters with documented defaults.
pub struct HarnessConfig {
    /// Bound on the readiness wait. Default: [`DEFAULT_START_TIMEOUT`].
    pub start_timeout: Duration,
    /// Baseline user seeded before the hub starts. Default:
    /// [`DEFAULT_SEED_USER`].
    pub seed_user: String,
    /// Lifecycle event sink. Default: [`NullObserver`].
    pub observer: Arc<dyn HarnessObserver>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            start_timeout: DEFAULT_START_TIMEOUT,
            seed_user: DEFAULT_SEED_USER.to_string(),
            observer: Arc::new(NullObserver),
        }
    }
}

// ============================================================================
// SECTION: Harness
// ============================================================================

/// Lifecycle controller owning one worker thread and one temporary database.
///
/// # Invariants
/// - Exactly one worker thread and one storage file exist per harness.
/// - The storage file's lifetime equals the harness's lifetime.
/// - After `stop`, every teardown `Option` is `None` and the harness is
///   inert.
pub struct Harness<A: HubApp> {
    /// Routing snapshot captured with the readiness signal.
    routes: HubRoutes,
    /// Shutdown signal into the worker loop; consumed by the first `stop`.
    shutdown: Option<oneshot::Sender<()>>,
    /// Worker thread handle; yields the hub back for cleanup.
    worker: Option<thread::JoinHandle<Option<A>>>,
    /// Temporary database file; deleted on `stop`.
    db_file: Option<NamedTempFile>,
    /// Lifecycle event sink.
    observer: Arc<dyn HarnessObserver>,
}

impl<A: HubApp> Harness<A> {
    /// Starts the hub and blocks until it is publicly reachable.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::StartTimeout`] when the readiness signal does
    /// not arrive within the configured bound, and
    /// [`HarnessError::Storage`]/[`HarnessError::Runtime`] when the harness
    /// cannot allocate its own resources.
    pub fn start(app: A, config: HarnessConfig) -> Result<Self, HarnessError> {
        let observer = Arc::clone(&config.observer);
        observer.on_event(HarnessEvent::StartRequested);

        let db_file = NamedTempFile::new().map_err(|err| HarnessError::Storage(err.to_string()))?;
        let args = HubArgs::for_storage_path(db_file.path());
        let seed_user = config.seed_user.clone();

        let (ready_tx, ready_rx) = mpsc::sync_channel::<HubRoutes>(1);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run_worker(app, args, seed_user, ready_tx, shutdown_rx))
            .map_err(|err| HarnessError::Runtime(err.to_string()))?;

        let started_at = Instant::now();
        match ready_rx.recv_timeout(config.start_timeout) {
            Ok(routes) => {
                observer.on_event(HarnessEvent::Ready {
                    elapsed: started_at.elapsed(),
                });
                Ok(Self {
                    routes,
                    shutdown: Some(shutdown_tx),
                    worker: Some(worker),
                    db_file: Some(db_file),
                    observer,
                })
            }
            Err(_) => {
                observer.on_event(HarnessEvent::StartTimedOut {
                    waited: config.start_timeout,
                });
                // The worker may be hung inside hub initialization. Dropping
                // the shutdown sender makes a late-finishing worker exit on
                // its own; a truly hung worker is abandoned, as the loop owns
                // no resources beyond the storage file deleted below.
                drop(shutdown_tx);
                Err(HarnessError::StartTimeout {
                    waited: config.start_timeout,
                })
            }
        }
    }

    /// Routing snapshot of the running hub.
    #[must_use]
    pub const fn routes(&self) -> &HubRoutes {
        &self.routes
    }

    /// Externally reachable base URL of the running hub.
    #[must_use]
    pub fn public_url(&self) -> String {
        public_url(&self.routes)
    }

    /// Stops the hub and releases every harness-owned resource.
    ///
    /// Teardown order is strict: hub stop inside the loop, worker join,
    /// synchronous cleanup on a throwaway loop, storage deletion. A second
    /// call observes the consumed shutdown handle and returns immediately.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::WorkerPanicked`] when the worker thread
    /// panicked, [`HarnessError::Cleanup`] when the hub's cleanup pass
    /// fails, and [`HarnessError::Storage`] when the database file cannot be
    /// deleted.
    pub fn stop(&mut self) -> Result<(), HarnessError> {
        let Some(shutdown) = self.shutdown.take() else {
            return Ok(());
        };
        self.observer.on_event(HarnessEvent::StopRequested);
        let _ = shutdown.send(());

        let mut residue = None;
        if let Some(worker) = self.worker.take() {
            residue = worker.join().map_err(|_| HarnessError::WorkerPanicked)?;
            self.observer.on_event(HarnessEvent::WorkerJoined);
        }

        if let Some(mut app) = residue {
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|err| HarnessError::Runtime(err.to_string()))?;
            runtime
                .block_on(app.cleanup())
                .map_err(|err| HarnessError::Cleanup(err.to_string()))?;
            self.observer.on_event(HarnessEvent::CleanupFinished);
        }

        if let Some(db_file) = self.db_file.take() {
            db_file.close().map_err(|err| HarnessError::Storage(err.to_string()))?;
            self.observer.on_event(HarnessEvent::StorageReleased);
        }
        Ok(())
    }
}

impl<A: HubApp> Drop for Harness<A> {
    fn drop(&mut self) {
        // Covers the duplicate shutdown-time invocation: after an explicit
        // stop, every Option is already consumed and this is a no-op.
        let _ = self.stop();
    }
}

// ============================================================================
// SECTION: Worker Loop
// ============================================================================

/// Runs the hub lifecycle on the worker thread's private event loop.
///
/// Initialization failures terminate the loop and thread; the caller only
/// ever observes them as a missing readiness signal.
fn run_worker<A: HubApp>(
    mut app: A,
    args: HubArgs,
    seed_user: String,
    ready_tx: mpsc::SyncSender<HubRoutes>,
    shutdown_rx: oneshot::Receiver<()>,
) -> Option<A> {
    let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
        return None;
    };
    let outcome = runtime.block_on(async {
        app.initialize(&args).await?;
        app.seed_user(&seed_user).await?;
        app.start().await?;
        app.wait_until_reachable().await?;
        // Readiness fires only after the endpoint answered; a caller that
        // already timed out has dropped the receiver and the send is moot.
        let _ = ready_tx.send(app.routes());
        let _ = shutdown_rx.await;
        app.stop().await?;
        Ok::<(), HubError>(())
    });
    match outcome {
        Ok(()) => Some(app),
        Err(_) => None,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
