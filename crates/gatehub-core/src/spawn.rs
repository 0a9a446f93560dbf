// crates/gatehub-core/src/spawn.rs
// ============================================================================
// Module: Gatehub Spawner Interface
// Description: Spawner contract, state machine, and form-driven options.
// Purpose: Define how the hub starts and stops one user's worker process.
// Dependencies: async-trait, serde, thiserror
// ============================================================================

//! ## Overview
//! A spawner owns the lifecycle of exactly one user's worker process. The
//! hub reads [`Spawner::start_timeout`] and enforces it itself; spawners only
//! report or withhold completion. Form submissions are coerced into a typed
//! options map consumed when the hub builds the worker environment.
//!
//! Security posture: form data is untrusted; unrecognized keys are ignored
//! and values are coerced, never evaluated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default bound the hub applies to a spawner start, in seconds.
pub const DEFAULT_START_TIMEOUT: Duration = Duration::from_secs(60);

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Spawner failures.
///
/// # Invariants
/// - Variants are stable for error classification.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// Launching the worker process failed.
    #[error("worker launch failed: {0}")]
    Launch(String),
    /// Stopping the worker process failed.
    #[error("worker stop failed: {0}")]
    Stop(String),
    /// The operation is invalid in the spawner's current state.
    #[error("invalid spawner state: {0}")]
    InvalidState(String),
}

// ============================================================================
// SECTION: State Machine
// ============================================================================

/// Lifecycle state of one simulated user server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnerState {
    /// No start has been requested yet.
    NotStarted,
    /// A start is in flight; a never-resolving spawner pins this state.
    Starting,
    /// The worker process is running.
    Started,
    /// A stop is in flight.
    Stopping,
    /// The worker process has been stopped.
    Stopped,
}

// ============================================================================
// SECTION: Form Options
// ============================================================================

/// Submitted form shape: field name to list of string values.
pub type FormData = BTreeMap<String, Vec<String>>;

/// A typed option value derived from form data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// A single integer.
    Integer(i64),
    /// A list of integers.
    IntegerList(Vec<i64>),
    /// A verbatim string.
    Text(String),
}

/// Typed spawn options keyed by option name.
pub type SpawnOptions = BTreeMap<String, OptionValue>;

// ============================================================================
// SECTION: Spawner Contract
// ============================================================================

/// Contract for starting and stopping one user's worker process.
#[async_trait]
pub trait Spawner: Send {
    /// Starts the worker process.
    ///
    /// Resolution timing is part of the contract under test: the hub applies
    /// [`Spawner::start_timeout`] around this call.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError::Launch`] when the worker cannot be launched.
    async fn start(&mut self) -> Result<(), SpawnError>;

    /// Stops the worker process.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError::Stop`] when the worker cannot be stopped.
    async fn stop(&mut self) -> Result<(), SpawnError>;

    /// Returns the current lifecycle state.
    fn state(&self) -> SpawnerState;

    /// Bound the hub should apply around [`Spawner::start`].
    ///
    /// The spawner never enforces this itself.
    fn start_timeout(&self) -> Duration {
        DEFAULT_START_TIMEOUT
    }

    /// Privileged pre-launch hook run before the worker process starts.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError::Launch`] when privileged setup fails.
    fn preexec(&self) -> Result<(), SpawnError> {
        Ok(())
    }

    /// Sanitizes the environment handed to the worker process.
    fn user_env(&self, env: HashMap<String, String>) -> HashMap<String, String> {
        env
    }

    /// Command line used to launch the worker process.
    fn command(&self) -> &[String];

    /// Derives typed options from a form submission.
    ///
    /// The default spawner carries no options form.
    fn options_from_form(&self, form: &FormData) -> SpawnOptions {
        let _ = form;
        SpawnOptions::new()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
