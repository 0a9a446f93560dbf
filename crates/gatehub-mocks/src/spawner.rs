// crates/gatehub-mocks/src/spawner.rs
// ============================================================================
// Module: Mock Spawner Family
// Description: Spawner with pluggable launch timing for lifecycle tests.
// Purpose: Simulate instant, delayed, never-resolving, and form-driven
// starts.
// Dependencies: async-trait, gatehub-core, tokio
// ============================================================================

//! ## Overview
//! One spawner type covers the whole timing space through a launch style:
//! immediate completion, a fixed extra delay on start and stop, a start that
//! never resolves, and a form-driven variant that derives typed options
//! before launching. Privileged setup is skipped and the worker process is a
//! fixed lightweight stand-in command.
//!
//! The never style exists solely so the hub's own start-timeout logic can be
//! exercised: the spawner withholds completion and the reduced
//! [`Spawner::start_timeout`] is configuration for the hub, never enforced
//! here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::convert::Infallible;
use std::future::pending;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use gatehub_core::FormData;
use gatehub_core::OptionValue;
use gatehub_core::SpawnError;
use gatehub_core::SpawnOptions;
use gatehub_core::Spawner;
use gatehub_core::SpawnerState;
use gatehub_core::spawn::DEFAULT_START_TIMEOUT;
use tokio::process::Child;
use tokio::process::Command;
use tokio::time::sleep;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed extra delay the slow style adds to start and stop.
pub const SLOW_SPAWN_DELAY: Duration = Duration::from_secs(2);

/// Reduced start bound the never style advertises to the hub.
pub const NEVER_START_TIMEOUT: Duration = Duration::from_secs(1);

/// Lightweight stand-in launched instead of a real user session.
const STAND_IN_COMMAND: &[&str] = &["sleep", "3600"];

// ============================================================================
// SECTION: Launch Styles
// ============================================================================

/// Timing and parsing behavior of a mock spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStyle {
    /// Launch the stand-in and complete at once.
    Immediate,
    /// Launch the stand-in, then delay start completion; delay stop the same
    /// way before the base stop.
    Delayed(Duration),
    /// Withhold start completion forever; nothing is launched.
    Never,
    /// Timing of `Immediate`, plus form-derived options before launch.
    FormDriven,
}

// ============================================================================
// SECTION: Mock Spawner
// ============================================================================

/// Spawner whose lifecycle timing is dialed by a [`LaunchStyle`].
///
/// # Invariants
/// - At most one stand-in child process exists per spawner.
/// - The never style pins the state machine in `Starting`.
/// - `stop` without a launched worker is rejected and changes no state.
pub struct MockSpawner {
    /// Selected launch style.
    style: LaunchStyle,
    /// Current lifecycle state.
    state: SpawnerState,
    /// Stand-in command line.
    command: Vec<String>,
    /// Running stand-in process, if any.
    child: Option<Child>,
}

impl MockSpawner {
    /// Builds a spawner with an explicit launch style.
    #[must_use]
    pub fn new(style: LaunchStyle) -> Self {
        Self {
            style,
            state: SpawnerState::NotStarted,
            command: STAND_IN_COMMAND.iter().map(|part| (*part).to_string()).collect(),
            child: None,
        }
    }

    /// Spawner that completes start and stop immediately.
    #[must_use]
    pub fn immediate() -> Self {
        Self::new(LaunchStyle::Immediate)
    }

    /// Spawner that takes [`SLOW_SPAWN_DELAY`] extra on start and stop.
    #[must_use]
    pub fn slow() -> Self {
        Self::new(LaunchStyle::Delayed(SLOW_SPAWN_DELAY))
    }

    /// Spawner whose start never resolves.
    #[must_use]
    pub fn never() -> Self {
        Self::new(LaunchStyle::Never)
    }

    /// Spawner that derives options from a form submission before launch.
    #[must_use]
    pub fn form_driven() -> Self {
        Self::new(LaunchStyle::FormDriven)
    }

    /// Launches the stand-in process after the privileged pre-launch hook.
    async fn launch(&mut self) -> Result<(), SpawnError> {
        self.preexec()?;
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| SpawnError::Launch("empty stand-in command".to_string()))?;
        let child = Command::new(program)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| SpawnError::Launch(err.to_string()))?;
        self.child = Some(child);
        Ok(())
    }
}

#[async_trait]
impl Spawner for MockSpawner {
    async fn start(&mut self) -> Result<(), SpawnError> {
        self.state = SpawnerState::Starting;
        match self.style {
            LaunchStyle::Never => {
                let never: Infallible = pending().await;
                match never {}
            }
            LaunchStyle::Immediate | LaunchStyle::FormDriven => self.launch().await?,
            LaunchStyle::Delayed(delay) => {
                self.launch().await?;
                sleep(delay).await;
            }
        }
        self.state = SpawnerState::Started;
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), SpawnError> {
        // No worker, nothing to stop: covers never-started spawners and the
        // never style pinned in `Starting`. The state machine is untouched.
        let Some(mut child) = self.child.take() else {
            return Err(SpawnError::InvalidState(
                "stop requested before a worker was launched".to_string(),
            ));
        };
        self.state = SpawnerState::Stopping;
        if let LaunchStyle::Delayed(delay) = self.style {
            sleep(delay).await;
        }
        child.kill().await.map_err(|err| SpawnError::Stop(err.to_string()))?;
        self.state = SpawnerState::Stopped;
        Ok(())
    }

    fn state(&self) -> SpawnerState {
        self.state
    }

    fn start_timeout(&self) -> Duration {
        match self.style {
            LaunchStyle::Never => NEVER_START_TIMEOUT,
            _ => DEFAULT_START_TIMEOUT,
        }
    }

    // Privileged account setup is skipped entirely.
    fn preexec(&self) -> Result<(), SpawnError> {
        Ok(())
    }

    // No per-user sanitization; the environment passes through unchanged.
    fn user_env(&self, env: HashMap<String, String>) -> HashMap<String, String> {
        env
    }

    fn command(&self) -> &[String] {
        &self.command
    }

    fn options_from_form(&self, form: &FormData) -> SpawnOptions {
        if self.style != LaunchStyle::FormDriven {
            return SpawnOptions::new();
        }
        let mut options = SpawnOptions::new();
        options.insert("notspecified".to_string(), OptionValue::Integer(5));
        if let Some(values) = form.get("bounds") {
            let bounds = values.iter().filter_map(|value| value.parse().ok()).collect();
            options.insert("bounds".to_string(), OptionValue::IntegerList(bounds));
        }
        if let Some(value) = form.get("energy").and_then(|values| values.first()) {
            options.insert("energy".to_string(), OptionValue::Text(value.clone()));
        }
        if let Some(value) = form.get("hello_file").and_then(|values| values.first()) {
            options.insert("hello".to_string(), OptionValue::Text(value.clone()));
        }
        options
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
