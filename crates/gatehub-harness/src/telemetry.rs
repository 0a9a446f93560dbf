// crates/gatehub-harness/src/telemetry.rs
// ============================================================================
// Module: Harness Telemetry
// Description: Observability hooks for harness lifecycle transitions.
// Purpose: Expose lifecycle events without a hard logging dependency.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This module exposes a thin observer interface for harness lifecycle
//! events. It is intentionally dependency-light so downstream test suites can
//! plug in their preferred sink without redesign; the recording observer
//! doubles as the way tests assert teardown runs exactly once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Harness lifecycle event labels.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessEvent {
    /// A start was requested on the calling thread.
    StartRequested,
    /// The readiness signal arrived within the bound.
    Ready {
        /// Time between the start request and the readiness signal.
        elapsed: Duration,
    },
    /// The readiness signal did not arrive within the bound.
    StartTimedOut {
        /// The bound that elapsed.
        waited: Duration,
    },
    /// A stop was requested on the calling thread.
    StopRequested,
    /// The worker thread has been joined.
    WorkerJoined,
    /// The synchronous cleanup pass finished.
    CleanupFinished,
    /// The temporary storage backend has been deleted.
    StorageReleased,
}

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Sink for harness lifecycle events.
pub trait HarnessObserver: Send + Sync {
    /// Receives one lifecycle event.
    fn on_event(&self, event: HarnessEvent);
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl HarnessObserver for NullObserver {
    fn on_event(&self, _event: HarnessEvent) {}
}

/// Observer that records events in order for later assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    /// Events received so far, oldest first.
    events: Mutex<Vec<HarnessEvent>>,
}

impl RecordingObserver {
    /// Returns a snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<HarnessEvent> {
        self.events.lock().map_or_else(|_| Vec::new(), |events| events.clone())
    }

    /// Counts recorded events matching a predicate.
    pub fn count(&self, predicate: impl Fn(&HarnessEvent) -> bool) -> usize {
        self.events().iter().filter(|event| predicate(event)).count()
    }
}

impl HarnessObserver for RecordingObserver {
    fn on_event(&self, event: HarnessEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
