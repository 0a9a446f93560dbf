// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Gatehub harness system-tests.
// Purpose: Provide the stub hub and HTTP client utilities for the suites.
// Dependencies: gatehub-core, gatehub-harness, gatehub-mocks
// ============================================================================

//! ## Overview
//! Shared helpers for Gatehub harness system-tests.
//! Invariants:
//! - Suites talk to the hub only through its public loopback endpoint.
//! - The stub hub is test-only code exercising the harness contract.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod clients;
pub mod hub_stub;
