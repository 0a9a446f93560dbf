// system-tests/src/lib.rs
// ============================================================================
// Module: Gatehub System Tests Library
// Description: Shared configuration for Gatehub harness system tests.
// Purpose: Provide typed environment settings for the system-test suites.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts the typed environment configuration shared by the
//! harness system-test suites in `system-tests/tests`. The suites drive a
//! stub hub through the real harness; suite-local helpers live under
//! `tests/helpers`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
