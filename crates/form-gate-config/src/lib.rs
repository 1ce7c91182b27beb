// crates/form-gate-config/src/lib.rs
// ============================================================================
// Module: Form Gate Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for form-gate.toml semantics.
// Dependencies: form-gate-core, form-gate-validation, serde, toml
// ============================================================================

//! ## Overview
//! `form-gate-config` defines the configuration model for Form Gate tools:
//! structural validation settings and the diagnostics sink. Loading is
//! strict and fails closed on oversize, malformed, or inconsistent input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
