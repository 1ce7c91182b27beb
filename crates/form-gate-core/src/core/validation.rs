// crates/form-gate-core/src/core/validation.rs
// ============================================================================
// Module: Form Gate Validation Errors
// Description: Path-addressed, user-facing validation messages.
// Purpose: Provide an ordered error map shared by form and field validation.
// Dependencies: indexmap, serde
// ============================================================================

//! ## Overview
//! Validation errors map a field path (or the [`ROOT_PATH`] sentinel) to the
//! ordered messages reported for it. Paths keep first-report order and the
//! messages under a path keep validator-report order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use indexmap::IndexMap;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path used for failures that cannot be attributed to a field.
pub const ROOT_PATH: &str = "root";

// ============================================================================
// SECTION: Validation Errors
// ============================================================================

/// Ordered mapping from field path to messages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    /// Messages keyed by path in first-report order.
    entries: IndexMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates an empty error map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message under a path.
    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.entries.entry(path.into()).or_default().push(message.into());
    }

    /// Returns the messages recorded for a path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    /// Returns true when a path has at least one message.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Iterates `(path, messages)` in first-report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(path, messages)| (path.as_str(), messages.as_slice()))
    }

    /// Returns the paths with errors in first-report order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of paths with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
