// crates/form-gate-validation/src/options.rs
// ============================================================================
// Module: Validation Options
// Description: Engine and message settings for form validation.
// Purpose: Carry draft, format, grouping, and cache settings into validators.
// Dependencies: jsonschema, serde
// ============================================================================

//! ## Overview
//! Options are plain data so configuration layers can build them from files
//! or environment without touching the engine.

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default bound on cached single-field validators per form.
pub const DEFAULT_MAX_CACHED_VALIDATORS: usize = 256;

// ============================================================================
// SECTION: Types
// ============================================================================

/// JSON-Schema draft used to compile structural schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaDraft {
    /// Draft 4.
    Draft4,
    /// Draft 6.
    Draft6,
    /// Draft 7.
    #[default]
    Draft7,
    /// Draft 2019-09.
    Draft201909,
    /// Draft 2020-12.
    Draft202012,
}

impl SchemaDraft {
    /// Returns the engine draft.
    #[must_use]
    pub const fn engine_draft(self) -> Draft {
        match self {
            Self::Draft4 => Draft::Draft4,
            Self::Draft6 => Draft::Draft6,
            Self::Draft7 => Draft::Draft7,
            Self::Draft201909 => Draft::Draft201909,
            Self::Draft202012 => Draft::Draft202012,
        }
    }
}

/// Validation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Draft used to compile schemas.
    pub draft: SchemaDraft,
    /// Whether `format` is asserted rather than annotated.
    pub validate_formats: bool,
    /// Default grouped-digit rendering of numeric limits.
    pub group_digits: bool,
    /// Upper bound on cached single-field validators.
    pub max_cached_validators: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            draft: SchemaDraft::default(),
            validate_formats: true,
            group_digits: true,
            max_cached_validators: DEFAULT_MAX_CACHED_VALIDATORS,
        }
    }
}
