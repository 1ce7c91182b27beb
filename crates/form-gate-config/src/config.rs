// crates/form-gate-config/src/config.rs
// ============================================================================
// Module: Form Gate Configuration
// Description: Configuration loading and validation for Form Gate.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: form-gate-core, form-gate-validation, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional and defaults to the library defaults, so an
//! empty file is valid. Inconsistent settings are rejected rather than
//! silently corrected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use form_gate_core::DiagnosticSink;
use form_gate_core::FileDiagnosticSink;
use form_gate_core::NoopDiagnosticSink;
use form_gate_core::StderrDiagnosticSink;
use form_gate_validation::DEFAULT_MAX_CACHED_VALIDATORS;
use form_gate_validation::SchemaDraft;
use form_gate_validation::ValidationOptions;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "form-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "FORM_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Upper bound for `validation.max_cached_validators`.
pub const MAX_CACHED_VALIDATORS_LIMIT: usize = 65_536;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Top-level Form Gate configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormGateConfig {
    /// Structural validation settings.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Diagnostics sink settings.
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

impl FormGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Loads configuration when a file is present, else returns defaults.
    ///
    /// An explicit path must exist; only the implicit default file may be
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an existing file fails to load.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        if path.is_none() && env::var_os(CONFIG_ENV_VAR).is_none() && !resolved.exists() {
            return Ok(Self::default());
        }
        Self::load(Some(&resolved))
    }

    /// Parses and validates configuration bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the content is oversize, not UTF-8,
    /// malformed, or invalid.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self = toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validation.validate()?;
        self.diagnostics.validate()?;
        Ok(())
    }
}

/// Structural validation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// JSON-Schema draft used to compile structural schemas.
    #[serde(default)]
    pub draft: SchemaDraft,
    /// Assert `format` keywords (default on).
    #[serde(default = "default_true")]
    pub validate_formats: bool,
    /// Group digits of numeric limits in messages (default on).
    #[serde(default = "default_true")]
    pub group_digits: bool,
    /// Bound on cached single-field validators per form.
    #[serde(default = "default_max_cached_validators")]
    pub max_cached_validators: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            draft: SchemaDraft::default(),
            validate_formats: default_true(),
            group_digits: default_true(),
            max_cached_validators: default_max_cached_validators(),
        }
    }
}

impl ValidationConfig {
    /// Validates validation configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cached_validators == 0 {
            return Err(ConfigError::Invalid(
                "validation.max_cached_validators must be greater than zero".to_string(),
            ));
        }
        if self.max_cached_validators > MAX_CACHED_VALIDATORS_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "validation.max_cached_validators must be at most {MAX_CACHED_VALIDATORS_LIMIT}"
            )));
        }
        Ok(())
    }

    /// Returns the engine options described by this section.
    #[must_use]
    pub const fn options(&self) -> ValidationOptions {
        ValidationOptions {
            draft: self.draft,
            validate_formats: self.validate_formats,
            group_digits: self.group_digits,
            max_cached_validators: self.max_cached_validators,
        }
    }
}

/// Diagnostics sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticsSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to a file.
    File,
    /// Diagnostics are discarded.
    #[serde(rename = "none")]
    Disabled,
}

/// Diagnostics sink settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: DiagnosticsSinkKind,
    /// Output path for the file sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DiagnosticsConfig {
    /// Validates diagnostics configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (DiagnosticsSinkKind::File, None) => Err(ConfigError::Invalid(
                "diagnostics.path is required when diagnostics.sink = \"file\"".to_string(),
            )),
            (DiagnosticsSinkKind::File, Some(path)) => {
                validate_path_string("diagnostics.path", &path.to_string_lossy())
            }
            (_, Some(_)) => Err(ConfigError::Invalid(
                "diagnostics.path is only valid when diagnostics.sink = \"file\"".to_string(),
            )),
            (_, None) => Ok(()),
        }
    }

    /// Builds the configured diagnostics sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file sink cannot be opened.
    pub fn build_sink(&self) -> Result<Box<dyn DiagnosticSink>, ConfigError> {
        match (self.sink, &self.path) {
            (DiagnosticsSinkKind::Stderr, _) => Ok(Box::new(StderrDiagnosticSink)),
            (DiagnosticsSinkKind::Disabled, _) => Ok(Box::new(NoopDiagnosticSink)),
            (DiagnosticsSinkKind::File, Some(path)) => {
                let sink =
                    FileDiagnosticSink::new(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Box::new(sink))
            }
            (DiagnosticsSinkKind::File, None) => Err(ConfigError::Invalid(
                "diagnostics.path is required when diagnostics.sink = \"file\"".to_string(),
            )),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Serde default for flags that are on unless disabled.
const fn default_true() -> bool {
    true
}

/// Serde default for the validator cache bound.
const fn default_max_cached_validators() -> usize {
    DEFAULT_MAX_CACHED_VALIDATORS
}

// ============================================================================
// SECTION: Tests
// ============================================================================
