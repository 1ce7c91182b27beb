// crates/form-gate-core/src/diagnostics.rs
// ============================================================================
// Module: Form Gate Diagnostics
// Description: Structured diagnostic events for degraded evaluation paths.
// Purpose: Report malformed rules and validator failures without failing forms.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Evaluation never throws on malformed rules or unusable field schemas; it
//! falls back to a safe default and records a [`DiagnosticEvent`] on a
//! [`DiagnosticSink`]. Sinks are lightweight so embedders can route events to
//! their own logging pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Classification of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A condition used an operator outside the supported set.
    UnknownOperator,
    /// A rule used a combination mode outside `and`/`or`.
    UnknownLogic,
    /// A condition operand had the wrong shape for its operator.
    InvalidOperand,
    /// A single-field validator failed to compile.
    FieldValidatorCompileFailed,
    /// A field schema was missing or unusable for validation.
    FieldSchemaUnusable,
}

impl DiagnosticKind {
    /// Returns the stable label for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownOperator => "unknown_operator",
            Self::UnknownLogic => "unknown_logic",
            Self::InvalidOperand => "invalid_operand",
            Self::FieldValidatorCompileFailed => "field_validator_compile_failed",
            Self::FieldSchemaUnusable => "field_schema_unusable",
        }
    }
}

/// Diagnostic event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Event classification.
    pub kind: DiagnosticKind,
    /// Human-readable summary.
    pub message: String,
    /// Field path the event relates to, when known.
    pub field: Option<String>,
    /// Additional detail such as an operator name or compile error.
    pub detail: Option<String>,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with a consistent timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "form_gate_diagnostic",
            timestamp_ms,
            kind,
            message: message.into(),
            field: None,
            detail: None,
        }
    }

    /// Attaches the related field path.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attaches additional detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for diagnostic events.
pub trait DiagnosticSink: Send + Sync {
    /// Record a diagnostic event.
    fn record(&self, event: &DiagnosticEvent);
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Sink that logs JSON lines to stderr.
pub struct StderrDiagnosticSink;

impl DiagnosticSink for StderrDiagnosticSink {
    fn record(&self, event: &DiagnosticEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Sink that logs JSON lines to a file.
pub struct FileDiagnosticSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileDiagnosticSink {
    /// Opens the diagnostics file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl DiagnosticSink for FileDiagnosticSink {
    fn record(&self, event: &DiagnosticEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op diagnostic sink.
pub struct NoopDiagnosticSink;

impl DiagnosticSink for NoopDiagnosticSink {
    fn record(&self, _event: &DiagnosticEvent) {}
}

/// Sink that keeps events in memory for inspection.
#[derive(Default)]
pub struct MemoryDiagnosticSink {
    /// Recorded events in arrival order.
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemoryDiagnosticSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Returns the kinds of recorded events in arrival order.
    #[must_use]
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.events().iter().map(|event| event.kind).collect()
    }
}

impl DiagnosticSink for MemoryDiagnosticSink {
    fn record(&self, event: &DiagnosticEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event.clone());
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
