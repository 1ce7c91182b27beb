// crates/form-gate-cli/src/main.rs
// ============================================================================
// Module: Form Gate CLI Entry Point
// Description: Command dispatcher for form state, validation, and schemas.
// Purpose: Drive the Form Gate engines from files for scripting and CI.
// Dependencies: clap, form-gate-config, form-gate-core, form-gate-validation,
// serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The Form Gate CLI reads a form schema and a data snapshot from disk, then
//! prints the derived form state, the validation result, a single field's
//! messages, or the normalized structural schema as JSON. Inputs are size
//! limited and parsed strictly.
//!
//! Exit codes: `0` success or valid data, `1` invalid data, `2` usage,
//! input, or schema errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use form_gate_config::FormGateConfig;
use form_gate_core::DiagnosticSink;
use form_gate_core::FormSchema;
use form_gate_core::compute_form_state;
use form_gate_core::set_path;
use form_gate_validation::FormValidator;
use form_gate_validation::ValidationOptions;
use form_gate_validation::normalize;
use form_gate_validation::validate_field;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a schema or data input file.
const MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;
/// Exit code for invalid data.
const EXIT_INVALID: u8 = 1;
/// Exit code for usage, input, or schema errors.
const EXIT_ERROR: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "form-gate", version, disable_help_subcommand = true)]
struct Cli {
    /// Path to form-gate.toml (overrides `FORM_GATE_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print visibility, disablement, widgets, and options for every field.
    State(DataCommand),
    /// Validate a data snapshot against a form schema.
    Validate(DataCommand),
    /// Validate a single field value.
    ValidateField(FieldCommand),
    /// Print the structural schema derived from a form schema.
    Normalize(SchemaArgs),
}

/// Schema input arguments.
#[derive(Args, Debug)]
struct SchemaArgs {
    /// Path to the form schema JSON.
    #[arg(long, value_name = "PATH")]
    schema: PathBuf,
}

/// Arguments for commands that take a data snapshot.
#[derive(Args, Debug)]
struct DataCommand {
    /// Schema input.
    #[command(flatten)]
    schema: SchemaArgs,
    /// Path to the form data JSON (defaults to an empty object).
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,
    /// Data override applied before evaluation (`section.field=JSON`).
    #[arg(long = "set", value_name = "PATH=JSON", value_parser = parse_assignment)]
    set: Vec<Assignment>,
}

/// Arguments for `validate-field`.
#[derive(Args, Debug)]
struct FieldCommand {
    /// Schema input.
    #[command(flatten)]
    schema: SchemaArgs,
    /// Composite field path (`section.field`).
    #[arg(long, value_name = "PATH")]
    field: String,
    /// Candidate value as JSON; omitted means "not provided".
    #[arg(long, value_name = "JSON", value_parser = parse_json_value)]
    value: Option<Value>,
}

/// One `--set` override.
#[derive(Debug, Clone, PartialEq)]
struct Assignment {
    /// Dotted data path.
    path: String,
    /// Value to write.
    value: Value,
}

/// Output of `validate-field`.
#[derive(Debug, Serialize)]
struct FieldReport<'a> {
    /// Field path that was validated.
    field: &'a str,
    /// Humanized messages in engine order.
    errors: Vec<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let config = FormGateConfig::load_or_default(cli.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    let diagnostics =
        config.diagnostics.build_sink().map_err(|err| CliError::new(err.to_string()))?;
    let options = config.validation.options();

    match cli.command {
        Commands::State(command) => command_state(&command, diagnostics.as_ref()),
        Commands::Validate(command) => command_validate(&command, options),
        Commands::ValidateField(command) => {
            command_validate_field(&command, &options, diagnostics.as_ref())
        }
        Commands::Normalize(args) => command_normalize(&args),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `state` command.
fn command_state(command: &DataCommand, diagnostics: &dyn DiagnosticSink) -> CliResult<ExitCode> {
    let schema = load_schema(&command.schema.schema)?;
    let data = load_data(command)?;
    let state = compute_form_state(&schema, &data, diagnostics);
    write_json(&state)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `validate` command.
fn command_validate(command: &DataCommand, options: ValidationOptions) -> CliResult<ExitCode> {
    let schema = load_schema(&command.schema.schema)?;
    let data = load_data(command)?;
    let validator = FormValidator::new(schema, options)
        .map_err(|err| CliError::new(format!("schema rejected: {err}")))?;
    let result = validator.validate(&data);
    write_json(&result)?;
    Ok(if result.valid { ExitCode::SUCCESS } else { ExitCode::from(EXIT_INVALID) })
}

/// Executes the `validate-field` command.
fn command_validate_field(
    command: &FieldCommand,
    options: &ValidationOptions,
    diagnostics: &dyn DiagnosticSink,
) -> CliResult<ExitCode> {
    let schema = load_schema(&command.schema.schema)?;
    let field = schema.field(&command.field).map(|(_, field)| field);
    let errors =
        validate_field(field, command.value.as_ref(), &command.field, options, diagnostics);
    let valid = errors.is_empty();
    write_json(&FieldReport {
        field: &command.field,
        errors,
    })?;
    Ok(if valid { ExitCode::SUCCESS } else { ExitCode::from(EXIT_INVALID) })
}

/// Executes the `normalize` command.
fn command_normalize(args: &SchemaArgs) -> CliResult<ExitCode> {
    let raw = read_json(&args.schema, "schema")?;
    write_json(&normalize(&raw))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Loads and checks a form schema.
fn load_schema(path: &Path) -> CliResult<FormSchema> {
    let raw = read_json(path, "schema")?;
    FormSchema::from_value(raw)
        .map_err(|err| CliError::new(format!("invalid schema {}: {err}", path.display())))
}

/// Loads the data snapshot and applies `--set` overrides.
fn load_data(command: &DataCommand) -> CliResult<Value> {
    let mut data = match &command.data {
        Some(path) => read_json(path, "data")?,
        None => Value::Object(serde_json::Map::new()),
    };
    apply_assignments(&mut data, &command.set)?;
    Ok(data)
}

/// Applies `--set` overrides in order.
fn apply_assignments(data: &mut Value, assignments: &[Assignment]) -> CliResult<()> {
    for assignment in assignments {
        set_path(data, &assignment.path, assignment.value.clone())
            .map_err(|err| CliError::new(format!("--set {}: {err}", assignment.path)))?;
    }
    Ok(())
}

/// Reads a JSON file with the input size limit.
fn read_json(path: &Path, kind: &str) -> CliResult<Value> {
    let bytes = read_bytes_with_limit(path, MAX_INPUT_BYTES).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(format!("failed to read {kind} {}: {err}", path.display()))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(format!(
            "{kind} {} is too large ({size} bytes, limit {limit})",
            path.display()
        )),
    })?;
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(format!("invalid {kind} JSON {}: {err}", path.display())))
}

/// Reads a file while enforcing a maximum byte size.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let size = file.metadata().map_err(ReadLimitError::Io)?.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1)).read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Parses a `--set` argument of the form `path=JSON`.
///
/// Values that are not valid JSON are taken as plain strings.
fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (path, value) =
        raw.split_once('=').ok_or_else(|| format!("expected PATH=JSON, got `{raw}`"))?;
    let path = path.trim();
    if path.is_empty() {
        return Err("assignment path must be non-empty".to_string());
    }
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok(Assignment {
        path: path.to_string(),
        value,
    })
}

/// Parses a `--value` argument as JSON.
fn parse_json_value(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|err| format!("invalid JSON value: {err}"))
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a value to stdout as pretty JSON.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("failed to render JSON: {err}")))?;
    write_stdout_line(&rendered)
        .map_err(|err| CliError::new(format!("failed to write stdout: {err}")))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message to stderr and returns the error exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(EXIT_ERROR)
}
