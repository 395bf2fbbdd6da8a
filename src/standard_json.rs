// SPDX-License-Identifier: Apache-2.0

//! Driver for the compiler's standard-JSON entry point.
//!
//! Malformed fuzzer input is expected to produce ordinary diagnosed errors;
//! a response carrying an exception-class diagnostic means an internal
//! compiler error leaked through and is surfaced as a hard failure rather
//! than accepted as "the compiler correctly rejected this input".

use std::fmt;

use serde::Deserialize;
use serde_json::{json, Value};

/// Diagnostic categories that must never appear in a compiler response.
const DISALLOWED_DIAGNOSTICS: [&str; 2] = ["Exception", "InternalCompilerError"];

/// The compiler's single external document entry point. `compile` operates
/// on process-wide state; `reset` returns that state to pristine and must be
/// called between independent top-level invocations.
pub trait StandardJsonCompiler {
    fn compile(&mut self, input_json: &str) -> String;
    fn reset(&mut self);
}

#[derive(Debug)]
pub enum DriverError {
    /// The compiler's output was not a well-formed JSON document.
    InvalidJson,
    /// The response diagnostics contained a disallowed category.
    DisallowedDiagnostic { kind: String },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::InvalidJson => f.write_str("Compiler produced invalid JSON output."),
            DriverError::DisallowedDiagnostic { kind } => {
                write!(f, "Invalid error: \"{}\"", kind)
            }
        }
    }
}

impl std::error::Error for DriverError {}

#[derive(Debug, Deserialize)]
struct ResponseDiagnostic {
    #[serde(rename = "type")]
    kind: String,
}

/// Runs one document through the compiler, resets process-wide compiler
/// state, and validates the response diagnostics.
pub fn run_compiler<C: StandardJsonCompiler>(
    compiler: &mut C,
    input_json: &str,
    quiet: bool,
) -> Result<Value, DriverError> {
    if !quiet {
        log::info!("Input JSON: {}", input_json);
    }
    let output = compiler.compile(input_json);
    if !quiet {
        log::info!("Output JSON: {}", output);
    }
    // `output` is an owned copy, so resetting here cannot invalidate it.
    compiler.reset();

    let parsed: Value = serde_json::from_str(&output).map_err(|e| {
        log::warn!("compiler output is not valid JSON: {}", e);
        DriverError::InvalidJson
    })?;

    if let Some(errors) = parsed.get("errors").and_then(Value::as_array) {
        for error in errors {
            let diagnostic: ResponseDiagnostic =
                serde_json::from_value(error.clone()).map_err(|e| {
                    log::warn!("response diagnostic is malformed: {}", e);
                    DriverError::InvalidJson
                })?;
            if DISALLOWED_DIAGNOSTICS
                .iter()
                .any(|disallowed| diagnostic.kind.contains(disallowed))
            {
                return Err(DriverError::DisallowedDiagnostic {
                    kind: diagnostic.kind,
                });
            }
        }
    }
    Ok(parsed)
}

/// Wraps one source text in the standard compile document (all outputs
/// selected at every granularity) and runs it through the compiler.
pub fn test_compiler_json_interface<C: StandardJsonCompiler>(
    compiler: &mut C,
    source: &str,
    optimize: bool,
    quiet: bool,
) -> Result<Value, DriverError> {
    if !quiet {
        log::info!(
            "Testing compiler {} optimizer.",
            if optimize { "with" } else { "without" }
        );
    }

    let config = json!({
        "language": "Solidity",
        "sources": {
            "": { "content": source }
        },
        "settings": {
            "optimizer": { "enabled": optimize, "runs": 200 },
            "evmVersion": "berlin",
            "outputSelection": {
                "*": {
                    // All SourceUnit-level outputs.
                    "": ["*"],
                    // All Contract-level outputs.
                    "*": ["*"]
                }
            }
        }
    });

    run_compiler(compiler, &config.to_string(), quiet)
}

/// Runs a document already assembled upstream through the compiler.
pub fn test_standard_compiler<C: StandardJsonCompiler>(
    compiler: &mut C,
    input_json: &str,
    quiet: bool,
) -> Result<Value, DriverError> {
    if !quiet {
        log::info!("Testing compiler via JSON interface.");
    }
    run_compiler(compiler, input_json, quiet)
}
