// SPDX-License-Identifier: Apache-2.0

//! Compiler diagnostic model and a small reporter for runs that need human
//! inspection.

use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category label, e.g. "TypeError" or "DeclarationError".
    pub kind: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn error(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            kind: kind.into(),
            message: message.into(),
        }
    }
}

pub fn contains_only_warnings(diagnostics: &[Diagnostic]) -> bool {
    diagnostics
        .iter()
        .all(|d| d.severity == Severity::Warning)
}

/// Writes one line per diagnostic to the sink, labeled by severity.
pub fn print_diagnostics<W: io::Write>(sink: &mut W, diagnostics: &[Diagnostic]) -> io::Result<()> {
    for diagnostic in diagnostics {
        let label = match diagnostic.severity {
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        };
        writeln!(
            sink,
            "{}: {}: {}",
            label, diagnostic.kind, diagnostic.message
        )?;
    }
    Ok(())
}
