// SPDX-License-Identifier: Apache-2.0

//! Test doubles for the external compiler, IR-stack, interpreter and
//! constant-optimizer capabilities.
//!
//! The stack/interpreter pair speaks a line-oriented trace-script dialect so
//! tests can construct equal, divergent, malformed and budget-exhausting
//! programs at will:
//!
//! - an ordinary line emits one `TRACE: <line>` event when interpreted;
//! - `!warn <kind>` adds a warning-severity analysis diagnostic;
//! - `!error <kind>` adds an error-severity analysis diagnostic (the text
//!   then fails analysis and yields no program);
//! - `!spin` exhausts the interpreter's step budget at that point.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::assembly::{Assembly, AssemblyItem, ConstantOptimiser};
use crate::compiler::{
    CompileConfig, CompileFailure, Compiler, Compilation, ExpectedFailure, OptimiserSettings,
};
use crate::diagnostics::Diagnostic;
use crate::evm::EvmVersion;
use crate::interp::{Interpreter, InterpreterRun, TerminationReason};
use crate::ir_diff::{Analysis, IrStack};
use crate::standard_json::StandardJsonCompiler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptProgram {
    lines: Vec<String>,
}

/// Parses trace-script text; diagnostics come from `!warn`/`!error`
/// directives and any error-severity diagnostic fails the analysis.
#[derive(Debug, Default)]
pub struct ScriptStack;

impl IrStack for ScriptStack {
    type Program = ScriptProgram;

    fn parse_and_analyze(
        &self,
        _name: &str,
        source: &str,
        _version: EvmVersion,
        _settings: OptimiserSettings,
    ) -> Analysis<ScriptProgram> {
        let mut diagnostics = Vec::new();
        for line in source.lines() {
            if let Some(kind) = line.strip_prefix("!warn ") {
                diagnostics.push(Diagnostic::warning(kind, "declared by script"));
            } else if let Some(kind) = line.strip_prefix("!error ") {
                diagnostics.push(Diagnostic::error(kind, "declared by script"));
            }
        }
        let program = if crate::diagnostics::contains_only_warnings(&diagnostics) {
            Some(ScriptProgram {
                lines: source.lines().map(str::to_owned).collect(),
            })
        } else {
            None
        };
        Analysis {
            program,
            diagnostics,
        }
    }
}

/// Interprets a trace-script program: one trace event per ordinary line,
/// stopping with `StepLimitReached` at a `!spin` directive.
#[derive(Debug, Default)]
pub struct ScriptInterpreter;

impl Interpreter<ScriptProgram> for ScriptInterpreter {
    fn interpret(&self, program: &ScriptProgram, _version: EvmVersion) -> InterpreterRun {
        let mut trace = String::new();
        for line in &program.lines {
            if line == "!spin" {
                return InterpreterRun {
                    trace,
                    reason: TerminationReason::StepLimitReached,
                };
            }
            if line.starts_with('!') {
                continue;
            }
            let _ = writeln!(trace, "TRACE: {}", line);
        }
        InterpreterRun {
            trace,
            reason: TerminationReason::NormalHalt,
        }
    }
}

/// What a [`ScriptedCompiler`] does on every `compile` call.
#[derive(Debug, Clone)]
pub enum CompilerScript {
    Succeed(Compilation),
    FailExpected(ExpectedFailure),
    FailUnexpected(String),
}

/// Compiler double that replays a canned result and records the
/// configuration of every call.
#[derive(Debug)]
pub struct ScriptedCompiler {
    script: CompilerScript,
    pub calls: Vec<CompileConfig>,
}

impl ScriptedCompiler {
    pub fn new(script: CompilerScript) -> Self {
        ScriptedCompiler {
            script,
            calls: Vec::new(),
        }
    }
}

impl Compiler for ScriptedCompiler {
    fn compile(
        &mut self,
        _sources: &BTreeMap<String, String>,
        config: &CompileConfig,
    ) -> Result<Compilation, CompileFailure> {
        self.calls.push(*config);
        match &self.script {
            CompilerScript::Succeed(compilation) => Ok(compilation.clone()),
            CompilerScript::FailExpected(kind) => Err(CompileFailure::Expected(*kind)),
            CompilerScript::FailUnexpected(message) => {
                Err(CompileFailure::Unexpected(anyhow::anyhow!(message.clone())))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonCompilerEvent {
    Compiled { input: String },
    Reset,
}

/// Standard-JSON compiler double: replays a canned response and records the
/// order of compile and reset calls.
#[derive(Debug)]
pub struct ScriptedJsonCompiler {
    output: String,
    pub events: Vec<JsonCompilerEvent>,
}

impl ScriptedJsonCompiler {
    pub fn new(output: impl Into<String>) -> Self {
        ScriptedJsonCompiler {
            output: output.into(),
            events: Vec::new(),
        }
    }

    pub fn reset_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| **e == JsonCompilerEvent::Reset)
            .count()
    }
}

impl StandardJsonCompiler for ScriptedJsonCompiler {
    fn compile(&mut self, input_json: &str) -> String {
        self.events.push(JsonCompilerEvent::Compiled {
            input: input_json.to_owned(),
        });
        self.output.clone()
    }

    fn reset(&mut self) {
        self.events.push(JsonCompilerEvent::Reset);
    }
}

/// Reference constant pass: folds adjacent duplicate push constants. Small
/// enough to reason about, but a genuine transform so tests can observe that
/// the driver hands out pristine input every time.
#[derive(Debug, Default)]
pub struct FoldingConstantOptimiser;

impl ConstantOptimiser for FoldingConstantOptimiser {
    fn optimise_constants(
        &self,
        _is_creation: bool,
        _runs: u32,
        _version: EvmVersion,
        assembly: &Assembly,
    ) -> Assembly {
        let mut optimised = Assembly::new();
        let mut previous: Option<AssemblyItem> = None;
        for item in assembly.items() {
            if previous != Some(*item) {
                let AssemblyItem::PushConstant(constant) = item;
                optimised.append_constant(*constant);
                previous = Some(*item);
            }
        }
        optimised
    }
}

/// One recorded constant-pass invocation: mode, run count, version and the
/// size of the assembly handed in.
pub type ConstantPassCall = (bool, u32, EvmVersion, usize);

/// Records every invocation; returns the input unchanged.
#[derive(Debug, Default)]
pub struct RecordingConstantOptimiser {
    pub calls: RefCell<Vec<ConstantPassCall>>,
}

impl ConstantOptimiser for RecordingConstantOptimiser {
    fn optimise_constants(
        &self,
        is_creation: bool,
        runs: u32,
        version: EvmVersion,
        assembly: &Assembly,
    ) -> Assembly {
        self.calls
            .borrow_mut()
            .push((is_creation, runs, version, assembly.len()));
        assembly.clone()
    }
}
