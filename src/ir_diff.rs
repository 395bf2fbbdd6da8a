// SPDX-License-Identifier: Apache-2.0

//! Equivalence oracle over the two IR renderings of one compiled unit.
//!
//! Both texts are re-parsed as standalone strict-assembly programs and
//! interpreted under a bounded-step model; byte-identical traces mean the
//! optimizer preserved semantics. Malformed IR and trace mismatches are
//! confirmed compiler bugs and abort the process after dumping context.

use std::io;

use crate::compiler::OptimiserSettings;
use crate::diagnostics::{self, Diagnostic};
use crate::evm::EvmVersion;
use crate::interp::{Interpreter, TerminationReason};

/// Result of one parse+analyze invocation. The text is well-formed iff a
/// program was produced and no diagnostic is error-severity.
#[derive(Debug)]
pub struct Analysis<P> {
    pub program: Option<P>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<P> Analysis<P> {
    pub fn is_clean(&self) -> bool {
        self.program.is_some() && diagnostics::contains_only_warnings(&self.diagnostics)
    }
}

/// Strict-assembly parse+analyze capability. The settings configure the
/// analysis pipeline itself, independent of the optimization level already
/// reflected in the text's content.
pub trait IrStack {
    type Program;

    fn parse_and_analyze(
        &self,
        name: &str,
        source: &str,
        version: EvmVersion,
        settings: OptimiserSettings,
    ) -> Analysis<Self::Program>;
}

/// Pass classification for one compared pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Both texts were empty; nothing to compare.
    BothEmpty,
    /// The optimized run exhausted its step budget, so the traces are not
    /// comparable; treated as a benign divergence.
    StepLimitTruncated,
    TracesEqual,
}

fn parse_or_die<S: IrStack>(
    stack: &S,
    source: &str,
    version: EvmVersion,
    what: &str,
) -> S::Program {
    let analysis = stack.parse_and_analyze("source", source, version, OptimiserSettings::Full);
    if analysis.is_clean() {
        return analysis
            .program
            .unwrap_or_else(|| unreachable!("clean analysis carries a program"));
    }
    println!("{}", source);
    let _ = diagnostics::print_diagnostics(&mut io::stdout(), &analysis.diagnostics);
    panic!("Compiler generated malformed {}", what);
}

/// Interprets the unoptimized and optimized IR texts of one compiled unit
/// and checks their traces for byte-for-byte equality.
///
/// Panics on malformed IR or differing traces; both are confirmed compiler
/// correctness bugs with no recovery path.
pub fn yul_ir_diff<S, I>(
    stack: &S,
    interpreter: &I,
    version: EvmVersion,
    ir: &str,
    ir_opt: &str,
) -> Verdict
where
    S: IrStack,
    I: Interpreter<S::Program>,
{
    if ir.is_empty() && ir_opt.is_empty() {
        return Verdict::BothEmpty;
    }

    let program = parse_or_die(stack, ir, version, "IR");
    let program_opt = parse_or_die(stack, ir_opt, version, "optimized IR");

    let run = interpreter.interpret(&program, version);
    let run_opt = interpreter.interpret(&program_opt, version);

    // Only the optimized side's budget exhaustion is treated as benign; a
    // limit hit on the unoptimized side alone falls through to the direct
    // comparison below.
    if run_opt.reason == TerminationReason::StepLimitReached {
        return Verdict::StepLimitTruncated;
    }

    if run.trace != run_opt.trace {
        log::info!("==== trace mismatch under {} ====", version);
        log::info!("unoptimized trace:\n{}", run.trace);
        log::info!("optimized trace:\n{}", run_opt.trace);
        println!("{}", run.trace);
        println!("{}", run_opt.trace);
        panic!("Interpreted traces for optimized and unoptimized code differ.");
    }
    Verdict::TracesEqual
}
