// SPDX-License-Identifier: Apache-2.0

//! Equivalence-checker behavior over the trace-script test dialect.

use std::cell::Cell;

use pretty_assertions::assert_eq;
use solfuzz::compiler::OptimiserSettings;
use solfuzz::evm::EvmVersion;
use solfuzz::interp::{Interpreter, InterpreterRun, TerminationReason};
use solfuzz::ir_diff::{yul_ir_diff, Analysis, IrStack, Verdict};
use solfuzz::test_utils::{ScriptInterpreter, ScriptProgram, ScriptStack};

/// Delegating doubles that count invocations, for asserting the trivial
/// empty-pair short-circuit never touches parse or interpret.
#[derive(Default)]
struct CountingStack {
    calls: Cell<usize>,
}

impl IrStack for CountingStack {
    type Program = ScriptProgram;

    fn parse_and_analyze(
        &self,
        name: &str,
        source: &str,
        version: EvmVersion,
        settings: OptimiserSettings,
    ) -> Analysis<ScriptProgram> {
        self.calls.set(self.calls.get() + 1);
        assert_eq!(settings, OptimiserSettings::Full);
        ScriptStack.parse_and_analyze(name, source, version, settings)
    }
}

#[derive(Default)]
struct CountingInterpreter {
    calls: Cell<usize>,
}

impl Interpreter<ScriptProgram> for CountingInterpreter {
    fn interpret(&self, program: &ScriptProgram, version: EvmVersion) -> InterpreterRun {
        self.calls.set(self.calls.get() + 1);
        ScriptInterpreter.interpret(program, version)
    }
}

#[test]
fn empty_pair_passes_without_parsing_or_interpreting() {
    let _ = env_logger::builder().is_test(true).try_init();
    let stack = CountingStack::default();
    let interpreter = CountingInterpreter::default();

    let verdict = yul_ir_diff(&stack, &interpreter, EvmVersion::default(), "", "");

    assert_eq!(verdict, Verdict::BothEmpty);
    assert_eq!(stack.calls.get(), 0);
    assert_eq!(interpreter.calls.get(), 0);
}

#[test]
fn identical_programs_have_equal_traces() {
    let _ = env_logger::builder().is_test(true).try_init();
    let program = "alpha\nbeta\ngamma";
    let verdict = yul_ir_diff(
        &ScriptStack,
        &ScriptInterpreter,
        EvmVersion::Istanbul,
        program,
        program,
    );
    assert_eq!(verdict, Verdict::TracesEqual);
}

#[test]
fn syntactically_different_programs_with_equal_traces_pass() {
    let _ = env_logger::builder().is_test(true).try_init();
    // A warning does not emit trace events, so the traces stay identical.
    let verdict = yul_ir_diff(
        &ScriptStack,
        &ScriptInterpreter,
        EvmVersion::Byzantium,
        "alpha\nbeta",
        "!warn Warning\nalpha\nbeta",
    );
    assert_eq!(verdict, Verdict::TracesEqual);
}

#[test]
#[should_panic(expected = "Interpreted traces for optimized and unoptimized code differ.")]
fn single_divergent_event_is_fatal() {
    let _ = env_logger::builder().is_test(true).try_init();
    yul_ir_diff(
        &ScriptStack,
        &ScriptInterpreter,
        EvmVersion::default(),
        "alpha\nbeta",
        "alpha\nbetb",
    );
}

#[test]
fn optimized_step_limit_is_benign_regardless_of_content() {
    let _ = env_logger::builder().is_test(true).try_init();
    // The traces would differ wildly, but the optimized side ran out of
    // budget, so the pair is not comparable.
    let verdict = yul_ir_diff(
        &ScriptStack,
        &ScriptInterpreter,
        EvmVersion::default(),
        "alpha\nbeta\ngamma",
        "omega\n!spin",
    );
    assert_eq!(verdict, Verdict::StepLimitTruncated);
}

#[test]
fn unoptimized_step_limit_does_not_gate_when_prefixes_agree() {
    let _ = env_logger::builder().is_test(true).try_init();
    // Only the optimized side's termination reason is inspected: a limit
    // hit on the unoptimized side falls through to the plain comparison,
    // which here happens to succeed on the truncated prefix.
    let verdict = yul_ir_diff(
        &ScriptStack,
        &ScriptInterpreter,
        EvmVersion::default(),
        "alpha\n!spin\nbeta",
        "alpha",
    );
    assert_eq!(verdict, Verdict::TracesEqual);
}

#[test]
#[should_panic(expected = "Interpreted traces for optimized and unoptimized code differ.")]
fn unoptimized_step_limit_can_fail_spuriously() {
    let _ = env_logger::builder().is_test(true).try_init();
    // Same asymmetry as above, with a longer optimized trace: the truncated
    // unoptimized trace no longer matches and the comparison is fatal.
    yul_ir_diff(
        &ScriptStack,
        &ScriptInterpreter,
        EvmVersion::default(),
        "alpha\n!spin\nbeta",
        "alpha\nbeta",
    );
}

#[test]
#[should_panic(expected = "Compiler generated malformed IR")]
fn malformed_unoptimized_ir_is_fatal() {
    let _ = env_logger::builder().is_test(true).try_init();
    yul_ir_diff(
        &ScriptStack,
        &ScriptInterpreter,
        EvmVersion::default(),
        "!error SyntaxError\nalpha",
        "alpha",
    );
}

#[test]
#[should_panic(expected = "Compiler generated malformed optimized IR")]
fn malformed_optimized_ir_is_fatal() {
    let _ = env_logger::builder().is_test(true).try_init();
    yul_ir_diff(
        &ScriptStack,
        &ScriptInterpreter,
        EvmVersion::default(),
        "alpha",
        "!error SyntaxError\nalpha",
    );
}

#[test]
fn only_the_step_limit_reason_gates_the_short_circuit() {
    let _ = env_logger::builder().is_test(true).try_init();
    // An interpreter that ends every run on the trace cap: the short-circuit
    // must not trigger, and equal traces still pass on direct comparison.
    struct TraceCapped;
    impl Interpreter<ScriptProgram> for TraceCapped {
        fn interpret(&self, program: &ScriptProgram, version: EvmVersion) -> InterpreterRun {
            let run = ScriptInterpreter.interpret(program, version);
            InterpreterRun {
                trace: run.trace,
                reason: TerminationReason::TraceLimitReached,
            }
        }
    }

    let verdict = yul_ir_diff(
        &ScriptStack,
        &TraceCapped,
        EvmVersion::default(),
        "alpha",
        "alpha",
    );
    assert_eq!(verdict, Verdict::TracesEqual);
}

#[test]
fn analysis_warnings_are_not_malformed() {
    let _ = env_logger::builder().is_test(true).try_init();
    let verdict = yul_ir_diff(
        &ScriptStack,
        &ScriptInterpreter,
        EvmVersion::default(),
        "!warn Warning\nalpha",
        "!warn Warning\nalpha",
    );
    assert_eq!(verdict, Verdict::TracesEqual);
}

#[test]
fn one_empty_side_is_not_the_trivial_case() {
    let _ = env_logger::builder().is_test(true).try_init();
    // An empty text still parses to an empty program in the script dialect;
    // only the both-empty pair short-circuits.
    let stack = CountingStack::default();
    let verdict = yul_ir_diff(&stack, &ScriptInterpreter, EvmVersion::default(), "", "!warn Warning");
    assert_eq!(verdict, Verdict::TracesEqual);
    assert_eq!(stack.calls.get(), 2);
}
