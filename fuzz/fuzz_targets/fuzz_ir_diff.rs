// SPDX-License-Identifier: Apache-2.0

#![no_main]
use libfuzzer_sys::fuzz_target;
use solfuzz::evm::EvmVersion;
use solfuzz::ir_diff::{yul_ir_diff, Verdict};
use solfuzz::test_utils::{ScriptInterpreter, ScriptStack};
use solfuzz_fuzz::{render_program, TraceProgramSpec};

fuzz_target!(|spec: TraceProgramSpec| {
    let _ = env_logger::builder().is_test(true).try_init();

    let program = render_program(&spec);
    let version = EvmVersion::from_selector(spec.events.len() as u32);
    log::debug!("generated program under {}:\n{}", version, program);

    // A program diffed against itself must never be flagged; any panic here
    // is a harness bug, not an optimizer finding.
    let verdict = yul_ir_diff(&ScriptStack, &ScriptInterpreter, version, &program, &program);
    match verdict {
        Verdict::BothEmpty | Verdict::StepLimitTruncated | Verdict::TracesEqual => {}
    }
});
