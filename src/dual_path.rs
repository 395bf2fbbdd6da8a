// SPDX-License-Identifier: Apache-2.0

//! Orchestration of one logical program through two code-generation paths.
//!
//! The compiler is configured for IR generation once per test case; on
//! success the last compiled unit's unoptimized and fully-optimized IR
//! renderings go to the equivalence oracle. A closed set of compiler
//! failure categories means "no verdict for this input"; anything outside
//! that set propagates to the caller.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::compiler::{
    CompileConfig, CompileFailure, Compiler, ExpectedFailure, OptimiserSettings,
};
use crate::evm::EvmVersion;
use crate::interp::Interpreter;
use crate::ir_diff::{self, IrStack, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DualPathOutcome {
    /// Both IR renderings were obtained and compared.
    Checked(Verdict),
    /// Compilation succeeded but produced no named unit.
    NoContracts,
    /// The compiler raised one of the anticipated failure categories; this
    /// input yields no verdict.
    CompileFailed(ExpectedFailure),
}

/// Compiles `sources` once with IR generation enabled and diffs the last
/// contract's IR renderings. The target version is a pure function of
/// `rand` against the fixed version list.
pub fn test_compiler<C, S, I>(
    compiler: &mut C,
    stack: &S,
    interpreter: &I,
    sources: &BTreeMap<String, String>,
    optimize: bool,
    rand: u32,
) -> Result<DualPathOutcome>
where
    C: Compiler,
    S: IrStack,
    I: Interpreter<S::Program>,
{
    let evm_version = EvmVersion::from_selector(rand);
    let optimiser = if optimize {
        OptimiserSettings::Standard
    } else {
        OptimiserSettings::Minimal
    };
    let config = CompileConfig {
        evm_version,
        optimiser,
        via_ir: true,
    };

    match compiler.compile(sources, &config) {
        Ok(compilation) => match compilation.last() {
            Some(contract) => {
                let verdict = ir_diff::yul_ir_diff(
                    stack,
                    interpreter,
                    evm_version,
                    &contract.yul_ir,
                    &contract.yul_ir_optimized,
                );
                Ok(DualPathOutcome::Checked(verdict))
            }
            None => Ok(DualPathOutcome::NoContracts),
        },
        Err(CompileFailure::Expected(kind)) => {
            log::debug!("compiler rejected input ({}); no verdict", kind);
            Ok(DualPathOutcome::CompileFailed(kind))
        }
        Err(CompileFailure::Unexpected(e)) => Err(e),
    }
}
