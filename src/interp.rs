// SPDX-License-Identifier: Apache-2.0

//! Bounded interpretation capability. The interpreter owns the step budget;
//! it is the harness's only liveness guarantee, so an implementation must
//! enforce a finite budget and report how the run ended.

use crate::evm::EvmVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The program ran off the end of its body.
    NormalHalt,
    /// A stop/return-style statement ended the run.
    ExplicitlyTerminated,
    StepLimitReached,
    TraceLimitReached,
}

/// Outcome of one interpretation: the ordered textual event log and how the
/// run ended. The trace is the comparison artifact for semantic equivalence
/// and is compared byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterRun {
    pub trace: String,
    pub reason: TerminationReason,
}

pub trait Interpreter<P> {
    fn interpret(&self, program: &P, version: EvmVersion) -> InterpreterRun;
}
