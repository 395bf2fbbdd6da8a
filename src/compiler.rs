// SPDX-License-Identifier: Apache-2.0

//! The compile capability the dual-path orchestrator drives, as a seam the
//! harness never looks behind: given sources and a configuration, the
//! compiler either yields named compiled units or one of a closed set of
//! failure categories.

use std::collections::BTreeMap;
use std::fmt;

use crate::evm::EvmVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimiserSettings {
    /// No optimization beyond what code generation requires.
    Minimal,
    /// The production optimization profile.
    Standard,
    /// Everything on; used when re-analyzing emitted IR.
    Full,
}

/// Immutable per-test-case compile configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileConfig {
    pub evm_version: EvmVersion,
    pub optimiser: OptimiserSettings,
    /// Request intermediate-representation code generation.
    pub via_ir: bool,
}

/// One named compiled unit together with both of its IR renderings. Both
/// texts come from the same compile, so the pair exists only when that
/// compile succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledContract {
    pub name: String,
    pub yul_ir: String,
    pub yul_ir_optimized: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    /// Contracts in the compiler's own enumeration order.
    pub contracts: Vec<CompiledContract>,
}

impl Compilation {
    pub fn last(&self) -> Option<&CompiledContract> {
        self.contracts.last()
    }
}

/// Failure categories the compiler is allowed to raise for valid-looking
/// inputs that exceed its limits or hit known gaps. The orchestrator
/// swallows these; anything else propagates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedFailure {
    InternalCompilerError,
    CompilerError,
    FatalError,
    UnimplementedFeature,
    StackTooDeep,
}

impl fmt::Display for ExpectedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpectedFailure::InternalCompilerError => "internal compiler error",
            ExpectedFailure::CompilerError => "compiler error",
            ExpectedFailure::FatalError => "fatal error",
            ExpectedFailure::UnimplementedFeature => "unimplemented feature",
            ExpectedFailure::StackTooDeep => "stack too deep",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum CompileFailure {
    Expected(ExpectedFailure),
    Unexpected(anyhow::Error),
}

impl fmt::Display for CompileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileFailure::Expected(kind) => write!(f, "expected compiler failure: {}", kind),
            CompileFailure::Unexpected(e) => write!(f, "unexpected compiler failure: {}", e),
        }
    }
}

impl From<ExpectedFailure> for CompileFailure {
    fn from(kind: ExpectedFailure) -> Self {
        CompileFailure::Expected(kind)
    }
}

pub trait Compiler {
    /// Compiles the given logical sources under the given configuration.
    fn compile(
        &mut self,
        sources: &BTreeMap<String, String>,
        config: &CompileConfig,
    ) -> Result<Compilation, CompileFailure>;
}
