// SPDX-License-Identifier: Apache-2.0

//! One-shot stress driver for the numeric-constant optimization pass: build
//! a push-constant sequence from raw bytes and run the pass across every
//! mode and run-count combination. A pure crash/hang oracle; results are
//! discarded.

use crate::assembly::{Assembly, ConstantOptimiser, Word};
use crate::evm::EvmVersion;

/// Pass run counts exercised for each code-generation mode.
pub const OPTIMISER_RUNS: [u32; 9] = [1, 2, 3, 20, 40, 100, 200, 400, 1000];

/// Decodes fixed-width big-endian constants from a raw byte stream. A
/// trailing chunk shorter than [`Word::WIDTH`] is dropped.
pub fn decode_constants(input: &[u8]) -> Vec<Word> {
    input
        .chunks_exact(Word::WIDTH)
        .map(|chunk| {
            let mut bytes = [0u8; Word::WIDTH];
            bytes.copy_from_slice(chunk);
            Word::from_be_bytes(bytes)
        })
        .collect()
}

/// Decodes `input` into a push-constant assembly and invokes the pass for
/// both code-generation modes across [`OPTIMISER_RUNS`], each time on the
/// pristine assembly under the default EVM version.
pub fn test_constant_optimizer<O: ConstantOptimiser>(optimiser: &O, input: &[u8], quiet: bool) {
    if !quiet {
        log::info!("Testing constant optimizer");
    }
    let constants = decode_constants(input);
    if !quiet {
        log::info!("Got {} inputs", constants.len());
    }

    let mut assembly = Assembly::new();
    for constant in &constants {
        if !quiet {
            log::debug!("{}", constant);
        }
        assembly.append_constant(*constant);
    }

    for is_creation in [false, true] {
        for runs in OPTIMISER_RUNS {
            // The pass is a pure transform over the pristine assembly, so
            // every iteration starts from the original state.
            let _ = optimiser.optimise_constants(is_creation, runs, EvmVersion::default(), &assembly);
        }
    }
}
