// SPDX-License-Identifier: Apache-2.0

pub mod assembly;
pub mod compiler;
pub mod constant_optimizer;
pub mod diagnostics;
pub mod dual_path;
pub mod evm;
pub mod interp;
pub mod ir_diff;
pub mod standard_json;
pub mod test_utils;
