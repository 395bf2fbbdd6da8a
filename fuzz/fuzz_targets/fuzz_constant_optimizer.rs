// SPDX-License-Identifier: Apache-2.0

#![no_main]
use libfuzzer_sys::fuzz_target;
use solfuzz::assembly::Word;
use solfuzz::constant_optimizer::{decode_constants, test_constant_optimizer};
use solfuzz::test_utils::FoldingConstantOptimiser;

fuzz_target!(|data: &[u8]| {
    let _ = env_logger::builder().is_test(true).try_init();

    // Truncating decode: a partial trailing chunk never contributes a word.
    let constants = decode_constants(data);
    assert_eq!(constants.len(), data.len() / Word::WIDTH);

    test_constant_optimizer(&FoldingConstantOptimiser, data, true);
});
