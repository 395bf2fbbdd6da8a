// SPDX-License-Identifier: Apache-2.0
use arbitrary::Arbitrary;
use std::fmt::Write as _;

/// Shape of one generated trace-script program. Event ids are rendered to
/// plain event lines; `spin_at` optionally inserts a budget-exhausting
/// directive somewhere in the body.
#[derive(Debug, Clone, Arbitrary)]
pub struct TraceProgramSpec {
    pub events: Vec<u16>,
    pub spin_at: Option<u8>,
    pub warn: bool,
}

pub fn render_program(spec: &TraceProgramSpec) -> String {
    let mut program = String::new();
    if spec.warn {
        program.push_str("!warn Warning\n");
    }
    let events = &spec.events[..spec.events.len().min(64)];
    let spin_at = spec.spin_at.map(|at| at as usize % (events.len() + 1));
    for (index, event) in events.iter().enumerate() {
        if spin_at == Some(index) {
            program.push_str("!spin\n");
        }
        let _ = writeln!(program, "event {}", event);
    }
    if spin_at == Some(events.len()) {
        program.push_str("!spin\n");
    }
    program
}
