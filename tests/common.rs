//! Common test utilities for building flowchart programs.
use flowrun::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Builds a graph from a definition, panicking on validation errors.
#[allow(dead_code)]
pub fn build(definition: ProgramDefinition) -> FlowGraph {
    ProgramBuilder::new(definition)
        .build()
        .expect("test program should be valid")
}

/// `START -> PROC -> END`, with `body` in the process node.
#[allow(dead_code)]
pub fn single_process(body: &str) -> ProgramDefinition {
    ProgramDefinition {
        nodes: vec![
            NodeDefinition::new(0, "start", "START", ""),
            NodeDefinition::new(1, "process", "PROC", body),
            NodeDefinition::new(2, "end", "END", ""),
        ],
        edges: vec![EdgeDefinition::new(0, 1), EdgeDefinition::new(1, 2)],
    }
}

/// `START -> ASK -> SHOW -> END`, where ASK reads `name` and SHOW prints it.
#[allow(dead_code)]
pub fn ask_and_show(directive: &str, show: &str) -> ProgramDefinition {
    ProgramDefinition {
        nodes: vec![
            NodeDefinition::new(0, "start", "START", ""),
            NodeDefinition::new(1, "io", "ASK", directive),
            NodeDefinition::new(2, "io", "SHOW", show),
            NodeDefinition::new(3, "end", "END", ""),
        ],
        edges: vec![
            EdgeDefinition::new(0, 1),
            EdgeDefinition::new(1, 2),
            EdgeDefinition::new(2, 3),
        ],
    }
}

/// A loop that never leaves: `START -> A -> B -> A`.
#[allow(dead_code)]
pub fn endless_loop() -> ProgramDefinition {
    ProgramDefinition {
        nodes: vec![
            NodeDefinition::new(0, "start", "START", ""),
            NodeDefinition::new(1, "process", "A", "n = 0"),
            NodeDefinition::new(2, "connector", "", ""),
        ],
        edges: vec![
            EdgeDefinition::new(0, 1),
            EdgeDefinition::new(1, 2),
            EdgeDefinition::new(2, 1),
        ],
    }
}

/// Steps until the session finishes or stops making progress, returning every outcome.
#[allow(dead_code)]
pub fn run_to_end(session: &mut Session) -> Vec<StepOutcome> {
    let mut outcomes = Vec::new();
    while !session.is_finished() {
        let outcome = session.step();
        let idle = outcome == StepOutcome::Idle;
        outcomes.push(outcome);
        if idle {
            break;
        }
    }
    outcomes
}

/// Console mirror that records into a shared buffer the test can inspect.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct SharedConsole(pub Rc<RefCell<Vec<String>>>);

impl IoBridge for SharedConsole {
    fn emit(&mut self, line: &str) {
        self.0.borrow_mut().push(line.to_string());
    }
}
