//! Ready-made programs, used by the CLI and as fixtures.

use super::definition::{EdgeDefinition, NodeDefinition, ProgramDefinition};

/// Sums the numbers 1 to 5 with a decision loop, then prints `Sum 1..5 = 15`.
pub fn sum_one_to_five() -> ProgramDefinition {
    ProgramDefinition {
        nodes: vec![
            NodeDefinition::new(0, "terminal", "START", ""),
            NodeDefinition::new(1, "process", "INIT", "i = 1; sum = 0"),
            NodeDefinition::new(2, "decision", "i <= 5?", "i <= 5"),
            NodeDefinition::new(3, "process", "ACCUMULATE", "sum = sum + i; i = i + 1"),
            NodeDefinition::new(4, "connector", "", ""),
            NodeDefinition::new(5, "io", "PRINT SUM", r#"print("Sum 1..5 = " + sum)"#),
            NodeDefinition::new(6, "terminal", "END", ""),
        ],
        edges: vec![
            EdgeDefinition::new(0, 1),
            EdgeDefinition::new(1, 2),
            EdgeDefinition::labelled(2, 3, "Y"),
            EdgeDefinition::new(3, 4),
            EdgeDefinition::new(4, 2),
            EdgeDefinition::labelled(2, 5, "N"),
            EdgeDefinition::new(5, 6),
        ],
    }
}

/// Asks for a name and greets it.
pub fn greeting() -> ProgramDefinition {
    ProgramDefinition {
        nodes: vec![
            NodeDefinition::new(0, "start", "START", ""),
            NodeDefinition::new(1, "io", "ASK NAME", r#"input("Enter name:", name)"#),
            NodeDefinition::new(2, "io", "GREET", r#"print("Hello, " + name + "!")"#),
            NodeDefinition::new(3, "end", "END", ""),
        ],
        edges: vec![
            EdgeDefinition::new(0, 1),
            EdgeDefinition::new(1, 2),
            EdgeDefinition::new(2, 3),
        ],
    }
}

/// Looks a bundled program up by name.
pub fn by_name(name: &str) -> Option<ProgramDefinition> {
    match name {
        "sum" => Some(sum_one_to_five()),
        "greeting" => Some(greeting()),
        _ => None,
    }
}

pub const NAMES: &[&str] = &["sum", "greeting"];
