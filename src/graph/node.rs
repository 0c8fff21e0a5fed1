use serde::Serialize;
use std::fmt;

/// Identifier of a node, assigned by the editor.
pub type NodeId = u32;

/// The role a node plays when the engine reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// The single entry point of a program.
    Start,
    /// Ends the run when reached.
    End,
    /// Runs its body in statement mode.
    Process,
    /// Evaluates its body as a condition and picks a `Y` or `N` edge.
    Decision,
    /// Either asks for input or runs its body in statement mode.
    InputOutput,
    /// Passes control straight through.
    Connector,
}

impl NodeKind {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::Start | NodeKind::End)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Process => "process",
            NodeKind::Decision => "decision",
            NodeKind::InputOutput => "io",
            NodeKind::Connector => "connector",
        };
        f.write_str(name)
    }
}

/// A graph vertex: one unit of program behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Display text. Used in error messages, never evaluated.
    pub label: String,
    /// Statements or expression in the mini language. May be empty.
    pub body: String,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            label: label.into(),
            body: body.into(),
        }
    }
}

/// Branch tag carried by edges leaving a Decision node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Branch {
    Yes,
    No,
}

impl Branch {
    /// Reads a `Y`/`N` tag, ignoring case and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("y") {
            Some(Branch::Yes)
        } else if tag.eq_ignore_ascii_case("n") {
            Some(Branch::No)
        } else {
            None
        }
    }

    pub fn for_outcome(outcome: bool) -> Self {
        if outcome { Branch::Yes } else { Branch::No }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Yes => f.write_str("Y"),
            Branch::No => f.write_str("N"),
        }
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub branch: Option<Branch>,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            branch: None,
        }
    }

    pub fn tagged(source: NodeId, target: NodeId, branch: Branch) -> Self {
        Self {
            source,
            target,
            branch: Some(branch),
        }
    }
}
