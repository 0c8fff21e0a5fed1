use super::Session;
use crate::graph::FlowGraph;
use crate::io::IoBridge;

/// Steps a session may take before it is considered stuck in a loop.
pub const DEFAULT_MAX_STEPS: usize = 500;

/// Tunables of a session, fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_steps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

pub struct SessionBuilder {
    graph: FlowGraph,
    config: EngineConfig,
    console: Option<Box<dyn IoBridge>>,
}

impl SessionBuilder {
    pub fn new(graph: FlowGraph) -> Self {
        Self {
            graph,
            config: EngineConfig::default(),
            console: None,
        }
    }

    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = max_steps;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Mirrors every line the program emits to `console`, in addition to the session's own log.
    pub fn with_console(mut self, console: Box<dyn IoBridge>) -> Self {
        self.console = Some(console);
        self
    }

    pub fn build(self) -> Session {
        Session::from_parts(self.graph, self.config, self.console)
    }
}
