//! The console surface between the engine and whoever renders it.

/// Receives every line the running program writes to its console.
///
/// `print`, the start/end markers, input prompts, and echoed answers all flow
/// through this single method.
pub trait IoBridge {
    fn emit(&mut self, line: &str);
}

/// Append-only record of every emitted line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputLog {
    lines: Vec<String>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub(crate) fn clear(&mut self) {
        self.lines.clear();
    }
}

impl IoBridge for OutputLog {
    fn emit(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// The session's console: the log it owns plus an optional mirror attached by the caller.
pub(crate) struct Console {
    pub(crate) log: OutputLog,
    pub(crate) mirror: Option<Box<dyn IoBridge>>,
}

impl IoBridge for Console {
    fn emit(&mut self, line: &str) {
        self.log.emit(line);
        if let Some(mirror) = self.mirror.as_mut() {
            mirror.emit(line);
        }
    }
}
