use crate::ast::Value;
use ahash::AHashMap;
use itertools::Itertools;

/// The single, unscoped variable store of a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: AHashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Binds `name`, returning the value it replaced.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.vars.insert(name.into(), value)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    /// Variables ordered by name, for stable display.
    pub fn sorted(&self) -> Vec<(&str, &Value)> {
        self.vars
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .sorted_by(|a, b| a.0.cmp(b.0))
            .collect()
    }
}
