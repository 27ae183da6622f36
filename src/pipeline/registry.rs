// src/pipeline/registry.rs

use super::Pipeline;

/// Immutable name → pipeline table, built once at startup and handed to the
/// dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<(&'static str, Pipeline)>,
}

impl Registry {
    pub fn new(entries: impl IntoIterator<Item = Pipeline>) -> Self {
        Self {
            entries: entries.into_iter().map(|p| (p.name(), p)).collect(),
        }
    }

    /// All built-in pipelines.
    pub fn standard() -> Self {
        Self::new(Pipeline::ALL)
    }

    pub fn lookup(&self, name: &str) -> Option<Pipeline> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, p)| *p)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
