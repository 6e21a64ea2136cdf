//! Sub-project registry - single source of truth for what a run builds.
//!
//! Iteration order is registration order, which is the build order.

use super::{BuildStrategy, Subproject};
use crate::error::{OrchestratorError, Result};

/// Ordered, name-unique table of build strategies.
#[derive(Default)]
pub struct Registry {
    entries: Vec<Box<dyn BuildStrategy>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            entries: Vec::new(),
        }
    }

    /// Shell, Script, Kernel.
    pub fn standard() -> Self {
        let mut registry = Registry::new();
        for subproject in Subproject::ALL {
            // names in Subproject::ALL are distinct
            registry.entries.push(Box::new(subproject));
        }
        registry
    }

    /// Append a strategy; its name must not already be registered.
    pub fn register(&mut self, strategy: Box<dyn BuildStrategy>) -> Result<()> {
        if self.get(strategy.name()).is_some() {
            return Err(OrchestratorError::DuplicateSubproject(
                strategy.name().to_string(),
            ));
        }
        self.entries.push(strategy);
        Ok(())
    }

    /// Get strategy by name.
    pub fn get(&self, name: &str) -> Option<&dyn BuildStrategy> {
        self.entries
            .iter()
            .find(|s| s.name() == name)
            .map(|s| s.as_ref())
    }

    /// List all registered names in build order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn BuildStrategy> {
        self.entries.iter().map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
