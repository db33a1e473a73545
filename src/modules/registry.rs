use std::collections::HashMap;
use std::sync::Arc;

use super::{BuiltinModule, Module};
use crate::error::DecodexError;

/// Lookup table from case-normalised module name to module instance.
///
/// Built once at startup and then shared read-only (behind an `Arc`) by the
/// recipe manager and the recipe store. Listing preserves registration order.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
    by_name: HashMap<String, usize>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the full built-in set.
    pub fn with_builtins(zstd_level: i32) -> Self {
        let mut registry = Self::new();
        for module in BuiltinModule::all(zstd_level) {
            // Built-in names are distinct, so registration cannot collide.
            if let Err(e) = registry.register(Arc::new(module)) {
                log::error!("Skipping built-in module: {}", e);
            }
        }
        registry
    }

    /// Registers a module. Fails with `DuplicateModule` when another module
    /// already uses the same name, ignoring case.
    pub fn register(&mut self, module: Arc<dyn Module>) -> Result<(), DecodexError> {
        let key = normalize(module.name());
        if key.is_empty() {
            return Err(DecodexError::BlankInput("module name"));
        }
        if self.by_name.contains_key(&key) {
            return Err(DecodexError::DuplicateModule(module.name().to_string()));
        }
        log::debug!("Registered module '{}' ({})", module.name(), module.direction());
        self.by_name.insert(key, self.modules.len());
        self.modules.push(module);
        Ok(())
    }

    /// Resolves a name, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Result<Arc<dyn Module>, DecodexError> {
        self.by_name
            .get(&normalize(name))
            .map(|&idx| Arc::clone(&self.modules[idx]))
            .ok_or_else(|| DecodexError::UnknownModule(name.trim().to_string()))
    }

    /// Registered names in registration order. Each call starts a fresh pass.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.modules.iter().map(|m| m.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Module>> + '_ {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
