//! Recipes: named, ordered lists of resolved module steps.
//!
//! A step is resolved against the `ModuleRegistry` when it is added, not when
//! the recipe runs, so a `Recipe` can only ever hold modules that exist.
//! Steps leave in stack order: only the most recent one can be removed.

mod executor;
mod manager;
mod store;

#[cfg(test)]
mod manager_tests;

pub use manager::{RecipeManager, UndoneStep};
pub use store::{LoadFailure, LoadReport, RecipeStore};

use std::fmt;
use std::sync::Arc;

use crate::data::Data;
use crate::error::DecodexError;
use crate::modules::{Module, ModuleRegistry};

//==================================================================================
// 1. Step
//==================================================================================

/// One resolved module reference inside a recipe.
#[derive(Clone)]
pub struct Step {
    module: Arc<dyn Module>,
}

impl Step {
    pub fn name(&self) -> &str {
        self.module.name()
    }

    pub fn module(&self) -> &Arc<dyn Module> {
        &self.module
    }
}

/// Steps are equal when they name the same module.
impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Step {}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Step").field(&self.name()).finish()
    }
}

//==================================================================================
// 2. Recipe
//==================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    name: String,
    steps: Vec<Step>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps.iter().map(Step::name)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Resolves `module_name` and appends it. This is the only way a step
    /// enters a recipe; on error the recipe is left untouched.
    pub fn add_step(
        &mut self,
        module_name: &str,
        registry: &ModuleRegistry,
    ) -> Result<(), DecodexError> {
        if module_name.trim().is_empty() {
            return Err(DecodexError::BlankInput("module name"));
        }
        let module = registry.find(module_name)?;
        log::debug!("Recipe '{}': push '{}'", self.name, module.name());
        self.steps.push(Step { module });
        Ok(())
    }

    /// Drops the most recently added step.
    pub fn remove_last_step(&mut self) -> Result<Step, DecodexError> {
        let step = self.steps.pop().ok_or(DecodexError::EmptyRecipe)?;
        log::debug!("Recipe '{}': pop '{}'", self.name, step.name());
        Ok(step)
    }

    /// Clears all steps, keeping the name.
    pub fn reset(&mut self) {
        self.steps.clear();
    }

    /// Runs every step in order over `input`. An empty recipe returns the input
    /// unchanged.
    pub fn execute(&self, input: &Data) -> Result<Data, DecodexError> {
        executor::execute_linear_pipeline(input, &self.steps)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.name)?;
        for (i, name) in self.step_names().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("]")
    }
}

/// Checks that `name` can be used both as a catalog key and as a file stem.
/// Returns the trimmed name.
pub fn validate_recipe_name(name: &str) -> Result<&str, DecodexError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DecodexError::BlankInput("recipe name"));
    }
    let valid = !trimmed.starts_with('.')
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(DecodexError::InvalidRecipeName(trimmed.to_string()));
    }
    Ok(trimmed)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
