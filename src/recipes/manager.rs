//! The recipe manager: one optional editing recipe plus a catalog of saved ones.
//!
//! State machine over the editing slot:
//!
//! ```text
//! NoEditingRecipe --select--> Editing(steps >= 1) --save--> NoEditingRecipe
//!                                  |      ^
//!                            reset |      | select
//!                                  v      |
//!                             Editing(steps = 0)
//! ```
//!
//! Every operation that changes the editing recipe's steps replays the whole
//! recipe against the data manager's `original`, so `current` always equals the
//! full step history applied in order. Operations are atomic: on error neither
//! the recipe nor `current` changes. The one exception is new input the recipe
//! cannot process: `current` then shows `original` until the recipe is fixed.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{validate_recipe_name, Recipe, Step};
use crate::data::DataManager;
use crate::error::DecodexError;
use crate::modules::ModuleRegistry;

const DEFAULT_NAME_PREFIX: &str = "recipe";

/// What `undo_step` removed, and whether the remaining steps still apply.
#[derive(Debug)]
pub struct UndoneStep {
    pub step: Step,
    /// Set when the remaining steps failed on `original`; `current` was reset
    /// to `original` in that case.
    pub replay_error: Option<DecodexError>,
}

#[derive(Debug)]
pub struct RecipeManager {
    registry: Arc<ModuleRegistry>,
    editing: Option<Recipe>,
    saved: BTreeMap<String, Recipe>,
    name_prefix: String,
    next_id: usize,
}

impl RecipeManager {
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self::with_name_prefix(registry, DEFAULT_NAME_PREFIX)
    }

    /// `prefix` is used for implicitly created recipes: `<prefix>-1`, `<prefix>-2`, ...
    pub fn with_name_prefix(registry: Arc<ModuleRegistry>, prefix: impl Into<String>) -> Self {
        Self {
            registry,
            editing: None,
            saved: BTreeMap::new(),
            name_prefix: prefix.into(),
            next_id: 1,
        }
    }

    pub fn registry(&self) -> &Arc<ModuleRegistry> {
        &self.registry
    }

    //==============================================================================
    // Editing recipe
    //==============================================================================

    /// The recipe under construction. `NoEditingRecipe` is an expected state
    /// (nothing selected yet, or just saved), not a failure of the session.
    pub fn editing_recipe(&self) -> Result<&Recipe, DecodexError> {
        self.editing.as_ref().ok_or(DecodexError::NoEditingRecipe)
    }

    pub fn editing_recipe_name(&self) -> Option<&str> {
        self.editing.as_ref().map(Recipe::name)
    }

    /// Appends `module_name` to the editing recipe, creating one if needed, and
    /// recomputes `current` from `original`.
    ///
    /// If the step cannot be resolved, or the replay fails, the step is rolled
    /// back (and a recipe created by this call is dropped again).
    pub fn select_module(
        &mut self,
        module_name: &str,
        data: &mut DataManager,
    ) -> Result<(), DecodexError> {
        let created = self.editing.is_none();
        if created {
            let name = format!("{}-{}", self.name_prefix, self.next_id);
            log::info!("Starting new recipe '{}'", name);
            self.editing = Some(Recipe::new(name));
        }

        let result = match self.editing.as_mut() {
            Some(recipe) => push_and_replay(recipe, module_name, &self.registry, data),
            None => Err(DecodexError::NoEditingRecipe),
        };

        match result {
            Ok(()) => {
                if created {
                    self.next_id += 1;
                }
                Ok(())
            }
            Err(e) => {
                if created {
                    self.editing = None;
                }
                Err(e)
            }
        }
    }

    /// Removes the most recent step and replays the remainder.
    ///
    /// The step is always removed. If the remaining steps no longer apply to
    /// `original` (the input changed since they were added), `current` falls
    /// back to `original` and the replay error is returned alongside the step.
    pub fn undo_step(&mut self, data: &mut DataManager) -> Result<UndoneStep, DecodexError> {
        let recipe = self.editing.as_mut().ok_or(DecodexError::NoEditingRecipe)?;
        let step = recipe.remove_last_step()?;
        let replay_error = self.replay(data).err();
        Ok(UndoneStep { step, replay_error })
    }

    /// Clears every step of the editing recipe, keeping its name, and resets
    /// `current` to `original`.
    pub fn reset_edited_recipe(&mut self, data: &mut DataManager) -> Result<(), DecodexError> {
        let recipe = self.editing.as_mut().ok_or(DecodexError::NoEditingRecipe)?;
        recipe.reset();
        data.reset_current();
        log::info!("Reset recipe '{}'", recipe.name());
        Ok(())
    }

    /// Drops the editing recipe entirely and resets `current` to `original`.
    pub fn discard_editing_recipe(
        &mut self,
        data: &mut DataManager,
    ) -> Result<Recipe, DecodexError> {
        let recipe = self.editing.take().ok_or(DecodexError::NoEditingRecipe)?;
        data.reset_current();
        log::info!("Discarded recipe '{}'", recipe.name());
        Ok(recipe)
    }

    /// Recomputes `current` after `original` changed. With no editing recipe
    /// `current` becomes `original`. If the new input does not fit the recipe,
    /// `current` is reset to `original` and the error is returned; the recipe
    /// itself is kept.
    pub fn replay(&self, data: &mut DataManager) -> Result<(), DecodexError> {
        let Some(recipe) = self.editing.as_ref() else {
            data.reset_current();
            return Ok(());
        };
        match recipe.execute(data.original()) {
            Ok(result) => {
                data.replace_current(result);
                Ok(())
            }
            Err(e) => {
                data.reset_current();
                Err(e)
            }
        }
    }

    /// Moves the editing recipe into the saved catalog under `name` and clears
    /// the editing slot. `current` is left as it is.
    pub fn save_editing_recipe(&mut self, name: &str) -> Result<&Recipe, DecodexError> {
        let name = validate_recipe_name(name)?;
        let editing = self.editing.as_ref().ok_or(DecodexError::NoEditingRecipe)?;
        if editing.is_empty() {
            return Err(DecodexError::EmptyRecipe);
        }
        if self.saved.contains_key(name) {
            return Err(DecodexError::DuplicateRecipeName(name.to_string()));
        }

        let mut recipe = self.editing.take().ok_or(DecodexError::NoEditingRecipe)?;
        recipe.rename(name);
        log::info!("Saved recipe '{}' with {} step(s)", name, recipe.len());
        let saved: &Recipe = self.saved.entry(name.to_string()).or_insert(recipe);
        Ok(saved)
    }

    //==============================================================================
    // Saved catalog
    //==============================================================================

    pub fn saved_recipe(&self, name: &str) -> Result<&Recipe, DecodexError> {
        self.saved
            .get(name.trim())
            .ok_or_else(|| DecodexError::UnknownRecipe(name.trim().to_string()))
    }

    /// Saved recipes in name order.
    pub fn saved_recipes(&self) -> impl Iterator<Item = &Recipe> + '_ {
        self.saved.values()
    }

    /// Adds an already-built recipe to the catalog (used when loading from disk).
    pub fn insert_saved(&mut self, recipe: Recipe) -> Result<(), DecodexError> {
        let name = validate_recipe_name(recipe.name())?.to_string();
        if self.saved.contains_key(&name) {
            return Err(DecodexError::DuplicateRecipeName(name));
        }
        self.saved.insert(name, recipe);
        Ok(())
    }

    pub fn delete_saved_recipe(&mut self, name: &str) -> Result<Recipe, DecodexError> {
        self.saved
            .remove(name.trim())
            .ok_or_else(|| DecodexError::UnknownRecipe(name.trim().to_string()))
    }

    /// Executes a saved recipe against `original` and makes a copy of it the
    /// editing recipe, so `current` keeps matching the editing recipe.
    ///
    /// Refused with `RecipeInProgress` while another recipe is being edited.
    /// On a failed step nothing changes.
    pub fn run_saved_recipe(
        &mut self,
        name: &str,
        data: &mut DataManager,
    ) -> Result<&Recipe, DecodexError> {
        let recipe = self.saved_recipe(name)?.clone();
        if let Some(editing) = self.editing.as_ref() {
            return Err(DecodexError::RecipeInProgress(editing.name().to_string()));
        }
        let result = recipe.execute(data.original())?;
        data.replace_current(result);
        let editing: &Recipe = self.editing.insert(recipe);
        Ok(editing)
    }

    /// Copies a saved recipe into the editing slot, replacing whatever was being
    /// edited, and replays it.
    pub fn edit_saved_recipe(
        &mut self,
        name: &str,
        data: &mut DataManager,
    ) -> Result<&Recipe, DecodexError> {
        let recipe = self.saved_recipe(name)?.clone();
        let result = recipe.execute(data.original())?;
        data.replace_current(result);
        if let Some(previous) = self.editing.as_ref() {
            log::info!("Replacing editing recipe '{}'", previous.name());
        }
        let editing: &Recipe = self.editing.insert(recipe);
        Ok(editing)
    }
}

fn push_and_replay(
    recipe: &mut Recipe,
    module_name: &str,
    registry: &ModuleRegistry,
    data: &mut DataManager,
) -> Result<(), DecodexError> {
    recipe.add_step(module_name, registry)?;
    match recipe.execute(data.original()) {
        Ok(result) => {
            data.replace_current(result);
            Ok(())
        }
        Err(e) => {
            recipe.remove_last_step()?;
            Err(e)
        }
    }
}
