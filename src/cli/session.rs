use std::sync::Arc;

use super::{ui, Command, ListTarget, Output};
use crate::config::DecodexConfig;
use crate::data::{Data, DataManager};
use crate::error::DecodexError;
use crate::modules::ModuleRegistry;
use crate::recipes::{RecipeManager, RecipeStore};

/// One interactive session. Owns the data, the recipe state and the store, and
/// maps each `Command` to exactly one core operation.
///
/// A command that fails leaves the session exactly as it was; the error is
/// handed back to the caller for reporting.
#[derive(Debug)]
pub struct Session {
    data: DataManager,
    recipes: RecipeManager,
    store: RecipeStore,
}

impl Session {
    pub fn new(config: &DecodexConfig) -> Self {
        let registry = Arc::new(ModuleRegistry::with_builtins(config.zstd_level));
        Self::with_parts(
            registry,
            RecipeStore::from_config(config),
            &config.default_recipe_prefix,
        )
    }

    pub fn with_parts(
        registry: Arc<ModuleRegistry>,
        store: RecipeStore,
        name_prefix: &str,
    ) -> Self {
        Self {
            data: DataManager::new(),
            recipes: RecipeManager::with_name_prefix(registry, name_prefix),
            store,
        }
    }

    pub fn data(&self) -> &DataManager {
        &self.data
    }

    pub fn recipes(&self) -> &RecipeManager {
        &self.recipes
    }

    pub fn prompt(&self) -> String {
        ui::prompt(self.recipes.editing_recipe_name())
    }

    /// Creates the recipe directory if needed and loads every saved recipe.
    ///
    /// Only a directory problem is returned as an error. Files that fail to
    /// load come back as warnings and the rest still load.
    pub fn load_saved_recipes(&mut self) -> Result<Vec<Output>, DecodexError> {
        self.store.ensure_directory()?;
        let registry = Arc::clone(self.recipes.registry());
        let report = self.store.load_all(&registry)?;

        let mut outputs = Vec::new();
        for failure in report.failures {
            outputs.push(Output::warning(format!(
                "skipped {}: {}",
                failure.path.display(),
                failure.error
            )));
        }
        let mut loaded = 0;
        for recipe in report.recipes {
            let name = recipe.name().to_string();
            match self.recipes.insert_saved(recipe) {
                Ok(()) => loaded += 1,
                Err(e) => outputs.push(Output::warning(format!("skipped '{}': {}", name, e))),
            }
        }
        log::info!("Loaded {} saved recipe(s) from {}", loaded, self.store.dir().display());
        if loaded > 0 {
            outputs.push(Output::text(format!("Loaded {} saved recipe(s).", loaded)));
        }
        Ok(outputs)
    }

    /// Parses and handles one input line. Blank lines do nothing.
    pub fn handle_line(&mut self, line: &str) -> Result<Output, DecodexError> {
        if line.trim().is_empty() {
            return Ok(Output::None);
        }
        let command = super::parse_command(line)?;
        self.handle(command)
    }

    pub fn handle(&mut self, command: Command) -> Result<Output, DecodexError> {
        log::debug!("Handling {:?}", command);
        match command {
            Command::Input(text) => {
                self.data.set_original(Data::from(text));
                match self.recipes.replay(&mut self.data) {
                    Ok(()) => Ok(Output::text(ui::current_view(&self.data))),
                    Err(e) => Ok(Output::warning(format!(
                        "input set, but the editing recipe does not apply to it: {}",
                        e
                    ))),
                }
            }
            Command::Show => Ok(Output::text(ui::data_view(&self.data))),
            Command::Select(module) => {
                self.recipes.select_module(&module, &mut self.data)?;
                Ok(Output::text(ui::current_view(&self.data)))
            }
            Command::Undo => {
                let undone = self.recipes.undo_step(&mut self.data)?;
                match undone.replay_error {
                    None => Ok(Output::text(format!(
                        "Removed '{}'\n{}",
                        undone.step.name(),
                        ui::current_view(&self.data)
                    ))),
                    Some(e) => Ok(Output::warning(format!(
                        "removed '{}', but the remaining steps do not apply to the input: {}",
                        undone.step.name(),
                        e
                    ))),
                }
            }
            Command::Reset => {
                self.recipes.reset_edited_recipe(&mut self.data)?;
                Ok(Output::success("Recipe reset"))
            }
            Command::Discard => {
                let recipe = self.recipes.discard_editing_recipe(&mut self.data)?;
                Ok(Output::success(format!("Discarded '{}'", recipe.name())))
            }
            Command::Save(name) => {
                let saved = self.recipes.save_editing_recipe(&name)?.clone();
                match self.store.save(&saved) {
                    Ok(path) => Ok(Output::success(format!(
                        "Saved '{}' to {}",
                        saved.name(),
                        path.display()
                    ))),
                    Err(e) => Ok(Output::warning(format!(
                        "'{}' is saved for this session only: {}",
                        saved.name(),
                        e
                    ))),
                }
            }
            Command::Run(name) => {
                let recipe = self.recipes.run_saved_recipe(&name, &mut self.data)?;
                Ok(Output::text(format!(
                    "Ran {}\n{}",
                    recipe,
                    ui::current_view(&self.data)
                )))
            }
            Command::Edit(name) => {
                let recipe = self.recipes.edit_saved_recipe(&name, &mut self.data)?;
                Ok(Output::text(format!(
                    "Editing {}\n{}",
                    recipe,
                    ui::current_view(&self.data)
                )))
            }
            Command::Delete(name) => {
                let recipe = self.recipes.delete_saved_recipe(&name)?;
                match self.store.delete(recipe.name()) {
                    Ok(()) => Ok(Output::success(format!("Deleted '{}'", recipe.name()))),
                    Err(e) => Ok(Output::warning(format!(
                        "'{}' was removed from this session, but its file remains: {}",
                        recipe.name(),
                        e
                    ))),
                }
            }
            Command::Recipe => match self.recipes.editing_recipe() {
                Ok(recipe) => Ok(Output::text(ui::recipe_view(recipe))),
                Err(DecodexError::NoEditingRecipe) => Ok(Output::text(
                    "No recipe is being edited. Use 'select <module>' to start one.",
                )),
                Err(e) => Err(e),
            },
            Command::List(target) => {
                let text = match target {
                    ListTarget::Modules => ui::module_list(self.recipes.registry()),
                    ListTarget::Recipes => ui::recipe_list(self.recipes.saved_recipes()),
                    ListTarget::All => format!(
                        "{}\n\n{}",
                        ui::module_list(self.recipes.registry()),
                        ui::recipe_list(self.recipes.saved_recipes())
                    ),
                };
                Ok(Output::text(text))
            }
            Command::Help => Ok(Output::text(ui::help_text())),
            Command::Exit => Ok(Output::Quit),
        }
    }
}
