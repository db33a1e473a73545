//! On-disk persistence for saved recipes.
//!
//! One file per recipe, `<dir>/<name>.<ext>`. The file stem is the recipe name
//! and the body lists one module name per line in execution order. Lines that
//! are blank or start with `#` are ignored on load.
//!
//! Every call opens, uses and closes its own file handles; the store keeps no
//! state beyond its directory layout.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{validate_recipe_name, Recipe};
use crate::config::DecodexConfig;
use crate::error::DecodexError;
use crate::modules::ModuleRegistry;

/// A recipe file that could not be loaded, and why.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: DecodexError,
}

/// The outcome of scanning the recipe directory. A bad file never prevents the
/// remaining files from loading.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub recipes: Vec<Recipe>,
    pub failures: Vec<LoadFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeStore {
    dir: PathBuf,
    extension: String,
}

impl RecipeStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &DecodexConfig) -> Self {
        Self::new(&config.recipe_dir, &config.recipe_extension)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a recipe called `name` is stored in.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, DecodexError> {
        let name = validate_recipe_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, self.extension)))
    }

    /// Creates the recipe directory if it does not exist yet.
    pub fn ensure_directory(&self) -> Result<(), DecodexError> {
        match fs::metadata(&self.dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(DecodexError::Storage(format!(
                "{} exists but is not a directory",
                self.dir.display()
            ))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Creating recipe directory {}", self.dir.display());
                fs::create_dir_all(&self.dir).map_err(|e| {
                    DecodexError::Storage(format!("cannot create {}: {}", self.dir.display(), e))
                })
            }
            Err(e) => Err(DecodexError::Storage(format!(
                "cannot access {}: {}",
                self.dir.display(),
                e
            ))),
        }
    }

    //==============================================================================
    // Loading
    //==============================================================================

    /// Loads every recipe file in the directory, in sorted path order.
    ///
    /// Only a failure to list the directory is an error. Per-file problems
    /// (not a regular file, unreadable, bad name, unknown module) are recorded
    /// in the report and the scan moves on. Files with a different extension
    /// are ignored.
    pub fn load_all(&self, registry: &ModuleRegistry) -> Result<LoadReport, DecodexError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            DecodexError::Storage(format!("cannot list {}: {}", self.dir.display(), e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                DecodexError::Storage(format!("cannot list {}: {}", self.dir.display(), e))
            })?;
            paths.push(entry.path());
        }
        paths.sort();

        let mut report = LoadReport::default();
        for path in paths {
            if !self.has_recipe_extension(&path) {
                log::debug!("Ignoring {}", path.display());
                continue;
            }
            match self.load_file(&path, registry) {
                Ok(recipe) => {
                    log::debug!("Loaded {}", recipe);
                    report.recipes.push(recipe);
                }
                Err(error) => {
                    log::warn!("Skipping {}: {}", path.display(), error);
                    report.failures.push(LoadFailure { path, error });
                }
            }
        }

        log_metric!(
            "event" = "recipes_loaded",
            "dir" = self.dir.display(),
            "loaded" = report.recipes.len(),
            "failed" = report.failures.len(),
        );
        Ok(report)
    }

    fn has_recipe_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.extension.as_str())
    }

    fn load_file(&self, path: &Path, registry: &ModuleRegistry) -> Result<Recipe, DecodexError> {
        // `symlink_metadata` so a link is reported rather than followed.
        let meta = fs::symlink_metadata(path)?;
        if !meta.is_file() {
            return Err(DecodexError::Storage("not a regular file".to_string()));
        }
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| DecodexError::Storage("file name is not valid UTF-8".to_string()))?;
        let text = fs::read_to_string(path)?;
        Self::deserialize(name, &text, registry)
    }

    //==============================================================================
    // Writing
    //==============================================================================

    /// Writes `recipe` to its file, replacing any previous version.
    pub fn save(&self, recipe: &Recipe) -> Result<PathBuf, DecodexError> {
        let path = self.path_for(recipe.name())?;
        fs::write(&path, Self::serialize(recipe)).map_err(|e| {
            DecodexError::Storage(format!("cannot write {}: {}", path.display(), e))
        })?;
        log::info!("Wrote {}", path.display());
        Ok(path)
    }

    /// Removes the file for `name`. A file that is already gone is not an error.
    pub fn delete(&self, name: &str) -> Result<(), DecodexError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                log::info!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} was already absent", path.display());
                Ok(())
            }
            Err(e) => Err(DecodexError::Storage(format!(
                "cannot remove {}: {}",
                path.display(),
                e
            ))),
        }
    }

    //==============================================================================
    // Text form
    //==============================================================================

    /// One module name per line, in execution order, with a trailing newline.
    pub fn serialize(recipe: &Recipe) -> String {
        let mut text = String::new();
        for name in recipe.step_names() {
            text.push_str(name);
            text.push('\n');
        }
        text
    }

    /// Rebuilds a recipe from its text form, resolving every line against
    /// `registry`. Fails on the first name that does not resolve, and on a body
    /// with no steps.
    pub fn deserialize(
        name: &str,
        text: &str,
        registry: &ModuleRegistry,
    ) -> Result<Recipe, DecodexError> {
        let name = validate_recipe_name(name)?;
        let mut recipe = Recipe::new(name);
        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            recipe.add_step(line, registry)?;
        }
        if recipe.is_empty() {
            return Err(DecodexError::EmptyRecipe);
        }
        Ok(recipe)
    }
}
