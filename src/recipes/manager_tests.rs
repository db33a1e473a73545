#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::data::{Data, DataManager};
    use crate::error::DecodexError;
    use crate::modules::{Direction, Module, ModuleRegistry};
    use crate::recipes::{Recipe, RecipeManager};

    /// Counts how often it is applied; passes data through unchanged.
    #[derive(Debug)]
    struct CountingCalls(Arc<AtomicUsize>);

    impl Module for CountingCalls {
        fn name(&self) -> &str {
            "countingcalls"
        }
        fn direction(&self) -> Direction {
            Direction::Neutral
        }
        fn apply(&self, data: &Data) -> Result<Data, DecodexError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(data.clone())
        }
    }

    /// Fails on every input, to exercise rollback paths.
    #[derive(Debug)]
    struct AlwaysFails;

    impl Module for AlwaysFails {
        fn name(&self) -> &str {
            "alwaysfails"
        }
        fn direction(&self) -> Direction {
            Direction::Neutral
        }
        fn apply(&self, _data: &Data) -> Result<Data, DecodexError> {
            Err(DecodexError::module_failed(
                "alwaysfails",
                DecodexError::BinaryDecode("boom".to_string()),
            ))
        }
    }

    fn setup(input: &str) -> (RecipeManager, DataManager) {
        let mut registry = ModuleRegistry::with_builtins(3);
        registry.register(Arc::new(AlwaysFails)).unwrap();
        let mut data = DataManager::new();
        data.set_original(Data::from(input));
        (RecipeManager::new(Arc::new(registry)), data)
    }

    fn steps(recipe: &Recipe) -> Vec<&str> {
        recipe.step_names().collect()
    }

    #[test]
    fn test_select_base64encode_on_hello_world() {
        let (mut recipes, mut data) = setup("hello world");
        recipes.select_module("base64encode", &mut data).unwrap();

        assert_eq!(data.current().as_str(), "aGVsbG8gd29ybGQ=");
        assert_eq!(data.original().as_str(), "hello world");
        assert_eq!(steps(recipes.editing_recipe().unwrap()), vec!["base64encode"]);
    }

    #[test]
    fn test_no_editing_recipe_until_first_selection() {
        let (mut recipes, mut data) = setup("abc");
        assert!(matches!(recipes.editing_recipe(), Err(DecodexError::NoEditingRecipe)));

        recipes.select_module("hexencode", &mut data).unwrap();
        let recipe = recipes.editing_recipe().unwrap();
        assert_eq!(recipe.name(), "recipe-1");
        assert_eq!(recipe.len(), 1);
    }

    #[test]
    fn test_current_tracks_full_history() {
        let (mut recipes, mut data) = setup("hello world");
        recipes.select_module("base64encode", &mut data).unwrap();
        recipes.select_module("hexencode", &mut data).unwrap();
        recipes.select_module("reverse", &mut data).unwrap();

        let expected = recipes.editing_recipe().unwrap().execute(data.original()).unwrap();
        assert_eq!(data.current(), &expected);
    }

    #[test]
    fn test_unknown_module_leaves_state_unchanged() {
        let (mut recipes, mut data) = setup("hello");
        recipes.select_module("rot13", &mut data).unwrap();
        let before_recipe = recipes.editing_recipe().unwrap().clone();
        let before_current = data.current().clone();

        let err = recipes.select_module("unknownModule", &mut data).unwrap_err();
        assert!(matches!(err, DecodexError::UnknownModule(_)));
        assert_eq!(recipes.editing_recipe().unwrap(), &before_recipe);
        assert_eq!(data.current(), &before_current);
    }

    #[test]
    fn test_blank_module_name_does_not_create_a_recipe() {
        let (mut recipes, mut data) = setup("hello");
        for blank in ["", "   "] {
            let err = recipes.select_module(blank, &mut data).unwrap_err();
            assert!(matches!(err, DecodexError::BlankInput(_)));
        }
        assert!(matches!(recipes.editing_recipe(), Err(DecodexError::NoEditingRecipe)));
        assert_eq!(data.current().as_str(), "hello");
    }

    #[test]
    fn test_failing_step_is_rolled_back() {
        let (mut recipes, mut data) = setup("hello");
        recipes.select_module("hexencode", &mut data).unwrap();
        let before_current = data.current().clone();

        let err = recipes.select_module("alwaysfails", &mut data).unwrap_err();
        assert!(matches!(err, DecodexError::PipelineError { position: 2, .. }));
        assert_eq!(steps(recipes.editing_recipe().unwrap()), vec!["hexencode"]);
        assert_eq!(data.current(), &before_current);
    }

    #[test]
    fn test_failing_first_step_drops_new_recipe() {
        let (mut recipes, mut data) = setup("not hex at all");
        let err = recipes.select_module("hexdecode", &mut data).unwrap_err();
        assert!(matches!(err, DecodexError::PipelineError { position: 1, .. }));
        assert!(matches!(recipes.editing_recipe(), Err(DecodexError::NoEditingRecipe)));
        assert_eq!(data.current().as_str(), "not hex at all");

        // The failed attempt does not consume a generated name.
        recipes.select_module("hexencode", &mut data).unwrap();
        assert_eq!(recipes.editing_recipe_name(), Some("recipe-1"));
    }

    #[test]
    fn test_undo_step_replays_remaining_steps() {
        let (mut recipes, mut data) = setup("hello");
        recipes.select_module("base64encode", &mut data).unwrap();
        let after_first = data.current().clone();
        recipes.select_module("hexencode", &mut data).unwrap();

        let removed = recipes.undo_step(&mut data).unwrap();
        assert_eq!(removed.step.name(), "hexencode");
        assert!(removed.replay_error.is_none());
        assert_eq!(data.current(), &after_first);

        recipes.undo_step(&mut data).unwrap();
        assert_eq!(data.current(), data.original());
        assert!(matches!(recipes.undo_step(&mut data), Err(DecodexError::EmptyRecipe)));
    }

    #[test]
    fn test_reset_clears_steps_and_current() {
        let (mut recipes, mut data) = setup("hello");
        recipes.select_module("rot13", &mut data).unwrap();
        recipes.select_module("reverse", &mut data).unwrap();

        recipes.reset_edited_recipe(&mut data).unwrap();
        let recipe = recipes.editing_recipe().unwrap();
        assert!(recipe.is_empty());
        assert_eq!(recipe.name(), "recipe-1");
        assert_eq!(data.current(), data.original());
    }

    #[test]
    fn test_reset_and_undo_without_recipe() {
        let (mut recipes, mut data) = setup("hello");
        assert!(matches!(
            recipes.reset_edited_recipe(&mut data),
            Err(DecodexError::NoEditingRecipe)
        ));
        assert!(matches!(recipes.undo_step(&mut data), Err(DecodexError::NoEditingRecipe)));
        assert!(matches!(
            recipes.discard_editing_recipe(&mut data),
            Err(DecodexError::NoEditingRecipe)
        ));
    }

    #[test]
    fn test_save_moves_recipe_into_catalog() {
        let (mut recipes, mut data) = setup("hello");
        recipes.select_module("base64encode", &mut data).unwrap();
        let current = data.current().clone();

        let saved = recipes.save_editing_recipe("b64").unwrap();
        assert_eq!(saved.name(), "b64");
        assert_eq!(steps(saved), vec!["base64encode"]);

        assert!(matches!(recipes.editing_recipe(), Err(DecodexError::NoEditingRecipe)));
        assert_eq!(data.current(), &current);
        assert_eq!(recipes.saved_recipes().count(), 1);

        // The next selection starts a fresh recipe with the next generated name.
        recipes.select_module("hexencode", &mut data).unwrap();
        assert_eq!(recipes.editing_recipe_name(), Some("recipe-2"));
    }

    #[test]
    fn test_save_rejects_duplicates_empty_and_missing() {
        let (mut recipes, mut data) = setup("hello");
        assert!(matches!(
            recipes.save_editing_recipe("x"),
            Err(DecodexError::NoEditingRecipe)
        ));

        recipes.select_module("rot13", &mut data).unwrap();
        recipes.save_editing_recipe("x").unwrap();

        recipes.select_module("reverse", &mut data).unwrap();
        let err = recipes.save_editing_recipe("x").unwrap_err();
        assert!(matches!(err, DecodexError::DuplicateRecipeName(ref n) if n == "x"));
        assert!(recipes.editing_recipe().is_ok(), "failed save must keep the editing recipe");

        recipes.reset_edited_recipe(&mut data).unwrap();
        assert!(matches!(recipes.save_editing_recipe("y"), Err(DecodexError::EmptyRecipe)));
        assert!(matches!(
            recipes.save_editing_recipe("../y"),
            Err(DecodexError::InvalidRecipeName(_))
        ));
    }

    #[test]
    fn test_run_saved_recipe_becomes_editing_recipe() {
        let (mut recipes, mut data) = setup("hello");
        recipes.select_module("hexencode", &mut data).unwrap();
        recipes.save_editing_recipe("hex").unwrap();

        let ran = recipes.run_saved_recipe("hex", &mut data).unwrap();
        assert_eq!(ran.name(), "hex");
        assert_eq!(data.current().as_str(), "68656c6c6f");

        // `current` is still the editing recipe applied to `original`.
        let editing = recipes.editing_recipe().unwrap();
        assert_eq!(steps(editing), vec!["hexencode"]);
        assert_eq!(&editing.execute(data.original()).unwrap(), data.current());

        assert!(matches!(
            recipes.run_saved_recipe("nope", &mut data),
            Err(DecodexError::UnknownRecipe(_))
        ));
    }

    #[test]
    fn test_run_is_refused_while_another_recipe_is_edited() {
        let (mut recipes, mut data) = setup("hello");
        recipes.select_module("hexencode", &mut data).unwrap();
        recipes.save_editing_recipe("hex").unwrap();
        recipes.select_module("rot13", &mut data).unwrap();
        let before = data.current().clone();

        let err = recipes.run_saved_recipe("hex", &mut data).unwrap_err();
        assert!(matches!(err, DecodexError::RecipeInProgress(ref n) if n == "recipe-2"));
        assert_eq!(data.current(), &before);
        assert_eq!(data.current().as_str(), "uryyb");
        let editing = recipes.editing_recipe().unwrap();
        assert_eq!(steps(editing), vec!["rot13"]);
        assert_eq!(&editing.execute(data.original()).unwrap(), data.current());
    }

    #[test]
    fn test_failing_saved_recipe_keeps_current() {
        let (mut recipes, mut data) = setup("68656c6c6f");
        recipes.select_module("hexdecode", &mut data).unwrap();
        recipes.save_editing_recipe("unhex").unwrap();
        let current = data.current().clone();

        data.set_original(Data::from("zz"));
        let before = data.current().clone();
        assert!(recipes.run_saved_recipe("unhex", &mut data).is_err());
        assert_eq!(data.current(), &before);
        assert_ne!(data.current(), &current);
    }

    #[test]
    fn test_edit_saved_recipe_copies_into_editing_slot() {
        let (mut recipes, mut data) = setup("hello");
        recipes.select_module("base64encode", &mut data).unwrap();
        recipes.save_editing_recipe("b64").unwrap();
        data.set_original(Data::from("hello world"));

        recipes.edit_saved_recipe("b64", &mut data).unwrap();
        assert_eq!(data.current().as_str(), "aGVsbG8gd29ybGQ=");

        recipes.select_module("hexencode", &mut data).unwrap();
        // The catalog copy is unaffected by further editing.
        assert_eq!(steps(recipes.saved_recipe("b64").unwrap()), vec!["base64encode"]);
        assert_eq!(
            steps(recipes.editing_recipe().unwrap()),
            vec!["base64encode", "hexencode"]
        );
    }

    #[test]
    fn test_delete_saved_recipe() {
        let (mut recipes, mut data) = setup("hello");
        recipes.select_module("reverse", &mut data).unwrap();
        recipes.save_editing_recipe("rev").unwrap();

        let removed = recipes.delete_saved_recipe("rev").unwrap();
        assert_eq!(removed.name(), "rev");
        assert!(matches!(
            recipes.delete_saved_recipe("rev"),
            Err(DecodexError::UnknownRecipe(_))
        ));
    }

    #[test]
    fn test_insert_saved_rejects_duplicates() {
        let (mut recipes, _) = setup("");
        let registry = Arc::clone(recipes.registry());
        let mut recipe = Recipe::new("loaded");
        recipe.add_step("hexencode", &registry).unwrap();

        recipes.insert_saved(recipe.clone()).unwrap();
        assert!(matches!(
            recipes.insert_saved(recipe),
            Err(DecodexError::DuplicateRecipeName(_))
        ));
    }

    #[test]
    fn test_replay_after_new_input() {
        let (mut recipes, mut data) = setup("abc");
        recipes.select_module("hexencode", &mut data).unwrap();

        data.set_original(Data::from("xyz"));
        recipes.replay(&mut data).unwrap();
        assert_eq!(data.current().as_str(), "78797a");

        recipes.discard_editing_recipe(&mut data).unwrap();
        recipes.select_module("hexdecode", &mut data).unwrap_err();
        data.set_original(Data::from("6869"));
        recipes.select_module("hexdecode", &mut data).unwrap();
        data.set_original(Data::from("not hex"));
        assert!(recipes.replay(&mut data).is_err());
        assert_eq!(data.current().as_str(), "not hex");
        assert_eq!(steps(recipes.editing_recipe().unwrap()), vec!["hexdecode"]);
    }

    #[test]
    fn test_undo_still_pops_when_input_no_longer_fits() {
        let (mut recipes, mut data) = setup("6869");
        recipes.select_module("hexdecode", &mut data).unwrap();
        recipes.select_module("rot13", &mut data).unwrap();
        assert_eq!(data.current().as_str(), "uv");

        data.set_original(Data::from("not hex"));
        assert!(recipes.replay(&mut data).is_err());

        let first = recipes.undo_step(&mut data).unwrap();
        assert_eq!(first.step.name(), "rot13");
        assert!(matches!(
            first.replay_error,
            Some(DecodexError::PipelineError { position: 1, .. })
        ));
        assert_eq!(data.current().as_str(), "not hex");
        assert_eq!(steps(recipes.editing_recipe().unwrap()), vec!["hexdecode"]);

        let second = recipes.undo_step(&mut data).unwrap();
        assert_eq!(second.step.name(), "hexdecode");
        assert!(second.replay_error.is_none());
        assert_eq!(data.current(), data.original());
        assert!(matches!(recipes.undo_step(&mut data), Err(DecodexError::EmptyRecipe)));
    }

    #[test]
    fn test_failing_step_stops_the_run_before_later_steps() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ModuleRegistry::with_builtins(3);
        registry.register(Arc::new(AlwaysFails)).unwrap();
        registry
            .register(Arc::new(CountingCalls(Arc::clone(&calls))))
            .unwrap();
        let registry = Arc::new(registry);

        let mut failing = Recipe::new("failing");
        failing.add_step("alwaysfails", &registry).unwrap();
        failing.add_step("countingcalls", &registry).unwrap();

        let mut recipes = RecipeManager::new(Arc::clone(&registry));
        recipes.insert_saved(failing).unwrap();
        let mut data = DataManager::new();
        data.set_original(Data::from("hello"));

        recipes.select_module("countingcalls", &mut data).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let before = data.current().clone();

        let err = recipes.select_module("alwaysfails", &mut data).unwrap_err();
        assert!(matches!(err, DecodexError::PipelineError { position: 2, .. }));
        assert_eq!(data.current(), &before);

        recipes.discard_editing_recipe(&mut data).unwrap();
        let calls_before_run = calls.load(Ordering::SeqCst);
        let err = recipes.run_saved_recipe("failing", &mut data).unwrap_err();
        assert!(matches!(err, DecodexError::PipelineError { position: 1, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), calls_before_run);
        assert_eq!(data.current(), data.original());
        assert!(recipes.editing_recipe().is_err());
    }
}
