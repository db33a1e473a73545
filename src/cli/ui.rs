//! Presentation helpers. Everything here returns strings; printing is left to
//! the binary.

use std::error::Error as _;

use colored::Colorize;

use super::Output;
use crate::data::{Data, DataManager};
use crate::error::DecodexError;
use crate::modules::ModuleRegistry;
use crate::recipes::Recipe;

pub fn greeting() -> String {
    format!(
        "{} {}\nType {} for a list of commands.",
        "decodex".cyan().bold(),
        crate::VERSION,
        "help".bold()
    )
}

/// The prompt, showing the editing recipe when there is one.
pub fn prompt(editing: Option<&str>) -> String {
    match editing {
        Some(name) => format!("{} [{}]> ", "decodex".cyan().bold(), name.yellow()),
        None => format!("{}> ", "decodex".cyan().bold()),
    }
}

pub fn render(output: &Output) -> Option<String> {
    match output {
        Output::Text(text) => Some(text.clone()),
        Output::Success(text) => Some(format!("{}", text.green())),
        Output::Warning(text) => Some(format!("{} {}", "warning:".yellow().bold(), text)),
        Output::None | Output::Quit => None,
    }
}

/// An error followed by its chain of causes, one per line.
pub fn render_error(err: &DecodexError) -> String {
    let mut text = format!("{} {}", "error:".red().bold(), err);
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(&format!("\n  {} {}", "caused by:".dimmed(), cause));
        source = cause.source();
    }
    text
}

fn data_line(label: &str, data: &Data) -> String {
    let note = if data.is_utf8() { "" } else { ", not UTF-8" };
    format!(
        "{:>9} {} {}",
        label.bold(),
        format!("({} bytes{})", data.len(), note).dimmed(),
        data
    )
}

pub fn current_view(data: &DataManager) -> String {
    data_line("current:", data.current())
}

pub fn data_view(data: &DataManager) -> String {
    format!(
        "{}\n{}",
        data_line("original:", data.original()),
        data_line("current:", data.current())
    )
}

pub fn recipe_view(recipe: &Recipe) -> String {
    if recipe.is_empty() {
        return format!("{} has no steps", recipe.name().yellow());
    }
    let mut text = format!("{}", recipe.name().yellow());
    for (idx, name) in recipe.step_names().enumerate() {
        text.push_str(&format!("\n  {}. {}", idx + 1, name));
    }
    text
}

pub fn module_list(registry: &ModuleRegistry) -> String {
    let mut text = format!("{}", "Modules:".bold());
    for module in registry.iter() {
        text.push_str(&format!(
            "\n  {:<16} {:<8} {}",
            module.name(),
            module.direction().to_string().dimmed(),
            module.description()
        ));
    }
    text
}

pub fn recipe_list<'a>(recipes: impl Iterator<Item = &'a Recipe>) -> String {
    let mut text = format!("{}", "Saved recipes:".bold());
    let mut any = false;
    for recipe in recipes {
        any = true;
        text.push_str(&format!("\n  {}", recipe));
    }
    if !any {
        text.push_str(&format!("\n  {}", "(none)".dimmed()));
    }
    text
}

pub fn help_text() -> String {
    let rows = [
        ("input <text>", "set the input data (replays the editing recipe)"),
        ("show", "print the original and current data"),
        ("select <module>", "append a module to the editing recipe"),
        ("undo", "remove the last step of the editing recipe"),
        ("reset", "remove every step of the editing recipe"),
        ("discard", "drop the editing recipe"),
        ("save <name>", "save the editing recipe"),
        ("run <name>", "run a saved recipe on the input and keep editing it"),
        ("edit <name>", "load a saved recipe for editing"),
        ("delete <name>", "delete a saved recipe"),
        ("recipe", "show the editing recipe"),
        ("list [modules|recipes]", "list modules and saved recipes"),
        ("help", "show this message"),
        ("exit, quit", "leave decodex"),
    ];
    let mut text = format!("{}", "Commands:".bold());
    for (usage, what) in rows {
        text.push_str(&format!("\n  {:<24} {}", usage.cyan(), what));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_lists_causes() {
        let err = DecodexError::PipelineError {
            stage: "hexdecode".to_string(),
            position: 1,
            source: Box::new(DecodexError::module_failed(
                "hexdecode",
                DecodexError::BinaryDecode("bad".to_string()),
            )),
        };
        let text = render_error(&err);
        assert_eq!(text.matches("caused by:").count(), 2);
        assert!(text.contains("bad"));
    }

    #[test]
    fn test_prompt_shows_editing_recipe() {
        assert!(prompt(Some("recipe-1")).contains("recipe-1"));
        assert!(!prompt(None).contains("recipe"));
    }

    #[test]
    fn test_quit_renders_nothing() {
        assert_eq!(render(&Output::Quit), None);
        assert_eq!(render(&Output::Text("x".into())), Some("x".to_string()));
    }
}
