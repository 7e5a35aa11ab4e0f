use anyhow::Result;
use dialoguer::{Input, MultiSelect, Select};

/// Free-text prompt. Empty input is allowed; `required` is enforced at
/// validation time, not here.
pub fn text_input(prompt: &str) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Single selection from a list, returning the chosen index.
pub fn select(prompt: &str, items: &[String], default: usize) -> Result<usize> {
    let selection = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()?;
    Ok(selection)
}

/// Multiple selection from a list, returning the chosen indices.
pub fn multi_select(prompt: &str, items: &[String]) -> Result<Vec<usize>> {
    let selections = MultiSelect::new()
        .with_prompt(prompt)
        .items(items)
        .interact()?;
    Ok(selections)
}

/// Interactive confirmation prompt using arrow-key navigable selection
///
/// # Arguments
/// * `prompt` - The question to ask the user
/// * `default_yes` - Whether "Yes" should be the default selection (index 0)
///
/// # Returns
/// * `Ok(true)` if user selects "Yes"
/// * `Ok(false)` if user selects "No"
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> Result<bool> {
    let items = vec!["Yes", "No"];
    let default_index = if default_yes { 0 } else { 1 };

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(selection == 0)
}
