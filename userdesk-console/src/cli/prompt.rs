use anyhow::Result;
use dialoguer::{Confirm, Input, console::Term};
use userdesk_model::FieldKey;

/// Ask for one form field, offering `current` as the default.
pub fn field(key: FieldKey, current: &str) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(key.label())
        .allow_empty(!key.is_required());
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    Ok(input.interact_text_on(&Term::stderr())?)
}

pub fn confirm(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact_on(&Term::stderr())?)
}
