use anyhow::{Context, Result, bail};
use dialoguer::{Input, Select};

use pcfgen::{Lcid, LocaleChoice};

pub fn input(prompt: &str, default: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(prompt)
        .default(default.to_owned())
        .interact_text()
        .with_context(|| format!("failed to prompt for `{prompt}`"))
}

pub fn select_locale(prompt: &str, choices: &[LocaleChoice]) -> Result<Lcid> {
    if choices.is_empty() {
        bail!("no languages to choose from");
    }

    let selected = Select::new()
        .with_prompt(prompt)
        .items(choices)
        .default(0)
        .interact()
        .with_context(|| format!("failed to prompt for `{prompt}`"))?;

    Ok(choices[selected].lcid.clone())
}
