//! Prompt helpers for the interactive menus.

use chrono::NaiveDate;
use dialoguer::{Input, Password, Select};

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Show `items` and return the chosen index.
pub fn choose(title: &str, items: &[&str]) -> anyhow::Result<usize> {
    Select::new()
        .with_prompt(title)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read selection: {}", e))
}

/// Read one line of text, trimmed. Empty input is allowed.
pub fn prompt_text(prompt: &str) -> anyhow::Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| anyhow::anyhow!("Failed to read input: {}", e))?;
    Ok(value.trim().to_string())
}

/// Read a password without echo.
pub fn prompt_password(prompt: &str) -> anyhow::Result<String> {
    Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

/// Parse a whole number of copies. Range checks belong to the engine.
pub fn parse_copies(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_copies() {
        assert_eq!(parse_copies(" 3 "), Some(3));
        assert_eq!(parse_copies("-1"), Some(-1));
        assert_eq!(parse_copies("three"), None);
        assert_eq!(parse_copies(""), None);
    }
}
