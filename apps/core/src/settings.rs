pub const MIN_DEBOUNCE_MS: u64 = 50;
pub const MAX_DEBOUNCE_MS: u64 = 5_000;

const MODIFIER_NAMES: [&str; 7] = ["ctrl", "control", "alt", "shift", "meta", "win", "cmd"];

/// Canonicalizes a quick-access key. It has to be one bare printable character.
pub fn validate_shortcut_key(input: &str) -> Result<char, String> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err("Shortcut key is required.".to_string());
    }

    if raw.len() > 1 && raw.contains('+') {
        let has_modifier = raw
            .split('+')
            .map(|part| part.trim().to_ascii_lowercase())
            .any(|part| MODIFIER_NAMES.contains(&part.as_str()));
        if has_modifier {
            return Err("Shortcut key must be a single key without modifiers.".to_string());
        }
    }

    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() && !c.is_whitespace() => Ok(c),
        _ => Err(format!(
            "Shortcut key must be a single printable character, got '{raw}'."
        )),
    }
}

pub fn validate_debounce_ms(value: u64) -> Result<(), String> {
    if (MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&value) {
        Ok(())
    } else {
        Err(format!(
            "Debounce must be between {MIN_DEBOUNCE_MS} and {MAX_DEBOUNCE_MS} ms."
        ))
    }
}
