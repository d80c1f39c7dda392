/// Capitalizes the first letter, lowercases the rest and turns hyphens into
/// spaces: `"press-SPACE-to-play"` becomes `"Press space to play"`.
pub fn format_text(text: &str) -> String {
    let mut chars = text.chars();
    let mut formatted = String::with_capacity(text.len());
    if let Some(first) = chars.next() {
        formatted.extend(first.to_uppercase());
        formatted.push_str(&chars.as_str().to_lowercase());
    }
    formatted.replace('-', " ").trim().to_string()
}

/// First run of ASCII word characters (letters, digits, `_`) in `text`.
pub fn slug(text: &str) -> Option<String> {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let start = text.find(is_word)?;
    let rest = &text[start..];
    let end = rest.find(|c: char| !is_word(c)).unwrap_or(rest.len());
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hyphenated_ids() {
        assert_eq!(format_text("press-SPACE-to-play"), "Press space to play");
        assert_eq!(format_text("board-full-"), "Board full");
    }

    #[test]
    fn handles_empty_and_non_ascii_text() {
        assert_eq!(format_text(""), "");
        assert_eq!(format_text("élan"), "Élan");
    }

    #[test]
    fn slug_takes_the_first_word() {
        assert_eq!(slug("highscore"), Some("highscore".to_string()));
        assert_eq!(slug("  best_run-2 today"), Some("best_run".to_string()));
        assert_eq!(slug("#42!"), Some("42".to_string()));
        assert_eq!(slug("--- !"), None);
        assert_eq!(slug(""), None);
    }
}
