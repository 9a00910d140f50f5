/// Normalize a summary: trimmed, capitalized, and terminated.
///
/// Text shorter than two characters is returned untouched.
pub fn normalize_text(text: &str) -> String {
    if text.chars().count() < 2 {
        return text.to_string();
    }
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().chain(chars).collect();
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

/// Split a command description into its first sentence and the rest.
///
/// The rest has its line breaks joined with spaces so wrapping is left to the
/// layout step.
pub fn split_description(description: &str) -> (&str, Option<String>) {
    match description.find('.') {
        Some(idx) => {
            let long = description[idx + 1..].trim_start();
            (&description[..idx], Some(long.lines().collect::<Vec<_>>().join(" ")))
        }
        None => (description, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_missing_fullstop() {
        assert_eq!(
            normalize_text("This summary has no fullstop"),
            "This summary has no fullstop."
        );
    }

    #[test]
    fn keeps_existing_terminator() {
        assert_eq!(
            normalize_text("This summary has fullstop."),
            "This summary has fullstop."
        );
        assert_eq!(
            normalize_text("This summary has exclamation point!"),
            "This summary has exclamation point!"
        );
        assert_eq!(normalize_text("Is it?"), "Is it?");
    }

    #[test]
    fn capitalizes_and_trims() {
        assert_eq!(normalize_text("  the foobar3\n"), "The foobar3.");
        assert_eq!(normalize_text("line1\nline2\n"), "Line1\nline2.");
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("x"), "x");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn splits_description_at_first_period() {
        let (short, long) = split_description("Short Description. Long description with\nline break.");
        assert_eq!(short, "Short Description");
        assert_eq!(long.as_deref(), Some("Long description with line break."));

        let (short, long) = split_description("the description");
        assert_eq!(short, "the description");
        assert_eq!(long, None);
    }
}
