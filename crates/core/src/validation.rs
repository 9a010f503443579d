//! Shared text validation helpers used by every entity editor.

use crate::error::CoreError;

/// Maximum length for short labels and names (field labels, form names,
/// ticket names, template names, terms titles).
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for long-form text (descriptions, template bodies,
/// terms content).
pub const MAX_TEXT_LEN: usize = 50_000;

/// Validate that `value` is non-blank after trimming and at most `max`
/// characters long. Returns the trimmed value.
///
/// `what` names the attribute in the error message, e.g. `"Field label"`.
pub fn require_text<'a>(what: &str, value: &'a str, max: usize) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{what} must not be empty")));
    }
    let len = trimmed.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{what} too long: {len} chars (max {max})"
        )));
    }
    Ok(trimmed)
}

/// Validate optional text: `None` and blank strings collapse to `None`,
/// anything else must fit within `max`.
pub fn optional_text(
    what: &str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => require_text(what, v, max).map(|v| Some(v.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_trims() {
        assert_eq!(require_text("Name", "  Badge  ", MAX_NAME_LEN).unwrap(), "Badge");
    }

    #[test]
    fn test_require_text_rejects_blank() {
        let err = require_text("Name", "   ", MAX_NAME_LEN).unwrap_err();
        assert!(err.to_string().contains("Name must not be empty"));
    }

    #[test]
    fn test_require_text_rejects_too_long() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(require_text("Name", &long, MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text_collapses_blank() {
        assert_eq!(optional_text("Placeholder", Some("  "), 10).unwrap(), None);
        assert_eq!(optional_text("Placeholder", None, 10).unwrap(), None);
        assert_eq!(
            optional_text("Placeholder", Some(" hi "), 10).unwrap().as_deref(),
            Some("hi")
        );
    }
}
