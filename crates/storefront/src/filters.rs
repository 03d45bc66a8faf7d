//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Maximum characters of a description shown on a product card.
const PREVIEW_LEN: usize = 60;

/// Shorten text for card display, appending an ellipsis when truncated.
pub fn preview_text(text: &str) -> String {
    if text.chars().count() > PREVIEW_LEN {
        let head: String = text.chars().take(PREVIEW_LEN).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Shorten a product description for card display.
///
/// Usage in templates: `{{ product.description|preview }}`
#[askama::filter_fn]
pub fn preview(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(preview_text(&value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(preview_text("A commuter bike."), "A commuter bike.");
    }

    #[test]
    fn test_long_text_truncated_with_ellipsis() {
        let long = "x".repeat(100);
        let shortened = preview_text(&long);
        assert_eq!(shortened.chars().count(), PREVIEW_LEN + 3);
        assert!(shortened.ends_with("..."));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let long = "₹".repeat(70);
        let shortened = preview_text(&long);
        assert!(shortened.ends_with("..."));
        assert_eq!(shortened.chars().count(), PREVIEW_LEN + 3);
    }
}
