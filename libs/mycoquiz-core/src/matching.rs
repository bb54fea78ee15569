//! Answer matching and feedback text.
//!
//! Comparison is exact equality of normalized forms. There is no fuzzy or
//! edit-distance matching: `amanita muscaria.` matches `Amanita muscaria`,
//! `amanita muscara` does not.

use html_escape::encode_double_quoted_attribute;

use crate::types::Card;

/// Incorrect answers allowed before the correct name is revealed.
pub const MAX_ATTEMPTS: u32 = 3;

pub const TRY_AGAIN_FEEDBACK: &str = "Incorrect. Try again!";
pub const NO_CARD_FEEDBACK: &str = "No card available.";

/// Canonicalize a scientific name for comparison.
///
/// Lowercases, drops every `.`, trims, and collapses whitespace runs into a
/// single space. Periods are removed before whitespace is collapsed so that
/// `"x ."` and `"x"` normalize the same way, keeping the function idempotent.
pub fn normalize(name: &str) -> String {
    let lowered: String = name
        .chars()
        .filter(|&c| c != '.')
        .collect::<String>()
        .to_lowercase();

    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a typed answer names the expected species.
pub fn answers_match(typed: &str, expected: &str) -> bool {
    normalize(typed) == normalize(expected)
}

/// Render a link. This is the only markup the core produces.
///
/// `&`, `<`, `>` and `"` in both the URL and the text are entity-escaped, so
/// card data cannot close the tag or inject other elements.
pub fn hyperlink(url: &str, text: &str) -> String {
    let url = encode_double_quoted_attribute(url);
    let text = encode_double_quoted_attribute(text);
    format!(r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{text}</a>"#)
}

/// `SCI (COMMON)` with both parts linked to the card's taxon page.
fn linked_names(card: &Card) -> String {
    let scientific = hyperlink(&card.taxa_url, &card.scientific_name);
    let common = if card.common_name.is_empty() {
        String::new()
    } else {
        hyperlink(&card.taxa_url, &card.common_name)
    };
    format!("{scientific} ({common})")
}

pub fn success_feedback(card: &Card) -> String {
    format!("Correct! {}", linked_names(card))
}

pub fn reveal_feedback(card: &Card) -> String {
    format!("Incorrect. The correct name is: {}", linked_names(card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_example() {
        assert_eq!(normalize(" Amanita  muscaria. "), "amanita muscaria");
    }

    #[test]
    fn test_normalize_whitespace_kinds() {
        assert_eq!(normalize("\tCantharellus\n\u{a0}cibarius "), "cantharellus cibarius");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_strips_all_periods() {
        assert_eq!(normalize("Russula sp."), "russula sp");
        assert_eq!(normalize("R. emetica"), "r emetica");
        assert_eq!(normalize("x ."), "x");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            " Amanita  muscaria. ",
            "x .",
            ". . .",
            "Hygrocybe  . conica",
            "\u{2003}Boletus\u{2003}edulis\u{2003}",
            "ÉCHINODONTIUM tinctorium",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_answers_match() {
        assert!(answers_match("amanita muscaria", "Amanita muscaria"));
        assert!(answers_match("  AMANITA   MUSCARIA.", "Amanita muscaria"));
        assert!(!answers_match("amanita muscara", "Amanita muscaria"));
        assert!(!answers_match("", "Amanita muscaria"));
    }

    #[test]
    fn test_success_feedback_links_both_names() {
        let card = Card::new("Amanita muscaria")
            .with_common_name("Fly Agaric")
            .with_taxa_url("https://x/1");
        assert_eq!(
            success_feedback(&card),
            "Correct! <a href=\"https://x/1\" target=\"_blank\" rel=\"noopener noreferrer\">Amanita muscaria</a> \
             (<a href=\"https://x/1\" target=\"_blank\" rel=\"noopener noreferrer\">Fly Agaric</a>)"
        );
    }

    #[test]
    fn test_feedback_escapes_card_markup() {
        let card = Card::new("Amanita <b>muscaria</b>")
            .with_common_name("Fly</a><script>x()</script>")
            .with_taxa_url("https://x/1\" onclick=\"evil()&a=1");
        let feedback = success_feedback(&card);

        assert!(!feedback.contains("<script>"));
        assert!(!feedback.contains("<b>"));
        assert!(!feedback.contains("onclick=\""));
        assert_eq!(feedback.matches("<a ").count(), 2);
        assert_eq!(feedback.matches("</a>").count(), 2);
        assert!(feedback.contains(r#"href="https://x/1&quot; onclick=&quot;evil()&amp;a=1""#));
        assert!(feedback.contains(">Amanita &lt;b&gt;muscaria&lt;/b&gt;</a>"));
        assert!(feedback.contains(">Fly&lt;/a&gt;&lt;script&gt;x()&lt;/script&gt;</a>"));
    }

    #[test]
    fn test_reveal_feedback_without_common_name() {
        let card = Card::new("Stereum complicatum").with_taxa_url("https://x/2");
        let feedback = reveal_feedback(&card);
        assert!(feedback.starts_with("Incorrect. The correct name is: "));
        assert!(feedback.contains(">Stereum complicatum</a>"));
        assert!(feedback.ends_with("()"));
    }
}
