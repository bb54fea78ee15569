//! Plain-text rendering of session state for the terminal.

use html_escape::decode_html_entities;
use mycoquiz_core::{Card, SessionView};

/// Rewrite `<a href="URL" ...>TEXT</a>` links as `TEXT <URL>`.
///
/// The URL and text are entity-decoded. Anything that is not a well-formed
/// link is left as is.
pub fn render_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("<a href=\"") {
        out.push_str(&rest[..start]);
        let after = &rest[start..];

        match parse_link(after) {
            Some((url, label, consumed)) => {
                if url.is_empty() {
                    out.push_str(&label);
                } else {
                    out.push_str(&format!("{label} <{url}>"));
                }
                rest = &after[consumed..];
            }
            None => {
                out.push_str(after);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Returns (url, label, bytes consumed) for a link at the start of `s`.
fn parse_link(s: &str) -> Option<(String, String, usize)> {
    let body = s.strip_prefix("<a href=\"")?;
    let url_end = body.find('"')?;
    let url = &body[..url_end];

    let tag_rest = &body[url_end..];
    let label_start = tag_rest.find('>')? + 1;
    let label_and_rest = &tag_rest[label_start..];
    let label_end = label_and_rest.find("</a>")?;
    let label = &label_and_rest[..label_end];

    let consumed = "<a href=\"".len() + url_end + label_start + label_end + "</a>".len();
    Some((
        decode_html_entities(url).into_owned(),
        decode_html_entities(label).into_owned(),
        consumed,
    ))
}

pub fn render_card(card: &Card, position: usize, deck_len: usize) -> String {
    let mut lines = vec![format!("Card {} of {}", position + 1, deck_len)];
    if !card.image_url.is_empty() {
        lines.push(format!("  Image: {}", card.image_url));
    }
    if !card.attribution.is_empty() {
        lines.push(format!("  Photo: {}", card.attribution));
    }
    lines.join("\n")
}

pub fn render_hints(hints: &[String]) -> String {
    hints
        .iter()
        .enumerate()
        .map(|(i, hint)| format!("  {:>2}. {hint}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt header: deck name plus the current card, or the empty-state message.
pub fn render_view(view: &SessionView) -> String {
    let mut out = format!("[{}]\n", view.deck_name);
    match &view.current_card {
        Some(card) => out.push_str(&render_card(card, view.position, view.deck_len)),
        None => out.push_str("No cards available. Please load a file."),
    }
    if view.hints_visible && !view.hints.is_empty() {
        out.push_str("\nHints:\n");
        out.push_str(&render_hints(&view.hints));
    }
    out
}
