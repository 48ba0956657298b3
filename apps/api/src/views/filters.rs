//! Text filters applied when rendering pages.

use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid filter regex {pattern}: {e}"))
}

static RE_SECTION_HEADING: Lazy<Regex> = Lazy::new(|| {
    re(r"(?mi)^\s*\*?\*?[A-Za-z\s]+(?:Breakdown|Concept|Summary|Details|Items):\*?\*?\s*$")
});
static RE_BOLD: Lazy<Regex> = Lazy::new(|| re(r"\*\*([^*]+)\*\*:?"));
static RE_ITALIC: Lazy<Regex> = Lazy::new(|| re(r"\*([^*]+)\*"));
static RE_HEADER_MARK: Lazy<Regex> = Lazy::new(|| re(r"(?m)^#+\s*"));
static RE_LABELED_BULLET: Lazy<Regex> = Lazy::new(|| re(r"(?m)^\s*[-*]\s*[A-Za-z]+:\s*"));
static RE_BULLET: Lazy<Regex> = Lazy::new(|| re(r"(?m)^\s*[-*]\s+"));
static RE_NUMBERED: Lazy<Regex> = Lazy::new(|| re(r"(?m)^\s*\d+\.\s+"));
static RE_LEADING_LABEL: Lazy<Regex> = Lazy::new(|| re(r"(?m)^[A-Z][a-z]+:\s+"));
static RE_UNDERSCORE: Lazy<Regex> = Lazy::new(|| re(r"_([^_]+)_"));
static RE_BACKTICK: Lazy<Regex> = Lazy::new(|| re(r"`([^`]+)`"));
static RE_NEWLINES: Lazy<Regex> = Lazy::new(|| re(r"\n{2,}"));
static RE_BLANK_LINE: Lazy<Regex> = Lazy::new(|| re(r"(?m)^\s*$\n"));

/// Turns model output that slipped into markdown back into plain prose.
/// Passes run in a fixed order; later ones rely on earlier ones.
pub fn strip_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = RE_SECTION_HEADING.replace_all(text, "");
    let text = RE_BOLD.replace_all(&text, "${1}");
    let text = RE_ITALIC.replace_all(&text, "${1}");
    let text = RE_HEADER_MARK.replace_all(&text, "");
    let text = RE_LABELED_BULLET.replace_all(&text, "");
    let text = RE_BULLET.replace_all(&text, "");
    let text = RE_NUMBERED.replace_all(&text, "");
    let text = RE_LEADING_LABEL.replace_all(&text, "");
    let text = RE_UNDERSCORE.replace_all(&text, "${1}");
    let text = RE_BACKTICK.replace_all(&text, "${1}");
    let text = RE_NEWLINES.replace_all(&text, "\n\n");
    let text = RE_BLANK_LINE.replace_all(&text, "");
    text.trim().to_string()
}

pub fn b64encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Escapes text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped text with line breaks kept as `<br>`.
pub fn linebreaks(text: &str) -> String {
    escape_html(text).replace('\n', "<br>\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prose_is_untouched() {
        let text = "A quiet, grounded look for a cold morning.";
        assert_eq!(strip_markdown(text), text);
    }

    #[test]
    fn test_heading_lines_are_dropped() {
        let text = "**Outfit Breakdown:**\nThe camel coat over a black knit.";
        assert_eq!(strip_markdown(text), "The camel coat over a black knit.");
    }

    #[test]
    fn test_bold_and_italic_are_unwrapped() {
        assert_eq!(
            strip_markdown("Wear the **camel coat**: it anchors the *whole* look."),
            "Wear the camel coat it anchors the whole look."
        );
    }

    #[test]
    fn test_bullets_with_labels() {
        let text = "- Outerwear: Camel coat\n- Shoes: Black loafers\n* plain bullet";
        assert_eq!(strip_markdown(text), "Camel coat\nBlack loafers\nplain bullet");
    }

    #[test]
    fn test_headers_numbers_and_leading_labels() {
        let text = "## Today\n1. Start with the trench\nNote: keep it loose";
        assert_eq!(
            strip_markdown(text),
            "Today\nStart with the trench\nkeep it loose"
        );
    }

    #[test]
    fn test_underscores_and_backticks() {
        assert_eq!(strip_markdown("a _soft_ `drape`"), "a soft drape");
    }

    #[test]
    fn test_blank_lines_are_removed() {
        assert_eq!(strip_markdown("First.\n\n\n\nSecond.\n"), "First.\nSecond.");
        assert_eq!(strip_markdown(""), "");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom's" & co</b>"#),
            "&lt;b&gt;&quot;Tom&#x27;s&quot; &amp; co&lt;/b&gt;"
        );
        assert_eq!(linebreaks("a\nb<"), "a<br>\nb&lt;");
    }

    #[test]
    fn test_b64encode() {
        assert_eq!(b64encode(&[1, 2, 3]), "AQID");
    }
}
