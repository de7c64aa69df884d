//! Escaped-markup rendering of the text region, with the chunk being
//! spoken highlighted.

/// Characters escaped for the display surface.
const ESCAPES: &[(char, &str)] = &[
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('\'', "&#39;"),
    ('"', "&quot;"),
];

/// Escape text for the HTML-like display surface.
pub fn escape_markup(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match ESCAPES.iter().find(|(ch, _)| *ch == c) {
            Some((_, replacement)) => result.push_str(replacement),
            None => result.push(c),
        }
    }
    result
}

/// Render the chunk list with the chunk at `index` highlighted.
///
/// Chunks before and after the highlight are joined by single spaces;
/// empty regions contribute no separator. All three regions are escaped.
pub fn highlight_chunk(chunks: &[String], index: usize) -> String {
    let before = chunks[..index].join(" ");
    let current = &chunks[index];
    let after = chunks[index + 1..].join(" ");

    let mut markup = String::new();
    if !before.is_empty() {
        markup.push_str(&escape_markup(&before));
        markup.push(' ');
    }
    markup.push_str("<span class=\"highlight\">");
    markup.push_str(&escape_markup(current));
    markup.push_str("</span>");
    if !after.is_empty() {
        markup.push(' ');
        markup.push_str(&escape_markup(&after));
    }
    markup
}

/// Render the full text with no highlight.
pub fn render_plain(text: &str) -> String {
    escape_markup(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape_markup(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_markup("plain text."), "plain text.");
    }

    #[test]
    fn test_highlight_middle_chunk() {
        let markup = highlight_chunk(&chunks(&["One.", "Two.", "Three."]), 1);
        assert_eq!(
            markup,
            "One. <span class=\"highlight\">Two.</span> Three."
        );
    }

    #[test]
    fn test_highlight_first_and_last_chunk() {
        let list = chunks(&["One.", "Two."]);
        assert_eq!(
            highlight_chunk(&list, 0),
            "<span class=\"highlight\">One.</span> Two."
        );
        assert_eq!(
            highlight_chunk(&list, 1),
            "One. <span class=\"highlight\">Two.</span>"
        );
    }

    #[test]
    fn test_highlight_escapes_chunk_content() {
        let markup = highlight_chunk(&chunks(&["<script>."]), 0);
        assert_eq!(
            markup,
            "<span class=\"highlight\">&lt;script&gt;.</span>"
        );
    }

    #[test]
    fn test_render_plain_restores_escaped_text() {
        assert_eq!(render_plain("a < b. c > d."), "a &lt; b. c &gt; d.");
    }
}
