//! Message body formatting

use std::sync::LazyLock;

use regex::Regex;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^\s]+").expect("URL pattern is a valid regex")
});

/// Format a message body as markup
///
/// Every `http(s)://` run up to the next whitespace becomes a link opening in a
/// new browsing context, every newline becomes `<br>`, and all other text is
/// HTML-escaped.
#[must_use]
pub fn format_message(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;

    for found in URL_PATTERN.find_iter(text) {
        push_text(&mut out, &text[last..found.start()]);
        let url = found.as_str();
        out.push_str("<a href=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(url));
        out.push_str("\" target=\"_blank\">");
        out.push_str(&html_escape::encode_text(url));
        out.push_str("</a>");
        last = found.end();
    }
    push_text(&mut out, &text[last..]);

    out
}

fn push_text(out: &mut String, segment: &str) {
    let mut lines = segment.split('\n');
    if let Some(first) = lines.next() {
        out.push_str(&html_escape::encode_text(first));
    }
    for line in lines {
        out.push_str("<br>");
        out.push_str(&html_escape::encode_text(line));
    }
}
