//! Markdown rendering for post bodies.

use pulldown_cmark::{Event, Options, Parser, html};

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES
}

/// Render a markdown body to HTML.
pub fn render_markdown(source: &str) -> String {
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, Parser::new_ext(source, options()));
    out
}

/// Plain-text excerpt of a markdown body, cut after `max_words` words.
///
/// A truncated excerpt ends with " …".
pub fn excerpt(source: &str, max_words: usize) -> String {
    let mut text = String::new();
    for event in Parser::new_ext(source, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::End(_) => text.push(' '),
            _ => {}
        }
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return words.join(" ");
    }
    format!("{} …", words[..max_words].join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_emphasis() {
        assert_eq!(render_markdown("*hi*"), "<p><em>hi</em></p>\n");
    }

    #[test]
    fn excerpt_strips_markup_and_truncates() {
        let body = "# Title\n\nSome **bold** words here";
        assert_eq!(excerpt(body, 3), "Title Some bold …");
        assert_eq!(excerpt(body, 30), "Title Some bold words here");
    }
}
