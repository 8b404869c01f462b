use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::utils::escape_attr;

/// Render Markdown to an HTML fragment with slug ids on headings
pub fn render(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    // First pass: collect heading ids
    let mut ids: Vec<String> = Vec::new();
    let mut in_heading = false;
    let mut buf = String::new();
    let mut id_counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();

    for ev in Parser::new_ext(text, options) {
        match ev {
            Event::Start(Tag::Heading { .. }) => {
                in_heading = true;
                buf.clear();
            }
            Event::End(TagEnd::Heading(level)) => {
                if in_heading {
                    let mut id = slugify(&buf);
                    if id.is_empty() {
                        id = format!("h{}", heading_level_to_u32(level));
                    }
                    let count = id_counts.entry(id.clone()).or_insert(0);
                    if *count > 0 {
                        id = format!("{}-{}", id, *count);
                    }
                    *count += 1;
                    ids.push(id);
                }
                in_heading = false;
                buf.clear();
            }
            Event::Text(t) | Event::Code(t) => {
                if in_heading {
                    buf.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_heading {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    // Second pass: emit HTML, injecting the collected ids
    let mut out = String::new();
    let mut idx = 0usize;
    for ev in Parser::new_ext(text, options) {
        match ev {
            Event::Start(Tag::Heading { level, .. }) => {
                let lvl = heading_level_to_u32(level);
                let id = ids.get(idx).map(String::as_str).unwrap_or("");
                out.push_str(&format!("<h{} id=\"{}\">", lvl, escape_attr(id)));
                idx += 1;
            }
            Event::End(TagEnd::Heading(level)) => {
                out.push_str(&format!("</h{}>\n", heading_level_to_u32(level)));
            }
            _ => html::push_html(&mut out, std::iter::once(ev)),
        }
    }

    out
}

/// Convert heading level to u32
fn heading_level_to_u32(level: HeadingLevel) -> u32 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Create URL-friendly slug from heading text
fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_dash = false;
    for ch in text.chars() {
        let c = ch.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_dash = false;
        } else if c.is_ascii_whitespace() || c == '-' || c == '_' {
            if !last_dash && !out.is_empty() {
                out.push('-');
                last_dash = true;
            }
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_with_id() {
        assert_eq!(render("## Title"), "<h2 id=\"title\">Title</h2>\n");
    }

    #[test]
    fn multi_word_heading_slug() {
        assert_eq!(
            render("### Getting Started"),
            "<h3 id=\"getting-started\">Getting Started</h3>\n"
        );
    }

    #[test]
    fn duplicate_headings_get_distinct_ids() {
        let html = render("## Title\n\n## Title");
        assert!(html.contains("<h2 id=\"title\">"));
        assert!(html.contains("<h2 id=\"title-1\">"));
    }

    #[test]
    fn paragraph_and_emphasis() {
        assert_eq!(
            render("some *styled* text"),
            "<p>some <em>styled</em> text</p>\n"
        );
    }

    #[test]
    fn unrecognized_syntax_passes_through_as_text() {
        let html = render("== Title ==");
        assert_eq!(html, "<p>== Title ==</p>\n");
    }

    #[test]
    fn slugify_strips_punctuation() {
        assert_eq!(slugify("What's new, in 2.0?"), "whats-new-in-20");
    }
}
