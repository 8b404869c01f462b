use std::sync::OnceLock;

use regex::{Captures, Regex};

static BOLD_ITALIC: OnceLock<Regex> = OnceLock::new();
static BOLD: OnceLock<Regex> = OnceLock::new();
static ITALIC: OnceLock<Regex> = OnceLock::new();
static PIPED_LINK: OnceLock<Regex> = OnceLock::new();
static PLAIN_LINK: OnceLock<Regex> = OnceLock::new();
static EXTERNAL_LINK: OnceLock<Regex> = OnceLock::new();
static BARE_EXTERNAL_LINK: OnceLock<Regex> = OnceLock::new();

/// Render MediaWiki-style text to an HTML fragment.
///
/// Line-oriented: headings, lists, horizontal rules, and preformatted
/// blocks are recognized per line; everything else accumulates into
/// paragraphs. Unrecognized syntax passes through as plain text.
pub fn render(text: &str) -> String {
    let mut html = String::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut pre: Vec<String> = Vec::new();
    let mut list: Option<ListKind> = None;

    for line in text.lines() {
        let trimmed = line.trim_end();

        if let Some((level, title)) = parse_heading(trimmed.trim()) {
            flush_paragraph(&mut html, &mut paragraph);
            flush_pre(&mut html, &mut pre);
            close_list(&mut html, &mut list);
            html.push_str(&format!("\n<h{}>{}</h{}>\n", level, inline(title), level));
        } else if trimmed.trim().chars().count() >= 4 && trimmed.trim().chars().all(|c| c == '-') {
            flush_paragraph(&mut html, &mut paragraph);
            flush_pre(&mut html, &mut pre);
            close_list(&mut html, &mut list);
            html.push_str("<hr>\n");
        } else if let Some(item) = trimmed.strip_prefix('*') {
            flush_paragraph(&mut html, &mut paragraph);
            flush_pre(&mut html, &mut pre);
            open_list(&mut html, &mut list, ListKind::Bullet);
            html.push_str(&format!("<li>{}</li>\n", inline(item.trim())));
        } else if let Some(item) = trimmed.strip_prefix('#') {
            flush_paragraph(&mut html, &mut paragraph);
            flush_pre(&mut html, &mut pre);
            open_list(&mut html, &mut list, ListKind::Numbered);
            html.push_str(&format!("<li>{}</li>\n", inline(item.trim())));
        } else if trimmed.starts_with(' ') && !trimmed.trim().is_empty() {
            flush_paragraph(&mut html, &mut paragraph);
            close_list(&mut html, &mut list);
            pre.push(escape_text(&trimmed[1..]));
        } else if trimmed.trim().is_empty() {
            flush_paragraph(&mut html, &mut paragraph);
            flush_pre(&mut html, &mut pre);
            close_list(&mut html, &mut list);
        } else {
            flush_pre(&mut html, &mut pre);
            close_list(&mut html, &mut list);
            paragraph.push(inline(trimmed.trim()));
        }
    }

    flush_paragraph(&mut html, &mut paragraph);
    flush_pre(&mut html, &mut pre);
    close_list(&mut html, &mut list);
    html
}

#[derive(PartialEq, Clone, Copy)]
enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "ul",
            ListKind::Numbered => "ol",
        }
    }
}

/// Recognize `== Title ==` heading lines; level is the shorter fence
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    if !line.starts_with('=') || !line.ends_with('=') || line.len() < 3 {
        return None;
    }
    let open = line.chars().take_while(|&c| c == '=').count();
    let close = line.chars().rev().take_while(|&c| c == '=').count();
    if open + close >= line.len() {
        return None;
    }
    let level = open.min(close).min(6);
    let title = line[open..line.len() - close].trim();
    if title.is_empty() {
        return None;
    }
    Some((level, title))
}

fn open_list(html: &mut String, list: &mut Option<ListKind>, kind: ListKind) {
    if *list == Some(kind) {
        return;
    }
    close_list(html, list);
    html.push_str(&format!("<{}>\n", kind.tag()));
    *list = Some(kind);
}

fn close_list(html: &mut String, list: &mut Option<ListKind>) {
    if let Some(kind) = list.take() {
        html.push_str(&format!("</{}>\n", kind.tag()));
    }
}

fn flush_paragraph(html: &mut String, paragraph: &mut Vec<String>) {
    if paragraph.is_empty() {
        return;
    }
    html.push_str(&format!("<p>{}</p>\n", paragraph.join("\n")));
    paragraph.clear();
}

fn flush_pre(html: &mut String, pre: &mut Vec<String>) {
    if pre.is_empty() {
        return;
    }
    html.push_str(&format!("<pre>{}\n</pre>\n", pre.join("\n")));
    pre.clear();
}

/// Escape markup characters without touching the single quotes the
/// wikitext emphasis rules depend on
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Apply inline wikitext rules: quote emphasis, then links
fn inline(text: &str) -> String {
    let mut s = escape_text(text);

    let bold_italic = BOLD_ITALIC
        .get_or_init(|| Regex::new(r"'''''(.+?)'''''").expect("bold-italic pattern"));
    s = bold_italic.replace_all(&s, "<b><i>$1</i></b>").into_owned();

    let bold = BOLD.get_or_init(|| Regex::new(r"'''(.+?)'''").expect("bold pattern"));
    s = bold.replace_all(&s, "<b>$1</b>").into_owned();

    let italic = ITALIC.get_or_init(|| Regex::new(r"''(.+?)''").expect("italic pattern"));
    s = italic.replace_all(&s, "<i>$1</i>").into_owned();

    let piped = PIPED_LINK
        .get_or_init(|| Regex::new(r"\[\[([^\]|]+)\|([^\]]+)\]\]").expect("piped link pattern"));
    s = piped
        .replace_all(&s, |caps: &Captures| internal_link(&caps[1], &caps[2]))
        .into_owned();

    let plain = PLAIN_LINK
        .get_or_init(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("plain link pattern"));
    s = plain
        .replace_all(&s, |caps: &Captures| internal_link(&caps[1], &caps[1]))
        .into_owned();

    let external = EXTERNAL_LINK.get_or_init(|| {
        Regex::new(r"\[(https?://[^\s\]]+)\s+([^\]]+)\]").expect("external link pattern")
    });
    s = external
        .replace_all(&s, "<a href=\"$1\">$2</a>")
        .into_owned();

    let bare = BARE_EXTERNAL_LINK
        .get_or_init(|| Regex::new(r"\[(https?://[^\s\]]+)\]").expect("bare link pattern"));
    s = bare.replace_all(&s, "<a href=\"$1\">$1</a>").into_owned();

    s
}

/// Build an internal page link; targets use underscore form in the href
fn internal_link(target: &str, text: &str) -> String {
    let target = target.trim().replace(' ', "_");
    format!("<a href=\"/show?page={}\">{}</a>", target, text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_two_heading() {
        assert_eq!(render("== Title =="), "\n<h2>Title</h2>\n");
    }

    #[test]
    fn heading_levels_follow_fence_length() {
        assert_eq!(render("= Top ="), "\n<h1>Top</h1>\n");
        assert_eq!(render("==== Deep ===="), "\n<h4>Deep</h4>\n");
    }

    #[test]
    fn plain_text_is_a_paragraph() {
        assert_eq!(render("unparsed content"), "<p>unparsed content</p>\n");
    }

    #[test]
    fn consecutive_lines_share_a_paragraph() {
        assert_eq!(render("one\ntwo"), "<p>one\ntwo</p>\n");
        assert_eq!(render("one\n\ntwo"), "<p>one</p>\n<p>two</p>\n");
    }

    #[test]
    fn quote_emphasis() {
        assert_eq!(render("''italic''"), "<p><i>italic</i></p>\n");
        assert_eq!(render("'''bold'''"), "<p><b>bold</b></p>\n");
        assert_eq!(render("'''''both'''''"), "<p><b><i>both</i></b></p>\n");
    }

    #[test]
    fn internal_links() {
        assert_eq!(
            render("see [[Other Page]]"),
            "<p>see <a href=\"/show?page=Other_Page\">Other Page</a></p>\n"
        );
        assert_eq!(
            render("see [[Other Page|that one]]"),
            "<p>see <a href=\"/show?page=Other_Page\">that one</a></p>\n"
        );
    }

    #[test]
    fn external_links() {
        assert_eq!(
            render("[https://example.com a site]"),
            "<p><a href=\"https://example.com\">a site</a></p>\n"
        );
        assert_eq!(
            render("[https://example.com]"),
            "<p><a href=\"https://example.com\">https://example.com</a></p>\n"
        );
    }

    #[test]
    fn bullet_and_numbered_lists() {
        assert_eq!(
            render("* one\n* two"),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n"
        );
        assert_eq!(
            render("# first\n# second"),
            "<ol>\n<li>first</li>\n<li>second</li>\n</ol>\n"
        );
    }

    #[test]
    fn horizontal_rule() {
        assert_eq!(render("----"), "<hr>\n");
    }

    #[test]
    fn preformatted_block() {
        assert_eq!(render(" code line"), "<pre>code line\n</pre>\n");
    }

    #[test]
    fn raw_html_is_escaped() {
        assert_eq!(
            render("<script>alert(1)</script>"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>\n"
        );
    }

    #[test]
    fn fence_only_line_is_not_a_heading() {
        assert_eq!(parse_heading("===="), None);
        assert_eq!(parse_heading("= ="), None);
    }
}
