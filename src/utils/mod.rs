use std::path::Path;
use time::OffsetDateTime;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace("&", "&amp;")
        .replace("<", "&lt;")
        .replace(">", "&gt;")
        .replace("\"", "&quot;")
        .replace("'", "&#39;")
}

/// Escape HTML attribute values
pub fn escape_attr(text: &str) -> String {
    text.replace("&", "&amp;")
        .replace("<", "&lt;")
        .replace(">", "&gt;")
        .replace("\"", "&quot;")
        .replace("'", "&#39;")
}

/// Generate last modified metadata HTML for a page file
pub fn last_modified_html(path: &Path) -> String {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(mtime) => {
            match mtime.duration_since(std::time::UNIX_EPOCH) {
                Ok(dur) => {
                    let secs = dur.as_secs() as i64;
                    let datetime = OffsetDateTime::from_unix_timestamp(secs).ok();
                    if let Some(dt) = datetime {
                        let fmt = time::format_description::well_known::Rfc3339;
                        if let Ok(s) = dt.format(&fmt) {
                            return format!("<p class=\"meta\">Last modified: {}</p>", escape_html(&s));
                        }
                    }
                    String::new()
                }
                Err(_) => String::new(),
            }
        }
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn missing_file_yields_no_stamp() {
        assert_eq!(last_modified_html(Path::new("/nonexistent/never")), "");
    }
}
