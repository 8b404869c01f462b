use crate::types::{Page, SearchResult};
use crate::utils::{escape_attr, escape_html};

/// Render the shared HTML shell around a page body.
///
/// The header carries the site navigation and the search form; the search
/// field is prefilled with the current terms so the Create button can open
/// the edit view for whatever was typed or viewed.
pub fn layout(title: &str, terms: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{title}</title><style>{style}</style></head><body>\
<header><nav><a href=\"/\">Wiki</a> <a href=\"/show_all\">All pages</a></nav>\
<form class=\"search\" action=\"/search\" method=\"get\">\
<input type=\"text\" name=\"terms\" value=\"{terms}\">\
<input type=\"submit\" name=\"commit\" value=\"Search\">\
<input type=\"submit\" name=\"commit\" value=\"Create\">\
</form></header><main>{body}</main></body></html>",
        title = escape_html(title),
        terms = escape_attr(terms),
        style = STYLE,
        body = body,
    )
}

const STYLE: &str = "body{font-family:sans-serif;max-width:52rem;margin:0 auto;padding:1rem}\
header{display:flex;justify-content:space-between;border-bottom:1px solid #ccc;padding-bottom:.5rem}\
nav a{margin-right:.75rem}textarea{width:100%;min-height:16rem}\
.meta{color:#777;font-size:.85rem}.excerpt{color:#444}.relevance{color:#999;font-size:.85rem}";

/// Page view: rendered content with edit and delete controls
pub fn show(page: &Page, parsed: &str, modified: &str) -> String {
    let body = format!(
        "<h1>{title}</h1>{modified}<div class=\"page-content\">{parsed}</div>\
<p class=\"actions\"><a href=\"/edit?page={name}\">Edit</a></p>\
<form action=\"/destroy?page={name}\" method=\"post\">\
<input type=\"submit\" value=\"Delete\"></form>",
        title = escape_html(&page.title()),
        modified = modified,
        parsed = parsed,
        name = escape_attr(page.name()),
    );
    layout(&page.title(), page.name(), &body)
}

/// Edit view: content form plus a rendered preview of the submitted text
pub fn edit(page: &Page, content: &str, parsed: &str) -> String {
    let body = format!(
        "<h1>Editing {title}</h1>\
<form action=\"/update\" method=\"post\">\
<input type=\"hidden\" name=\"page\" value=\"{name}\">\
<textarea name=\"content\">{content}</textarea>\
<p><input type=\"submit\" value=\"Save\">\
<button formaction=\"/preview\">Preview</button></p></form>\
<h2>Preview</h2><div class=\"page-content\">{parsed}</div>",
        title = escape_html(&page.title()),
        name = escape_attr(page.name()),
        content = escape_html(content),
        parsed = parsed,
    );
    layout(&format!("Editing {}", page.title()), page.name(), &body)
}

/// Listing view: every page, alphabetically
pub fn show_all(names: &[String]) -> String {
    let mut body = String::from("<h1>All pages</h1>\n<ul class=\"listing\">\n");
    for name in names {
        body.push_str(&format!(
            "  <li><a href=\"/show?page={}\">{}</a></li>\n",
            escape_attr(name),
            escape_html(&name.replace('_', " ")),
        ));
    }
    body.push_str("</ul>\n");
    layout("All pages", "", &body)
}

/// Search results view, best match first
pub fn search(terms: &str, results: &[SearchResult]) -> String {
    let mut body = format!(
        "<h1>Search results for \"{}\"</h1>\n<p class=\"meta\">Found {} result{}</p>\n",
        escape_html(terms),
        results.len(),
        if results.len() == 1 { "" } else { "s" },
    );

    if results.is_empty() {
        body.push_str(
            "<p class=\"no-results\">No results. \
Use the Create button above to start a page with these terms.</p>\n",
        );
    } else {
        body.push_str("<ul class=\"results\">\n");
        for result in results {
            body.push_str(&format!(
                "  <li><a href=\"/show?page={name}\">{title}</a>\
<p class=\"excerpt\">{excerpt}</p>\
<span class=\"relevance\">Relevance: {relevance:.1}</span></li>\n",
                name = escape_attr(result.page.name()),
                title = escape_html(&result.page.title()),
                excerpt = escape_html(&result.excerpt),
                relevance = result.relevance,
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("Search", terms, &body)
}
