use log::{debug, info, warn};

use crate::errors::WikiError;
use crate::services::PageStore;
use crate::types::{Page, SearchResult};

/// Service for searching page content
pub struct SearchService {
    store: PageStore,
}

impl SearchService {
    /// Create a new search service
    pub fn new(store: PageStore) -> Self {
        Self { store }
    }

    /// Search every page for the given terms, best match first.
    ///
    /// Matching is a case-insensitive substring check; results are scored
    /// by where the terms appear (content, title) and ordered by score,
    /// then name, so ranking is deterministic.
    pub fn search(&self, terms: &str) -> Result<Vec<SearchResult>, WikiError> {
        if terms.trim().is_empty() {
            debug!("Empty search terms received");
            return Ok(Vec::new());
        }

        info!("Searching pages for: '{}'", terms);
        let mut results = Vec::new();

        for name in self.store.list()? {
            let page = match Page::new(&name) {
                Ok(page) => page,
                Err(_) => {
                    warn!("Skipping unsearchable page file name: {:?}", name);
                    continue;
                }
            };
            let content = match self.store.read(&page)? {
                Some(content) => content,
                None => continue,
            };

            let relevance = relevance(&page, &content, terms);
            if relevance > 0.0 {
                debug!("Match in {} with relevance {:.1}", page, relevance);
                results.push(SearchResult {
                    excerpt: excerpt(&content, terms),
                    page,
                    relevance,
                });
            }
        }

        results.sort_by(|a, b| {
            b.relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.page.name().cmp(b.page.name()))
        });

        info!("Search for '{}' found {} results", terms, results.len());
        Ok(results)
    }
}

/// Score a page against the search terms
fn relevance(page: &Page, content: &str, terms: &str) -> f32 {
    let content_lower = content.to_lowercase();
    let terms_lower = terms.to_lowercase();
    let title_lower = page.title().to_lowercase();

    let mut score = 0.0;

    // Exact phrase match in content
    if content_lower.contains(&terms_lower) {
        score += 20.0;
    }

    // Word matches in content
    let words: Vec<&str> = terms_lower.split_whitespace().collect();
    for word in &words {
        if word.len() > 2 && content_lower.contains(word) {
            score += 3.0;
        }
    }

    // Title matches get a bonus
    if title_lower.contains(&terms_lower) {
        score += 15.0;
    }
    for word in &words {
        if word.len() > 2 && title_lower.contains(word) {
            score += 5.0;
        }
    }

    score
}

/// Short context window around the first match
fn excerpt(content: &str, terms: &str) -> String {
    const CONTEXT: usize = 60;

    let content_lower = content.to_lowercase();
    let terms_lower = terms.to_lowercase();

    let Some(byte_pos) = content_lower.find(&terms_lower) else {
        // Terms matched the title only; lead with the opening of the page
        let head: String = content.chars().take(CONTEXT).collect();
        if content.chars().count() > CONTEXT {
            return format!("{}...", head.trim_end());
        }
        return head.trim_end().to_string();
    };

    let match_chars = content[..byte_pos].chars().count();
    let start = match_chars.saturating_sub(CONTEXT);
    let len = terms.chars().count() + 2 * CONTEXT;
    let window: String = content.chars().skip(start).take(len).collect();
    let window = window.replace('\n', " ");

    let mut excerpt = String::new();
    if start > 0 {
        excerpt.push_str("...");
    }
    excerpt.push_str(window.trim());
    if start + len < content.chars().count() {
        excerpt.push_str("...");
    }
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service_with_pages(pages: &[(&str, &str)]) -> (SearchService, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path().to_path_buf());
        for (name, content) in pages {
            store.write(&Page::new(name).unwrap(), content).unwrap();
        }
        (SearchService::new(store), dir)
    }

    #[test]
    fn content_match_is_surfaced() {
        let (service, _dir) = service_with_pages(&[
            ("Main_page", "unparsed main content"),
            ("Page", "unparsed content"),
        ]);
        let results = service.search("content").unwrap();
        assert_eq!(results.len(), 2);
        // Equal relevance resolves alphabetically, Main_page first
        assert_eq!(results[0].page.title(), "Main page");
    }

    #[test]
    fn title_and_content_match_outranks_content_only() {
        let (service, _dir) = service_with_pages(&[
            ("Trees", "apples grow on trees"),
            ("Apples", "apples grow in orchards"),
        ]);
        let results = service.search("apples").unwrap();
        assert_eq!(results[0].page.name(), "Apples");
    }

    #[test]
    fn no_match_yields_empty_results() {
        let (service, _dir) = service_with_pages(&[("Page", "plain text")]);
        assert!(service.search("absent").unwrap().is_empty());
    }

    #[test]
    fn empty_terms_yield_empty_results() {
        let (service, _dir) = service_with_pages(&[("Page", "plain text")]);
        assert!(service.search("  ").unwrap().is_empty());
    }

    #[test]
    fn excerpt_contains_the_match() {
        let long = format!("{} the needle sits here {}", "x".repeat(200), "y".repeat(200));
        let (service, _dir) = service_with_pages(&[("Page", &long)]);
        let results = service.search("needle").unwrap();
        assert!(results[0].excerpt.contains("needle"));
        assert!(results[0].excerpt.starts_with("..."));
        assert!(results[0].excerpt.ends_with("..."));
    }

    #[test]
    fn search_is_case_insensitive() {
        let (service, _dir) = service_with_pages(&[("Page", "Mixed Case Content")]);
        assert_eq!(service.search("mixed case").unwrap().len(), 1);
    }
}
