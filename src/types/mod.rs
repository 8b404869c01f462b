use std::fmt;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::WikiError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// A named unit of wiki content backed by one file.
///
/// Names are normalized on construction: surrounding whitespace is dropped
/// and interior spaces become underscores, so `Page with spaces` is stored
/// as `Page_with_spaces`. The display title restores the spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    name: String,
}

impl Page {
    /// Normalize a request parameter into a page.
    ///
    /// Rejects names that are empty or would escape the page directory.
    pub fn new(raw: &str) -> Result<Self, WikiError> {
        let name = raw.trim().replace(' ', "_");
        if name.is_empty()
            || name.contains('/')
            || name.contains('\\')
            || name == "."
            || name.split('_').any(|part| part == "..")
        {
            return Err(WikiError::InvalidPageName(raw.to_string()));
        }
        Ok(Self { name })
    }

    /// Normalized identifier, used as the backing file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display title with underscores restored to spaces
    pub fn title(&self) -> String {
        self.name.replace('_', " ")
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Search result information
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub page: Page,
    pub excerpt: String,
    pub relevance: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_spaces_to_underscores() {
        let page = Page::new("Page with spaces").unwrap();
        assert_eq!(page.name(), "Page_with_spaces");
        assert_eq!(page.title(), "Page with spaces");
    }

    #[test]
    fn title_restores_spaces() {
        let page = Page::new("Main_page").unwrap();
        assert_eq!(page.to_string(), "Main_page");
        assert_eq!(page.title(), "Main page");
    }

    #[test]
    fn plain_name_is_unchanged() {
        let page = Page::new("Page").unwrap();
        assert_eq!(page.name(), "Page");
        assert_eq!(page.title(), "Page");
    }

    #[test]
    fn rejects_traversal_and_empty_names() {
        assert!(Page::new("").is_err());
        assert!(Page::new("   ").is_err());
        assert!(Page::new("../secret").is_err());
        assert!(Page::new("a/b").is_err());
        assert!(Page::new("a\\b").is_err());
        assert!(Page::new("..").is_err());
    }
}
