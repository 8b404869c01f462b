pub mod markdown;
pub mod mediawiki;

/// Markup syntax selected through configuration.
///
/// Unknown or unset mode strings resolve to `Mediawiki`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserMode {
    #[default]
    Mediawiki,
    Markdown,
}

impl ParserMode {
    /// Resolve a configuration string to a mode
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "markdown" => ParserMode::Markdown,
            _ => ParserMode::Mediawiki,
        }
    }
}

/// Service converting raw page text to an HTML fragment.
///
/// The mode is fixed at construction; rendering is a pure function of
/// (text, mode). Malformed input degrades to paragraph-wrapped text.
pub struct MarkupService {
    mode: ParserMode,
}

impl MarkupService {
    /// Create a new markup service for the given mode
    pub fn new(mode: ParserMode) -> Self {
        Self { mode }
    }

    /// Render raw page text to an HTML fragment
    pub fn render(&self, text: &str) -> String {
        match self.mode {
            ParserMode::Markdown => markdown::render(text),
            ParserMode::Mediawiki => mediawiki::render(text),
        }
    }
}
