use std::path::PathBuf;

use crate::services::ParserMode;

/// Application configuration.
///
/// Loaded from environment variables:
/// - `FOLIO_PAGES_DIR`: page storage directory (default: pages)
/// - `FOLIO_MAIN_PAGE`: identifier of the page shown at the root (default: Main_page)
/// - `FOLIO_ALL_PAGE`: reserved identifier for the all-pages listing (default: All)
/// - `FOLIO_PARSER`: markup mode, `markdown` or `mediawiki` (default: mediawiki)
/// - `FOLIO_AUTH_USER` / `FOLIO_AUTH_PASSWORD`: the shared credential
/// - `FOLIO_HOST` / `FOLIO_PORT`: bind address (default: 0.0.0.0:5004)
#[derive(Debug, Clone)]
pub struct Config {
    pub pages_dir: PathBuf,
    pub main_page: String,
    pub all_page: String,
    pub parser: ParserMode,
    pub auth_user: String,
    pub auth_password: String,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self {
            pages_dir: std::env::var("FOLIO_PAGES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("pages")),
            main_page: std::env::var("FOLIO_MAIN_PAGE").unwrap_or_else(|_| "Main_page".to_string()),
            all_page: std::env::var("FOLIO_ALL_PAGE").unwrap_or_else(|_| "All".to_string()),
            parser: ParserMode::parse(&std::env::var("FOLIO_PARSER").unwrap_or_default()),
            auth_user: std::env::var("FOLIO_AUTH_USER").unwrap_or_else(|_| "user".to_string()),
            auth_password: std::env::var("FOLIO_AUTH_PASSWORD")
                .unwrap_or_else(|_| "password".to_string()),
            host: std::env::var("FOLIO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("FOLIO_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5004),
        }
    }

    /// Create config with an explicit pages directory (for testing)
    pub fn with_pages_dir(pages_dir: PathBuf) -> Self {
        Self {
            pages_dir,
            main_page: "Main_page".to_string(),
            all_page: "All".to_string(),
            parser: ParserMode::Mediawiki,
            auth_user: "user".to_string(),
            auth_password: "password".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5004,
        }
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        use std::net::ToSocketAddrs;
        format!("{}:{}", self.host, self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "unresolvable bind address")
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::with_pages_dir(PathBuf::from("/test/pages"));
        assert_eq!(config.pages_dir, PathBuf::from("/test/pages"));
        assert_eq!(config.main_page, "Main_page");
        assert_eq!(config.all_page, "All");
        assert_eq!(config.parser, ParserMode::Mediawiki);
        assert_eq!(config.port, 5004);
    }

    #[test]
    fn test_socket_addr() {
        let mut config = Config::with_pages_dir(PathBuf::from("/test/pages"));
        config.host = "127.0.0.1".to_string();
        config.port = 8080;
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
