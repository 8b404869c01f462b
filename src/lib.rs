//! Folio - a minimal file-backed wiki
//!
//! Pages are flat text files rendered through a pluggable markup parser
//! (MediaWiki-style or Markdown) and served through basic-auth protected
//! web endpoints.

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod types;
pub mod utils;
pub mod views;

// Re-export commonly used items
pub use config::Config;
pub use errors::WikiError;
pub use services::{MarkupService, PageStore, ParserMode, SearchService};
pub use types::{AppState, Page, SearchResult};
