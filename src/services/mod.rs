pub mod markup;
pub mod page_store;
pub mod search_service;

pub use markup::{MarkupService, ParserMode};
pub use page_store::PageStore;
pub use search_service::SearchService;
