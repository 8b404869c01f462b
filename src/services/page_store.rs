use std::fs;
use std::path::PathBuf;

use log::{debug, error, info, warn};

use crate::errors::WikiError;
use crate::types::Page;

/// Service for reading and writing page files.
///
/// Every page is one flat file in the base directory, named after the
/// page's normalized identifier. A missing file is a normal case and
/// surfaces as `None`, never as an empty-string sentinel.
#[derive(Clone)]
pub struct PageStore {
    base_dir: PathBuf,
}

impl PageStore {
    /// Create a new page store
    pub fn new(base_dir: PathBuf) -> Self {
        debug!("Creating PageStore with base directory: {:?}", base_dir);
        Self { base_dir }
    }

    /// Backing file path for a page
    pub fn page_path(&self, page: &Page) -> PathBuf {
        self.base_dir.join(page.name())
    }

    /// Read page content, `None` if the page file does not exist
    pub fn read(&self, page: &Page) -> Result<Option<String>, WikiError> {
        let path = self.page_path(page);
        if !path.is_file() {
            debug!("Page file does not exist: {:?}", path);
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| {
            error!("Failed to read page {:?}: {}", path, e);
            WikiError::Io(e)
        })?;
        info!("Read page {}, {} bytes", page, content.len());
        Ok(Some(content))
    }

    /// Write page content, replacing any previous version
    pub fn write(&self, page: &Page, content: &str) -> Result<(), WikiError> {
        if !self.base_dir.is_dir() {
            fs::create_dir_all(&self.base_dir).map_err(|e| {
                error!("Failed to create page directory {:?}: {}", self.base_dir, e);
                WikiError::Io(e)
            })?;
        }
        let path = self.page_path(page);
        fs::write(&path, content).map_err(|e| {
            error!("Failed to write page {:?}: {}", path, e);
            WikiError::Io(e)
        })?;
        info!("Wrote page {}, {} bytes", page, content.len());
        Ok(())
    }

    /// Delete a page's backing file; deleting a missing page is a no-op
    pub fn delete(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.page_path(page);
        if !path.is_file() {
            warn!("Delete requested for missing page: {}", page);
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| {
            error!("Failed to delete page {:?}: {}", path, e);
            WikiError::Io(e)
        })?;
        info!("Deleted page {}", page);
        Ok(())
    }

    /// Check whether a page file exists
    pub fn exists(&self, page: &Page) -> bool {
        self.page_path(page).is_file()
    }

    /// List all page names, alphabetically
    pub fn list(&self) -> Result<Vec<String>, WikiError> {
        if !self.base_dir.is_dir() {
            warn!("Page directory does not exist: {:?}", self.base_dir);
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.base_dir).map_err(|e| {
            error!("Failed to read page directory {:?}: {}", self.base_dir, e);
            WikiError::Io(e)
        })?;

        let mut names = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => {
                    let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
                    if !is_file {
                        continue;
                    }
                    if let Some(name) = entry.file_name().to_str() {
                        if !name.starts_with('.') {
                            names.push(name.to_string());
                        }
                    }
                }
                Err(e) => {
                    warn!("Failed to read page directory entry: {}", e);
                }
            }
        }
        names.sort();
        info!("Listed {} pages in {:?}", names.len(), self.base_dir);
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (PageStore, TempDir) {
        let dir = TempDir::new().unwrap();
        (PageStore::new(dir.path().to_path_buf()), dir)
    }

    #[test]
    fn write_then_read_round_trips() {
        let (store, _dir) = store();
        let page = Page::new("Page").unwrap();
        store.write(&page, "some content").unwrap();
        assert_eq!(store.read(&page).unwrap().as_deref(), Some("some content"));
    }

    #[test]
    fn missing_page_reads_as_none() {
        let (store, _dir) = store();
        let page = Page::new("Missing").unwrap();
        assert_eq!(store.read(&page).unwrap(), None);
        assert!(!store.exists(&page));
    }

    #[test]
    fn delete_removes_the_file() {
        let (store, _dir) = store();
        let page = Page::new("Page").unwrap();
        store.write(&page, "content").unwrap();
        store.delete(&page).unwrap();
        assert_eq!(store.read(&page).unwrap(), None);
    }

    #[test]
    fn delete_of_missing_page_is_a_noop() {
        let (store, _dir) = store();
        let page = Page::new("Missing").unwrap();
        assert!(store.delete(&page).is_ok());
    }

    #[test]
    fn list_is_sorted_and_skips_hidden_files() {
        let (store, dir) = store();
        store.write(&Page::new("Zebra").unwrap(), "z").unwrap();
        store.write(&Page::new("Apple").unwrap(), "a").unwrap();
        std::fs::write(dir.path().join(".hidden"), "x").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();
        assert_eq!(store.list().unwrap(), vec!["Apple", "Zebra"]);
    }

    #[test]
    fn write_creates_the_page_directory() {
        let dir = TempDir::new().unwrap();
        let store = PageStore::new(dir.path().join("nested"));
        let page = Page::new("Page").unwrap();
        store.write(&page, "content").unwrap();
        assert_eq!(store.read(&page).unwrap().as_deref(), Some("content"));
    }

    #[test]
    fn missing_directory_lists_empty() {
        let store = PageStore::new(PathBuf::from("/nonexistent/never"));
        assert!(store.list().unwrap().is_empty());
    }
}
