//! Flat-file page persistence
//!
//! Each page lives in `<root>/<title>.txt`. The file system is the only source
//! of truth; nothing is cached between requests.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::page::{Page, Title};

const PAGE_EXTENSION: &str = "txt";

/// Owner read/write only
#[cfg(unix)]
const PAGE_FILE_MODE: u32 = 0o600;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("page {0} not found")]
    NotFound(Title),

    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Reads and writes pages under a root directory
#[derive(Debug, Clone)]
pub struct PageStore {
    root: PathBuf,
}

impl PageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File backing the given title
    pub fn path_for(&self, title: &Title) -> PathBuf {
        self.root.join(format!("{title}.{PAGE_EXTENSION}"))
    }

    pub async fn load(&self, title: &Title) -> Result<Page, StoreError> {
        let path = self.path_for(title);
        match fs::read(&path).await {
            Ok(body) => Ok(Page::new(title.clone(), body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(title.clone()))
            }
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// Write the page body, creating or truncating its file. Last write wins.
    pub async fn save(&self, page: &Page) -> Result<(), StoreError> {
        let path = self.path_for(&page.title);
        write_page_file(&path, &page.body)
            .await
            .map_err(|source| StoreError::Io { path, source })
    }
}

async fn write_page_file(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(PAGE_FILE_MODE);

    let mut file = options.open(path).await?;
    file.write_all(body).await?;
    file.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(s: &str) -> Title {
        Title::parse(s).unwrap()
    }

    #[test]
    fn test_path_for_appends_txt() {
        let store = PageStore::new("/srv/wiki");
        assert_eq!(
            store.path_for(&title("FrontPage")),
            PathBuf::from("/srv/wiki/FrontPage.txt")
        );
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path());

        let page = Page::new(title("Test"), b"Hello\nworld".to_vec());
        store.save(&page).await.unwrap();

        let loaded = store.load(&title("Test")).await.unwrap();
        assert_eq!(loaded, page);
        assert_eq!(
            std::fs::read(dir.path().join("Test.txt")).unwrap(),
            b"Hello\nworld"
        );
    }

    #[tokio::test]
    async fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path());

        let err = store.load(&title("Nope")).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "page Nope not found");
    }

    #[tokio::test]
    async fn test_empty_body_creates_zero_length_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path());

        store.save(&Page::empty(title("Blank"))).await.unwrap();

        let meta = std::fs::metadata(dir.path().join("Blank.txt")).unwrap();
        assert_eq!(meta.len(), 0);
        assert!(store.load(&title("Blank")).await.unwrap().body.is_empty());
    }

    #[tokio::test]
    async fn test_second_save_overwrites_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path());

        store
            .save(&Page::new(title("Twice"), b"a much longer first body".to_vec()))
            .await
            .unwrap();
        store
            .save(&Page::new(title("Twice"), b"second".to_vec()))
            .await
            .unwrap();

        let loaded = store.load(&title("Twice")).await.unwrap();
        assert_eq!(loaded.body, b"second");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path());
        store
            .save(&Page::new(title("Private"), b"x".to_vec()))
            .await
            .unwrap();

        let mode = std::fs::metadata(dir.path().join("Private.txt"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o077, 0);
        assert_eq!(mode & 0o600, 0o600);
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(dir.path().join("does-not-exist"));

        let err = store
            .save(&Page::new(title("Lost"), b"x".to_vec()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(err.to_string().contains("Lost.txt"));
    }
}
