//! # Reading progress: the last-read-page marker
//!
//! The only state the client keeps offline: for each e-book, the page the
//! reader last had on screen. Markers live in a [`MarkerStore`], a tiny async
//! key/value interface with one implementation per platform:
//!
//! | Store | Platform |
//! |-------|----------|
//! | [`MemoryMarkers`] | tests, fallback |
//! | [`FileMarkers`] | desktop (one file per marker under a data directory) |
//! | `LocalStorageMarkers` (in the `ui` crate) | web, `window.localStorage` |
//!
//! Keys are `last-read-page{book_id}`. A missing or unparsable marker means
//! page 1.
//!
//! [`page_window`] picks the pages rendered around the marker when a book is
//! reopened: ten on either side, clamped to the document. Viewers that cannot
//! report the document length use [`jump_targets`], which clamps to the
//! furthest page reached instead.

use std::collections::HashMap;
use std::future::Future;
use std::ops::RangeInclusive;
use std::sync::{Arc, Mutex, PoisonError};

/// Pages rendered on either side of the marker.
pub const WINDOW_RADIUS: u32 = 10;

/// Async key/value storage for reading markers.
pub trait MarkerStore {
    fn get(&self, key: &str) -> impl Future<Output = Option<String>>;
    fn set(&self, key: &str, value: String) -> impl Future<Output = ()>;
}

/// In-memory MarkerStore for testing and platforms without storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryMarkers {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryMarkers {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkerStore for MemoryMarkers {
    async fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    async fn set(&self, key: &str, value: String) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
    }
}

/// Filesystem-backed MarkerStore: `<base>/<key>` holds the page number.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct FileMarkers {
    base: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileMarkers {
    pub fn new(base: std::path::PathBuf) -> Self {
        Self { base }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MarkerStore for FileMarkers {
    async fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.base.join(key)).ok()
    }

    async fn set(&self, key: &str, value: String) {
        if let Err(e) = std::fs::create_dir_all(&self.base)
            .and_then(|()| std::fs::write(self.base.join(key), value))
        {
            tracing::warn!("Failed to save reading marker {key}: {e}");
        }
    }
}

/// Reads and writes last-read-page markers.
pub struct ReadingProgress<S: MarkerStore> {
    store: S,
}

impl<S: MarkerStore> ReadingProgress<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn marker_key(book_id: &str) -> String {
        format!("last-read-page{book_id}")
    }

    /// Last page read, 1 if none was recorded.
    pub async fn last_page(&self, book_id: &str) -> u32 {
        self.store
            .get(&Self::marker_key(book_id))
            .await
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }

    pub async fn save_page(&self, book_id: &str, page: u32) {
        self.store
            .set(&Self::marker_key(book_id), page.max(1).to_string())
            .await;
    }
}

/// Pages to render when reopening at `last_page` of a `total_pages` document.
pub fn page_window(last_page: u32, total_pages: u32) -> RangeInclusive<u32> {
    let start = last_page.saturating_sub(WINDOW_RADIUS).max(1);
    let end = last_page.saturating_add(WINDOW_RADIUS).min(total_pages);
    start..=end
}

/// Pages offered for a direct jump when the document length is unknown: the
/// window around `current`, never past the furthest page already reached.
pub fn jump_targets(current: u32, furthest: u32) -> RangeInclusive<u32> {
    page_window(current.max(1), furthest.max(current).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_marker_defaults_to_first_page() {
        let progress = ReadingProgress::new(MemoryMarkers::new());
        assert_eq!(progress.last_page("b1").await, 1);

        progress.save_page("b1", 37).await;
        assert_eq!(progress.last_page("b1").await, 37);
        assert_eq!(progress.last_page("b2").await, 1);
    }

    #[tokio::test]
    async fn test_garbage_marker_is_ignored() {
        let store = MemoryMarkers::new();
        store.set("last-read-pageb1", "NaN".to_string()).await;
        store.set("last-read-pageb2", "0".to_string()).await;
        let progress = ReadingProgress::new(store);
        assert_eq!(progress.last_page("b1").await, 1);
        assert_eq!(progress.last_page("b2").await, 1);
    }

    #[test]
    fn test_marker_key() {
        assert_eq!(
            ReadingProgress::<MemoryMarkers>::marker_key("42"),
            "last-read-page42"
        );
    }

    #[test]
    fn test_page_window_clamps() {
        assert_eq!(page_window(1, 300), 1..=11);
        assert_eq!(page_window(50, 300), 40..=60);
        assert_eq!(page_window(295, 300), 285..=300);
        assert_eq!(page_window(3, 5), 1..=5);
    }

    #[test]
    fn test_jump_targets_stop_at_furthest_page() {
        assert_eq!(jump_targets(1, 1), 1..=1);
        assert_eq!(jump_targets(37, 37), 27..=37);
        assert_eq!(jump_targets(30, 37), 20..=37);
        assert_eq!(jump_targets(5, 60), 1..=15);
        // A page past the recorded furthest one extends the range.
        assert_eq!(jump_targets(40, 37), 30..=40);
    }

    #[tokio::test]
    async fn test_file_markers_roundtrip() {
        let dir = std::env::temp_dir().join(format!("bookshelf_markers_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        ReadingProgress::new(FileMarkers::new(dir.clone()))
            .save_page("dune", 12)
            .await;
        let reopened = ReadingProgress::new(FileMarkers::new(dir.clone()));
        assert_eq!(reopened.last_page("dune").await, 12);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
