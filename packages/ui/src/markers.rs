//! Platform reading-marker store.
//!
//! - **Web** (WASM): `window.localStorage` via [`LocalStorageMarkers`]
//! - **Desktop** (native): one file per marker under `<data_dir>/bookshelf/markers/`

use shelf::{MarkerStore, ReadingProgress};

/// Create the reading-progress tracker for the current platform.
pub fn make_reading_progress() -> ReadingProgress<impl MarkerStore> {
    #[cfg(target_arch = "wasm32")]
    {
        ReadingProgress::new(LocalStorageMarkers)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("bookshelf")
            .join("markers");
        ReadingProgress::new(shelf::FileMarkers::new(base))
    }
}

/// Markers kept in the browser's `localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageMarkers;

#[cfg(target_arch = "wasm32")]
impl LocalStorageMarkers {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(target_arch = "wasm32")]
impl MarkerStore for LocalStorageMarkers {
    async fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    async fn set(&self, key: &str, value: String) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, &value).is_err() {
                    tracing::warn!("localStorage rejected reading marker {key}");
                }
            }
            None => tracing::warn!("localStorage unavailable, marker {key} not saved"),
        }
    }
}
