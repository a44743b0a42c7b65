//! # Shelf: platform-free core of the Bookshelf client
//!
//! Everything in this crate is independent of Dioxus and of the HTTP transport,
//! so it compiles unchanged for WASM, desktop and the test harness.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Records exchanged with the library backend (borrows, books, violations, users) and the page envelope. |
//! | [`status`] | The single status → descriptor table (label, colour, tone) for every enumerated field. |
//! | [`derive`] | Borrow-status derivation: status message and supplementary text for a record at a given instant. |
//! | [`paging`] | [`Paginator`], the "first page + load more" coordinator with an in-flight guard and stale-response filtering. |
//! | [`scroll`] | Scroll trigger policy: near-bottom check and debounce window. |
//! | [`config`] | `bookshelf.toml` client configuration. |
//! | [`reading`] | Last-read-page marker for e-books and the initial page window. |
//! | [`format`] | Timestamp, asset URL and file name formatting helpers. |

pub mod config;
pub mod derive;
pub mod format;
pub mod models;
pub mod paging;
pub mod reading;
pub mod scroll;
pub mod status;

mod clock;
pub use clock::now_millis;

pub use config::{ConfigError, ShelfConfig};
pub use derive::{derive_status, Derivation, StatusInfo};
pub use models::{Book, BorrowRecord, Category, Page, PageParam, User, ViolationRecord};
pub use paging::{FetchOutcome, PageSource, PageState, Paginator, Phase, SkipReason};
pub use reading::{MarkerStore, MemoryMarkers, ReadingProgress};
pub use scroll::{Debounce, ScrollMetrics, ScrollTrigger};
pub use status::{
    BookStatus, BorrowStatus, Descriptor, Tone, Transition, UserRole, UserStatus, ViolationType,
};

#[cfg(not(target_arch = "wasm32"))]
pub use reading::FileMarkers;
