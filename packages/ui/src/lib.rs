//! Shared Dioxus components for the Bookshelf client.
//!
//! Views live in the platform crates; everything they share (status tags,
//! the borrow status panel, the infinite-scroll container and the paged list
//! hook) lives here.

use dioxus::prelude::*;

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod timer;

mod context;
pub use context::{use_client, use_shelf, Shelf, ShelfProvider};

pub mod notifications;
pub use notifications::{notify, notify_error, use_notifications, Notifications, NotificationStack};

mod markers;
pub use markers::make_reading_progress;
#[cfg(target_arch = "wasm32")]
pub use markers::LocalStorageMarkers;

mod navbar;
pub use navbar::Navbar;

mod status_tag;
pub use status_tag::{
    BookStatusTag, BorrowStatusPicker, BorrowStatusTag, StatusChoice, StatusMenu, Tag,
    UserRoleTag, UserStatusPicker, UserStatusTag, ViolationTag,
};

mod borrow_status;
pub use borrow_status::{BorrowDetails, BorrowStatusPanel};

mod book_card;
pub use book_card::BookCard;

mod paged_list;
pub use paged_list::{use_paged_list, ListSource, PagedList};

mod infinite_scroll;
pub use infinite_scroll::InfiniteScroll;

mod reader;
pub use reader::ReadingPanel;

pub mod views;
