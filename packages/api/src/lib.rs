//! # API crate: HTTP client for the library backend
//!
//! Every backend call is a `POST` answered with the `{ status, msg, data }`
//! envelope. This crate owns the transport, the envelope rules and one
//! wrapper per endpoint; views never build URLs or parse JSON themselves.
//!
//! ## Modules
//!
//! | Module | Target | Purpose |
//! |--------|--------|---------|
//! | [`client`] | all | [`ApiClient`]: base URL, bearer token, JSON, form and multipart `POST`s |
//! | [`envelope`] | all | Envelope decoding: `success` / `fail` / malformed |
//! | [`error`] | all | [`ApiError`], the single error type surfaced to the UI |
//! | [`request`] | all | Filter structs and request bodies (`pageParam`, forms) |
//! | [`services`] | all | Endpoint wrappers: books, borrows, violations, users, recommendations |
//! | [`sources`] | all | [`PageSource`](shelf::PageSource) adapters feeding [`Paginator`](shelf::Paginator)s |
//! | [`settings`] | native | Layered `bookshelf.toml` + environment loading via `config` |
//!
//! ## Endpoints
//!
//! - **Catalog**: `book_by_id`, `categories`, `book_number`
//! - **Catalog admin**: `create_book`, `update_book`, `delete_book`, `set_book_number`, `add_category`
//! - **Borrowing**: `borrow_book`, `cancel_borrow`, `set_borrow_status`
//! - **Users**: `change_user_status`, `user_by_id`, `add_user`
//! - **Profile**: `current_user`, `update_profile`, `change_password`
//! - **Recommendations**: `recommendations`, `hot_books`, `record_behavior`
//!
//! The paged lists (catalog, borrows, violations, users) are read through the
//! [`sources`] adapters.

pub mod client;
pub mod envelope;
pub mod error;
pub mod request;
pub mod services;
#[cfg(not(target_arch = "wasm32"))]
pub mod settings;
pub mod sources;

pub use client::ApiClient;
pub use error::ApiError;
pub use request::{
    Behavior, BookDraft, BookFilters, BorrowFilters, FormError, NewUser, PasswordChange,
    ProfileUpdate, UserFilters, ViolationFilters,
};
pub use sources::{BookPages, BorrowPages, ListEndpoint, UserPages, ViolationPages};
