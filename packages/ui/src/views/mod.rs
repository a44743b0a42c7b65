mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod confirm_dialog;
pub use confirm_dialog::ConfirmDialog;

mod catalog;
pub use catalog::CatalogView;

mod book_detail;
pub use book_detail::BookDetailView;

mod my_borrows;
pub use my_borrows::MyBorrowsView;

mod borrow_manager;
pub use borrow_manager::BorrowManagerView;

mod violation_manager;
pub use violation_manager::ViolationManagerView;

mod user_manager;
pub use user_manager::UserManagerView;

mod book_manager;
pub use book_manager::BookManagerView;

mod profile;
pub use profile::ProfileView;
