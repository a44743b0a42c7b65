mod shell;
pub use shell::Shell;

mod catalog;
pub use catalog::Catalog;

mod book_detail;
pub use book_detail::BookDetail;

mod my_borrows;
pub use my_borrows::{MyBorrows, Profile};

mod admin;
pub use admin::{BookManager, BorrowManager, UserManager, ViolationManager};
