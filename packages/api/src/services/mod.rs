//! Endpoint wrappers, one module per backend area. Each adds methods to
//! [`ApiClient`](crate::ApiClient). Paged lists are read through
//! [`sources`](crate::sources) and only contribute their paths here.

mod books;
mod borrows;
mod recommend;
mod users;
mod violations;

pub use books::{
    ADD_CATEGORY, BOOK_LIST, BOOK_NUMBER, BOOK_UPLOAD, CATEGORY_LIST, DELETE_BOOK, GET_BOOK,
    SET_BOOK_NUMBER, UPDATE_BOOK,
};
pub use borrows::{
    ADMIN_BORROW_LIST, BORROW_BOOK, CANCEL_BORROW, MY_BORROW_LIST, SET_BORROW_STATUS,
};
pub use recommend::{HOT_BOOKS, RECOMMENDATIONS, RECORD_BEHAVIOR};
pub use users::{ADD_USER, CHANGE_USER_STATUS, CURRENT_USER, GET_USER, UPDATE_INFO, USER_LIST};
pub use violations::{ADMIN_VIOLATION_LIST, MY_VIOLATION_LIST};
