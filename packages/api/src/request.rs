//! Request bodies.
//!
//! Paged list endpoints take the filter fields at the top level plus a
//! `pageParam` object:
//!
//! ```json
//! { "title": "dune", "status": "AVAILABLE", "pageParam": { "current": 2, "pageSize": 8 } }
//! ```
//!
//! Unset filters are omitted rather than sent as `null`.

use serde::Serialize;
use shelf::{Book, BookStatus, BorrowStatus, PageParam, User, UserRole, UserStatus, ViolationType};
use thiserror::Error;

/// Filters merged with the page parameter.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery<'a, F: Serialize> {
    #[serde(flatten)]
    pub filters: &'a F,
    pub page_param: PageParam,
}

/// Catalog search.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookStatus>,
}

impl BookFilters {
    /// Blank text inputs mean "no filter".
    pub fn normalized(mut self) -> Self {
        self.title = non_blank(self.title);
        self.author = non_blank(self.author);
        self.category_id = non_blank(self.category_id);
        self
    }
}

/// Borrow listings, personal or administrative.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BorrowStatus>,
}

impl BorrowFilters {
    pub fn normalized(mut self) -> Self {
        self.id = non_blank(self.id);
        self.title = non_blank(self.title);
        self.name = non_blank(self.name);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation_type: Option<ViolationType>,
}

impl ViolationFilters {
    pub fn normalized(mut self) -> Self {
        self.name = non_blank(self.name);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl UserFilters {
    pub fn normalized(mut self) -> Self {
        self.username = non_blank(self.username);
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Longest loan a reader may request, in days.
pub const MAX_BORROW_DAYS: u32 = 30;

/// Parse the loan length typed by a reader; `None` outside `1..=30`.
pub fn parse_borrow_days(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|days| (1..=MAX_BORROW_DAYS).contains(days))
}

/// `borrowBook` form fields.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowForm<'a> {
    pub book_id: &'a str,
    pub borrow_days: u32,
}

/// `setBorrowStatus` body.
#[derive(Clone, Debug, Serialize)]
pub struct SetBorrowStatus<'a> {
    pub id: &'a str,
    pub status: &'a BorrowStatus,
}

/// Reader interactions fed to the recommender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Behavior {
    View,
    ReadOnline,
    Download,
    Borrow,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorEvent<'a> {
    pub book_id: &'a str,
    pub behavior_type: Behavior,
}

/// The recommendations endpoint takes its paging fields flat, without `pageParam`.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatPage {
    pub current: u32,
    pub page_size: u32,
}

impl From<PageParam> for FlatPage {
    fn from(page: PageParam) -> Self {
        Self {
            current: page.current,
            page_size: page.page_size,
        }
    }
}

/// Why a form was not sent.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be {min} to {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("phone must be an 11-digit mobile number")]
    Phone,

    #[error("the two passwords do not match")]
    PasswordMismatch,

    #[error("stock must be a whole number")]
    Stock,
}

fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Required { field });
    }
    Ok(())
}

fn length(field: &'static str, value: &str, min: usize, max: usize) -> Result<(), FormError> {
    let count = value.chars().count();
    if count < min || count > max {
        return Err(FormError::Length { field, min, max });
    }
    Ok(())
}

/// Mainland mobile numbers: 11 digits, `1`, then `3` to `9`.
pub fn is_valid_phone(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 11
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
}

fn phone(value: &str) -> Result<(), FormError> {
    require("phone", value)?;
    if !is_valid_phone(value.trim()) {
        return Err(FormError::Phone);
    }
    Ok(())
}

/// Parse a stock count typed by an administrator.
pub fn parse_stock(raw: &str) -> Result<u32, FormError> {
    raw.trim().parse::<u32>().map_err(|_| FormError::Stock)
}

/// Catalog entry as created or edited by an administrator. Sent as the
/// `bookData` JSON part of the upload forms.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub title: String,
    pub isbn: String,
    pub author: String,
    pub press: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    pub status: BookStatus,
    pub book_number: u32,
    pub intro: String,
}

impl Default for BookDraft {
    /// New entries start out not lending, with no copies.
    fn default() -> Self {
        Self {
            title: String::new(),
            isbn: String::new(),
            author: String::new(),
            press: String::new(),
            category_id: None,
            status: BookStatus::Maintenance,
            book_number: 0,
            intro: String::new(),
        }
    }
}

impl BookDraft {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            author: book.author.clone(),
            press: book.press.clone(),
            category_id: book.category_id.clone(),
            status: book.status.clone(),
            book_number: book.book_number.unwrap_or(0),
            intro: book.intro.clone(),
        }
    }

    /// Marking every copy as out empties the shelf.
    pub fn set_status(&mut self, status: BookStatus) {
        if status == BookStatus::Borrowed {
            self.book_number = 0;
        }
        self.status = status;
    }

    /// A book with no copies left cannot be lent.
    pub fn set_stock(&mut self, book_number: u32) {
        self.book_number = book_number;
        if book_number == 0 {
            self.status = BookStatus::Maintenance;
        }
    }

    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();
        self.isbn = self.isbn.trim().to_string();
        self.press = self.press.trim().to_string();
        self.category_id = non_blank(self.category_id);
        self
    }

    pub fn validate(&self) -> Result<(), FormError> {
        require("title", &self.title)?;
        require("author", &self.author)?;
        Ok(())
    }
}

/// `setBookNumber` body.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBookNumber<'a> {
    pub book_id: &'a str,
    pub book_number: u32,
}

/// `addUser` body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub password_again: String,
    pub name: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl Default for NewUser {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            password_again: String::new(),
            name: String::new(),
            phone: String::new(),
            role: UserRole::User,
            status: UserStatus::Active,
        }
    }
}

impl NewUser {
    pub fn validate(&self) -> Result<(), FormError> {
        require("username", &self.username)?;
        length("username", &self.username, 2, 16)?;
        require("password", &self.password)?;
        length("password", &self.password, 6, 20)?;
        if self.password != self.password_again {
            return Err(FormError::PasswordMismatch);
        }
        require("name", &self.name)?;
        length("name", &self.name, 1, 16)?;
        phone(&self.phone)
    }
}

/// Editable profile fields, sent as the `updateData` part of `updateInfo`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub username: String,
    pub name: String,
    pub phone: String,
}

impl ProfileUpdate {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            name: user.name.clone().unwrap_or_default(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        require("username", &self.username)?;
        length("username", &self.username, 2, 16)?;
        length("name", &self.name, 0, 16)?;
        phone(&self.phone)
    }
}

/// Password change. `confirm` is checked locally and never sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub password: String,
    #[serde(skip)]
    pub confirm: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), FormError> {
        require("current password", &self.old_password)?;
        require("new password", &self.password)?;
        length("new password", &self.password, 6, 20)?;
        if self.password != self.confirm {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_query_flattens_filters() {
        let filters = BookFilters {
            title: Some("dune".to_string()),
            status: Some(BookStatus::Available),
            ..BookFilters::default()
        };
        let body = ListQuery {
            filters: &filters,
            page_param: PageParam {
                current: 2,
                page_size: 8,
            },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "title": "dune",
                "status": "AVAILABLE",
                "pageParam": { "current": 2, "pageSize": 8 }
            })
        );
    }

    #[test]
    fn test_empty_filters_send_only_page() {
        let body = ListQuery {
            filters: &BorrowFilters::default(),
            page_param: PageParam::first(8),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "pageParam": { "current": 1, "pageSize": 8 } })
        );
    }

    #[test]
    fn test_blank_inputs_are_dropped() {
        let filters = BookFilters {
            title: Some("   ".to_string()),
            author: Some(" Herbert ".to_string()),
            ..BookFilters::default()
        }
        .normalized();
        assert_eq!(filters.title, None);
        assert_eq!(filters.author.as_deref(), Some("Herbert"));
    }

    #[test]
    fn test_borrow_status_filter_wire_value() {
        let filters = BorrowFilters {
            status: Some(BorrowStatus::Overdue),
            ..BorrowFilters::default()
        };
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            json!({ "status": "OVERDUE" })
        );
    }

    #[test]
    fn test_borrow_days_range() {
        assert_eq!(parse_borrow_days(" 14 "), Some(14));
        assert_eq!(parse_borrow_days("30"), Some(30));
        assert_eq!(parse_borrow_days("0"), None);
        assert_eq!(parse_borrow_days("31"), None);
        assert_eq!(parse_borrow_days("two weeks"), None);
    }

    #[test]
    fn test_behavior_event() {
        let event = BehaviorEvent {
            book_id: "9",
            behavior_type: Behavior::ReadOnline,
        };
        assert_eq!(
            serde_json::to_value(event).unwrap(),
            json!({ "bookId": "9", "behaviorType": "READ_ONLINE" })
        );
    }

    #[test]
    fn test_set_borrow_status_body() {
        let status = BorrowStatus::Returned;
        let body = SetBorrowStatus {
            id: "42",
            status: &status,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "id": "42", "status": "RETURNED" })
        );
    }

    #[test]
    fn test_phone_numbers() {
        assert!(is_valid_phone("13812345678"));
        assert!(is_valid_phone("19912345678"));
        assert!(!is_valid_phone("12812345678"));
        assert!(!is_valid_phone("1381234567"));
        assert!(!is_valid_phone("1381234567a"));
        assert!(!is_valid_phone("23812345678"));
    }

    #[test]
    fn test_book_draft_stock_rules() {
        let mut draft = BookDraft {
            status: BookStatus::Available,
            book_number: 4,
            ..BookDraft::default()
        };
        draft.set_status(BookStatus::Borrowed);
        assert_eq!(draft.book_number, 0);
        assert_eq!(draft.status, BookStatus::Borrowed);

        draft.set_status(BookStatus::Available);
        draft.set_stock(0);
        assert_eq!(draft.status, BookStatus::Maintenance);

        draft.set_stock(3);
        assert_eq!(draft.status, BookStatus::Maintenance);
        assert_eq!(draft.book_number, 3);
    }

    #[test]
    fn test_book_draft_wire_shape() {
        let draft = BookDraft {
            title: "  Dune ".to_string(),
            author: "Herbert".to_string(),
            category_id: Some(" ".to_string()),
            ..BookDraft::default()
        }
        .normalized();
        assert_eq!(draft.validate(), Ok(()));
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            json!({
                "title": "Dune",
                "isbn": "",
                "author": "Herbert",
                "press": "",
                "status": "MAINTENANCE",
                "bookNumber": 0,
                "intro": ""
            })
        );
        assert_eq!(
            BookDraft::default().validate(),
            Err(FormError::Required { field: "title" })
        );
        assert_eq!(parse_stock(" 12 "), Ok(12));
        assert_eq!(parse_stock("-1"), Err(FormError::Stock));
    }

    #[test]
    fn test_new_user_validation() {
        let user = NewUser {
            username: "reader".to_string(),
            password: "secret1".to_string(),
            password_again: "secret1".to_string(),
            name: "Ana".to_string(),
            phone: "13812345678".to_string(),
            ..NewUser::default()
        };
        assert_eq!(user.validate(), Ok(()));
        assert_eq!(
            serde_json::to_value(&user).unwrap()["passwordAgain"],
            json!("secret1")
        );

        let short = NewUser {
            username: "r".to_string(),
            ..user.clone()
        };
        assert_eq!(
            short.validate(),
            Err(FormError::Length {
                field: "username",
                min: 2,
                max: 16
            })
        );

        let mismatch = NewUser {
            password_again: "secret2".to_string(),
            ..user.clone()
        };
        assert_eq!(mismatch.validate(), Err(FormError::PasswordMismatch));

        let bad_phone = NewUser {
            phone: "555".to_string(),
            ..user
        };
        assert_eq!(bad_phone.validate(), Err(FormError::Phone));
    }

    #[test]
    fn test_password_change_keeps_confirm_local() {
        let change = PasswordChange {
            old_password: "secret1".to_string(),
            password: "secret22".to_string(),
            confirm: "secret22".to_string(),
        };
        assert_eq!(change.validate(), Ok(()));
        assert_eq!(
            serde_json::to_value(&change).unwrap(),
            json!({ "oldPassword": "secret1", "password": "secret22" })
        );
    }
}
