//! # Records exchanged with the library backend
//!
//! All types use camelCase JSON field names, matching the backend's payloads.
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`BorrowRecord`] | One reservation/loan transaction. Status and timestamps are authoritative on the server; the client only renders them. |
//! | [`Book`] | A catalog entry, optionally carrying a recommendation `heatScore`. |
//! | [`ViolationRecord`] | A penalty entry (late return, lost book, expired reservation). |
//! | [`User`] | A library account with its credit score. |
//! | [`Category`] | A catalog category. |
//! | [`Page`] / [`PageParam`] | The list payload `{ data, total }` and the `pageParam` request field. |
//!
//! Timestamps arrive either as RFC 3339 strings or as zone-less
//! `YYYY-MM-DDTHH:MM:SS` values; the [`timestamp`] module accepts both and treats
//! zone-less values as UTC wall-clock so they render back unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{BookStatus, BorrowStatus, UserRole, UserStatus, ViolationType};

/// A single borrow transaction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub book_id: String,
    pub status: BorrowStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub borrow_time: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub due_time: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub return_time: Option<DateTime<Utc>>,
    /// Borrower's display name (admin listings only).
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Title of the borrowed book.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub borrow_days: Option<u32>,
}

impl BorrowRecord {
    /// Create a freshly applied record, the shape the backend returns right
    /// after a borrow request.
    pub fn applied(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            user_id: String::new(),
            book_id: String::new(),
            status: BorrowStatus::Applied,
            created_at,
            borrow_time: None,
            due_time: None,
            return_time: None,
            name: None,
            phone: None,
            title: None,
            borrow_days: None,
        }
    }

    /// Only a reservation that has not been picked up yet may be cancelled.
    pub fn is_cancellable(&self) -> bool {
        self.status == BorrowStatus::Applied
    }
}

/// A catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Relative object-storage path of the cover image.
    #[serde(default)]
    pub cover: Option<String>,
    /// Relative object-storage path of the e-book PDF.
    #[serde(default)]
    pub ebook: Option<String>,
    #[serde(default)]
    pub intro: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub press: String,
    pub status: BookStatus,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Physical copies on the shelf.
    #[serde(default)]
    pub book_number: Option<u32>,
    /// Popularity score on the hot-books list.
    #[serde(default)]
    pub heat_score: Option<f64>,
}

/// A penalty entry affecting a user's credit score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRecord {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub borrow_id: String,
    #[serde(default)]
    pub book_id: String,
    #[serde(default)]
    pub title: String,
    pub violation_type: ViolationType,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A library account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default = "default_role")]
    pub role: UserRole,
    pub status: UserStatus,
    #[serde(default)]
    pub credit_score: i32,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_role() -> UserRole {
    UserRole::User
}

impl User {
    /// Display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// One page of a list endpoint: `{ "data": [...], "total": n }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
}

/// The `pageParam` object every list request carries. `current` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParam {
    pub current: u32,
    pub page_size: u32,
}

impl PageParam {
    pub fn first(page_size: u32) -> Self {
        Self {
            current: 1,
            page_size,
        }
    }
}

/// Serde adapter for backend timestamps.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    /// Parse an RFC 3339 or zone-less timestamp.
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    /// Optional timestamps: `null`, a missing field and `""` all mean absent.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            ts: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => super::serialize(ts, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw: Option<String> = Option::deserialize(deserializer)?;
            match raw.as_deref().map(str::trim) {
                None | Some("") => Ok(None),
                Some(value) => super::parse(value)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {value}"))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_borrow_record_from_backend_json() {
        let json = r#"{
            "id": "42",
            "userId": "7",
            "bookId": "9",
            "title": "Dune",
            "status": "BORROWED",
            "createdAt": "2024-05-01T10:00:00",
            "borrowTime": "2024-05-01 12:30:00",
            "dueTime": "2024-05-31T12:30:00Z",
            "returnTime": null
        }"#;
        let record: BorrowRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, BorrowStatus::Borrowed);
        assert_eq!(
            record.created_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
        assert_eq!(
            record.borrow_time,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
        assert_eq!(
            record.due_time,
            Some(Utc.with_ymd_and_hms(2024, 5, 31, 12, 30, 0).unwrap())
        );
        assert!(record.return_time.is_none());
        assert_eq!(record.title.as_deref(), Some("Dune"));
    }

    #[test]
    fn test_personal_record_without_owner_fields() {
        let json = r#"{"id":"1","title":"Emma","status":"APPLIED","createdAt":"2024-05-01T10:00:00.123","dueTime":""}"#;
        let record: BorrowRecord = serde_json::from_str(json).unwrap();
        assert!(record.user_id.is_empty());
        assert!(record.due_time.is_none());
        assert!(record.is_cancellable());
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let json = r#"{"id":"1","status":"APPLIED","createdAt":"yesterday"}"#;
        assert!(serde_json::from_str::<BorrowRecord>(json).is_err());
    }

    #[test]
    fn test_page_param_wire_shape() {
        let value = serde_json::to_value(PageParam::first(8)).unwrap();
        assert_eq!(value, serde_json::json!({ "current": 1, "pageSize": 8 }));
    }

    #[test]
    fn test_user_display_name() {
        let json = r#"{"id":"3","username":"reader","status":"ACTIVE","creditScore":95}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name(), "reader");
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.credit_score, 95);
    }
}
