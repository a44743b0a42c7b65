//! # Response envelope
//!
//! Every backend endpoint answers with the same JSON envelope:
//!
//! ```json
//! { "status": "success" | "fail", "msg": "optional text", "data": ... }
//! ```
//!
//! `status` is required. A response without it is rejected with
//! [`ApiError::MissingStatus`] rather than being taken as success, and any other
//! value is [`ApiError::UnknownStatus`]. `fail` turns into [`ApiError::Failed`]
//! carrying `msg` (or a generic message when the server sent none).

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;

const SUCCESS: &str = "success";
const FAIL: &str = "fail";

/// Raw envelope as it comes off the wire.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    fn check(&self) -> Result<(), ApiError> {
        match self.status.as_deref() {
            Some(SUCCESS) => Ok(()),
            Some(FAIL) => Err(ApiError::Failed {
                message: self
                    .msg
                    .clone()
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| "request failed".to_string()),
            }),
            Some(other) => Err(ApiError::UnknownStatus(other.to_string())),
            None => Err(ApiError::MissingStatus),
        }
    }

    /// The payload of a successful response.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.check()?;
        self.data.ok_or(ApiError::MissingData)
    }

    /// Acknowledgement of a mutation: success plus the optional message.
    pub fn into_ack(self) -> Result<Option<String>, ApiError> {
        self.check()?;
        Ok(self.msg)
    }
}

/// Decode a body and unwrap its payload.
pub fn decode_data<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice::<Envelope<T>>(body)?.into_data()
}

/// Decode a mutation response. `data` is ignored whatever its shape.
pub fn decode_ack(body: &[u8]) -> Result<Option<String>, ApiError> {
    serde_json::from_slice::<Envelope<serde::de::IgnoredAny>>(body)?.into_ack()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf::{Book, BookStatus, Page, User, UserStatus};

    #[test]
    fn test_success_with_page() {
        let body = br#"{
            "status": "success",
            "data": {
                "data": [{"id": "1", "title": "Dune", "status": "AVAILABLE"}],
                "total": 11
            }
        }"#;
        let page: Page<Book> = decode_data(body).unwrap();
        assert_eq!(page.total, 11);
        assert_eq!(page.data[0].title, "Dune");
        assert_eq!(page.data[0].status, BookStatus::Available);
    }

    #[test]
    fn test_fail_carries_message() {
        let body = br#"{"status": "fail", "msg": "Credit score too low"}"#;
        let err = decode_data::<Page<Book>>(body).unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "Credit score too low");
    }

    #[test]
    fn test_fail_without_message() {
        let err = decode_ack(br#"{"status": "fail"}"#).unwrap_err();
        assert_eq!(err.to_string(), "request failed");
    }

    #[test]
    fn test_missing_status_is_not_success() {
        let err = decode_data::<Vec<u32>>(br#"{"data": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, ApiError::MissingStatus));
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_unknown_status() {
        let err = decode_ack(br#"{"status": "ok"}"#).unwrap_err();
        assert!(matches!(err, ApiError::UnknownStatus(s) if s == "ok"));
    }

    #[test]
    fn test_success_without_data() {
        let err = decode_data::<Book>(br#"{"status": "success", "data": null}"#).unwrap_err();
        assert!(matches!(err, ApiError::MissingData));
    }

    #[test]
    fn test_ack_ignores_payload() {
        let msg = decode_ack(br#"{"status": "success", "msg": "Cancelled", "data": {"id": 3}}"#)
            .unwrap();
        assert_eq!(msg.as_deref(), Some("Cancelled"));
    }

    #[test]
    fn test_unknown_user_status_keeps_the_page() {
        let body = br#"{
            "status": "success",
            "data": {
                "data": [
                    {"id": "1", "username": "ana", "status": "ACTIVE"},
                    {"id": "2", "username": "ben", "status": "FROZEN"}
                ],
                "total": 2
            }
        }"#;
        let page: Page<User> = decode_data(body).unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].status, UserStatus::Active);
        assert_eq!(page.data[1].status, UserStatus::Other("FROZEN".to_string()));
        assert_eq!(page.data[1].status.descriptor().label, "FROZEN");
    }

    #[test]
    fn test_invalid_json() {
        let err = decode_ack(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
