use reqwest::multipart::Form;
use serde::Serialize;
use shelf::{Book, Category};

use crate::client::{json_part, ApiClient};
use crate::error::ApiError;
use crate::request::{BookDraft, SetBookNumber};

pub const BOOK_LIST: &str = "/api/user/bookList";
pub const GET_BOOK: &str = "/api/user/getBookById";
pub const CATEGORY_LIST: &str = "/api/user/categoryList";
pub const BOOK_NUMBER: &str = "/api/user/getBookNumberById";
pub const BOOK_UPLOAD: &str = "/api/admin/bookUpload";
pub const UPDATE_BOOK: &str = "/api/admin/updateBook";
pub const DELETE_BOOK: &str = "/api/admin/deleteBook";
pub const SET_BOOK_NUMBER: &str = "/api/admin/setBookNumber";
pub const ADD_CATEGORY: &str = "/api/admin/addCategory";

/// Name of the JSON part carrying the book record in upload forms.
const BOOK_DATA: &str = "bookData";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookIdForm<'a> {
    book_id: &'a str,
}

#[derive(Serialize)]
struct CategoryForm<'a> {
    #[serde(rename = "CategoryName")]
    name: &'a str,
}

#[derive(Serialize)]
struct Empty {}

impl ApiClient {
    pub async fn book_by_id(&self, book_id: &str) -> Result<Book, ApiError> {
        self.post_form(GET_BOOK, &BookIdForm { book_id }).await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.post_json(CATEGORY_LIST, &Empty {}).await
    }

    /// Copies currently on the shelf.
    pub async fn book_number(&self, book_id: &str) -> Result<u32, ApiError> {
        self.post_form(BOOK_NUMBER, &BookIdForm { book_id }).await
    }

    /// Add a catalog entry (administrators).
    pub async fn create_book(&self, draft: &BookDraft) -> Result<Option<String>, ApiError> {
        draft.validate()?;
        tracing::info!("Creating book {:?}", draft.title);
        let form = Form::new().part(BOOK_DATA, json_part(draft)?);
        self.ack_multipart(BOOK_UPLOAD, form).await
    }

    pub async fn update_book(
        &self,
        book_id: &str,
        draft: &BookDraft,
    ) -> Result<Option<String>, ApiError> {
        draft.validate()?;
        tracing::info!("Updating book {book_id}");
        let form = Form::new()
            .text("bookId", book_id.to_string())
            .part(BOOK_DATA, json_part(draft)?);
        self.ack_multipart(UPDATE_BOOK, form).await
    }

    pub async fn delete_book(&self, book_id: &str) -> Result<Option<String>, ApiError> {
        tracing::info!("Deleting book {book_id}");
        self.ack_form(DELETE_BOOK, &BookIdForm { book_id }).await
    }

    pub async fn set_book_number(
        &self,
        book_id: &str,
        book_number: u32,
    ) -> Result<Option<String>, ApiError> {
        tracing::info!("Setting stock of book {book_id} to {book_number}");
        self.ack_json(
            SET_BOOK_NUMBER,
            &SetBookNumber {
                book_id,
                book_number,
            },
        )
        .await
    }

    pub async fn add_category(&self, name: &str) -> Result<Option<String>, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(crate::request::FormError::Required { field: "category name" }.into());
        }
        tracing::info!("Adding category {name:?}");
        self.ack_form(ADD_CATEGORY, &CategoryForm { name }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shelf::config::ApiConfig;

    #[test]
    fn test_category_form_field_name() {
        let form = CategoryForm { name: "Poetry" };
        assert_eq!(
            serde_json::to_value(form).unwrap(),
            json!({ "CategoryName": "Poetry" })
        );
    }

    #[test]
    fn test_set_book_number_body() {
        let body = SetBookNumber {
            book_id: "9",
            book_number: 3,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "bookId": "9", "bookNumber": 3 })
        );
    }

    #[tokio::test]
    async fn test_invalid_drafts_are_not_sent() {
        // Nothing listens on the discard port, so reaching the network would
        // surface as a transport error instead.
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        let err = client.create_book(&BookDraft::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
        let err = client.add_category("  ").await.unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
    }
}
