use serde::Serialize;
use shelf::BorrowStatus;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::request::{BorrowForm, SetBorrowStatus};

pub const BORROW_BOOK: &str = "/api/user/borrowBook";
pub const CANCEL_BORROW: &str = "/api/user/cancelBorrowBook";
pub const MY_BORROW_LIST: &str = "/api/user/borrowListByUser";
pub const ADMIN_BORROW_LIST: &str = "/api/admin/borrowList";
pub const SET_BORROW_STATUS: &str = "/api/admin/setBorrowStatus";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BorrowIdForm<'a> {
    borrow_id: &'a str,
}

impl ApiClient {
    /// Reserve a physical copy. The new record starts out `APPLIED`.
    pub async fn borrow_book(
        &self,
        book_id: &str,
        borrow_days: u32,
    ) -> Result<Option<String>, ApiError> {
        tracing::info!("Borrowing book {book_id} for {borrow_days} days");
        self.ack_form(
            BORROW_BOOK,
            &BorrowForm {
                book_id,
                borrow_days,
            },
        )
        .await
    }

    /// Withdraw a reservation that has not been picked up.
    pub async fn cancel_borrow(&self, borrow_id: &str) -> Result<Option<String>, ApiError> {
        tracing::info!("Cancelling reservation {borrow_id}");
        self.ack_form(CANCEL_BORROW, &BorrowIdForm { borrow_id })
            .await
    }

    pub async fn set_borrow_status(
        &self,
        id: &str,
        status: &BorrowStatus,
    ) -> Result<Option<String>, ApiError> {
        tracing::info!("Setting borrow {id} to {}", status.as_str());
        self.ack_json(SET_BORROW_STATUS, &SetBorrowStatus { id, status })
            .await
    }
}
