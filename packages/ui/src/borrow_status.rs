use chrono::Utc;
use dioxus::prelude::*;
use shelf::format::{format_date_time, format_opt, PLACEHOLDER};
use shelf::{derive_status, BorrowRecord};

use crate::status_tag::BorrowStatusTag;

/// Derived status message for one borrow record, evaluated at render time.
#[component]
pub fn BorrowStatusPanel(record: BorrowRecord) -> Element {
    let info = derive_status(&record, Utc::now());
    let urgent = info.derivation.is_past_deadline();

    rsx! {
        div {
            class: if urgent { "borrow-status borrow-status--urgent" } else { "borrow-status" },
            BorrowStatusTag { status: record.status.clone() }
            p { class: "borrow-status-message", "{info.message}" }
            if let Some(extra) = info.additional_info {
                p { class: "borrow-status-extra", "{extra}" }
            }
        }
    }
}

/// Field list plus status panel, used in the borrow detail overlays.
#[component]
pub fn BorrowDetails(record: BorrowRecord) -> Element {
    let title = record.title.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
    let borrower = record.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
    let phone = record.phone.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
    let days = record
        .borrow_days
        .map(|d| format!("{d} days"))
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    rsx! {
        div {
            class: "borrow-details",
            BorrowStatusPanel { record: record.clone() }
            dl {
                dt { "Record" }
                dd { "{record.id}" }
                dt { "Book" }
                dd { "{title}" }
                dt { "Borrower" }
                dd { "{borrower}" }
                dt { "Phone" }
                dd { "{phone}" }
                dt { "Requested" }
                dd { "{format_date_time(&record.created_at)}" }
                dt { "Borrowed" }
                dd { "{format_opt(record.borrow_time.as_ref())}" }
                dt { "Due" }
                dd { "{format_opt(record.due_time.as_ref())}" }
                dt { "Returned" }
                dd { "{format_opt(record.return_time.as_ref())}" }
                dt { "Loan period" }
                dd { "{days}" }
            }
        }
    }
}
