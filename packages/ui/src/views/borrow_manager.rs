use api::sources::borrow_pages;
use api::BorrowFilters;
use dioxus::prelude::*;
use shelf::format::{format_opt, PLACEHOLDER};
use shelf::{BorrowRecord, BorrowStatus, Tone, Transition};

use super::{ConfirmDialog, ModalOverlay};
use crate::borrow_status::BorrowDetails;
use crate::context::use_shelf;
use crate::infinite_scroll::InfiniteScroll;
use crate::notifications::{notify, notify_error, use_notifications};
use crate::paged_list::use_paged_list;
use crate::status_tag::BorrowStatusPicker;

/// Administrator view of every borrow. Status changes go through a
/// confirmation, either from the table's status menu or from the actions
/// offered in the details overlay.
#[component]
pub fn BorrowManagerView() -> Element {
    let shelf = use_shelf();
    let client = shelf.client.clone();
    let mut notices = use_notifications();
    let list = use_paged_list("Loading borrow records", shelf.config.paging.page_size, || {
        borrow_pages(client.clone())
    });

    let mut id = use_signal(String::new);
    let mut title = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut status = use_signal(String::new);
    let mut selected = use_signal(|| Option::<BorrowRecord>::None);
    let mut updating = use_signal(|| Option::<String>::None);
    let mut pending = use_signal(|| Option::<(String, Transition)>::None);

    use_effect(move || list.load(BorrowFilters::default()));

    let filters = move || {
        BorrowFilters {
            id: Some(id()),
            title: Some(title()),
            name: Some(name()),
            status: Some(status()).filter(|s| !s.is_empty()).map(BorrowStatus::from),
        }
        .normalized()
    };

    let change_status = move |(record_id, next): (String, BorrowStatus)| {
        let client = client.clone();
        spawn(async move {
            updating.set(Some(record_id.clone()));
            match client.set_borrow_status(&record_id, &next).await {
                Ok(msg) => {
                    let text = msg.unwrap_or_else(|| format!("Status set to {}", next.label()));
                    notify(&mut notices, Tone::Success, &text);
                    selected.set(None);
                    list.refresh();
                }
                Err(e) => notify_error(&mut notices, "Updating borrow status", &e),
            }
            updating.set(None);
        });
    };

    rsx! {
        div {
            class: "manager",
            form {
                class: "filter-bar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    list.load(filters());
                },
                input {
                    placeholder: "Record ID",
                    value: id(),
                    oninput: move |evt| id.set(evt.value()),
                }
                input {
                    placeholder: "Book title",
                    value: title(),
                    oninput: move |evt| title.set(evt.value()),
                }
                input {
                    placeholder: "Borrower",
                    value: name(),
                    oninput: move |evt| name.set(evt.value()),
                }
                select {
                    value: status(),
                    onchange: move |evt| status.set(evt.value()),
                    option { value: "", "Any status" }
                    for s in BorrowStatus::KNOWN {
                        option { key: "{s.as_str()}", value: "{s.as_str()}", "{s.label()}" }
                    }
                }
                button { r#type: "submit", class: "primary", "Search" }
                button {
                    r#type: "button",
                    class: "secondary",
                    onclick: move |_| {
                        id.set(String::new());
                        title.set(String::new());
                        name.set(String::new());
                        status.set(String::new());
                        list.load(BorrowFilters::default());
                    },
                    "Reset"
                }
            }

            InfiniteScroll {
                id: "borrow-manager-scroll",
                has_more: list.has_more(),
                loading: list.is_fetching(),
                on_load_more: move |_| list.load_more(),
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "ID" }
                            th { "Borrower" }
                            th { "Phone" }
                            th { "Book" }
                            th { "Borrowed" }
                            th { "Due" }
                            th { "Status" }
                            th {}
                        }
                    }
                    tbody {
                        for record in list.items() {
                            tr {
                                key: "{record.id}",
                                td { "{record.id}" }
                                td { {record.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string())} }
                                td { {record.phone.clone().unwrap_or_else(|| PLACEHOLDER.to_string())} }
                                td { {record.title.clone().unwrap_or_else(|| PLACEHOLDER.to_string())} }
                                td { "{format_opt(record.borrow_time.as_ref())}" }
                                td { "{format_opt(record.due_time.as_ref())}" }
                                td {
                                    BorrowStatusPicker {
                                        status: record.status.clone(),
                                        disabled: updating().as_deref() == Some(record.id.as_str()),
                                        on_change: {
                                            let record_id = record.id.clone();
                                            let change_status = change_status.clone();
                                            move |next: BorrowStatus| change_status((record_id.clone(), next))
                                        },
                                    }
                                }
                                td {
                                    button {
                                        class: "link",
                                        onclick: {
                                            let record = record.clone();
                                            move |_| selected.set(Some(record.clone()))
                                        },
                                        "Details"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(record) = selected() {
            ModalOverlay {
                title: "Borrow record {record.id}",
                on_close: move |_| selected.set(None),
                BorrowDetails { record: record.clone() }
                div {
                    class: "form-actions",
                    for action in record.status.next_actions() {
                        button {
                            key: "{action.to.as_str()}",
                            class: if action.to == BorrowStatus::Lost { "danger" } else { "primary" },
                            disabled: updating().is_some(),
                            onclick: {
                                let record_id = record.id.clone();
                                let action = action.clone();
                                move |_| pending.set(Some((record_id.clone(), action.clone())))
                            },
                            "{action.label}"
                        }
                    }
                }
            }
        }

        if let Some((record_id, action)) = pending() {
            ConfirmDialog {
                title: "{action.label}",
                message: "Change borrow record {record_id} to “{action.to.label()}”?",
                confirm_label: action.label.to_string(),
                danger: action.to == BorrowStatus::Lost,
                on_cancel: move |_| pending.set(None),
                on_confirm: {
                    let change_status = change_status.clone();
                    move |_| {
                        if let Some((record_id, action)) = pending() {
                            pending.set(None);
                            change_status((record_id, action.to));
                        }
                    }
                },
            }
        }
    }
}
