use api::sources::{my_borrow_pages, my_violation_pages};
use api::{BorrowFilters, ViolationFilters};
use dioxus::prelude::*;
use shelf::format::format_date_time;
use shelf::{BorrowRecord, BorrowStatus, Tone};

use super::ModalOverlay;
use crate::borrow_status::{BorrowDetails, BorrowStatusPanel};
use crate::context::use_shelf;
use crate::infinite_scroll::InfiniteScroll;
use crate::notifications::{notify, notify_error, use_notifications};
use crate::paged_list::use_paged_list;
use crate::status_tag::ViolationTag;

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Borrows,
    Violations,
}

/// The signed-in reader's borrow history and violation record.
#[component]
pub fn MyBorrowsView() -> Element {
    let shelf = use_shelf();
    let page_size = shelf.config.paging.page_size;
    let client = shelf.client.clone();
    let mut notices = use_notifications();

    let borrows = use_paged_list("Loading your borrows", page_size, || {
        my_borrow_pages(client.clone())
    });
    let violations = use_paged_list("Loading your violations", page_size, || {
        my_violation_pages(client.clone())
    });

    let mut tab = use_signal(|| Tab::Borrows);
    let mut status_filter = use_signal(|| Option::<BorrowStatus>::None);
    let mut selected = use_signal(|| Option::<BorrowRecord>::None);
    let mut cancelling = use_signal(|| Option::<String>::None);

    use_effect(move || {
        borrows.load(BorrowFilters::default());
        violations.load(ViolationFilters::default());
    });

    let mut apply_status = move |status: Option<BorrowStatus>| {
        status_filter.set(status.clone());
        borrows.load(BorrowFilters {
            status,
            ..BorrowFilters::default()
        });
    };

    let cancel = move |record_id: String| {
        let client = client.clone();
        spawn(async move {
            cancelling.set(Some(record_id.clone()));
            match client.cancel_borrow(&record_id).await {
                Ok(msg) => {
                    notify(
                        &mut notices,
                        Tone::Success,
                        msg.as_deref().unwrap_or("Reservation cancelled"),
                    );
                    selected.set(None);
                    borrows.refresh();
                }
                Err(e) => notify_error(&mut notices, "Cancelling reservation", &e),
            }
            cancelling.set(None);
        });
    };

    rsx! {
        div {
            class: "my-borrows",
            div {
                class: "tabs",
                button {
                    class: if tab() == Tab::Borrows { "active" } else { "" },
                    onclick: move |_| tab.set(Tab::Borrows),
                    "Borrows"
                }
                button {
                    class: if tab() == Tab::Violations { "active" } else { "" },
                    onclick: move |_| tab.set(Tab::Violations),
                    "Violations"
                }
            }

            if tab() == Tab::Borrows {
                div {
                    class: "segmented",
                    button {
                        class: if status_filter().is_none() { "active" } else { "" },
                        onclick: move |_| apply_status(None),
                        "All"
                    }
                    for status in BorrowStatus::KNOWN {
                        button {
                            key: "{status.as_str()}",
                            class: if status_filter().as_ref() == Some(&status) { "active" } else { "" },
                            onclick: {
                                let status = status.clone();
                                move |_| apply_status(Some(status.clone()))
                            },
                            "{status.label()}"
                        }
                    }
                }
                InfiniteScroll {
                    id: "my-borrows-scroll",
                    has_more: borrows.has_more(),
                    loading: borrows.is_fetching(),
                    on_load_more: move |_| borrows.load_more(),
                    for record in borrows.items() {
                        div {
                            key: "{record.id}",
                            class: "borrow-row",
                            onclick: {
                                let record = record.clone();
                                move |_| selected.set(Some(record.clone()))
                            },
                            div {
                                class: "borrow-row-title",
                                strong { {record.title.clone().unwrap_or_default()} }
                                span { class: "muted", "{format_date_time(&record.created_at)}" }
                            }
                            BorrowStatusPanel { record: record.clone() }
                            if record.is_cancellable() {
                                button {
                                    class: "danger",
                                    disabled: cancelling().as_deref() == Some(record.id.as_str()),
                                    onclick: {
                                        let id = record.id.clone();
                                        let cancel = cancel.clone();
                                        move |evt: Event<MouseData>| {
                                            evt.stop_propagation();
                                            cancel(id.clone());
                                        }
                                    },
                                    "Cancel reservation"
                                }
                            }
                        }
                    }
                }
            } else {
                InfiniteScroll {
                    id: "my-violations-scroll",
                    has_more: violations.has_more(),
                    loading: violations.is_fetching(),
                    on_load_more: move |_| violations.load_more(),
                    end_label: "No further violations",
                    for violation in violations.items() {
                        div {
                            key: "{violation.id}",
                            class: "violation-row",
                            ViolationTag { kind: violation.violation_type.clone() }
                            span { "{violation.title}" }
                            if let Some(points) = violation.violation_type.credit_penalty() {
                                span { class: "muted", "−{points} credit" }
                            }
                            span { class: "muted", "{format_date_time(&violation.created_at)}" }
                        }
                    }
                }
            }
        }

        if let Some(record) = selected() {
            ModalOverlay {
                title: "Borrow record",
                on_close: move |_| selected.set(None),
                BorrowDetails { record: record.clone() }
                if record.is_cancellable() {
                    div {
                        class: "form-actions",
                        button {
                            class: "danger",
                            onclick: {
                                let id = record.id.clone();
                                let cancel = cancel.clone();
                                move |_| cancel(id.clone())
                            },
                            "Cancel reservation"
                        }
                    }
                }
            }
        }
    }
}
