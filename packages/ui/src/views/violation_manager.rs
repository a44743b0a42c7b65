use api::sources::violation_pages;
use api::ViolationFilters;
use dioxus::prelude::*;
use shelf::format::{format_date_time, PLACEHOLDER};
use shelf::ViolationType;

use crate::context::use_shelf;
use crate::infinite_scroll::InfiniteScroll;
use crate::paged_list::use_paged_list;
use crate::status_tag::ViolationTag;

#[component]
pub fn ViolationManagerView() -> Element {
    let shelf = use_shelf();
    let client = shelf.client.clone();
    let list = use_paged_list("Loading violations", shelf.config.paging.page_size, move || {
        violation_pages(client)
    });

    let mut name = use_signal(String::new);
    let mut kind = use_signal(|| Option::<ViolationType>::None);

    use_effect(move || list.load(ViolationFilters::default()));

    let filters = move || {
        ViolationFilters {
            name: Some(name()),
            violation_type: kind(),
        }
        .normalized()
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
                    placeholder: "User",
                    value: name(),
                    oninput: move |evt| name.set(evt.value()),
                }
                select {
                    onchange: move |evt| {
                        kind.set(ViolationType::parse(&evt.value()));
                        list.load(filters());
                    },
                    option { value: "", selected: kind().is_none(), "Any violation" }
                    for k in ViolationType::KNOWN {
                        option {
                            key: "{k.as_str()}",
                            value: "{k.as_str()}",
                            selected: kind().as_ref() == Some(&k),
                            "{k.descriptor().label} (−{k.credit_penalty().unwrap_or(0)})"
                        }
                    }
                }
                button { r#type: "submit", class: "primary", "Search" }
            }

            InfiniteScroll {
                id: "violation-manager-scroll",
                has_more: list.has_more(),
                loading: list.is_fetching(),
                on_load_more: move |_| list.load_more(),
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "ID" }
                            th { "User" }
                            th { "Phone" }
                            th { "Book" }
                            th { "Violation" }
                            th { "Borrow record" }
                            th { "Recorded" }
                        }
                    }
                    tbody {
                        for v in list.items() {
                            tr {
                                key: "{v.id}",
                                td { "{v.id}" }
                                td { {v.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string())} }
                                td { {v.phone.clone().unwrap_or_else(|| PLACEHOLDER.to_string())} }
                                td { "{v.title}" }
                                td { ViolationTag { kind: v.violation_type.clone() } }
                                td { "{v.borrow_id}" }
                                td { "{format_date_time(&v.created_at)}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
