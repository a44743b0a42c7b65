use api::sources::book_pages;
use api::BookFilters;
use dioxus::prelude::*;
use shelf::{Book, BookStatus, Category, PageParam};

use crate::book_card::BookCard;
use crate::context::use_shelf;
use crate::infinite_scroll::InfiniteScroll;
use crate::notifications::{notify_error, use_notifications};
use crate::paged_list::use_paged_list;

const STRIP_SIZE: u32 = 10;

/// Searchable book catalog with infinite scroll, plus strips of popular and
/// recommended books.
#[component]
pub fn CatalogView(on_open_book: EventHandler<String>) -> Element {
    let shelf = use_shelf();
    let client = shelf.client.clone();
    let mut notices = use_notifications();
    let list = use_paged_list("Loading books", shelf.config.paging.page_size, || {
        book_pages(client.clone())
    });

    let mut title = use_signal(String::new);
    let mut author = use_signal(String::new);
    let mut category = use_signal(String::new);
    let mut status = use_signal(|| Option::<BookStatus>::None);

    let mut categories = use_signal(Vec::<Category>::new);
    let mut hot_books = use_signal(Vec::<Book>::new);
    let mut recommended = use_signal(Vec::<Book>::new);

    let client = shelf.client.clone();
    let _init = use_resource(move || {
        let client = client.clone();
        async move {
            match client.categories().await {
                Ok(found) => categories.set(found),
                Err(e) => notify_error(&mut notices, "Loading categories", &e),
            }
            match client.hot_books(PageParam::first(STRIP_SIZE)).await {
                Ok(page) => hot_books.set(page.data),
                Err(e) => tracing::warn!("Hot books unavailable: {e}"),
            }
            match client.recommendations(PageParam::first(STRIP_SIZE)).await {
                Ok(page) => recommended.set(page.data),
                Err(e) => tracing::warn!("Recommendations unavailable: {e}"),
            }
        }
    });

    let current_filters = move || {
        BookFilters {
            title: Some(title()),
            author: Some(author()),
            category_id: Some(category()),
            status: status(),
        }
        .normalized()
    };

    use_effect(move || list.load(BookFilters::default()));

    let search = move || list.load(current_filters());

    rsx! {
        div {
            class: "catalog",
            form {
                class: "filter-bar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    search();
                },
                input {
                    r#type: "search",
                    placeholder: "Title",
                    value: title(),
                    oninput: move |evt| title.set(evt.value()),
                }
                input {
                    r#type: "search",
                    placeholder: "Author",
                    value: author(),
                    oninput: move |evt| author.set(evt.value()),
                }
                select {
                    value: category(),
                    onchange: move |evt| {
                        category.set(evt.value());
                        list.load(current_filters());
                    },
                    option { value: "", "All categories" }
                    for c in categories() {
                        option { key: "{c.id}", value: "{c.id}", "{c.name}" }
                    }
                }
                div {
                    class: "segmented",
                    button {
                        r#type: "button",
                        class: if status().is_none() { "active" } else { "" },
                        onclick: move |_| {
                            status.set(None);
                            list.load(current_filters());
                        },
                        "Any"
                    }
                    for s in BookStatus::KNOWN {
                        button {
                            key: "{s.as_str()}",
                            r#type: "button",
                            class: if status().as_ref() == Some(&s) { "active" } else { "" },
                            onclick: {
                                let s = s.clone();
                                move |_| {
                                    status.set(Some(s.clone()));
                                    list.load(current_filters());
                                }
                            },
                            "{s.descriptor().label}"
                        }
                    }
                }
                button { r#type: "submit", class: "primary", "Search" }
            }

            if !hot_books().is_empty() {
                section {
                    class: "hot-books",
                    h2 { "Popular now" }
                    div {
                        class: "hot-books-strip",
                        for book in hot_books() {
                            BookCard { key: "{book.id}", book: book.clone(), on_open: on_open_book }
                        }
                    }
                }
            }

            if !recommended().is_empty() {
                section {
                    class: "hot-books",
                    h2 { "Recommended for you" }
                    div {
                        class: "hot-books-strip",
                        for book in recommended() {
                            BookCard { key: "{book.id}", book: book.clone(), on_open: on_open_book }
                        }
                    }
                }
            }

            InfiniteScroll {
                id: "catalog-scroll",
                has_more: list.has_more(),
                loading: list.is_fetching(),
                on_load_more: move |_| list.load_more(),
                div {
                    class: "book-grid",
                    for book in list.items() {
                        BookCard { key: "{book.id}", book: book.clone(), on_open: on_open_book }
                    }
                }
                if list.items().is_empty() && list.page_state().is_loaded() {
                    p { class: "empty", "No books match these filters." }
                }
            }
        }
    }
}
