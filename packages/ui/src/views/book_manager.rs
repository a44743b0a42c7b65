use api::request::parse_stock;
use api::sources::book_pages;
use api::{BookDraft, BookFilters};
use dioxus::prelude::*;
use shelf::format::{format_opt, PLACEHOLDER};
use shelf::{Book, BookStatus, Category, Tone};

use super::{ConfirmDialog, ModalOverlay};
use crate::context::use_shelf;
use crate::infinite_scroll::InfiniteScroll;
use crate::notifications::{notify, notify_error, use_notifications};
use crate::paged_list::use_paged_list;
use crate::status_tag::BookStatusTag;

#[derive(Clone, Debug, PartialEq)]
enum Dialog {
    Details(Book),
    Create,
    Edit(Book),
    Stock(Book),
    Delete(Book),
    AddCategory,
}

/// Catalog administration: add, edit and remove books, adjust the number of
/// copies on the shelf and add categories.
#[component]
pub fn BookManagerView() -> Element {
    let shelf = use_shelf();
    let client = shelf.client.clone();
    let mut notices = use_notifications();
    let list = use_paged_list("Loading books", shelf.config.paging.page_size, || {
        book_pages(client.clone())
    });

    let mut title = use_signal(String::new);
    let mut dialog = use_signal(|| Option::<Dialog>::None);
    let mut categories = use_signal(Vec::<Category>::new);
    let mut category_revision = use_signal(|| 0u32);
    let mut deleting = use_signal(|| false);

    use_effect(move || list.load(BookFilters::default()));

    let _categories = use_resource(move || {
        let client = client.clone();
        let revision = category_revision();
        async move {
            match client.categories().await {
                Ok(found) => {
                    tracing::debug!("{} categories (revision {revision})", found.len());
                    categories.set(found);
                }
                Err(e) => notify_error(&mut notices, "Loading categories", &e),
            }
        }
    });

    let category_name = move |id: Option<&str>| -> String {
        id.and_then(|id| {
            categories
                .read()
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
        })
        .unwrap_or_else(|| PLACEHOLDER.to_string())
    };

    let client = shelf.client.clone();
    let delete = move |book: Book| {
        let client = client.clone();
        spawn(async move {
            deleting.set(true);
            match client.delete_book(&book.id).await {
                Ok(msg) => {
                    let text = msg.unwrap_or_else(|| format!("Removed “{}”", book.title));
                    notify(&mut notices, Tone::Success, &text);
                    dialog.set(None);
                    list.refresh();
                }
                Err(e) => notify_error(&mut notices, "Deleting book", &e),
            }
            deleting.set(false);
        });
    };

    let saved = move |_: ()| {
        dialog.set(None);
        list.refresh();
    };
    let delete_label = if deleting() { "Deleting…" } else { "Delete" };

    rsx! {
        div {
            class: "manager",
            form {
                class: "filter-bar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    list.load(
                        BookFilters {
                            title: Some(title()),
                            ..BookFilters::default()
                        }
                        .normalized(),
                    );
                },
                input {
                    placeholder: "Title",
                    value: title(),
                    oninput: move |evt| title.set(evt.value()),
                }
                button { r#type: "submit", class: "primary", "Search" }
                button {
                    r#type: "button",
                    class: "secondary",
                    onclick: move |_| dialog.set(Some(Dialog::Create)),
                    "New book"
                }
                button {
                    r#type: "button",
                    class: "secondary",
                    onclick: move |_| dialog.set(Some(Dialog::AddCategory)),
                    "New category"
                }
            }

            InfiniteScroll {
                id: "book-manager-scroll",
                has_more: list.has_more(),
                loading: list.is_fetching(),
                on_load_more: move |_| list.load_more(),
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "ID" }
                            th { "Title" }
                            th { "Author" }
                            th { "Category" }
                            th { "Copies" }
                            th { "Status" }
                            th {}
                        }
                    }
                    tbody {
                        for book in list.items() {
                            tr {
                                key: "{book.id}",
                                td { "{book.id}" }
                                td { "{book.title}" }
                                td { "{book.author}" }
                                td { {category_name(book.category_id.as_deref())} }
                                td {
                                    {book.book_number.map(|n| n.to_string()).unwrap_or_else(|| PLACEHOLDER.to_string())}
                                }
                                td { BookStatusTag { status: book.status.clone() } }
                                td {
                                    class: "row-actions",
                                    button {
                                        class: "link",
                                        onclick: {
                                            let book = book.clone();
                                            move |_| dialog.set(Some(Dialog::Details(book.clone())))
                                        },
                                        "Details"
                                    }
                                    button {
                                        class: "link",
                                        onclick: {
                                            let book = book.clone();
                                            move |_| dialog.set(Some(Dialog::Edit(book.clone())))
                                        },
                                        "Edit"
                                    }
                                    button {
                                        class: "link",
                                        onclick: {
                                            let book = book.clone();
                                            move |_| dialog.set(Some(Dialog::Stock(book.clone())))
                                        },
                                        "Copies"
                                    }
                                    button {
                                        class: "link danger",
                                        onclick: {
                                            let book = book.clone();
                                            move |_| dialog.set(Some(Dialog::Delete(book.clone())))
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        {match dialog() {
            Some(Dialog::Details(book)) => rsx! {
                ModalOverlay {
                    title: "{book.title}",
                    on_close: move |_| dialog.set(None),
                    BookAdminDetails {
                        book: book.clone(),
                        category: category_name(book.category_id.as_deref()),
                    }
                }
            },
            Some(Dialog::Create) => rsx! {
                BookFormModal {
                    book: None,
                    categories: categories(),
                    on_close: move |_| dialog.set(None),
                    on_saved: saved,
                }
            },
            Some(Dialog::Edit(book)) => rsx! {
                BookFormModal {
                    key: "{book.id}",
                    book: Some(book),
                    categories: categories(),
                    on_close: move |_| dialog.set(None),
                    on_saved: saved,
                }
            },
            Some(Dialog::Stock(book)) => rsx! {
                StockModal {
                    book,
                    on_close: move |_| dialog.set(None),
                    on_saved: saved,
                }
            },
            Some(Dialog::Delete(book)) => rsx! {
                ConfirmDialog {
                    title: "Delete book",
                    message: "Remove “{book.title}” from the catalog? This cannot be undone.",
                    confirm_label: delete_label.to_string(),
                    danger: true,
                    on_cancel: move |_| dialog.set(None),
                    on_confirm: {
                        let delete = delete.clone();
                        let book = book.clone();
                        move |_| {
                            if !deleting() {
                                delete(book.clone());
                            }
                        }
                    },
                }
            },
            Some(Dialog::AddCategory) => rsx! {
                CategoryModal {
                    on_close: move |_| dialog.set(None),
                    on_saved: move |_| {
                        dialog.set(None);
                        *category_revision.write() += 1;
                    },
                }
            },
            None => rsx! {},
        }}
    }
}

/// Every stored field of a book plus the live copy count.
#[component]
fn BookAdminDetails(book: Book, category: String) -> Element {
    let client = use_shelf().client;
    let id = book.id.clone();
    let copies = use_resource(move || {
        let client = client.clone();
        let id = id.clone();
        async move { client.book_number(&id).await }
    });

    let live = match &*copies.read() {
        Some(Ok(n)) => n.to_string(),
        Some(Err(e)) => {
            tracing::warn!("Copy count for book {}: {e}", book.id);
            PLACEHOLDER.to_string()
        }
        None => "…".to_string(),
    };

    rsx! {
        div {
            class: "book-detail-info",
            BookStatusTag { status: book.status.clone() }
            dl {
                dt { "Author" }
                dd { "{book.author}" }
                dt { "Publisher" }
                dd { "{book.press}" }
                dt { "ISBN" }
                dd { "{book.isbn}" }
                dt { "Category" }
                dd { "{category}" }
                dt { "Copies on the shelf" }
                dd { "{live}" }
                dt { "Added" }
                dd { "{format_opt(book.created_at.as_ref())}" }
                dt { "Updated" }
                dd { "{format_opt(book.updated_at.as_ref())}" }
            }
            p { class: "book-detail-intro", "{book.intro}" }
        }
    }
}

/// Create form when `book` is `None`, edit form otherwise.
#[component]
fn BookFormModal(
    #[props(!optional)] book: Option<Book>,
    categories: Vec<Category>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let client = use_shelf().client;
    let mut notices = use_notifications();
    let book_id = book.as_ref().map(|b| b.id.clone());
    let mut draft = use_signal(|| book.as_ref().map(BookDraft::from_book).unwrap_or_default());
    let mut stock = use_signal(|| draft.peek().book_number.to_string());
    let mut saving = use_signal(|| false);
    let heading = match &book {
        Some(book) => format!("Edit “{}”", book.title),
        None => "New book".to_string(),
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let copies = match parse_stock(&stock()) {
            Ok(copies) => copies,
            Err(e) => {
                notify(&mut notices, Tone::Warning, &e.to_string());
                return;
            }
        };
        draft.write().set_stock(copies);
        let payload = draft().normalized();
        if let Err(e) = payload.validate() {
            notify(&mut notices, Tone::Warning, &e.to_string());
            return;
        }
        let client = client.clone();
        let book_id = book_id.clone();
        spawn(async move {
            saving.set(true);
            let result = match &book_id {
                Some(id) => client.update_book(id, &payload).await,
                None => client.create_book(&payload).await,
            };
            match result {
                Ok(msg) => {
                    notify(&mut notices, Tone::Success, msg.as_deref().unwrap_or("Book saved"));
                    on_saved.call(());
                }
                Err(e) => notify_error(&mut notices, "Saving book", &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            title: heading,
            on_close: move |_| on_close.call(()),
            form {
                class: "form-grid",
                onsubmit: submit,
                label {
                    "Title"
                    input {
                        value: draft().title,
                        oninput: move |evt| draft.write().title = evt.value(),
                    }
                }
                label {
                    "Author"
                    input {
                        value: draft().author,
                        oninput: move |evt| draft.write().author = evt.value(),
                    }
                }
                label {
                    "ISBN"
                    input {
                        value: draft().isbn,
                        oninput: move |evt| draft.write().isbn = evt.value(),
                    }
                }
                label {
                    "Publisher"
                    input {
                        value: draft().press,
                        oninput: move |evt| draft.write().press = evt.value(),
                    }
                }
                label {
                    "Category"
                    select {
                        onchange: move |evt| {
                            let raw = evt.value();
                            draft.write().category_id = Some(raw).filter(|id| !id.is_empty());
                        },
                        option { value: "", selected: draft().category_id.is_none(), "None" }
                        for category in categories {
                            option {
                                key: "{category.id}",
                                value: "{category.id}",
                                selected: draft().category_id.as_deref() == Some(category.id.as_str()),
                                "{category.name}"
                            }
                        }
                    }
                }
                label {
                    "Status"
                    select {
                        onchange: move |evt| {
                            draft.write().set_status(BookStatus::from(evt.value()));
                            stock.set(draft.peek().book_number.to_string());
                        },
                        for status in BookStatus::KNOWN {
                            option {
                                key: "{status.as_str()}",
                                value: "{status.as_str()}",
                                selected: draft().status == status,
                                "{status.descriptor().label}"
                            }
                        }
                    }
                }
                label {
                    "Copies on the shelf"
                    input {
                        r#type: "number",
                        min: "0",
                        value: stock(),
                        oninput: move |evt| {
                            let raw = evt.value();
                            if let Ok(copies) = parse_stock(&raw) {
                                draft.write().set_stock(copies);
                            }
                            stock.set(raw);
                        },
                    }
                }
                label {
                    class: "form-wide",
                    "Introduction"
                    textarea {
                        rows: "4",
                        value: draft().intro,
                        oninput: move |evt| draft.write().intro = evt.value(),
                    }
                }
                div {
                    class: "form-actions",
                    button {
                        r#type: "submit",
                        class: "primary",
                        disabled: saving(),
                        if saving() { "Saving…" } else { "Save" }
                    }
                    button {
                        r#type: "button",
                        class: "secondary",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}

/// Set the number of copies on the shelf without touching anything else.
#[component]
fn StockModal(book: Book, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let client = use_shelf().client;
    let mut notices = use_notifications();
    let mut raw = use_signal(|| book.book_number.unwrap_or(0).to_string());
    let mut saving = use_signal(|| false);
    let book_id = book.id.clone();

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let copies = match parse_stock(&raw()) {
            Ok(copies) => copies,
            Err(e) => {
                notify(&mut notices, Tone::Warning, &e.to_string());
                return;
            }
        };
        let client = client.clone();
        let book_id = book_id.clone();
        spawn(async move {
            saving.set(true);
            match client.set_book_number(&book_id, copies).await {
                Ok(msg) => {
                    let text = msg.unwrap_or_else(|| format!("{copies} copies on the shelf"));
                    notify(&mut notices, Tone::Success, &text);
                    on_saved.call(());
                }
                Err(e) => notify_error(&mut notices, "Updating copies", &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            title: "Copies of “{book.title}”",
            on_close: move |_| on_close.call(()),
            form {
                onsubmit: submit,
                label {
                    "Copies on the shelf"
                    input {
                        r#type: "number",
                        min: "0",
                        value: raw(),
                        oninput: move |evt| raw.set(evt.value()),
                    }
                }
                div {
                    class: "form-actions",
                    button {
                        r#type: "submit",
                        class: "primary",
                        disabled: saving(),
                        "Save"
                    }
                    button {
                        r#type: "button",
                        class: "secondary",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}

#[component]
fn CategoryModal(on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let client = use_shelf().client;
    let mut notices = use_notifications();
    let mut name = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let value = name();
        spawn(async move {
            saving.set(true);
            match client.add_category(&value).await {
                Ok(msg) => {
                    let text = msg.unwrap_or_else(|| format!("Category “{}” added", value.trim()));
                    notify(&mut notices, Tone::Success, &text);
                    on_saved.call(());
                }
                Err(e) => notify_error(&mut notices, "Adding category", &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            title: "New category",
            on_close: move |_| on_close.call(()),
            form {
                onsubmit: submit,
                label {
                    "Name"
                    input {
                        value: name(),
                        oninput: move |evt| name.set(evt.value()),
                    }
                }
                div {
                    class: "form-actions",
                    button {
                        r#type: "submit",
                        class: "primary",
                        disabled: saving(),
                        "Add"
                    }
                    button {
                        r#type: "button",
                        class: "secondary",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
