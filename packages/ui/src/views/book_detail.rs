use api::request::{parse_borrow_days, MAX_BORROW_DAYS};
use api::Behavior;
use dioxus::prelude::*;
use shelf::derive::PICKUP_WINDOW_HOURS;
use shelf::format::{cos_url, format_opt, PLACEHOLDER};
use shelf::{Book, BookStatus, Tone, ViolationType};

use super::ModalOverlay;
use crate::context::use_shelf;
use crate::notifications::{notify, notify_error, use_notifications};
use crate::reader::ReadingPanel;
use crate::status_tag::BookStatusTag;

/// One book: details, the borrow dialog and the e-book reader.
#[component]
pub fn BookDetailView(book_id: String, on_back: EventHandler<()>) -> Element {
    let shelf = use_shelf();
    let mut notices = use_notifications();
    let mut book = use_signal(|| Option::<Book>::None);
    let mut show_borrow = use_signal(|| false);
    let mut borrow_days = use_signal(|| "14".to_string());
    let mut borrowing = use_signal(|| false);

    // Reload when the route parameter changes.
    let mut id_signal = use_signal(|| book_id.clone());
    if *id_signal.peek() != book_id {
        id_signal.set(book_id.clone());
    }

    let client = shelf.client.clone();
    let _loader = use_resource(move || {
        let client = client.clone();
        let id = id_signal();
        async move {
            match client.book_by_id(&id).await {
                Ok(found) => {
                    book.set(Some(found));
                    client.record_behavior_quietly(&id, Behavior::View).await;
                }
                Err(e) => notify_error(&mut notices, "Loading book", &e),
            }
        }
    });

    let client = shelf.client.clone();
    let submit_borrow = move |_| {
        let Some(days) = parse_borrow_days(&borrow_days()) else {
            notify(
                &mut notices,
                Tone::Warning,
                &format!("Choose a loan period between 1 and {MAX_BORROW_DAYS} days"),
            );
            return;
        };
        let client = client.clone();
        let id = id_signal();
        spawn(async move {
            borrowing.set(true);
            match client.borrow_book(&id, days).await {
                Ok(msg) => {
                    client.record_behavior_quietly(&id, Behavior::Borrow).await;
                    notify(
                        &mut notices,
                        Tone::Success,
                        msg.as_deref().unwrap_or("Reservation placed"),
                    );
                    notify(
                        &mut notices,
                        Tone::Info,
                        &format!(
                            "The copy is held for {PICKUP_WINDOW_HOURS} hours. Missing the pickup costs {} credit points.",
                            ViolationType::Expired.credit_penalty().unwrap_or(0)
                        ),
                    );
                    match client.book_by_id(&id).await {
                        Ok(fresh) => book.set(Some(fresh)),
                        Err(e) => tracing::warn!("Book refresh after borrowing failed: {e}"),
                    }
                }
                Err(e) => notify_error(&mut notices, "Borrowing", &e),
            }
            borrowing.set(false);
            show_borrow.set(false);
        });
    };

    let Some(current) = book() else {
        return rsx! {
            div { class: "loading-page", "Loading…" }
        };
    };

    let assets = &shelf.config.assets;
    let cover = current
        .cover
        .as_deref()
        .map(|path| cos_url(assets, path))
        .unwrap_or_default();
    let ebook = current
        .ebook
        .as_deref()
        .map(|path| cos_url(assets, path))
        .filter(|url| !url.is_empty());
    let copies = current
        .book_number
        .map(|n| n.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let can_borrow = current.status == BookStatus::Available && current.book_number != Some(0);

    rsx! {
        div {
            class: "book-detail",
            button { class: "link", onclick: move |_| on_back.call(()), "← Back to catalog" }
            div {
                class: "book-detail-main",
                if !cover.is_empty() {
                    img { class: "book-detail-cover", src: "{cover}", alt: "{current.title}" }
                }
                div {
                    class: "book-detail-info",
                    h1 { "{current.title}" }
                    BookStatusTag { status: current.status.clone() }
                    dl {
                        dt { "Author" }
                        dd { "{current.author}" }
                        dt { "Publisher" }
                        dd { "{current.press}" }
                        dt { "ISBN" }
                        dd { "{current.isbn}" }
                        dt { "Copies on the shelf" }
                        dd { "{copies}" }
                        dt { "Added" }
                        dd { "{format_opt(current.created_at.as_ref())}" }
                    }
                    p { class: "book-detail-intro", "{current.intro}" }
                    button {
                        class: "primary",
                        disabled: !can_borrow,
                        onclick: move |_| show_borrow.set(true),
                        "Borrow a copy"
                    }
                }
            }
            if let Some(url) = ebook {
                ReadingPanel { key: "{current.id}", book_id: current.id.clone(), ebook_url: url }
            }
        }

        if show_borrow() {
            ModalOverlay {
                title: "Borrow “{current.title}”",
                on_close: move |_| show_borrow.set(false),
                label {
                    "Loan period (days)"
                    input {
                        r#type: "number",
                        min: "1",
                        max: "{MAX_BORROW_DAYS}",
                        value: borrow_days(),
                        oninput: move |evt| borrow_days.set(evt.value()),
                    }
                }
                p {
                    class: "hint",
                    "At most {MAX_BORROW_DAYS} days. Pick the copy up within {PICKUP_WINDOW_HOURS} hours."
                }
                div {
                    class: "form-actions",
                    button {
                        class: "primary",
                        disabled: borrowing(),
                        onclick: submit_borrow,
                        if borrowing() { "Borrowing…" } else { "Confirm" }
                    }
                    button { class: "secondary", onclick: move |_| show_borrow.set(false), "Cancel" }
                }
            }
        }
    }
}
