use dioxus::prelude::*;
use shelf::format::cos_url;
use shelf::Book;

use crate::context::use_shelf;
use crate::status_tag::BookStatusTag;

/// Catalog tile: cover, title, author and availability.
#[component]
pub fn BookCard(book: Book, on_open: EventHandler<String>) -> Element {
    let assets = use_shelf().config.assets;
    let cover = book
        .cover
        .as_deref()
        .map(|path| cos_url(&assets, path))
        .unwrap_or_default();
    let heat = book.heat_score.map(|score| format!("{score:.1}"));
    let id = book.id.clone();

    rsx! {
        div {
            class: "book-card",
            onclick: move |_| on_open.call(id.clone()),
            div {
                class: "book-card-cover",
                if cover.is_empty() {
                    div { class: "book-card-cover-empty", "{book.title}" }
                } else {
                    img { src: "{cover}", alt: "{book.title}", loading: "lazy" }
                }
            }
            div {
                class: "book-card-body",
                h3 { class: "book-card-title", "{book.title}" }
                p { class: "book-card-author", "{book.author}" }
                div {
                    class: "book-card-meta",
                    BookStatusTag { status: book.status.clone() }
                    if let Some(heat) = heat {
                        span { class: "book-card-heat", title: "Popularity", "{heat}" }
                    }
                }
            }
        }
    }
}
