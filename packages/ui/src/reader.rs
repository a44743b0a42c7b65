use api::Behavior;
use dioxus::prelude::*;
use shelf::format::file_name_from_url;
use shelf::reading::jump_targets;

use crate::context::use_client;
use crate::markers::make_reading_progress;

/// Online reader for a book's e-book, reopening at the last page read.
///
/// The browser's PDF viewer honours `#page=N`; page changes made with the
/// buttons here are saved as the new marker. It cannot report the page count,
/// so the jump strip only reaches the furthest page read so far.
#[component]
pub fn ReadingPanel(book_id: String, ebook_url: String) -> Element {
    let client = use_client();
    let mut page = use_signal(|| 1u32);
    let mut furthest = use_signal(|| 1u32);
    let mut open = use_signal(|| false);
    let file_name = file_name_from_url(&ebook_url);

    let id = book_id.clone();
    let _marker = use_resource(move || {
        let id = id.clone();
        async move {
            let last = make_reading_progress().last_page(&id).await;
            page.set(last);
            furthest.set(last);
        }
    });

    let save = {
        let id = book_id.clone();
        move |next: u32| {
            let id = id.clone();
            page.set(next);
            if next > furthest() {
                furthest.set(next);
            }
            spawn(async move {
                make_reading_progress().save_page(&id, next).await;
            });
        }
    };
    let mut save_prev = save.clone();
    let save_jump = save.clone();
    let mut save_next = save;

    let start_reading = {
        let client = client.clone();
        let id = book_id.clone();
        move |_| {
            open.set(true);
            let client = client.clone();
            let id = id.clone();
            spawn(async move {
                client.record_behavior_quietly(&id, Behavior::ReadOnline).await;
            });
        }
    };

    let on_download = {
        let id = book_id.clone();
        move |_| {
            let client = client.clone();
            let id = id.clone();
            spawn(async move {
                client.record_behavior_quietly(&id, Behavior::Download).await;
            });
        }
    };

    rsx! {
        section {
            class: "reading-panel",
            h3 { "E-book" }
            p {
                class: "reading-panel-file",
                "{file_name}"
            }
            div {
                class: "reading-panel-actions",
                button { class: "primary", onclick: start_reading,
                    if page() > 1 { "Continue at page {page}" } else { "Read online" }
                }
                a {
                    class: "secondary",
                    href: "{ebook_url}",
                    download: "{file_name}",
                    onclick: on_download,
                    "Download"
                }
            }
            if open() {
                div {
                    class: "reading-panel-pager",
                    button {
                        disabled: page() <= 1,
                        onclick: move |_| save_prev(page().saturating_sub(1).max(1)),
                        "Previous page"
                    }
                    span { "Page {page}" }
                    button {
                        onclick: move |_| save_next(page() + 1),
                        "Next page"
                    }
                }
                div {
                    class: "reading-panel-jumps",
                    for target in jump_targets(page(), furthest()) {
                        button {
                            key: "{target}",
                            class: if target == page() { "page-chip active" } else { "page-chip" },
                            onclick: {
                                let mut save = save_jump.clone();
                                move |_| save(target)
                            },
                            "{target}"
                        }
                    }
                }
                iframe {
                    class: "reading-panel-frame",
                    key: "{page}",
                    src: "{ebook_url}#page={page}",
                    title: "{file_name}",
                }
            }
        }
    }
}
