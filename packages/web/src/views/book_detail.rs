use dioxus::prelude::*;
use ui::views::BookDetailView;

use crate::Route;

#[component]
pub fn BookDetail(id: String) -> Element {
    let nav = use_navigator();

    rsx! {
        BookDetailView {
            book_id: id,
            on_back: move |_| {
                if nav.can_go_back() {
                    nav.go_back();
                } else {
                    nav.replace(Route::Catalog {});
                }
            },
        }
    }
}
