use dioxus::prelude::*;
use ui::views::CatalogView;

use crate::Route;

#[component]
pub fn Catalog() -> Element {
    let nav = use_navigator();

    rsx! {
        CatalogView {
            on_open_book: move |id: String| {
                nav.push(Route::BookDetail { id });
            },
        }
    }
}
