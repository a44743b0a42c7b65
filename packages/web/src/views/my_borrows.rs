use dioxus::prelude::*;
use ui::views::{MyBorrowsView, ProfileView};

#[component]
pub fn MyBorrows() -> Element {
    rsx! {
        MyBorrowsView {}
    }
}

#[component]
pub fn Profile() -> Element {
    rsx! {
        ProfileView {}
    }
}
