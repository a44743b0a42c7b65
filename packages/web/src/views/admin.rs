//! Administrator pages.

use dioxus::prelude::*;
use ui::views::{BookManagerView, BorrowManagerView, UserManagerView, ViolationManagerView};

#[component]
pub fn BookManager() -> Element {
    rsx! {
        BookManagerView {}
    }
}

#[component]
pub fn BorrowManager() -> Element {
    rsx! {
        BorrowManagerView {}
    }
}

#[component]
pub fn ViolationManager() -> Element {
    rsx! {
        ViolationManagerView {}
    }
}

#[component]
pub fn UserManager() -> Element {
    rsx! {
        UserManagerView {}
    }
}
