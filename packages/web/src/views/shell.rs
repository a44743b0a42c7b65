use dioxus::prelude::*;
use ui::{Navbar, NotificationStack};

use crate::Route;

/// Navbar, the routed page and the notice stack.
#[component]
pub fn Shell() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Catalog {}, active_class: "active", "Catalog" }
            Link { to: Route::MyBorrows {}, active_class: "active", "My borrows" }
            Link { to: Route::Profile {}, active_class: "active", "Account" }
            Link { to: Route::BookManager {}, active_class: "active", "Books" }
            Link { to: Route::BorrowManager {}, active_class: "active", "Borrows" }
            Link { to: Route::ViolationManager {}, active_class: "active", "Violations" }
            Link { to: Route::UserManager {}, active_class: "active", "Users" }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
        NotificationStack {}
    }
}
