use dioxus::prelude::*;

use crate::Icon;
use crate::icons::FaBookOpenReader;

/// Top bar: brand on the left, the platform's route links as children.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        nav {
            class: "navbar",
            span {
                class: "navbar-brand",
                Icon { icon: FaBookOpenReader, width: 18, height: 18 }
                "Bookshelf"
            }
            div {
                class: "navbar-links",
                {children}
            }
        }
    }
}
