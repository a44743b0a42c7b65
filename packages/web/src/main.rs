use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use shelf::ShelfConfig;
use ui::ShelfProvider;
use views::{
    BookDetail, BookManager, BorrowManager, Catalog, MyBorrows, Profile, Shell, UserManager,
    ViolationManager,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Catalog {},
        #[route("/books/:id")]
        BookDetail { id: String },
        #[route("/me")]
        Profile {},
        #[route("/me/borrows")]
        MyBorrows {},
        #[route("/admin/books")]
        BookManager {},
        #[route("/admin/borrows")]
        BorrowManager {},
        #[route("/admin/violations")]
        ViolationManager {},
        #[route("/admin/users")]
        UserManager {},
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

const BOOKSHELF_TOML: &str = include_str!("../bookshelf.toml");

fn main() {
    // The dev server may have installed a subscriber already.
    dioxus::logger::init(Level::INFO).ok();
    dioxus::launch(App);
}

/// Native builds layer `bookshelf.toml` in the working directory and
/// `BOOKSHELF_*` variables over the bundled file.
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> ShelfConfig {
    match api::settings::Settings::load_over(BOOKSHELF_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid settings, using the bundled bookshelf.toml: {e}");
            bundled_config()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> ShelfConfig {
    bundled_config()
}

fn bundled_config() -> ShelfConfig {
    match ShelfConfig::from_toml(BOOKSHELF_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid bookshelf.toml, using defaults: {e}");
            ShelfConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::UI_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ShelfProvider {
            config,
            Router::<Route> {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_config_is_valid() {
        let config = ShelfConfig::from_toml(BOOKSHELF_TOML).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(bundled_config(), config);
    }
}
