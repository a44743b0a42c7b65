//! App-wide context: configuration, the backend client and the notice stack.

use api::ApiClient;
use dioxus::prelude::*;
use shelf::ShelfConfig;

use crate::notifications::{use_notice_sweeper, Notifications};

/// Configuration plus a client built from it.
#[derive(Clone, Debug)]
pub struct Shelf {
    pub config: ShelfConfig,
    pub client: ApiClient,
}

impl PartialEq for Shelf {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl Shelf {
    pub fn new(mut config: ShelfConfig) -> Result<Self, api::ApiError> {
        if config.api.base_url.is_empty() {
            config.api.base_url = page_origin();
        }
        let client = ApiClient::new(&config.api)?;
        Ok(Self { config, client })
    }
}

/// Origin of the page serving the app, so an empty `base_url` means "same host".
#[cfg(target_arch = "wasm32")]
fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> String {
    String::new()
}

pub fn use_shelf() -> Shelf {
    use_context::<Shelf>()
}

pub fn use_client() -> ApiClient {
    use_shelf().client
}

/// Wrap the router with this to make [`use_shelf`] and the notice stack
/// available everywhere.
#[component]
pub fn ShelfProvider(config: ShelfConfig, children: Element) -> Element {
    let notices = use_context_provider(|| Signal::new(Notifications::default()));
    use_notice_sweeper(notices);
    let shelf = use_hook(|| Shelf::new(config.clone()).map_err(|e| e.to_string()));

    match shelf {
        Ok(shelf) => rsx! {
            ShelfScope { shelf, {children} }
        },
        Err(e) => {
            tracing::error!("Failed to create the API client: {e}");
            rsx! {
                div {
                    class: "fatal-error",
                    h2 { "Bookshelf could not start" }
                    p { "{e}" }
                }
            }
        }
    }
}

#[component]
fn ShelfScope(shelf: Shelf, children: Element) -> Element {
    use_context_provider(|| shelf.clone());
    rsx! {
        {children}
    }
}
