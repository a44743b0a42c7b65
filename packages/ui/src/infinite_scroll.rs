//! Scroll container that asks for the next page near its bottom edge.
//!
//! Scroll and resize events only restart the debounce window; a taller
//! container can expose its bottom edge without any scrolling. A polling task
//! evaluates the trigger once the window has elapsed, reading the container
//! geometry from the DOM. Repeated or early requests are harmless: the paginator drops
//! anything issued while a page is loading or after the last one.

use std::time::Duration;

use dioxus::prelude::*;
use shelf::{now_millis, ScrollMetrics, ScrollTrigger};

use crate::context::use_shelf;
use crate::timer::sleep;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[component]
pub fn InfiniteScroll(
    /// DOM id of the scroll container.
    id: String,
    has_more: bool,
    loading: bool,
    on_load_more: EventHandler<()>,
    /// Shown under the items once the list is exhausted.
    #[props(default = "No more results".to_string())]
    end_label: String,
    children: Element,
) -> Element {
    let paging = use_shelf().config.paging;
    let mut trigger = use_signal(|| ScrollTrigger::from_config(&paging));
    let container_id = use_signal(|| id.clone());

    use_effect(move || {
        spawn(async move {
            loop {
                sleep(POLL_INTERVAL).await;
                let fire = trigger
                    .write()
                    .poll(now_millis(), || read_metrics(&container_id.peek()));
                if fire {
                    on_load_more.call(());
                }
            }
        });
    });

    // A short page may not fill the container; re-check after every load.
    use_effect(use_reactive!(|(loading,)| {
        if !loading {
            trigger.write().signal(now_millis());
        }
    }));

    rsx! {
        div {
            id: "{id}",
            class: "infinite-scroll",
            onscroll: move |_| trigger.write().signal(now_millis()),
            onresize: move |_| trigger.write().signal(now_millis()),
            {children}
            div {
                class: "infinite-scroll-footer",
                if loading {
                    span { class: "spinner", "Loading…" }
                } else if has_more {
                    button {
                        class: "secondary",
                        onclick: move |_| on_load_more.call(()),
                        "Load more"
                    }
                } else {
                    span { class: "infinite-scroll-end", "{end_label}" }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_metrics(id: &str) -> Option<ScrollMetrics> {
    let element = web_sys::window()?.document()?.get_element_by_id(id)?;
    Some(ScrollMetrics {
        scroll_height: f64::from(element.scroll_height()),
        scroll_top: f64::from(element.scroll_top()),
        client_height: f64::from(element.client_height()),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn read_metrics(_id: &str) -> Option<ScrollMetrics> {
    None
}
