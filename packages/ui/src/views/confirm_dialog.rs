use dioxus::prelude::*;

use super::ModalOverlay;

/// Yes/no question over the modal overlay. Dismissing it counts as cancel.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
    #[props(default = "Confirm".to_string())] confirm_label: String,
    #[props(default)] danger: bool,
) -> Element {
    rsx! {
        ModalOverlay {
            title,
            on_close: move |_| on_cancel.call(()),
            p { class: "confirm-message", "{message}" }
            div {
                class: "form-actions",
                button {
                    class: "secondary",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: if danger { "danger" } else { "primary" },
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            }
        }
    }
}
