//! Coloured status tags and the menus administrators use to change a status.
//!
//! Labels and colours come from the descriptor table in `shelf::status`; these
//! components only render them. A status menu never changes anything on its
//! own: picking an entry opens a confirmation and `on_change` fires only once
//! the administrator confirms.

use dioxus::prelude::*;
use shelf::{BookStatus, BorrowStatus, Descriptor, Tone, UserRole, UserStatus, ViolationType};

use crate::views::ConfirmDialog;

#[component]
pub fn Tag(label: String, color: String, tone: Tone) -> Element {
    rsx! {
        span {
            class: "tag tag-{color} {tone.class()}",
            "{label}"
        }
    }
}

fn tag(descriptor: Descriptor<'_>) -> Element {
    rsx! {
        Tag {
            label: descriptor.label.to_string(),
            color: descriptor.color.to_string(),
            tone: descriptor.tone,
        }
    }
}

#[component]
pub fn BorrowStatusTag(status: BorrowStatus) -> Element {
    tag(status.descriptor())
}

#[component]
pub fn BookStatusTag(status: BookStatus) -> Element {
    tag(status.descriptor())
}

#[component]
pub fn UserStatusTag(status: UserStatus) -> Element {
    tag(status.descriptor())
}

#[component]
pub fn UserRoleTag(role: UserRole) -> Element {
    tag(role.descriptor())
}

#[component]
pub fn ViolationTag(kind: ViolationType) -> Element {
    tag(kind.descriptor())
}

/// One entry of a [`StatusMenu`]: the wire value plus how it is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusChoice {
    pub value: String,
    pub label: String,
    pub color: String,
    pub tone: Tone,
}

impl StatusChoice {
    pub fn new(value: &str, descriptor: Descriptor<'_>) -> Self {
        Self {
            value: value.to_string(),
            label: descriptor.label.to_string(),
            color: descriptor.color.to_string(),
            tone: descriptor.tone,
        }
    }
}

/// The current status as a tag button that opens a list of the other
/// statuses. Picking one asks "Change status to ...?" before calling
/// `on_change` with the chosen wire value.
#[component]
pub fn StatusMenu(
    current: StatusChoice,
    choices: Vec<StatusChoice>,
    on_change: EventHandler<String>,
    #[props(default)] disabled: bool,
) -> Element {
    let mut open = use_signal(|| false);
    let mut pending = use_signal(|| Option::<StatusChoice>::None);
    let others: Vec<StatusChoice> = choices
        .into_iter()
        .filter(|c| c.value != current.value)
        .collect();

    rsx! {
        div {
            class: "status-menu",
            button {
                class: "status-menu-toggle",
                disabled,
                title: "Change status",
                onclick: move |_| open.toggle(),
                Tag {
                    label: current.label.clone(),
                    color: current.color.clone(),
                    tone: current.tone,
                }
            }
            if open() && !disabled {
                div {
                    class: "status-menu-list",
                    for choice in others {
                        button {
                            key: "{choice.value}",
                            class: "status-menu-item",
                            onclick: {
                                let choice = choice.clone();
                                move |_| {
                                    open.set(false);
                                    pending.set(Some(choice.clone()));
                                }
                            },
                            Tag {
                                label: choice.label.clone(),
                                color: choice.color.clone(),
                                tone: choice.tone,
                            }
                        }
                    }
                }
            }
        }

        if let Some(choice) = pending() {
            ConfirmDialog {
                title: "Change status",
                message: "Change status to “{choice.label}”?",
                on_cancel: move |_| pending.set(None),
                on_confirm: move |_| {
                    if let Some(choice) = pending() {
                        pending.set(None);
                        on_change.call(choice.value);
                    }
                },
            }
        }
    }
}

/// Status menu over every known borrow status.
#[component]
pub fn BorrowStatusPicker(
    status: BorrowStatus,
    on_change: EventHandler<BorrowStatus>,
    #[props(default)] disabled: bool,
) -> Element {
    let choices = BorrowStatus::KNOWN
        .iter()
        .map(|s| StatusChoice::new(s.as_str(), s.descriptor()))
        .collect::<Vec<_>>();

    rsx! {
        StatusMenu {
            current: StatusChoice::new(status.as_str(), status.descriptor()),
            choices,
            disabled,
            on_change: move |raw: String| on_change.call(BorrowStatus::from(raw)),
        }
    }
}

/// Status menu over every known account status.
#[component]
pub fn UserStatusPicker(
    status: UserStatus,
    on_change: EventHandler<UserStatus>,
    #[props(default)] disabled: bool,
) -> Element {
    let choices = UserStatus::KNOWN
        .iter()
        .map(|s| StatusChoice::new(s.as_str(), s.descriptor()))
        .collect::<Vec<_>>();

    rsx! {
        StatusMenu {
            current: StatusChoice::new(status.as_str(), status.descriptor()),
            choices,
            disabled,
            on_change: move |raw: String| on_change.call(UserStatus::from(raw)),
        }
    }
}
