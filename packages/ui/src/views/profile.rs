use api::{PasswordChange, ProfileUpdate};
use dioxus::prelude::*;
use shelf::format::{cos_url, format_opt, PLACEHOLDER};
use shelf::status::credit_color;
use shelf::{Tone, User};

use super::ModalOverlay;
use crate::context::use_shelf;
use crate::notifications::{notify, notify_error, use_notifications};
use crate::status_tag::{Tag, UserRoleTag, UserStatusTag};

#[derive(Clone, Copy, PartialEq)]
enum Editing {
    Profile,
    Password,
}

/// The signed-in account: details, credit score, profile and password forms.
#[component]
pub fn ProfileView() -> Element {
    let shelf = use_shelf();
    let mut notices = use_notifications();
    let mut user = use_signal(|| Option::<User>::None);
    let mut editing = use_signal(|| Option::<Editing>::None);
    let mut revision = use_signal(|| 0u32);

    let client = shelf.client.clone();
    let _loader = use_resource(move || {
        let client = client.clone();
        let _ = revision();
        async move {
            match client.current_user().await {
                Ok(found) => user.set(Some(found)),
                Err(e) => notify_error(&mut notices, "Loading your account", &e),
            }
        }
    });

    let Some(current) = user() else {
        return rsx! {
            p { class: "muted", "Loading…" }
        };
    };
    let avatar = current
        .avatar
        .as_deref()
        .map(|path| cos_url(&shelf.config.assets, path))
        .unwrap_or_default();

    rsx! {
        div {
            class: "profile",
            div {
                class: "profile-header",
                if !avatar.is_empty() {
                    img { class: "user-avatar", src: "{avatar}", alt: "{current.username}" }
                }
                h1 { "{current.display_name()}" }
                UserRoleTag { role: current.role.clone() }
                UserStatusTag { status: current.status.clone() }
            }
            dl {
                class: "profile-fields",
                dt { "Username" }
                dd { "{current.username}" }
                dt { "Name" }
                dd { {current.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string())} }
                dt { "Phone" }
                dd { {current.phone.clone().unwrap_or_else(|| PLACEHOLDER.to_string())} }
                dt { "Credit score" }
                dd {
                    Tag {
                        label: current.credit_score.to_string(),
                        color: credit_color(current.credit_score).to_string(),
                        tone: Tone::Neutral,
                    }
                }
                dt { "Member since" }
                dd { "{format_opt(current.created_at.as_ref())}" }
            }
            div {
                class: "form-actions",
                button {
                    class: "primary",
                    onclick: move |_| editing.set(Some(Editing::Profile)),
                    "Edit profile"
                }
                button {
                    class: "secondary",
                    onclick: move |_| editing.set(Some(Editing::Password)),
                    "Change password"
                }
            }
        }

        if editing() == Some(Editing::Profile) {
            ProfileModal {
                user: current.clone(),
                on_close: move |_| editing.set(None),
                on_saved: move |_| {
                    editing.set(None);
                    *revision.write() += 1;
                },
            }
        }
        if editing() == Some(Editing::Password) {
            PasswordModal { on_close: move |_| editing.set(None) }
        }
    }
}

#[component]
fn ProfileModal(user: User, on_close: EventHandler<()>, on_saved: EventHandler<()>) -> Element {
    let client = use_shelf().client;
    let mut notices = use_notifications();
    let mut draft = use_signal(|| ProfileUpdate::from_user(&user));
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let profile = draft();
        if let Err(e) = profile.validate() {
            notify(&mut notices, Tone::Warning, &e.to_string());
            return;
        }
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            match client.update_profile(&profile).await {
                Ok(msg) => {
                    notify(&mut notices, Tone::Success, msg.as_deref().unwrap_or("Profile updated"));
                    on_saved.call(());
                }
                Err(e) => notify_error(&mut notices, "Updating profile", &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            title: "Edit profile",
            on_close: move |_| on_close.call(()),
            form {
                class: "form-grid",
                onsubmit: submit,
                label {
                    "Username"
                    input {
                        value: draft().username,
                        maxlength: "16",
                        oninput: move |evt| draft.write().username = evt.value(),
                    }
                }
                label {
                    "Name"
                    input {
                        value: draft().name,
                        maxlength: "16",
                        oninput: move |evt| draft.write().name = evt.value(),
                    }
                }
                label {
                    "Phone"
                    input {
                        r#type: "tel",
                        value: draft().phone,
                        oninput: move |evt| draft.write().phone = evt.value(),
                    }
                }
                div {
                    class: "form-actions",
                    button {
                        r#type: "submit",
                        class: "primary",
                        disabled: saving(),
                        "Save"
                    }
                    button {
                        r#type: "button",
                        class: "secondary",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}

#[component]
fn PasswordModal(on_close: EventHandler<()>) -> Element {
    let client = use_shelf().client;
    let mut notices = use_notifications();
    let mut draft = use_signal(PasswordChange::default);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let change = draft();
        if let Err(e) = change.validate() {
            notify(&mut notices, Tone::Warning, &e.to_string());
            return;
        }
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            match client.change_password(&change).await {
                Ok(msg) => {
                    notify(&mut notices, Tone::Success, msg.as_deref().unwrap_or("Password changed"));
                    on_close.call(());
                }
                Err(e) => notify_error(&mut notices, "Changing password", &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            title: "Change password",
            on_close: move |_| on_close.call(()),
            form {
                class: "form-grid",
                onsubmit: submit,
                label {
                    "Current password"
                    input {
                        r#type: "password",
                        value: draft().old_password,
                        oninput: move |evt| draft.write().old_password = evt.value(),
                    }
                }
                label {
                    "New password"
                    input {
                        r#type: "password",
                        value: draft().password,
                        oninput: move |evt| draft.write().password = evt.value(),
                    }
                }
                label {
                    "Repeat new password"
                    input {
                        r#type: "password",
                        value: draft().confirm,
                        oninput: move |evt| draft.write().confirm = evt.value(),
                    }
                }
                div {
                    class: "form-actions",
                    button {
                        r#type: "submit",
                        class: "primary",
                        disabled: saving(),
                        "Change"
                    }
                    button {
                        r#type: "button",
                        class: "secondary",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                }
            }
        }
    }
}
