use api::sources::user_pages;
use api::{NewUser, UserFilters};
use dioxus::prelude::*;
use shelf::format::{cos_url, format_opt, PLACEHOLDER};
use shelf::status::credit_color;
use shelf::{Tone, User, UserRole, UserStatus};

use super::ModalOverlay;
use crate::context::use_shelf;
use crate::infinite_scroll::InfiniteScroll;
use crate::notifications::{notify, notify_error, use_notifications};
use crate::paged_list::use_paged_list;
use crate::status_tag::{Tag, UserRoleTag, UserStatusPicker};

/// Account administration: the user table, a detail drawer per user and the
/// form for creating accounts.
#[component]
pub fn UserManagerView() -> Element {
    let shelf = use_shelf();
    let client = shelf.client.clone();
    let mut notices = use_notifications();
    let list = use_paged_list("Loading users", shelf.config.paging.page_size, || {
        user_pages(client.clone())
    });

    let mut username = use_signal(String::new);
    let mut status = use_signal(|| Option::<UserStatus>::None);
    let mut updating = use_signal(|| Option::<String>::None);
    let mut inspected = use_signal(|| Option::<String>::None);
    let mut creating = use_signal(|| false);
    // Bumped after a change so an open drawer reloads its user.
    let mut revision = use_signal(|| 0u32);

    use_effect(move || list.load(UserFilters::default()));

    let filters = move || {
        UserFilters {
            username: Some(username()),
            status: status(),
        }
        .normalized()
    };

    let change_status = move |(user_id, next): (String, UserStatus)| {
        let client = client.clone();
        spawn(async move {
            updating.set(Some(user_id.clone()));
            match client.change_user_status(&user_id, &next).await {
                Ok(msg) => {
                    let text = msg.unwrap_or_else(|| {
                        format!("Account set to {}", next.descriptor().label)
                    });
                    notify(&mut notices, Tone::Success, &text);
                    *revision.write() += 1;
                    list.refresh();
                }
                Err(e) => notify_error(&mut notices, "Updating account status", &e),
            }
            updating.set(None);
        });
    };

    rsx! {
        div {
            class: "manager",
            form {
                class: "filter-bar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    list.load(filters());
                },
                input {
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt| username.set(evt.value()),
                }
                select {
                    onchange: move |evt| {
                        status.set(UserStatus::parse(&evt.value()));
                        list.load(filters());
                    },
                    option { value: "", selected: status().is_none(), "Any status" }
                    for s in UserStatus::KNOWN {
                        option {
                            key: "{s.as_str()}",
                            value: "{s.as_str()}",
                            selected: status().as_ref() == Some(&s),
                            "{s.descriptor().label}"
                        }
                    }
                }
                button { r#type: "submit", class: "primary", "Search" }
                button {
                    r#type: "button",
                    class: "secondary",
                    onclick: move |_| creating.set(true),
                    "New user"
                }
            }

            InfiniteScroll {
                id: "user-manager-scroll",
                has_more: list.has_more(),
                loading: list.is_fetching(),
                on_load_more: move |_| list.load_more(),
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "ID" }
                            th { "Username" }
                            th { "Name" }
                            th { "Phone" }
                            th { "Role" }
                            th { "Credit" }
                            th { "Status" }
                            th {}
                        }
                    }
                    tbody {
                        for user in list.items() {
                            tr {
                                key: "{user.id}",
                                td { "{user.id}" }
                                td { "{user.username}" }
                                td { "{user.display_name()}" }
                                td { {user.phone.clone().unwrap_or_else(|| PLACEHOLDER.to_string())} }
                                td { UserRoleTag { role: user.role.clone() } }
                                td {
                                    Tag {
                                        label: user.credit_score.to_string(),
                                        color: credit_color(user.credit_score).to_string(),
                                        tone: Tone::Neutral,
                                    }
                                }
                                td {
                                    UserStatusPicker {
                                        status: user.status.clone(),
                                        disabled: updating().as_deref() == Some(user.id.as_str()),
                                        on_change: {
                                            let user_id = user.id.clone();
                                            let change_status = change_status.clone();
                                            move |next: UserStatus| change_status((user_id.clone(), next))
                                        },
                                    }
                                }
                                td {
                                    button {
                                        class: "link",
                                        onclick: {
                                            let user_id = user.id.clone();
                                            move |_| inspected.set(Some(user_id.clone()))
                                        },
                                        "Details"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(user_id) = inspected() {
            ModalOverlay {
                title: "User {user_id}",
                on_close: move |_| inspected.set(None),
                UserDetails {
                    key: "{user_id}",
                    user_id: user_id.clone(),
                    revision: revision(),
                    updating: updating().as_deref() == Some(user_id.as_str()),
                    on_change_status: {
                        let user_id = user_id.clone();
                        let change_status = change_status.clone();
                        move |next: UserStatus| change_status((user_id.clone(), next))
                    },
                }
            }
        }

        if creating() {
            CreateUserModal {
                on_close: move |_| creating.set(false),
                on_created: move |_| {
                    creating.set(false);
                    list.refresh();
                },
            }
        }
    }
}

/// Profile card for one account, fetched fresh from the backend.
#[component]
fn UserDetails(
    user_id: String,
    revision: u32,
    updating: bool,
    on_change_status: EventHandler<UserStatus>,
) -> Element {
    let shelf = use_shelf();
    let mut notices = use_notifications();
    let mut user = use_signal(|| Option::<User>::None);

    let client = shelf.client.clone();
    let _loader = use_resource(use_reactive!(|(user_id, revision)| {
        let client = client.clone();
        async move {
            tracing::debug!("Loading user {user_id} (revision {revision})");
            match client.user_by_id(&user_id).await {
                Ok(found) => user.set(Some(found)),
                Err(e) => notify_error(&mut notices, "Loading user", &e),
            }
        }
    }));

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
            class: "user-details",
            if !avatar.is_empty() {
                img { class: "user-avatar", src: "{avatar}", alt: "{current.username}" }
            }
            dl {
                dt { "Username" }
                dd { "{current.username}" }
                dt { "Name" }
                dd { {current.name.clone().unwrap_or_else(|| PLACEHOLDER.to_string())} }
                dt { "Phone" }
                dd { {current.phone.clone().unwrap_or_else(|| PLACEHOLDER.to_string())} }
                dt { "Role" }
                dd { UserRoleTag { role: current.role.clone() } }
                dt { "Status" }
                dd {
                    UserStatusPicker {
                        status: current.status.clone(),
                        disabled: updating,
                        on_change: on_change_status,
                    }
                }
                dt { "Credit score" }
                dd {
                    Tag {
                        label: current.credit_score.to_string(),
                        color: credit_color(current.credit_score).to_string(),
                        tone: Tone::Neutral,
                    }
                }
                dt { "Created" }
                dd { "{format_opt(current.created_at.as_ref())}" }
                dt { "Updated" }
                dd { "{format_opt(current.updated_at.as_ref())}" }
            }
        }
    }
}

/// Form for a new account. Deactivated accounts cannot be created directly.
#[component]
fn CreateUserModal(on_close: EventHandler<()>, on_created: EventHandler<()>) -> Element {
    let client = use_shelf().client;
    let mut notices = use_notifications();
    let mut draft = use_signal(NewUser::default);
    let mut saving = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let user = draft();
        if let Err(e) = user.validate() {
            notify(&mut notices, Tone::Warning, &e.to_string());
            return;
        }
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            match client.add_user(&user).await {
                Ok(msg) => {
                    notify(
                        &mut notices,
                        Tone::Success,
                        msg.as_deref().unwrap_or("Account created"),
                    );
                    on_created.call(());
                }
                Err(e) => notify_error(&mut notices, "Creating account", &e),
            }
            saving.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            title: "New user",
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
                    "Password"
                    input {
                        r#type: "password",
                        value: draft().password,
                        oninput: move |evt| draft.write().password = evt.value(),
                    }
                }
                label {
                    "Repeat password"
                    input {
                        r#type: "password",
                        value: draft().password_again,
                        oninput: move |evt| draft.write().password_again = evt.value(),
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
                label {
                    "Role"
                    select {
                        onchange: move |evt| draft.write().role = UserRole::from(evt.value()),
                        for role in UserRole::KNOWN {
                            option {
                                key: "{role.as_str()}",
                                value: "{role.as_str()}",
                                selected: draft().role == role,
                                "{role.descriptor().label}"
                            }
                        }
                    }
                }
                label {
                    "Status"
                    select {
                        onchange: move |evt| draft.write().status = UserStatus::from(evt.value()),
                        for status in UserStatus::assignable() {
                            option {
                                key: "{status.as_str()}",
                                value: "{status.as_str()}",
                                selected: draft().status == status,
                                "{status.descriptor().label}"
                            }
                        }
                    }
                }
                div {
                    class: "form-actions",
                    button {
                        r#type: "submit",
                        class: "primary",
                        disabled: saving(),
                        if saving() { "Creating…" } else { "Create" }
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
