//! Transient notices shown after user actions.
//!
//! Every failed request ends up here instead of being retried: the view that
//! triggered it calls [`notify_error`] and moves on.
//!
//! Each notice carries its own deadline. Expiry is swept by
//! [`use_notice_sweeper`], which runs in the provider's scope, so a notice
//! raised just before navigating away still disappears on time.

use std::time::Duration;

use dioxus::prelude::*;
use shelf::Tone;

use crate::Icon;
use crate::icons::FaXmark;
use crate::timer::sleep;

/// Notices beyond this count push out the oldest one.
const MAX_VISIBLE: usize = 4;
const LIFETIME: Duration = Duration::from_secs(6);
const SWEEP_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub timestamp: String,
    pub tone: Tone,
    pub message: String,
    /// Milliseconds since the epoch after which the notice is dropped.
    pub expires_at: u64,
}

#[derive(Clone, Debug, Default)]
pub struct Notifications {
    pub entries: Vec<Notice>,
    next_id: u64,
}

impl Notifications {
    pub fn push(&mut self, tone: Tone, message: impl Into<String>) -> u64 {
        self.push_at(shelf::now_millis(), tone, message)
    }

    pub fn push_at(&mut self, now: u64, tone: Tone, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.entries.push(Notice {
            id: self.next_id,
            timestamp: current_time(),
            tone,
            message: message.into(),
            expires_at: now + LIFETIME.as_millis() as u64,
        });
        if self.entries.len() > MAX_VISIBLE {
            self.entries.remove(0);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }

    pub fn has_expired(&self, now: u64) -> bool {
        self.entries.iter().any(|n| n.expires_at <= now)
    }

    /// Drop every notice whose deadline has passed.
    pub fn prune(&mut self, now: u64) {
        self.entries.retain(|n| n.expires_at > now);
    }
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

/// Sweep expired notices for as long as the calling component lives. Called
/// once, by the provider that owns the notice signal.
pub(crate) fn use_notice_sweeper(mut notices: Signal<Notifications>) {
    use_future(move || async move {
        loop {
            sleep(SWEEP_INTERVAL).await;
            let now = shelf::now_millis();
            if notices.peek().has_expired(now) {
                notices.write().prune(now);
            }
        }
    });
}

pub fn notify(notices: &mut Signal<Notifications>, tone: Tone, message: &str) {
    notices.write().push(tone, message);
}

/// Report a failed request. Backend rejections show the server's message;
/// everything else is prefixed with what was being attempted.
pub fn notify_error(notices: &mut Signal<Notifications>, action: &str, err: &api::ApiError) {
    tracing::warn!("{action}: {err}");
    let message = if err.is_rejection() {
        err.to_string()
    } else {
        format!("{action}: {err}")
    };
    notices.write().push(Tone::Error, message);
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Stack of dismissable notices in the corner of the viewport.
#[component]
pub fn NotificationStack() -> Element {
    let mut notices = use_notifications();
    let entries = notices().entries.clone();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "notification-stack",
            for entry in entries {
                div {
                    key: "{entry.id}",
                    class: "notification {entry.tone.class()}",
                    span { class: "notification-time", "{entry.timestamp}" }
                    span { class: "notification-message", "{entry.message}" }
                    button {
                        class: "notification-close",
                        title: "Dismiss",
                        onclick: move |_| notices.write().dismiss(entry.id),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_notice_is_dropped() {
        let mut notices = Notifications::default();
        for i in 0..6 {
            notices.push(Tone::Info, format!("notice {i}"));
        }
        assert_eq!(notices.entries.len(), MAX_VISIBLE);
        assert_eq!(notices.entries[0].message, "notice 2");
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut notices = Notifications::default();
        let first = notices.push(Tone::Error, "first");
        notices.push(Tone::Success, "second");
        notices.dismiss(first);
        assert_eq!(notices.entries.len(), 1);
        assert_eq!(notices.entries[0].message, "second");
    }

    #[test]
    fn test_notices_expire_on_their_own_deadline() {
        let mut notices = Notifications::default();
        notices.push_at(1_000, Tone::Error, "early");
        notices.push_at(4_000, Tone::Success, "late");
        let lifetime = LIFETIME.as_millis() as u64;

        assert!(!notices.has_expired(1_000 + lifetime - 1));
        assert!(notices.has_expired(1_000 + lifetime));

        notices.prune(1_000 + lifetime);
        assert_eq!(notices.entries.len(), 1);
        assert_eq!(notices.entries[0].message, "late");

        notices.prune(4_000 + lifetime);
        assert!(notices.entries.is_empty());
    }
}
