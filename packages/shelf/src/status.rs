//! # Status descriptors
//!
//! Every enumerated field the backend sends (borrow status, book availability,
//! user status and role, violation type) is mapped here, once, to a
//! [`Descriptor`]: a display label, a tag colour and an alert [`Tone`]. Views
//! never keep their own lookup tables; they call `descriptor()` on the value.
//!
//! | Enum | Wire values |
//! |------|-------------|
//! | [`BorrowStatus`] | `APPLIED`, `BORROWED`, `RETURNED`, `OVERDUE`, `LOST`, `CANCELLED`, `EXPIRED` |
//! | [`BookStatus`] | `AVAILABLE`, `BORROWED`, `MAINTENANCE` |
//! | [`UserStatus`] | `ACTIVE`, `DISABLED`, `LOCKED`, `DELETED` |
//! | [`UserRole`] | `ADMIN`, `USER` |
//! | [`ViolationType`] | `OVERDUE`, `LOST`, `EXPIRED` (each with its credit penalty) |
//!
//! Each enum also has an `Other(String)` variant holding any value outside its
//! table, shown under its raw name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity used for alert banners and badges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Neutral,
}

impl Tone {
    /// CSS modifier class for the tone.
    pub fn class(self) -> &'static str {
        match self {
            Tone::Info => "tone-info",
            Tone::Success => "tone-success",
            Tone::Warning => "tone-warning",
            Tone::Error => "tone-error",
            Tone::Neutral => "tone-neutral",
        }
    }
}

/// Display metadata for one enumerated value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor<'a> {
    pub label: &'a str,
    pub color: &'static str,
    pub tone: Tone,
}

/// Declares a wire enum: known variants plus `Other(String)`, which keeps
/// any value this client does not know so a single unexpected value never
/// fails a whole response.
macro_rules! wire_enum {
    (@count) => { 0usize };
    (@count $head:ident $($tail:ident)*) => { 1usize + wire_enum!(@count $($tail)*) };
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            /// Every value the backend defines, in display order.
            pub const KNOWN: [$name; wire_enum!(@count $($variant)+)] = [$($name::$variant),+];

            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $wire,)+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            /// Parse a known wire value, as found in filter form controls.
            pub fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                match Self::parse(&raw) {
                    Some(known) => known,
                    None => $name::Other(raw),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Lifecycle status of a borrow record.
    ///
    /// Transitions happen on the server only.
    BorrowStatus {
        Applied => "APPLIED",
        Borrowed => "BORROWED",
        Returned => "RETURNED",
        Overdue => "OVERDUE",
        Lost => "LOST",
        Cancelled => "CANCELLED",
        Expired => "EXPIRED",
    }
}

/// An administrator action on a borrow record: the status it moves to and
/// the button caption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub to: BorrowStatus,
    pub label: &'static str,
}

impl BorrowStatus {
    pub fn descriptor(&self) -> Descriptor<'_> {
        let (label, color, tone) = match self {
            BorrowStatus::Applied => ("Applied", "blue", Tone::Info),
            BorrowStatus::Borrowed => ("On loan", "green", Tone::Info),
            BorrowStatus::Returned => ("Returned", "cyan", Tone::Success),
            BorrowStatus::Overdue => ("Overdue", "red", Tone::Warning),
            BorrowStatus::Lost => ("Lost", "magenta", Tone::Error),
            BorrowStatus::Cancelled => ("Cancelled", "gray", Tone::Info),
            BorrowStatus::Expired => ("Expired", "orange", Tone::Info),
            BorrowStatus::Other(raw) => (raw.as_str(), "default", Tone::Info),
        };
        Descriptor { label, color, tone }
    }

    pub fn label(&self) -> &str {
        self.descriptor().label
    }

    /// The moves an administrator is offered from this status. Terminal and
    /// unknown statuses offer none.
    pub fn next_actions(&self) -> Vec<Transition> {
        match self {
            BorrowStatus::Applied => vec![Transition {
                to: BorrowStatus::Borrowed,
                label: "Approve",
            }],
            BorrowStatus::Borrowed => vec![
                Transition {
                    to: BorrowStatus::Returned,
                    label: "Mark returned",
                },
                Transition {
                    to: BorrowStatus::Lost,
                    label: "Mark lost",
                },
            ],
            BorrowStatus::Overdue => vec![Transition {
                to: BorrowStatus::Returned,
                label: "Mark returned",
            }],
            _ => Vec::new(),
        }
    }
}

wire_enum! {
    /// Availability of a catalog entry.
    BookStatus {
        Available => "AVAILABLE",
        Borrowed => "BORROWED",
        Maintenance => "MAINTENANCE",
    }
}

impl BookStatus {
    pub fn descriptor(&self) -> Descriptor<'_> {
        let (label, color, tone) = match self {
            BookStatus::Available => ("Available", "green", Tone::Success),
            BookStatus::Borrowed => ("All copies out", "red", Tone::Error),
            BookStatus::Maintenance => ("Not lending", "gray", Tone::Neutral),
            BookStatus::Other(raw) => (raw.as_str(), "default", Tone::Neutral),
        };
        Descriptor { label, color, tone }
    }
}

wire_enum! {
    /// Account status of a library user.
    UserStatus {
        Active => "ACTIVE",
        Disabled => "DISABLED",
        Locked => "LOCKED",
        Deleted => "DELETED",
    }
}

impl UserStatus {
    pub fn descriptor(&self) -> Descriptor<'_> {
        let (label, color, tone) = match self {
            UserStatus::Active => ("Active", "green", Tone::Success),
            UserStatus::Disabled => ("Restricted", "orange", Tone::Warning),
            UserStatus::Locked => ("Locked", "red", Tone::Error),
            UserStatus::Deleted => ("Deactivated", "gray", Tone::Neutral),
            UserStatus::Other(raw) => (raw.as_str(), "default", Tone::Neutral),
        };
        Descriptor { label, color, tone }
    }

    /// Statuses an administrator may give a new account.
    pub fn assignable() -> impl Iterator<Item = UserStatus> {
        Self::KNOWN
            .into_iter()
            .filter(|s| *s != UserStatus::Deleted)
    }
}

wire_enum! {
    UserRole {
        Admin => "ADMIN",
        User => "USER",
    }
}

impl UserRole {
    pub fn descriptor(&self) -> Descriptor<'_> {
        let (label, color) = match self {
            UserRole::Admin => ("Administrator", "red"),
            UserRole::User => ("Member", "blue"),
            UserRole::Other(raw) => (raw.as_str(), "default"),
        };
        Descriptor {
            label,
            color,
            tone: Tone::Info,
        }
    }
}

wire_enum! {
    /// Kind of penalty entry recorded against a user's credit score.
    ViolationType {
        Lost => "LOST",
        Overdue => "OVERDUE",
        Expired => "EXPIRED",
    }
}

impl ViolationType {
    pub fn descriptor(&self) -> Descriptor<'_> {
        let (label, color) = match self {
            ViolationType::Lost => ("Book lost", "red"),
            ViolationType::Overdue => ("Returned late", "orange"),
            ViolationType::Expired => ("Reservation expired", "blue"),
            ViolationType::Other(raw) => (raw.as_str(), "default"),
        };
        Descriptor {
            label,
            color,
            tone: Tone::Warning,
        }
    }

    /// Credit points the backend deducts for this violation, if known.
    pub fn credit_penalty(&self) -> Option<u32> {
        match self {
            ViolationType::Overdue => Some(20),
            ViolationType::Lost => Some(40),
            ViolationType::Expired => Some(10),
            ViolationType::Other(_) => None,
        }
    }
}

/// Colour band of a credit score: green from 80, orange from 50, red below.
pub fn credit_color(score: i32) -> &'static str {
    match score {
        80.. => "green",
        50..=79 => "orange",
        _ => "red",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borrow_status_wire_names() {
        for status in BorrowStatus::KNOWN {
            let wire = status.as_str().to_string();
            assert_eq!(BorrowStatus::from(wire), status);
        }
    }

    #[test]
    fn test_unknown_borrow_status_is_kept() {
        let status: BorrowStatus = serde_json::from_str("\"RENEWED\"").unwrap();
        assert_eq!(status, BorrowStatus::Other("RENEWED".to_string()));
        assert_eq!(status.label(), "RENEWED");
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"RENEWED\"");
    }

    #[test]
    fn test_alert_tones() {
        assert_eq!(BorrowStatus::Overdue.descriptor().tone, Tone::Warning);
        assert_eq!(BorrowStatus::Returned.descriptor().tone, Tone::Success);
        assert_eq!(BorrowStatus::Lost.descriptor().tone, Tone::Error);
        assert_eq!(BorrowStatus::Cancelled.descriptor().tone, Tone::Info);
    }

    #[test]
    fn test_violation_penalties() {
        assert_eq!(ViolationType::Overdue.credit_penalty(), Some(20));
        assert_eq!(ViolationType::Lost.credit_penalty(), Some(40));
        assert_eq!(ViolationType::Expired.credit_penalty(), Some(10));
        assert_eq!(ViolationType::parse("LOST"), Some(ViolationType::Lost));
        assert_eq!(ViolationType::parse("late"), None);
    }

    #[test]
    fn test_book_status_serde() {
        let status: BookStatus = serde_json::from_str("\"MAINTENANCE\"").unwrap();
        assert_eq!(status, BookStatus::Maintenance);
        assert_eq!(BookStatus::parse("AVAILABLE"), Some(BookStatus::Available));
    }

    #[test]
    fn test_unknown_values_fall_back_to_raw_label() {
        let status: UserStatus = serde_json::from_str("\"FROZEN\"").unwrap();
        assert_eq!(status, UserStatus::Other("FROZEN".to_string()));
        assert_eq!(status.descriptor().label, "FROZEN");
        assert_eq!(status.descriptor().color, "default");
        assert!(!status.is_known());

        let book: BookStatus = serde_json::from_str("\"ARCHIVED\"").unwrap();
        assert_eq!(book.descriptor().label, "ARCHIVED");
        assert_eq!(serde_json::to_string(&book).unwrap(), "\"ARCHIVED\"");

        let kind: ViolationType = serde_json::from_str("\"DAMAGED\"").unwrap();
        assert_eq!(kind.credit_penalty(), None);
        assert_eq!(kind.descriptor().label, "DAMAGED");

        let role: UserRole = serde_json::from_str("\"LIBRARIAN\"").unwrap();
        assert_eq!(role.as_str(), "LIBRARIAN");
    }

    #[test]
    fn test_known_values_keep_display_order() {
        assert_eq!(
            BookStatus::KNOWN.map(|s| s.as_str().to_string()),
            ["AVAILABLE", "BORROWED", "MAINTENANCE"].map(String::from)
        );
        assert_eq!(UserStatus::assignable().count(), 3);
        assert!(UserStatus::assignable().all(|s| s != UserStatus::Deleted));
    }

    #[test]
    fn test_next_actions() {
        let targets = |status: BorrowStatus| -> Vec<BorrowStatus> {
            status.next_actions().into_iter().map(|t| t.to).collect()
        };
        assert_eq!(targets(BorrowStatus::Applied), vec![BorrowStatus::Borrowed]);
        assert_eq!(
            targets(BorrowStatus::Borrowed),
            vec![BorrowStatus::Returned, BorrowStatus::Lost]
        );
        assert_eq!(targets(BorrowStatus::Overdue), vec![BorrowStatus::Returned]);
        for terminal in [
            BorrowStatus::Returned,
            BorrowStatus::Lost,
            BorrowStatus::Cancelled,
            BorrowStatus::Expired,
            BorrowStatus::Other("RENEWED".to_string()),
        ] {
            assert!(terminal.next_actions().is_empty(), "{terminal}");
        }
    }

    #[test]
    fn test_credit_bands() {
        assert_eq!(credit_color(100), "green");
        assert_eq!(credit_color(80), "green");
        assert_eq!(credit_color(79), "orange");
        assert_eq!(credit_color(50), "orange");
        assert_eq!(credit_color(49), "red");
        assert_eq!(credit_color(-5), "red");
    }
}
