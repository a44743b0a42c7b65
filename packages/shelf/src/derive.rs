//! # Borrow-status derivation
//!
//! [`derive_status`] turns a [`BorrowRecord`] and the current instant into the
//! text shown on borrow detail panels. It is total over every status and has
//! no side effects; the caller passes `now` so the result is reproducible.
//!
//! | Status | Computed value | Message | Supplementary text |
//! |--------|----------------|---------|--------------------|
//! | `APPLIED` | `remaining_hours = floor((created + 24h − now) / 1h)` | pickup deadline while `remaining_hours > 0`, otherwise the window-missed notice | hours left, none once missed |
//! | `BORROWED` | `remaining_days = floor((due − now) / 1d)` | due date (`not set` without one) | days left while `remaining_days >= 0`, otherwise past due |
//! | `OVERDUE` | `overdue_days = floor((now − due) / 1d)`, `0` without a due date | overdue day count | contact-the-borrower prompt |
//! | `RETURNED` | - | return timestamp or `unknown` | none |
//! | anything else | - | label from the status table | none |
//!
//! All divisions floor toward negative infinity, so a deadline one second in
//! the past already counts as `-1`.

use chrono::{DateTime, TimeDelta, Utc};

use crate::format::{count, format_date_time};
use crate::models::BorrowRecord;
use crate::status::BorrowStatus;

/// How long an applied reservation waits for pickup, in hours.
pub const PICKUP_WINDOW_HOURS: i64 = 24;

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Numbers behind a derived status.
#[derive(Clone, Debug, PartialEq)]
pub enum Derivation {
    Applied {
        pickup_deadline: DateTime<Utc>,
        remaining_hours: i64,
    },
    Borrowed {
        due: Option<DateTime<Utc>>,
        remaining_days: Option<i64>,
    },
    Overdue {
        overdue_days: i64,
    },
    Returned {
        returned_at: Option<DateTime<Utc>>,
    },
    /// Cancelled, expired, lost or unrecognised: label only.
    Settled,
}

impl Derivation {
    /// True when the record's own deadline has already passed.
    pub fn is_past_deadline(&self) -> bool {
        match self {
            Derivation::Applied {
                remaining_hours, ..
            } => *remaining_hours <= 0,
            Derivation::Borrowed {
                remaining_days: Some(days),
                ..
            } => *days < 0,
            Derivation::Overdue { .. } => true,
            _ => false,
        }
    }
}

/// Rendered status of a borrow record.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusInfo {
    pub derivation: Derivation,
    pub message: String,
    pub additional_info: Option<String>,
}

fn floor_units(delta: TimeDelta, unit_ms: i64) -> i64 {
    delta.num_milliseconds().div_euclid(unit_ms)
}

/// Derive the status message for `record` as of `now`.
pub fn derive_status(record: &BorrowRecord, now: DateTime<Utc>) -> StatusInfo {
    match &record.status {
        BorrowStatus::Applied => {
            let pickup_deadline = record.created_at + TimeDelta::hours(PICKUP_WINDOW_HOURS);
            let remaining_hours = floor_units(pickup_deadline - now, HOUR_MS);
            let (message, additional_info) = if remaining_hours > 0 {
                (
                    format!(
                        "Applied · pick up before {}",
                        format_date_time(&pickup_deadline)
                    ),
                    Some(format!("{} left", count(remaining_hours, "hour"))),
                )
            } else {
                (
                    "Pickup window missed · the reservation expired automatically".to_string(),
                    None,
                )
            };
            StatusInfo {
                derivation: Derivation::Applied {
                    pickup_deadline,
                    remaining_hours,
                },
                message,
                additional_info,
            }
        }
        BorrowStatus::Borrowed => {
            let due = record.due_time;
            let remaining_days = due.map(|due| floor_units(due - now, DAY_MS));
            let message = match &due {
                Some(due) => format!("On loan · due {}", format_date_time(due)),
                None => "On loan · due date not set".to_string(),
            };
            let additional_info = remaining_days.map(|days| {
                if days >= 0 {
                    format!("{} left", count(days, "day"))
                } else {
                    "Past the due date".to_string()
                }
            });
            StatusInfo {
                derivation: Derivation::Borrowed {
                    due,
                    remaining_days,
                },
                message,
                additional_info,
            }
        }
        BorrowStatus::Overdue => {
            let overdue_days = record
                .due_time
                .map(|due| floor_units(now - due, DAY_MS))
                .unwrap_or(0);
            StatusInfo {
                derivation: Derivation::Overdue { overdue_days },
                message: format!("Overdue · {} past due", count(overdue_days, "day")),
                additional_info: Some("Please contact the borrower to return the book".to_string()),
            }
        }
        BorrowStatus::Returned => {
            let returned_at = record.return_time;
            let when = returned_at
                .as_ref()
                .map(format_date_time)
                .unwrap_or_else(|| "unknown".to_string());
            StatusInfo {
                derivation: Derivation::Returned { returned_at },
                message: format!("Returned · {when}"),
                additional_info: None,
            }
        }
        other => StatusInfo {
            derivation: Derivation::Settled,
            message: format!("Status: {}", other.label()),
            additional_info: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn record(status: BorrowStatus) -> BorrowRecord {
        BorrowRecord {
            status,
            ..BorrowRecord::applied("1", t0())
        }
    }

    #[test]
    fn test_applied_within_window() {
        let info = derive_status(&record(BorrowStatus::Applied), t0() + TimeDelta::minutes(90));
        assert_eq!(
            info.derivation,
            Derivation::Applied {
                pickup_deadline: t0() + TimeDelta::hours(24),
                remaining_hours: 22,
            }
        );
        assert_eq!(info.message, "Applied · pick up before 2024/05/02 10:00");
        assert_eq!(info.additional_info.as_deref(), Some("22 hours left"));
    }

    #[test]
    fn test_applied_window_boundary() {
        let info = derive_status(&record(BorrowStatus::Applied), t0() + TimeDelta::hours(24));
        assert!(matches!(
            info.derivation,
            Derivation::Applied { remaining_hours: 0, .. }
        ));
        assert!(info.message.starts_with("Pickup window missed"));
        assert!(info.additional_info.is_none());
    }

    #[test]
    fn test_applied_window_missed() {
        let info = derive_status(&record(BorrowStatus::Applied), t0() + TimeDelta::hours(25));
        assert!(matches!(
            info.derivation,
            Derivation::Applied { remaining_hours: -1, .. }
        ));
        assert!(info.message.starts_with("Pickup window missed"));
        assert!(info.derivation.is_past_deadline());
    }

    #[test]
    fn test_borrowed_remaining_days() {
        let due = t0() + TimeDelta::days(10);
        let mut r = record(BorrowStatus::Borrowed);
        r.due_time = Some(due);

        let info = derive_status(&r, t0());
        assert_eq!(info.message, "On loan · due 2024/05/11 10:00");
        assert_eq!(info.additional_info.as_deref(), Some("10 days left"));

        // Due later today: floor gives 0, still not late.
        let info = derive_status(&r, due - TimeDelta::hours(5));
        assert!(matches!(
            info.derivation,
            Derivation::Borrowed { remaining_days: Some(0), .. }
        ));
        assert_eq!(info.additional_info.as_deref(), Some("0 days left"));

        // An hour past due floors to -1.
        let info = derive_status(&r, due + TimeDelta::hours(1));
        assert_eq!(info.additional_info.as_deref(), Some("Past the due date"));
        assert!(info.derivation.is_past_deadline());
    }

    #[test]
    fn test_borrowed_without_due_date() {
        let info = derive_status(&record(BorrowStatus::Borrowed), t0());
        assert_eq!(info.message, "On loan · due date not set");
        assert!(info.additional_info.is_none());
    }

    #[test]
    fn test_overdue_day_count() {
        let due = t0();
        let mut r = record(BorrowStatus::Overdue);
        r.due_time = Some(due);

        let info = derive_status(&r, due + TimeDelta::days(3));
        assert_eq!(info.derivation, Derivation::Overdue { overdue_days: 3 });
        assert_eq!(info.message, "Overdue · 3 days past due");
        assert!(info.additional_info.is_some());

        let info = derive_status(&r, due + TimeDelta::days(3) - TimeDelta::seconds(1));
        assert_eq!(info.derivation, Derivation::Overdue { overdue_days: 2 });
    }

    #[test]
    fn test_overdue_without_due_date() {
        let info = derive_status(&record(BorrowStatus::Overdue), t0());
        assert_eq!(info.derivation, Derivation::Overdue { overdue_days: 0 });
    }

    #[test]
    fn test_returned() {
        let mut r = record(BorrowStatus::Returned);
        assert_eq!(derive_status(&r, t0()).message, "Returned · unknown");

        r.return_time = Some(t0() + TimeDelta::days(2));
        assert_eq!(derive_status(&r, t0()).message, "Returned · 2024/05/03 10:00");
    }

    #[test]
    fn test_settled_statuses_use_labels() {
        let info = derive_status(&record(BorrowStatus::Cancelled), t0());
        assert_eq!(info.derivation, Derivation::Settled);
        assert_eq!(info.message, "Status: Cancelled");
        assert!(info.additional_info.is_none());

        let info = derive_status(&record(BorrowStatus::Other("RENEWED".into())), t0());
        assert_eq!(info.message, "Status: RENEWED");
    }
}
