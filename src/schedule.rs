//! Date semantics and the completion state machine for a single streak.
//!
//! Every function takes the reference instant `now` explicitly. Calendar
//! boundaries are evaluated in `now`'s time zone: the service passes
//! `chrono::Local`, tests pass fixed offsets.

use crate::models::{RepeatType, Streak};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use tracing::warn;

pub fn normalize_to_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

pub fn same_day<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    normalize_to_day(a) == normalize_to_day(b)
}

/// True when both instants share year and month, whatever the day.
pub fn same_month<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// True when both instants fall in the same Monday-start week.
pub fn same_week<Tz: TimeZone>(a: &DateTime<Tz>, b: &DateTime<Tz>) -> bool {
    week_start(normalize_to_day(a)) == week_start(normalize_to_day(b))
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Weekday index as stored in `selected_days` (0 = Sunday).
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Whether a click on `date` is allowed by the streak's recurrence.
pub fn is_scheduled_on(streak: &Streak, date: NaiveDate) -> bool {
    match streak.repeat_type {
        RepeatType::Week if !streak.selected_days.is_empty() => streak
            .selected_days
            .contains(&weekday_index(date.weekday())),
        _ => true,
    }
}

pub fn is_clickable_today<Tz: TimeZone>(streak: &Streak, now: &DateTime<Tz>) -> bool {
    is_scheduled_on(streak, normalize_to_day(now))
}

/// Whether the streak's current period has already been marked done.
///
/// A streak with `count == 0` is never complete, which keeps a streak
/// created today (where `last_updated == created_at`) from looking done.
pub fn is_completed_today<Tz: TimeZone>(streak: &Streak, now: &DateTime<Tz>) -> bool {
    if streak.count == 0 {
        return false;
    }

    let last = streak.last_updated.with_timezone(&now.timezone());
    match streak.repeat_type {
        RepeatType::Day => same_day(&last, now),
        RepeatType::Week if streak.selected_days.is_empty() => same_week(&last, now),
        RepeatType::Week => is_clickable_today(streak, now) && same_day(&last, now),
        RepeatType::Month => same_month(&last, now),
    }
}

/// Applies a click: completes the current period, or undoes it when the
/// period is already complete.
///
/// Callers check [`is_clickable_today`] first. A click on an ineligible
/// day returns the streak unchanged.
pub fn toggle<Tz: TimeZone>(streak: &Streak, now: &DateTime<Tz>) -> Streak {
    if !is_clickable_today(streak, now) {
        warn!(streak_id = %streak.id, "toggle on a day the streak is not scheduled; ignoring");
        return streak.clone();
    }

    let now_utc = now.with_timezone(&Utc);
    let mut next = streak.clone();
    if is_completed_today(streak, now) {
        next.count = streak.count.saturating_sub(1);
        // Back to zero: restore the never-completed timestamp.
        next.last_updated = if streak.count == 1 {
            streak.created_at
        } else {
            now_utc
        };
    } else {
        next.count = streak.count.saturating_add(1);
        next.last_updated = now_utc;
    }
    next
}

pub fn reset<Tz: TimeZone>(streak: &Streak, now: &DateTime<Tz>) -> Streak {
    Streak {
        count: 0,
        last_updated: now.with_timezone(&Utc),
        ..streak.clone()
    }
}
