//! Discipline penalty for late monthly submissions.
//!
//! Due date = last day of the report month + grace days, at 00:00 UTC.
//! Every started 7-day block past the due date costs 0.5, capped at 2.0.
//!
//! RULE: this calculator never fails. Unusable input produces the
//! not-applicable result (no due date, no penalty).

use crate::{
    calendar::MonthKey,
    model::DisciplineResult,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

pub const DEFAULT_GRACE_DAYS: u32 = 3;
pub const PENALTY_BLOCK_DAYS: u32 = 7;
pub const PENALTY_PER_BLOCK: f64 = 0.5;
pub const PENALTY_CAP: f64 = 2.0;

const MS_PER_DAY: i64 = 86_400_000;

/// Parse an ISO-8601 timestamp. Offset-less timestamps and bare dates are
/// read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // Zoned forms without seconds, which RFC 3339 rejects.
    for fmt in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ") {
        return Some(naive.and_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Penalty for `late_days` days of lateness.
pub fn penalty_for(late_days: u32) -> f64 {
    if late_days == 0 {
        return 0.0;
    }
    let blocks = late_days.div_ceil(PENALTY_BLOCK_DAYS);
    (f64::from(blocks) * PENALTY_PER_BLOCK).min(PENALTY_CAP)
}

/// Penalty with an already-typed month and submission instant.
pub fn penalty_at(month: MonthKey, submitted_at: DateTime<Utc>, grace_days: u32) -> DisciplineResult {
    let Some(due) = month.due_date(grace_days).and_hms_opt(0, 0, 0).map(|d| d.and_utc()) else {
        return DisciplineResult::not_applicable(Some(submitted_at));
    };

    let late_ms = (submitted_at - due).num_milliseconds();
    let late_days = if late_ms > 0 {
        // Ceil division on positive values.
        let days = (late_ms + MS_PER_DAY - 1) / MS_PER_DAY;
        u32::try_from(days).unwrap_or(u32::MAX)
    } else {
        0
    };
    let penalty = penalty_for(late_days);

    if penalty > 0.0 {
        log::debug!("discipline: month={month} late_days={late_days} penalty={penalty}");
    }

    DisciplineResult {
        due_date: Some(due),
        submitted_at: Some(submitted_at),
        late_days,
        penalty,
    }
}

/// Penalty from raw inputs. A missing timestamp means "now"; a malformed
/// month key or timestamp yields the not-applicable result.
pub fn penalty(
    month_key: Option<&str>,
    submitted_at: Option<&str>,
    grace_days: Option<u32>,
) -> DisciplineResult {
    let grace_days = grace_days.unwrap_or(DEFAULT_GRACE_DAYS);

    let submitted = match submitted_at {
        Some(raw) => match parse_timestamp(raw) {
            Some(ts) => ts,
            None => {
                log::warn!("discipline: unparseable submission timestamp '{raw}'");
                return DisciplineResult::not_applicable(None);
            }
        },
        None => Utc::now(),
    };

    match month_key.and_then(MonthKey::parse) {
        Some(month) => penalty_at(month, submitted, grace_days),
        None => {
            log::warn!("discipline: unparseable month key {month_key:?}");
            DisciplineResult::not_applicable(Some(submitted))
        }
    }
}
