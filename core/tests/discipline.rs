//! Late-submission discipline penalty.

use chrono::{TimeZone, Utc};
use perfscore_core::{calendar::MonthKey, discipline::{penalty, penalty_at}};

/// January 2024 with 3 grace days is due 2024-02-03.
#[test]
fn due_date_is_month_end_plus_grace() {
    let r = penalty(Some("2024-01"), Some("2024-02-01T12:00:00Z"), Some(3));
    assert_eq!(r.due_date, Some(Utc.with_ymd_and_hms(2024, 2, 3, 0, 0, 0).unwrap()));
    assert_eq!(r.late_days, 0);
    assert_eq!(r.penalty, 0.0);
}

/// 7 days late → one started week → 0.5.
#[test]
fn one_week_late_costs_half_a_point() {
    let r = penalty(Some("2024-01"), Some("2024-02-10"), Some(3));
    assert_eq!(r.late_days, 7);
    assert_eq!(r.penalty, 0.5);
}

/// 21 days late → three weeks → 1.5; 22 days starts a fourth → 2.0 (cap).
#[test]
fn penalty_grows_per_started_week_up_to_cap() {
    let r = penalty(Some("2024-01"), Some("2024-02-24"), Some(3));
    assert_eq!(r.late_days, 21);
    assert_eq!(r.penalty, 1.5);

    let r = penalty(Some("2024-01"), Some("2024-02-25"), Some(3));
    assert_eq!(r.late_days, 22);
    assert_eq!(r.penalty, 2.0);

    let r = penalty(Some("2024-01"), Some("2024-12-25"), Some(3));
    assert_eq!(r.penalty, 2.0, "penalty must cap at 2.0");
}

/// Omitted grace days default to 3.
#[test]
fn grace_defaults_to_three_days() {
    let with_default = penalty(Some("2024-01"), Some("2024-02-10"), None);
    let explicit = penalty(Some("2024-01"), Some("2024-02-10"), Some(3));
    assert_eq!(with_default, explicit);

    let no_grace = penalty(Some("2024-01"), Some("2024-02-10"), Some(0));
    assert_eq!(no_grace.late_days, 10);
    assert_eq!(no_grace.penalty, 1.0);
}

/// Malformed month keys give the not-applicable result instead of failing.
#[test]
fn malformed_month_key_is_not_applicable() {
    for bad in [None, Some(""), Some("2024"), Some("2024-13"), Some("Jan-2024")] {
        let r = penalty(bad, Some("2024-02-10"), Some(3));
        assert!(r.due_date.is_none(), "due_date should be None for {bad:?}");
        assert_eq!(r.late_days, 0);
        assert_eq!(r.penalty, 0.0);
    }
}

/// Without a timestamp the penalty is measured against now; a month long past
/// is always capped.
#[test]
fn missing_timestamp_means_now() {
    let r = penalty(Some("2000-01"), None, Some(3));
    assert!(r.submitted_at.is_some());
    assert_eq!(r.penalty, 2.0);
}

#[test]
fn penalty_bounded_across_submission_times() {
    let month = MonthKey::parse("2024-01").unwrap();
    for day_offset in -40..400 {
        let ts = Utc.with_ymd_and_hms(2024, 2, 3, 6, 0, 0).unwrap() + chrono::Duration::days(day_offset);
        let r = penalty_at(month, ts, 3);
        assert!((0.0..=2.0).contains(&r.penalty), "penalty={} at offset {day_offset}", r.penalty);
    }
}

/// Zoned timestamps without seconds are accepted.
#[test]
fn minute_precision_zoned_timestamps_parse() {
    let r = penalty(Some("2024-01"), Some("2024-02-10T00:00Z"), Some(3));
    assert_eq!(r.late_days, 7);
    assert_eq!(r.penalty, 0.5);

    let r = penalty(Some("2024-01"), Some("2024-02-10T05:30+05:30"), Some(3));
    assert_eq!(r.submitted_at, Some(Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap()));
    assert_eq!(r.late_days, 7);
}
