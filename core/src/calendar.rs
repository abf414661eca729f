//! Month-key arithmetic.
//!
//! A month key is the `YYYY-MM` string that identifies a reporting period.
//! This is the only module that does date arithmetic; everything else asks
//! it for day counts and deadlines.

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily-frequency factor used when no usable month key is supplied.
pub const DEFAULT_BUSINESS_DAYS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year:  i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// Strict `YYYY-MM` parse. Anything else (including `2024-2`,
    /// `2024-13`, or trailing text) is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (y, m) = raw.split_once('-')?;
        if y.len() != 4 || m.len() != 2 {
            return None;
        }
        if !y.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year: i32 = y.parse().ok()?;
        let month: u32 = m.parse().ok()?;
        if year == 0 {
            return None;
        }
        Self::new(year, month)
    }

    pub fn first_day(&self) -> NaiveDate {
        // Construction guarantees the first of the month exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Count of Monday–Friday dates in the month, found by walking every day.
    pub fn business_days(&self) -> u32 {
        self.first_day()
            .iter_days()
            .take(self.days_in_month() as usize)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .count() as u32
    }

    pub fn previous(&self) -> Option<Self> {
        let prev = self.first_day().checked_sub_months(Months::new(1))?;
        Self::new(prev.year(), prev.month())
    }

    /// Step back `months` calendar months.
    pub fn minus_months(&self, months: u32) -> Option<Self> {
        let d = self.first_day().checked_sub_months(Months::new(months))?;
        Self::new(d.year(), d.month())
    }

    /// Last day of the month plus `grace_days`.
    pub fn due_date(&self, grace_days: u32) -> NaiveDate {
        let last = self.last_day();
        last.checked_add_signed(Duration::days(i64::from(grace_days)))
            .unwrap_or(last)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Daily-frequency factor for an optional raw month key.
pub fn business_days_in(month_key: Option<&str>) -> u32 {
    match month_key {
        None => DEFAULT_BUSINESS_DAYS,
        Some(raw) => match MonthKey::parse(raw) {
            Some(mk) => mk.business_days(),
            None => {
                log::warn!(
                    "calendar: unparseable month key '{raw}', using {DEFAULT_BUSINESS_DAYS} business days"
                );
                DEFAULT_BUSINESS_DAYS
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_strict() {
        assert_eq!(MonthKey::parse("2024-02"), MonthKey::new(2024, 2));
        assert!(MonthKey::parse("2024-2").is_none());
        assert!(MonthKey::parse("2024-13").is_none());
        assert!(MonthKey::parse("2024-00").is_none());
        assert!(MonthKey::parse("24-02").is_none());
        assert!(MonthKey::parse("2024-02x").is_none());
        assert!(MonthKey::parse("").is_none());
    }

    #[test]
    fn leap_february_has_21_business_days() {
        let feb = MonthKey::parse("2024-02").unwrap();
        assert_eq!(feb.days_in_month(), 29);
        assert_eq!(feb.first_day().weekday(), Weekday::Thu);
        assert_eq!(feb.business_days(), 21);
    }

    #[test]
    fn business_days_for_other_months() {
        // Jan 2024 starts Monday, 31 days.
        assert_eq!(MonthKey::parse("2024-01").unwrap().business_days(), 23);
        // Jun 2024 starts Saturday, 30 days.
        assert_eq!(MonthKey::parse("2024-06").unwrap().business_days(), 20);
    }

    #[test]
    fn previous_crosses_year_boundary() {
        let jan = MonthKey::parse("2025-01").unwrap();
        assert_eq!(jan.previous().unwrap().to_string(), "2024-12");
    }

    #[test]
    fn due_date_adds_grace_to_month_end() {
        let jan = MonthKey::parse("2024-01").unwrap();
        assert_eq!(jan.due_date(3), NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        assert_eq!(jan.due_date(0), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn missing_or_bad_key_falls_back_to_twenty() {
        assert_eq!(business_days_in(None), 20);
        assert_eq!(business_days_in(Some("not-a-month")), 20);
        assert_eq!(business_days_in(Some("2024-02")), 21);
    }
}
