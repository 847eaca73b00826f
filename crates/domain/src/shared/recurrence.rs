use crate::date::{add_months_overflowing, local_to_utc, utc_to_local};
use chrono::{prelude::*, Duration};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// How often a recurring `Reminder` or `Transaction` repeats.
///
/// `Fortnightly`/`Biweekly` and `Yearly`/`Annual` are aliases which are kept
/// apart so that a record keeps the tag it was created with.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceInterval {
    Daily,
    Weekly,
    Fortnightly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
    Annual,
}

impl Default for RecurrenceInterval {
    fn default() -> Self {
        Self::Monthly
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid recurrence interval: `{0}`")]
pub struct InvalidRecurrenceIntervalError(String);

impl FromStr for RecurrenceInterval {
    type Err = InvalidRecurrenceIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "fortnightly" => Ok(Self::Fortnightly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            "annual" => Ok(Self::Annual),
            _ => Err(InvalidRecurrenceIntervalError(s.to_string())),
        }
    }
}

impl Display for RecurrenceInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Fortnightly => "fortnightly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
            Self::Annual => "annual",
        };
        write!(f, "{}", tag)
    }
}

enum Step {
    Days(i64),
    Months(i32),
}

impl RecurrenceInterval {
    /// Reads a loosely typed interval tag. Anything missing or unknown is monthly.
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|tag| tag.parse().ok()).unwrap_or_default()
    }

    fn step(&self) -> Step {
        match self {
            Self::Daily => Step::Days(1),
            Self::Weekly => Step::Days(7),
            Self::Fortnightly | Self::Biweekly => Step::Days(14),
            Self::Monthly => Step::Months(1),
            Self::Quarterly => Step::Months(3),
            Self::Yearly | Self::Annual => Step::Months(12),
        }
    }

    /// Wall clock time exactly one interval after `local`
    pub fn advance_local(&self, local: &NaiveDateTime) -> Option<NaiveDateTime> {
        match self.step() {
            Step::Days(days) => local.checked_add_signed(Duration::days(days)),
            Step::Months(months) => add_months_overflowing(local, months),
        }
    }

    /// The next due date one interval after `due`. Calendar steps are taken on
    /// the wall clock of `tz` so that a reminder due at 09:00 stays at 09:00
    /// across daylight saving changes.
    pub fn advance<Tz: TimeZone>(&self, due: &DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
        let local = utc_to_local(tz, due);
        match self.advance_local(&local) {
            Some(next) => local_to_utc(tz, &next),
            // Only reachable at the end of the representable calendar
            None => *due,
        }
    }
}

/// Recurrence settings of a record. A record that does not recur never
/// carries an interval and a recurring record always has one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Recurrence {
    interval: Option<RecurrenceInterval>,
}

impl Recurrence {
    pub fn none() -> Self {
        Self { interval: None }
    }

    pub fn every(interval: RecurrenceInterval) -> Self {
        Self {
            interval: Some(interval),
        }
    }

    /// Normalizes the loose `isRecurring` + `recurrenceInterval` pair clients send
    pub fn from_parts(is_recurring: bool, interval: Option<RecurrenceInterval>) -> Self {
        if is_recurring {
            Self::every(interval.unwrap_or_default())
        } else {
            Self::none()
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.interval.is_some()
    }

    pub fn interval(&self) -> Option<RecurrenceInterval> {
        self.interval
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn it_parses_interval_tags() {
        assert_eq!("daily".parse(), Ok(RecurrenceInterval::Daily));
        assert_eq!("Weekly".parse(), Ok(RecurrenceInterval::Weekly));
        assert_eq!("biweekly".parse(), Ok(RecurrenceInterval::Biweekly));
        assert_eq!("annual".parse(), Ok(RecurrenceInterval::Annual));
        assert!("hourly".parse::<RecurrenceInterval>().is_err());
        assert_eq!(RecurrenceInterval::Quarterly.to_string(), "quarterly");
    }

    #[test]
    fn unknown_or_missing_tags_are_monthly() {
        assert_eq!(RecurrenceInterval::from_tag(None), RecurrenceInterval::Monthly);
        assert_eq!(
            RecurrenceInterval::from_tag(Some("every-now-and-then")),
            RecurrenceInterval::Monthly
        );
        assert_eq!(
            RecurrenceInterval::from_tag(Some("weekly")),
            RecurrenceInterval::Weekly
        );
    }

    #[test]
    fn it_advances_fixed_day_intervals() {
        let due = utc(2025, 12, 28);
        assert_eq!(RecurrenceInterval::Daily.advance(&due, &Utc), utc(2025, 12, 29));
        assert_eq!(RecurrenceInterval::Weekly.advance(&due, &Utc), utc(2026, 1, 4));
        assert_eq!(
            RecurrenceInterval::Fortnightly.advance(&due, &Utc),
            utc(2026, 1, 11)
        );
        assert_eq!(
            RecurrenceInterval::Biweekly.advance(&due, &Utc),
            RecurrenceInterval::Fortnightly.advance(&due, &Utc)
        );
    }

    #[test]
    fn it_advances_calendar_intervals() {
        let due = utc(2025, 11, 15);
        assert_eq!(RecurrenceInterval::Monthly.advance(&due, &Utc), utc(2025, 12, 15));
        assert_eq!(RecurrenceInterval::Quarterly.advance(&due, &Utc), utc(2026, 2, 15));
        assert_eq!(RecurrenceInterval::Yearly.advance(&due, &Utc), utc(2026, 11, 15));
        assert_eq!(RecurrenceInterval::Annual.advance(&due, &Utc), utc(2026, 11, 15));
    }

    #[test]
    fn month_overflow_rolls_into_the_following_month() {
        let due = utc(2025, 1, 31);
        assert_eq!(RecurrenceInterval::Monthly.advance(&due, &Utc), utc(2025, 3, 3));

        let leap_day = utc(2024, 2, 29);
        assert_eq!(RecurrenceInterval::Yearly.advance(&leap_day, &Utc), utc(2025, 3, 1));

        let due = utc(2025, 11, 30);
        assert_eq!(RecurrenceInterval::Quarterly.advance(&due, &Utc), utc(2026, 3, 2));
    }

    #[test]
    fn twelve_monthly_advances_land_on_the_same_month_next_year() {
        for day in 1..=28 {
            for month in 1..=12 {
                let start = utc(2025, month, day);
                let mut due = start;
                for _ in 0..12 {
                    due = RecurrenceInterval::Monthly.advance(&due, &Utc);
                }
                assert_eq!(due.month(), start.month());
                assert_eq!(due.year(), start.year() + 1);
            }
        }
    }

    #[test]
    fn it_keeps_the_wall_clock_time_across_dst() {
        let tz = chrono_tz::Europe::Oslo;
        // 09:00 local in winter (UTC+1)
        let due = Utc.with_ymd_and_hms(2025, 3, 20, 8, 0, 0).unwrap();
        let next = RecurrenceInterval::Monthly.advance(&due, &tz);
        // 09:00 local in summer (UTC+2)
        assert_eq!(next, Utc.with_ymd_and_hms(2025, 4, 20, 7, 0, 0).unwrap());
    }

    #[test]
    fn recurrence_invariant_holds() {
        assert_eq!(
            Recurrence::from_parts(false, Some(RecurrenceInterval::Weekly)),
            Recurrence::none()
        );
        assert_eq!(
            Recurrence::from_parts(true, None).interval(),
            Some(RecurrenceInterval::Monthly)
        );
        assert!(Recurrence::from_parts(true, None).is_recurring());
    }
}
