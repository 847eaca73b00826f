use crate::date::{
    end_of_day, end_of_month, first_of_month, local_to_utc, parse_local_datetime, utc_to_local,
    InvalidDateError,
};
use chrono::{prelude::*, Duration};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An inclusive interval of time used to filter records by their date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Symbolic names for commonly used `DateRange`s, resolved relative to now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRangeTag {
    CurrentMonth,
    LastMonth,
    Last3Months,
    Last6Months,
    CurrentYear,
    LastWeek,
    YearToDate,
    Upcoming,
}

#[derive(Debug, PartialEq)]
pub struct UnknownDateRangeTag;

impl FromStr for DateRangeTag {
    type Err = UnknownDateRangeTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current-month" => Ok(Self::CurrentMonth),
            "last-month" => Ok(Self::LastMonth),
            "last-3-months" => Ok(Self::Last3Months),
            "last-6-months" => Ok(Self::Last6Months),
            "current-year" => Ok(Self::CurrentYear),
            "last-week" => Ok(Self::LastWeek),
            "year-to-date" => Ok(Self::YearToDate),
            "upcoming" => Ok(Self::Upcoming),
            _ => Err(UnknownDateRangeTag),
        }
    }
}

/// Days covered by `DateRangeTag::Upcoming`
pub const UPCOMING_DAYS: i64 = 30;
const LAST_WEEK_DAYS: i64 = 7;

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// Whole calendar months from `from_month0` to `to_month0` (zero based,
    /// relative to `year` and normalized) in the timezone `tz`.
    fn months<Tz: TimeZone>(year: i32, from_month0: i32, to_month0: i32, tz: &Tz) -> Option<Self> {
        let start = first_of_month(year, from_month0)?.and_time(NaiveTime::MIN);
        let end = end_of_month(year, to_month0)?;
        Some(Self::new(local_to_utc(tz, &start), local_to_utc(tz, &end)))
    }

    /// The calendar month `month` (1 based) of `year`
    pub fn for_month<Tz: TimeZone>(year: i32, month: u32, tz: &Tz) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let month0 = month as i32 - 1;
        Self::months(year, month0, month0, tz)
    }

    pub fn for_year<Tz: TimeZone>(year: i32, tz: &Tz) -> Option<Self> {
        Self::months(year, 0, 11, tz)
    }

    /// Resolves a `DateRangeTag` relative to `now`. Calendar boundaries are
    /// taken on the wall clock of `tz`.
    pub fn from_tag<Tz: TimeZone>(tag: DateRangeTag, now: DateTime<Utc>, tz: &Tz) -> Option<Self> {
        let local_now = utc_to_local(tz, &now);
        let year = local_now.year();
        let month0 = local_now.month0() as i32;

        match tag {
            DateRangeTag::CurrentMonth => Self::months(year, month0, month0, tz),
            DateRangeTag::LastMonth => Self::months(year, month0 - 1, month0 - 1, tz),
            DateRangeTag::Last3Months => Self::months(year, month0 - 2, month0, tz),
            DateRangeTag::Last6Months => Self::months(year, month0 - 5, month0, tz),
            DateRangeTag::CurrentYear => Self::for_year(year, tz),
            DateRangeTag::LastWeek => Some(Self::new(now - Duration::days(LAST_WEEK_DAYS), now)),
            DateRangeTag::YearToDate => {
                let start = first_of_month(year, 0)?.and_time(NaiveTime::MIN);
                Some(Self::new(local_to_utc(tz, &start), now))
            }
            DateRangeTag::Upcoming => Some(Self::new(now, now + Duration::days(UPCOMING_DAYS))),
        }
    }

    /// Explicit bounds. The end bound always covers the whole day it falls on.
    pub fn from_bounds<Tz: TimeZone>(
        start: &str,
        end: &str,
        tz: &Tz,
    ) -> Result<Option<Self>, InvalidDateError> {
        let start = parse_local_datetime(start, tz)?;
        let end = parse_local_datetime(end, tz)?;
        let end = match end_of_day(end.date()) {
            Some(end) => end,
            None => return Ok(None),
        };
        Ok(Some(Self::new(local_to_utc(tz, &start), local_to_utc(tz, &end))))
    }
}

/// The loosely typed date filter clients put in query strings:
/// `dateRange`, `startDate` and `endDate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub date_range: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    pub fn tag(tag: &str) -> Self {
        Self {
            date_range: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn bounds(start: &str, end: &str) -> Self {
        Self {
            start_date: Some(start.into()),
            end_date: Some(end.into()),
            ..Default::default()
        }
    }

    /// Turns the filter into a concrete `DateRange`.
    ///
    /// An explicit `startDate` + `endDate` pair wins over `dateRange`. An unknown
    /// tag or no input at all resolves to `None`, which means the caller should
    /// not constrain on date at all. Only malformed explicit dates are errors.
    pub fn resolve<Tz: TimeZone>(
        &self,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Result<Option<DateRange>, InvalidDateError> {
        if let (Some(start), Some(end)) = (&self.start_date, &self.end_date) {
            return DateRange::from_bounds(start, end, tz);
        }

        let range = self
            .date_range
            .as_deref()
            .and_then(|tag| tag.parse::<DateRangeTag>().ok())
            .and_then(|tag| DateRange::from_tag(tag, now, tz));
        Ok(range)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn now(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 30, 0).unwrap()
    }

    fn start_of(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn end_of(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap(),
        )
    }

    fn resolve_tag(tag: &str, now: DateTime<Utc>) -> Option<DateRange> {
        DateRangeQuery::tag(tag).resolve(now, &Utc).unwrap()
    }

    #[test]
    fn current_month_ends_on_the_last_day_of_the_month() {
        let cases = vec![
            ((2025, 1, 15), 31),
            ((2025, 2, 10), 28),
            ((2024, 2, 29), 29),
            ((2025, 4, 1), 30),
            ((2025, 12, 31), 31),
        ];
        for ((y, m, d), last_day) in cases {
            let range = resolve_tag("current-month", now(y, m, d)).unwrap();
            assert_eq!(range.start, start_of(y, m, 1));
            assert_eq!(range.end, end_of(y, m, last_day));
        }
    }

    #[test]
    fn last_month_rolls_back_over_the_year() {
        let range = resolve_tag("last-month", now(2025, 1, 20)).unwrap();
        assert_eq!(range.start, start_of(2024, 12, 1));
        assert_eq!(range.end, end_of(2024, 12, 31));

        let range = resolve_tag("last-month", now(2024, 3, 31)).unwrap();
        assert_eq!(range.start, start_of(2024, 2, 1));
        assert_eq!(range.end, end_of(2024, 2, 29));
    }

    #[test]
    fn last_n_months_span_whole_months_ending_with_the_current_one() {
        for month in 1..=12 {
            let now = now(2025, month, 17);

            let range = resolve_tag("last-3-months", now).unwrap();
            assert_eq!(range.start.day(), 1);
            let span = (range.end.year() * 12 + range.end.month0() as i32)
                - (range.start.year() * 12 + range.start.month0() as i32)
                + 1;
            assert_eq!(span, 3);
            assert_eq!(range.end, resolve_tag("current-month", now).unwrap().end);

            let range = resolve_tag("last-6-months", now).unwrap();
            assert_eq!(range.start.day(), 1);
            let span = (range.end.year() * 12 + range.end.month0() as i32)
                - (range.start.year() * 12 + range.start.month0() as i32)
                + 1;
            assert_eq!(span, 6);
            assert_eq!(range.end, resolve_tag("current-month", now).unwrap().end);
        }

        let range = resolve_tag("last-6-months", now(2025, 2, 1)).unwrap();
        assert_eq!(range.start, start_of(2024, 9, 1));
        assert_eq!(range.end, end_of(2025, 2, 28));
    }

    #[test]
    fn year_based_tags() {
        let range = resolve_tag("current-year", now(2024, 7, 4)).unwrap();
        assert_eq!(range.start, start_of(2024, 1, 1));
        assert_eq!(range.end, end_of(2024, 12, 31));

        let range = resolve_tag("year-to-date", now(2024, 7, 4)).unwrap();
        assert_eq!(range.start, start_of(2024, 1, 1));
        assert_eq!(range.end, now(2024, 7, 4));
    }

    #[test]
    fn relative_day_tags() {
        let range = resolve_tag("last-week", now(2025, 3, 3)).unwrap();
        assert_eq!(range.start, now(2025, 2, 24));
        assert_eq!(range.end, now(2025, 3, 3));

        let june_first = start_of(2025, 6, 1);
        let range = resolve_tag("upcoming", june_first).unwrap();
        assert_eq!(range.start, start_of(2025, 6, 1));
        assert_eq!(range.end, start_of(2025, 7, 1));
    }

    #[test]
    fn unknown_tag_or_no_input_means_no_filter() {
        assert_eq!(resolve_tag("next-decade", now(2025, 1, 1)), None);
        assert_eq!(resolve_tag("", now(2025, 1, 1)), None);
        assert_eq!(
            DateRangeQuery::default().resolve(now(2025, 1, 1), &Utc),
            Ok(None)
        );
    }

    #[test]
    fn explicit_bounds_win_over_the_tag() {
        let query = DateRangeQuery {
            date_range: Some("current-year".into()),
            start_date: Some("2025-02-03".into()),
            end_date: Some("2025-02-10".into()),
        };
        let range = query.resolve(now(2025, 6, 1), &Utc).unwrap().unwrap();
        assert_eq!(range.start, start_of(2025, 2, 3));
        assert_eq!(range.end, end_of(2025, 2, 10));

        let query = DateRangeQuery::bounds("2025-02-03T08:00:00Z", "2025-02-10T08:00:00Z");
        let range = query.resolve(now(2025, 6, 1), &Utc).unwrap().unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 2, 3, 8, 0, 0).unwrap());
        assert_eq!(range.end, end_of(2025, 2, 10));
    }

    #[test]
    fn a_single_bound_falls_back_to_the_tag() {
        let query = DateRangeQuery {
            date_range: Some("current-month".into()),
            start_date: Some("2025-02-03".into()),
            end_date: None,
        };
        let range = query.resolve(now(2025, 6, 1), &Utc).unwrap().unwrap();
        assert_eq!(range.start, start_of(2025, 6, 1));
    }

    #[test]
    fn malformed_bounds_are_errors() {
        let query = DateRangeQuery::bounds("2025-02-30", "2025-03-01");
        assert!(query.resolve(now(2025, 6, 1), &Utc).is_err());
    }

    #[test]
    fn month_boundaries_follow_the_timezone() {
        let tz = chrono_tz::America::New_York;
        // 2025-03-01 02:00 UTC is still February in New York
        let range = DateRangeQuery::tag("current-month")
            .resolve(Utc.with_ymd_and_hms(2025, 3, 1, 2, 0, 0).unwrap(), &tz)
            .unwrap()
            .unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2025, 2, 1, 5, 0, 0).unwrap());
        assert_eq!(range.end, end_of(2025, 2, 28) + Duration::hours(5));
    }

    #[test]
    fn it_builds_every_month_of_a_year() {
        for month in 1..=12 {
            let range = DateRange::for_month(2024, month, &Utc).unwrap();
            assert_eq!(range.start.month(), month);
            assert_eq!(range.end.month(), month);
            assert_eq!(range.start.day(), 1);
        }
        assert!(DateRange::for_month(2024, 13, &Utc).is_none());
        assert!(DateRange::for_month(2024, 0, &Utc).is_none());
    }
}
