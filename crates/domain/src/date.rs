use chrono::{prelude::*, Duration, LocalResult};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum InvalidDateError {
    #[error("The date: `{0}` is malformed. Expected YYYY-MM-DD or an RFC 3339 timestamp")]
    Malformed(String),
}

/// Parses a calendar date in the `YYYY-MM-DD` form. Single digit
/// months and days are accepted, e.g. `2020-2-9`.
pub fn parse_date(datestr: &str) -> Result<NaiveDate, InvalidDateError> {
    let malformed = || InvalidDateError::Malformed(datestr.to_string());

    let parts = datestr.split('-').collect::<Vec<_>>();
    if parts.len() != 3 {
        return Err(malformed());
    }
    let year = parts[0].parse::<i32>().map_err(|_| malformed())?;
    let month = parts[1].parse::<u32>().map_err(|_| malformed())?;
    let day = parts[2].parse::<u32>().map_err(|_| malformed())?;

    if !(1970..=2100).contains(&year) {
        return Err(malformed());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

/// Parses a client supplied date bound into a wall clock time in the
/// server timezone. Plain dates resolve to the start of that day.
pub fn parse_local_datetime<Tz: TimeZone>(
    datestr: &str,
    tz: &Tz,
) -> Result<NaiveDateTime, InvalidDateError> {
    let datestr = datestr.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(datestr) {
        return Ok(dt.with_timezone(tz).naive_local());
    }
    let date = parse_date(datestr)?;
    Ok(date.and_time(NaiveTime::MIN))
}

/// Parses a client supplied date into the instant it denotes in `tz`
pub fn parse_datetime<Tz: TimeZone>(datestr: &str, tz: &Tz) -> Result<DateTime<Utc>, InvalidDateError> {
    let local = parse_local_datetime(datestr, tz)?;
    Ok(local_to_utc(tz, &local))
}

/// First day of a month given a zero based month index that may be outside of
/// `0..12`. The index is normalized, so `(2025, -1)` is December 2024 and
/// `(2025, 12)` is January 2026.
pub fn first_of_month(year: i32, month0: i32) -> Option<NaiveDate> {
    let total = year * 12 + month0;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// The last millisecond of a month, found as "day 0 of the next month"
/// at 23:59:59.999.
pub fn end_of_month(year: i32, month0: i32) -> Option<NaiveDateTime> {
    let last_day = first_of_month(year, month0 + 1)?.pred_opt()?;
    end_of_day(last_day)
}

pub fn end_of_day(date: NaiveDate) -> Option<NaiveDateTime> {
    date.and_hms_milli_opt(23, 59, 59, 999)
}

/// Moves a wall clock time forward by a number of calendar months keeping the
/// day of month. Days that do not exist in the target month overflow into the
/// month after it, e.g. Jan 31 + 1 month lands on Mar 3 in a non leap year.
pub fn add_months_overflowing(datetime: &NaiveDateTime, months: i32) -> Option<NaiveDateTime> {
    let date = datetime.date();
    let first = first_of_month(date.year(), date.month0() as i32 + months)?;
    let date = first.checked_add_signed(Duration::days(date.day() as i64 - 1))?;
    Some(date.and_time(datetime.time()))
}

/// Maps a wall clock time in `tz` to the instant it denotes. Ambiguous times
/// pick the earliest instant and times skipped by a DST gap are read as UTC.
pub fn local_to_utc<Tz: TimeZone>(tz: &Tz, local: &NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(local),
    }
}

pub fn utc_to_local<Tz: TimeZone>(tz: &Tz, instant: &DateTime<Utc>) -> NaiveDateTime {
    instant.with_timezone(tz).naive_local()
}

pub fn datetime_from_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
