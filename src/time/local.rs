//! Local-calendar arithmetic shared by ranges, grids and markers.
//!
//! Every helper takes the time zone explicitly; nothing here consults the
//! process-wide local zone or the wall clock.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone, Utc};

/// Resolution used to step across a DST gap at local midnight.
const GAP_STEP_MINUTES: i64 = 15;

/// Local calendar date of `instant` as seen in `tz`.
pub fn local_date<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// First instant of `date` in `tz`.
///
/// An ambiguous midnight resolves to the earlier instant. A midnight that
/// does not exist (DST gap) resolves to the first existing local time after it.
pub fn start_of_local_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Utc>> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    let steps = 24 * 60 / GAP_STEP_MINUTES;
    for step in 0..steps {
        let candidate = midnight.checked_add_signed(Duration::minutes(step * GAP_STEP_MINUTES))?;
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(resolved) => return Some(resolved.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => return Some(earliest.with_timezone(&Utc)),
            LocalResult::None => continue,
        }
    }
    None
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

/// First day of the year containing `date`.
pub fn first_of_year(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), 1, 1)
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = shift_month(first, 1)?;
    Some((next - first).num_days() as u32)
}

/// Moves `date` by `months`, clamping the day to the target month's length.
pub fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date.year() as i64 * 12 + date.month0() as i64 + months as i64;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let mut day = date.day();
    while day > 28 {
        if let Some(shifted) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(shifted);
        }
        day -= 1;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Moves `date` by `years`, turning Feb 29 into Feb 28 on non-leap years.
pub fn shift_year(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    shift_month(date, years.checked_mul(12)?)
}

pub fn shift_day(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// True when both dates fall in the same month of the same year.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
