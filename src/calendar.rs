//! Civil dates to continuous day counts
//!
//! The ephemerides work on a day count since the epoch of the calendar the
//! tables were computed for. A [`CalendarProvider`] performs that
//! conversion; [`JulianCalendar`] handles the Julian calendar counted from
//! 1 January AD 1.

use thiserror::Error;

/// Error type for calendar conversions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalendarError {
    #[error("Invalid month {0}")]
    InvalidMonth(u32),

    #[error("Invalid day {day} for {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    #[error("Day fraction must lie in [0, 1), got {0}")]
    InvalidFraction(f64),
}

/// Converts civil dates to day counts and back
pub trait CalendarProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Days elapsed since the calendar epoch
    fn to_days(&self, year: i32, month: u32, day: u32, day_fraction: f64) -> Result<f64, CalendarError>;

    /// `(year, month, day)` containing a day count
    fn from_days(&self, days: f64) -> (i32, u32, u32);
}

/// Julian day number of 1 January AD 1 in the Julian calendar
pub const JULIAN_EPOCH_JDN: i64 = 1_721_424;

/// The Julian calendar, years numbered astronomically
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JulianCalendar;

impl JulianCalendar {
    pub fn is_leap_year(year: i32) -> bool {
        year.rem_euclid(4) == 0
    }

    pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
            4 | 6 | 9 | 11 => Some(30),
            2 if Self::is_leap_year(year) => Some(29),
            2 => Some(28),
            _ => None,
        }
    }

    /// Julian day number of a Julian-calendar date
    pub fn julian_day(year: i32, month: u32, day: u32) -> i64 {
        let a = (14 - month as i64) / 12;
        let y = year as i64 + 4800 - a;
        let m = month as i64 + 12 * a - 3;
        day as i64 + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - 32083
    }

    /// Julian-calendar date of a Julian day number
    ///
    /// See the Explanatory Supplement to the Astronomical Almanac 15.11.
    pub fn calendar_date(jdn: i64) -> (i32, u32, u32) {
        let f = jdn + 1401;
        let e = 4 * f + 3;
        let g = e.rem_euclid(1461) / 4;
        let h = 5 * g + 2;
        let day = h.rem_euclid(153) / 5 + 1;
        let month = (h / 153 + 2).rem_euclid(12) + 1;
        let year = e.div_euclid(1461) - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as u32, day as u32)
    }
}

impl CalendarProvider for JulianCalendar {
    fn name(&self) -> &str {
        "Julian A.D."
    }

    fn to_days(&self, year: i32, month: u32, day: u32, day_fraction: f64) -> Result<f64, CalendarError> {
        let last = Self::days_in_month(year, month).ok_or(CalendarError::InvalidMonth(month))?;
        if day == 0 || day > last {
            return Err(CalendarError::InvalidDay { year, month, day });
        }
        if !(0.0..1.0).contains(&day_fraction) {
            return Err(CalendarError::InvalidFraction(day_fraction));
        }
        let days = Self::julian_day(year, month, day) - JULIAN_EPOCH_JDN;
        Ok(days as f64 + day_fraction)
    }

    fn from_days(&self, days: f64) -> (i32, u32, u32) {
        Self::calendar_date(days.floor() as i64 + JULIAN_EPOCH_JDN)
    }
}
