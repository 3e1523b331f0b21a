//! Calendar arithmetic behind every period calculation
//!
//! Day and month truncation depend on a time zone. Instead of reading the
//! host's locale, the engine goes through the `Calendar` trait, so period
//! tiling is reproducible on any machine. `ZonedCalendar` fixes the zone to
//! UTC or to an IANA zone from `chrono-tz`.
//!
//! All functions are total: instants outside chrono's range are clamped and
//! date arithmetic saturates at `NaiveDate::MIN`/`MAX`.

use chrono::{DateTime, Datelike, Days, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::EpochMillis;

/// Instants beyond roughly ±250,000 years are pinned to this bound
const CLAMP_MILLIS: EpochMillis = 8_000_000_000_000_000;

/// Granularity used when a local midnight falls into a DST gap
const GAP_STEP_MINUTES: i64 = 15;

/// Local-calendar view of UTC instants
///
/// Implementors only need to map instants to local dates and local dates back
/// to the instant their day begins; everything else is derived.
pub trait Calendar {
    /// Local calendar date containing the instant
    fn local_date(&self, at: EpochMillis) -> NaiveDate;

    /// First instant of a local calendar date
    fn day_start(&self, date: NaiveDate) -> EpochMillis;

    /// Truncate an instant to the start of its local day
    fn start_of_day(&self, at: EpochMillis) -> EpochMillis {
        self.day_start(self.local_date(at))
    }

    /// Truncate an instant to the start of its local month
    fn start_of_month(&self, at: EpochMillis) -> EpochMillis {
        self.day_start(first_of_month(self.local_date(at)))
    }

    /// Number of local midnights between two instants (`later - earlier`)
    fn calendar_days_between(&self, later: EpochMillis, earlier: EpochMillis) -> i64 {
        days_between(self.local_date(later), self.local_date(earlier))
    }

    /// Number of local month boundaries between two instants (`later - earlier`)
    fn calendar_months_between(&self, later: EpochMillis, earlier: EpochMillis) -> i64 {
        months_between(self.local_date(later), self.local_date(earlier))
    }
}

impl<C: Calendar + ?Sized> Calendar for &C {
    fn local_date(&self, at: EpochMillis) -> NaiveDate {
        (**self).local_date(at)
    }

    fn day_start(&self, date: NaiveDate) -> EpochMillis {
        (**self).day_start(date)
    }
}

/// Calendar fixed to one `chrono` time zone
#[derive(Debug, Clone, Copy)]
pub struct ZonedCalendar<Tz: TimeZone> {
    zone: Tz,
}

impl ZonedCalendar<Utc> {
    /// Calendar whose days start at UTC midnight
    pub fn utc() -> Self {
        Self { zone: Utc }
    }
}

impl<Tz: TimeZone> ZonedCalendar<Tz> {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> &Tz {
        &self.zone
    }
}

impl<Tz: TimeZone> Calendar for ZonedCalendar<Tz> {
    fn local_date(&self, at: EpochMillis) -> NaiveDate {
        let clamped = at.clamp(-CLAMP_MILLIS, CLAMP_MILLIS);
        match DateTime::<Utc>::from_timestamp_millis(clamped) {
            Some(instant) => instant.with_timezone(&self.zone).date_naive(),
            None if at < 0 => NaiveDate::MIN,
            None => NaiveDate::MAX,
        }
    }

    fn day_start(&self, date: NaiveDate) -> EpochMillis {
        let midnight = date.and_time(NaiveTime::MIN);

        // Midnight may not exist locally (DST gap); the day then begins at the
        // first local time that does. Ambiguous times resolve to the earlier one.
        (0..=24 * 60 / GAP_STEP_MINUTES)
            .find_map(|step| {
                let candidate =
                    midnight.checked_add_signed(Duration::minutes(step * GAP_STEP_MINUTES))?;
                self.zone.from_local_datetime(&candidate).earliest()
            })
            .map(|start| start.timestamp_millis())
            .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
    }
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shift a date by a signed number of days, saturating at the supported range
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Shift a date by a signed number of months, saturating at the supported range
///
/// The day of month is clamped to the target month's length.
pub fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let shifted = u32::try_from(months.unsigned_abs())
        .ok()
        .and_then(|count| {
            if months >= 0 {
                date.checked_add_months(Months::new(count))
            } else {
                date.checked_sub_months(Months::new(count))
            }
        });
    shifted.unwrap_or(if months >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Calendar days from `earlier` to `later` (negative when `later` is earlier)
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    later.signed_duration_since(earlier).num_days()
}

/// Calendar months from `earlier` to `later`, ignoring the day of month
pub fn months_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    let later_months = i64::from(later.year()) * 12 + i64::from(later.month0());
    let earlier_months = i64::from(earlier.year()) * 12 + i64::from(earlier.month0());
    later_months - earlier_months
}
