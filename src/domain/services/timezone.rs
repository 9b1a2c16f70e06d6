use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::AppError;

/// Resolves UTC offsets for civil datetimes against one named timezone.
/// The zone is deployment-wide configuration, not a per-series field.
#[derive(Debug, Clone, Copy)]
pub struct TimezoneResolver {
    tz: Tz,
}

impl TimezoneResolver {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn from_name(name: &str) -> Result<Self, AppError> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| AppError::Validation(format!("unknown timezone: {}", name)))
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// UTC offset in signed seconds for a civil datetime, or None when the
    /// local time is skipped or duplicated by a DST transition.
    pub fn offset_for(&self, local: NaiveDateTime) -> Option<i32> {
        self.tz
            .offset_from_local_datetime(&local)
            .single()
            .map(|offset| offset.fix().local_minus_utc())
    }
}

/// Turns a calendar date plus a series' time-of-day window into absolute
/// UTC instants.
#[derive(Debug, Clone, Copy)]
pub struct InstantBuilder {
    resolver: TimezoneResolver,
}

impl InstantBuilder {
    pub fn new(resolver: TimezoneResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &TimezoneResolver {
        &self.resolver
    }

    /// The offset is looked up at 10:00 local time, which no real zone
    /// places inside a DST transition, and then applied to both ends of
    /// the window. None means the date has no resolvable offset and the
    /// occurrence should be skipped.
    pub fn build(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let anchor = date.and_hms_opt(10, 0, 0)?;
        let offset = Duration::seconds(i64::from(self.resolver.offset_for(anchor)?));

        let start_utc = Utc.from_utc_datetime(&(date.and_time(start) - offset));
        let end_utc = Utc.from_utc_datetime(&(date.and_time(end) - offset));
        Some((start_utc, end_utc))
    }
}
