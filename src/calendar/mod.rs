use time::error::ComponentRange;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

#[derive(Debug, thiserror::Error)]
pub enum DateResolutionError {
    #[error("date-time falls outside the representable range")]
    OutOfRange,
}

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Time zone used to split instants into calendar components and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: UtcOffset,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::UTC
    }
}

impl Calendar {
    pub const UTC: Calendar = Calendar {
        offset: UtcOffset::UTC,
    };

    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn from_offset_minutes(minutes: i32) -> Result<Self, ComponentRange> {
        let offset = UtcOffset::from_whole_seconds(minutes.saturating_mul(60))?;
        Ok(Self { offset })
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub fn local(&self, instant: OffsetDateTime) -> Option<OffsetDateTime> {
        instant.checked_to_offset(self.offset)
    }

    pub fn date_of(&self, instant: OffsetDateTime) -> Option<Date> {
        self.local(instant).map(|local| local.date())
    }

    pub fn same_day(&self, a: OffsetDateTime, b: OffsetDateTime) -> bool {
        match (self.date_of(a), self.date_of(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    pub fn midnight(&self, date: Date) -> OffsetDateTime {
        date.midnight().assume_offset(self.offset)
    }

    /// Year/month/day of `date` combined with hour/minute of `time`.
    /// Seconds and below are dropped.
    pub fn merge(
        &self,
        date: OffsetDateTime,
        time: Time,
    ) -> Result<OffsetDateTime, DateResolutionError> {
        let local = self.local(date).ok_or(DateResolutionError::OutOfRange)?;
        let merged = PrimitiveDateTime::new(local.date(), minute_precision(time));
        Ok(merged.assume_offset(self.offset))
    }
}

/// `time` with seconds and sub-seconds cleared.
pub fn minute_precision(time: Time) -> Time {
    Time::from_hms(time.hour(), time.minute(), 0).unwrap_or(time)
}
