//! Calendar value types without a direct chrono counterpart.

use std::fmt;

use chrono::{Datelike, FixedOffset, Local, NaiveTime, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Year(pub i32);

impl Year {
    /// The current year in the local time zone.
    pub fn now() -> Self {
        Self(Local::now().year())
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A year and month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The current year and month in the local time zone.
    pub fn now() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month, `None` on year overflow.
    pub fn succ(&self) -> Option<Self> {
        if self.month == 12 {
            Some(Self {
                year: self.year.checked_add(1)?,
                month: 1,
            })
        } else {
            Some(Self {
                year: self.year,
                month: self.month + 1,
            })
        }
    }

    /// The preceding month, `None` on year underflow.
    pub fn pred(&self) -> Option<Self> {
        if self.month == 1 {
            Some(Self {
                year: self.year.checked_sub(1)?,
                month: 12,
            })
        } else {
            Some(Self {
                year: self.year,
                month: self.month - 1,
            })
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A time of day with a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    pub time: NaiveTime,
    pub offset: FixedOffset,
}

impl OffsetTime {
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }

    /// The current time of day in UTC.
    pub fn now_utc() -> Self {
        Self {
            time: Utc::now().time(),
            offset: Utc.fix(),
        }
    }

    /// Seconds since midnight after normalizing to UTC, wrapped into one day.
    pub fn utc_seconds(&self) -> i64 {
        let local = i64::from(self.time.num_seconds_from_midnight());
        (local - i64::from(self.offset.local_minus_utc())).rem_euclid(86_400)
    }
}

impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time, self.offset)
    }
}
