//! Future and past points in time.
//!
//! Each temporal type yields its extreme representable value and the
//! current time moved by a minimal step.

use chrono::{
    FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone, Utc,
};
use ruleprobe_model::{OffsetTime, SourceKind, TypeKind, Value, Year, YearMonth};

use crate::error::Result;
use crate::source::{Candidates, TypedSource, candidates};

/// Largest offset a zone can have, in seconds.
const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Future,
    Past,
}

impl Direction {
    fn kind(self) -> SourceKind {
        match self {
            Self::Future => SourceKind::Future,
            Self::Past => SourceKind::Past,
        }
    }

    fn step(self, delta: TimeDelta) -> TimeDelta {
        match self {
            Self::Future => delta,
            Self::Past => -delta,
        }
    }
}

/// Points in time after now.
pub fn future() -> TypedSource {
    temporal(Direction::Future)
}

/// Points in time before now.
pub fn past() -> TypedSource {
    temporal(Direction::Past)
}

fn temporal(direction: Direction) -> TypedSource {
    let minute = direction.step(TimeDelta::minutes(1));
    let second = direction.step(TimeDelta::seconds(1));

    TypedSource::new(direction.kind())
        .with(TypeKind::Instant, move |_, _, _| {
            pair(
                extreme_utc(direction).map(|dt| Value::Instant(Utc.from_utc_datetime(&dt))),
                Utc::now().checked_add_signed(minute).map(Value::Instant),
            )
        })
        .with(TypeKind::Date, move |_, _, _| {
            let today = Local::now().date_naive();
            let near = match direction {
                Direction::Future => today.succ_opt(),
                Direction::Past => today.pred_opt(),
            };
            let extreme = match direction {
                Direction::Future => NaiveDate::MAX,
                Direction::Past => NaiveDate::MIN,
            };
            pair(Some(Value::Date(extreme)), near.map(Value::Date))
        })
        .with(TypeKind::DateTime, move |_, _, _| {
            let extreme = match direction {
                Direction::Future => NaiveDateTime::MAX,
                Direction::Past => NaiveDateTime::MIN,
            };
            pair(
                Some(Value::DateTime(extreme)),
                Local::now()
                    .naive_local()
                    .checked_add_signed(minute)
                    .map(Value::DateTime),
            )
        })
        .with(TypeKind::Time, move |_, _, _| {
            let extreme = match direction {
                Direction::Future => last_instant_of_day(),
                Direction::Past => Some(NaiveTime::MIN),
            };
            pair(
                extreme.map(Value::Time),
                shift_time(Local::now().time(), second).map(Value::Time),
            )
        })
        .with(TypeKind::OffsetDateTime, move |_, _, _| {
            pair(
                extreme_utc(direction)
                    .map(|dt| Value::OffsetDateTime(Utc.fix().from_utc_datetime(&dt))),
                Local::now()
                    .fixed_offset()
                    .checked_add_signed(minute)
                    .map(Value::OffsetDateTime),
            )
        })
        .with(TypeKind::OffsetTime, move |_, _, _| {
            let now = OffsetTime::now_utc();
            pair(
                extreme_offset_time(direction).map(Value::OffsetTime),
                shift_time(now.time, second)
                    .map(|time| Value::OffsetTime(OffsetTime::new(time, now.offset))),
            )
        })
        .with(TypeKind::ZonedDateTime, move |_, _, _| {
            pair(
                extreme_utc(direction).map(|dt| Value::Zoned(Local.from_utc_datetime(&dt))),
                Local::now().checked_add_signed(minute).map(Value::Zoned),
            )
        })
        .with(TypeKind::Year, move |_, _, _| {
            let now = Year::now().value();
            let (extreme, near) = match direction {
                Direction::Future => (i32::MAX, now.checked_add(1)),
                Direction::Past => (i32::MIN, now.checked_sub(1)),
            };
            pair(
                Some(Value::Year(Year(extreme))),
                near.map(|year| Value::Year(Year(year))),
            )
        })
        .with(TypeKind::YearMonth, move |_, _, _| {
            let now = YearMonth::now();
            let (extreme, near) = match direction {
                Direction::Future => (YearMonth::new(i32::MAX, 12), now.succ()),
                Direction::Past => (YearMonth::new(i32::MIN, 1), now.pred()),
            };
            pair(extreme.map(Value::YearMonth), near.map(Value::YearMonth))
        })
}

/// The extreme value followed by the value next to now, skipping either when
/// it cannot be represented.
fn pair(extreme: Option<Value>, near: Option<Value>) -> Result<Candidates> {
    Ok(candidates(extreme.into_iter().chain(near).collect()))
}

/// The extreme date-time, one day inside the representable range so that
/// converting it to any offset stays in range.
fn extreme_utc(direction: Direction) -> Option<NaiveDateTime> {
    let date = match direction {
        Direction::Future => NaiveDate::MAX.pred_opt()?,
        Direction::Past => NaiveDate::MIN.succ_opt()?,
    };
    Some(date.and_time(NaiveTime::MIN))
}

fn last_instant_of_day() -> Option<NaiveTime> {
    NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)
}

/// The latest (or earliest) instant a time of day with offset can denote.
fn extreme_offset_time(direction: Direction) -> Option<OffsetTime> {
    match direction {
        Direction::Future => Some(OffsetTime::new(
            last_instant_of_day()?,
            FixedOffset::west_opt(MAX_OFFSET_SECONDS)?,
        )),
        Direction::Past => Some(OffsetTime::new(
            NaiveTime::MIN,
            FixedOffset::east_opt(MAX_OFFSET_SECONDS)?,
        )),
    }
}

/// Moves a time of day, `None` when that would wrap around midnight.
fn shift_time(time: NaiveTime, delta: TimeDelta) -> Option<NaiveTime> {
    let (shifted, wrapped) = time.overflowing_add_signed(delta);
    (wrapped == 0).then_some(shifted)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ruleprobe_model::TypeDescriptor;

    use super::*;
    use crate::source::ValueSource;

    fn run(source: &TypedSource, kind: TypeKind) -> Vec<Value> {
        let mut rng = StdRng::seed_from_u64(0);
        source
            .values(&TypeDescriptor::new(kind), &[], &mut rng)
            .unwrap()
            .collect()
    }

    #[test]
    fn future_dates_are_after_today() {
        let today = Local::now().date_naive();
        let values = run(&future(), TypeKind::Date);
        assert_eq!(values.len(), 2);
        for value in values {
            match value {
                Value::Date(date) => assert!(date > today),
                other => panic!("unexpected {other}"),
            }
        }
    }

    #[test]
    fn past_instants_are_before_now() {
        let now = Utc::now();
        for value in run(&past(), TypeKind::Instant) {
            match value {
                Value::Instant(instant) => assert!(instant < now),
                other => panic!("unexpected {other}"),
            }
        }
    }

    #[test]
    fn zoned_extremes_do_not_overflow() {
        assert_eq!(run(&future(), TypeKind::ZonedDateTime).len(), 2);
        assert_eq!(run(&past(), TypeKind::OffsetDateTime).len(), 2);
    }

    #[test]
    fn year_month_moves_by_one_month() {
        let now = YearMonth::now();
        let values = run(&past(), TypeKind::YearMonth);
        assert_eq!(values[1], Value::YearMonth(now.pred().unwrap()));
    }

    #[test]
    fn shift_time_refuses_to_wrap() {
        let late = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        assert_eq!(shift_time(late, TimeDelta::seconds(1)), None);
        assert_eq!(
            shift_time(late, TimeDelta::seconds(-1)),
            NaiveTime::from_hms_opt(23, 59, 58)
        );
    }

    #[test]
    fn offset_time_extremes_are_ordered() {
        let latest = extreme_offset_time(Direction::Future).unwrap();
        let earliest = extreme_offset_time(Direction::Past).unwrap();
        assert_eq!(latest.offset.local_minus_utc(), -MAX_OFFSET_SECONDS);
        assert_eq!(earliest.offset.local_minus_utc(), MAX_OFFSET_SECONDS);
    }
}
