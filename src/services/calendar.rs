//! Fixed-offset calendar for all business dates.
//!
//! Prices are quoted for Nigerian markets, so every date in the pipeline is
//! interpreted on the GMT+1 (West Africa Time) calendar, independent of the
//! end user's locale. The request schema and the date picker share the same
//! past-day predicate; a day the picker disables is exactly a day the schema
//! rejects.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

/// West Africa Time offset from UTC, in seconds.
pub const WAT_OFFSET_SECONDS: i32 = 3600;

/// The fixed +01:00 offset.
pub fn wat() -> FixedOffset {
    FixedOffset::east_opt(WAT_OFFSET_SECONDS).expect("one hour east of UTC is a valid offset")
}

/// Project an instant onto the GMT+1 calendar date.
pub fn wat_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&wat()).date_naive()
}

/// Strict day-level ordering, ignoring time of day.
pub fn is_before_day(a: NaiveDate, b: NaiveDate) -> bool {
    a < b
}

/// Current GMT+1 calendar day.
///
/// Read from the clock on every call so a form left open across midnight
/// cannot keep validating against a stale "today".
pub fn today() -> NaiveDate {
    wat_date(Utc::now())
}

/// Whether the instant falls on a GMT+1 day strictly before today.
pub fn is_past_day(instant: DateTime<Utc>) -> bool {
    is_before_day(wat_date(instant), today())
}

/// Per-day predicate for the date picker: today and later are selectable.
pub fn day_is_selectable(instant: DateTime<Utc>) -> bool {
    !is_past_day(instant)
}

/// Calendar-date wire format (`YYYY-MM-DD`) on the GMT+1 calendar.
pub fn wire_date(instant: DateTime<Utc>) -> String {
    wat_date(instant).format("%Y-%m-%d").to_string()
}

/// Instant at which the given GMT+1 calendar day begins.
pub fn wat_start_of_day(day: NaiveDate) -> DateTime<Utc> {
    let utc_naive = day.and_time(NaiveTime::MIN) - Duration::seconds(i64::from(WAT_OFFSET_SECONDS));
    Utc.from_utc_datetime(&utc_naive)
}
