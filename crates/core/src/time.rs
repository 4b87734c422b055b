use chrono::{DateTime, Utc};

/// Where sessions read "now" from. Tests pin it with `Clock::Fixed`.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Whole seconds between `started_at` and `now`, rounded to the nearest second.
///
/// Returns 0 when there is no start time or when `now` precedes it.
#[must_use]
pub fn elapsed_secs(started_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u64 {
    let Some(started_at) = started_at else {
        return 0;
    };
    let millis = now.signed_duration_since(started_at).num_milliseconds();
    u64::try_from(millis).map_or(0, |ms| (ms + 500) / 1000)
}

/// Formats seconds as `"{m}m {s}s"`, used on scenario results.
#[must_use]
pub fn format_minutes_seconds(secs: u64) -> String {
    format!("{}m {}s", secs / 60, secs % 60)
}

/// Formats seconds as `"M:SS"`, used on quiz scorecards.
#[must_use]
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` pinned to `fixed_now`.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::Fixed(fixed_now())
}
