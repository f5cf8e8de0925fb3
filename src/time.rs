use std::fmt::{Display, Formatter};

pub mod calendar;
pub mod timezone;

pub use calendar::Calendar;
pub use timezone::{Season, Timezone};

use serde::{Deserialize, Serialize};

pub const MINUTES_A_DAY: i32 = 1440;

/// Number of padding days at the start of the day horizon, so that services
/// shifted to an earlier day (timezone folding, overnight sections) remain
/// representable without negative day indices.
pub const SCHEDULE_OFFSET_DAYS: DayIdx = 5;

pub const SCHEDULE_OFFSET_MINUTES: i32 = SCHEDULE_OFFSET_DAYS * MINUTES_A_DAY;

/// Maximum number of days a schedule horizon may span.
pub const MAX_DAYS: u16 = 507;

/// Number of days since the first day of the horizon.
/// Signed : intermediate computations may go below the horizon start.
pub type DayIdx = i32;

/// A point on the internal timeline : minutes since 00:00 UTC on day 0,
/// where day 0 lies `SCHEDULE_OFFSET_DAYS` before the first schedule day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Time {
    minutes: i32,
}

impl Time {
    pub fn new(day: DayIdx, minute: i32) -> Self {
        Self {
            minutes: day * MINUTES_A_DAY + minute,
        }
    }

    pub fn from_minutes(minutes: i32) -> Self {
        Self { minutes }
    }

    pub fn day(self) -> DayIdx {
        self.minutes.div_euclid(MINUTES_A_DAY)
    }

    /// Minute after midnight on `self.day()`. Always in `[0, 1440)`.
    pub fn mam(self) -> i32 {
        self.minutes.rem_euclid(MINUTES_A_DAY)
    }

    pub fn total_minutes(self) -> i32 {
        self.minutes
    }
}

impl std::ops::Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Self) -> Self::Output {
        Time {
            minutes: self.minutes - rhs.minutes,
        }
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{:02}:{:02}",
            self.day(),
            self.mam() / 60,
            self.mam() % 60
        )
    }
}
