//! Recurrence timing and the scheduler loop.
//!
//! The delay computation is a pure function of a wall-clock timestamp so
//! every branch of the weekday arithmetic is unit-testable. The loop trusts
//! the wall clock only at the moment it (re)arms — nothing is cached across
//! iterations or process restarts.

use crate::config::Config;
use crate::discord::rest::RestClient;
use crate::publisher;
use chrono::{Datelike, Local, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

const WEEKDAY_NAMES: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// When the next run fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schedule {
    /// Fire at `hour:00` on `weekday` (0–6, Monday = 0) every week.
    Weekly {
        /// Target weekday (0–6, Monday = 0).
        weekday: u8,
        /// Target hour of day (0–23).
        hour: u8,
    },
    /// Fire every `hours` hours with no weekday alignment.
    Interval {
        /// Period between runs, in hours.
        hours: u64,
    },
}

impl std::fmt::Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weekly { weekday, hour } => {
                let day = WEEKDAY_NAMES
                    .get(usize::from(*weekday))
                    .copied()
                    .unwrap_or("?");
                write!(f, "weekly on {day} at {hour:02}:00")
            }
            Self::Interval { hours } => write!(f, "every {hours} hours"),
        }
    }
}

impl Schedule {
    /// Delay from `now` until the next occurrence.
    ///
    /// Weekly mode targets the next timestamp matching the configured
    /// weekday and hour with minutes and seconds zeroed:
    /// - a later weekday this week fires after `target - now` days;
    /// - an earlier weekday wraps to next week (`7 - now + target` days);
    /// - the same weekday fires later today if the hour is still ahead,
    ///   otherwise a full week out.
    pub fn delay_until_next(&self, now: NaiveDateTime) -> Duration {
        match *self {
            Self::Interval { hours } => Duration::from_secs(hours.saturating_mul(3600)),
            Self::Weekly { weekday, hour } => {
                let target_weekday = i64::from(weekday.min(6));
                let now_weekday = i64::from(now.weekday().num_days_from_monday());
                let target_hour = u32::from(hour.min(23));

                let target_time = NaiveTime::from_hms_opt(target_hour, 0, 0).unwrap_or_default();
                let mut next_run = now.date().and_time(target_time);

                let days_ahead = if now_weekday > target_weekday {
                    7 - now_weekday + target_weekday
                } else if now_weekday < target_weekday {
                    target_weekday - now_weekday
                } else if now.hour() >= target_hour {
                    // Today's slot already passed.
                    7
                } else {
                    0
                };
                next_run += chrono::Duration::days(days_ahead);

                (next_run - now).to_std().unwrap_or_default()
            }
        }
    }
}

/// Run the scheduler loop forever: arm, sleep, fire, re-arm.
///
/// A failed run is logged and never stops future occurrences — the next
/// scheduled run is the only retry mechanism. Re-arming happens strictly
/// after the previous run completes, so runs never overlap.
pub async fn run_loop(rest: &RestClient, config: &Config) {
    loop {
        let delay = config.schedule.delay_until_next(Local::now().naive_local());
        info!(delay_secs = delay.as_secs(), "next spotlight run armed");
        tokio::time::sleep(delay).await;

        match publisher::run_once(rest, config).await {
            Ok(outcome) => info!(?outcome, "spotlight run finished"),
            Err(err) => error!("spotlight run failed: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    fn expected_delay(now: NaiveDateTime, fire: NaiveDateTime) -> Duration {
        (fire - now).to_std().unwrap()
    }

    // 2026-01-05 is a Monday; the 6th a Tuesday, the 9th a Friday.

    #[test]
    fn weekday_already_past_wraps_to_next_week() {
        // Tuesday 10:00, target Monday 08:00 → following Monday morning.
        let now = at(2026, 1, 6, 10, 0, 0);
        let schedule = Schedule::Weekly { weekday: 0, hour: 8 };
        let fire = at(2026, 1, 12, 8, 0, 0);

        let delay = schedule.delay_until_next(now);
        assert_eq!(delay, expected_delay(now, fire));
        assert_eq!(delay, Duration::from_secs((5 * 24 + 22) * 3600));
    }

    #[test]
    fn weekday_still_ahead_fires_this_week() {
        // Tuesday 10:00, target Friday 08:00 → this Friday.
        let now = at(2026, 1, 6, 10, 0, 0);
        let schedule = Schedule::Weekly { weekday: 4, hour: 8 };
        let fire = at(2026, 1, 9, 8, 0, 0);

        assert_eq!(schedule.delay_until_next(now), expected_delay(now, fire));
    }

    #[test]
    fn same_day_before_target_hour_fires_today() {
        // Tuesday 06:30, target Tuesday 08:00 → later today.
        let now = at(2026, 1, 6, 6, 30, 0);
        let schedule = Schedule::Weekly { weekday: 1, hour: 8 };

        assert_eq!(schedule.delay_until_next(now), Duration::from_secs(5400));
    }

    #[test]
    fn same_day_at_target_hour_waits_a_full_week() {
        // Tuesday exactly 08:00, target Tuesday 08:00 → next Tuesday.
        let now = at(2026, 1, 6, 8, 0, 0);
        let schedule = Schedule::Weekly { weekday: 1, hour: 8 };

        assert_eq!(
            schedule.delay_until_next(now),
            Duration::from_secs(7 * 24 * 3600)
        );
    }

    #[test]
    fn minutes_and_seconds_are_zeroed_in_the_target() {
        // Tuesday 10:17:45, target Monday 08:00:00 sharp.
        let now = at(2026, 1, 6, 10, 17, 45);
        let schedule = Schedule::Weekly { weekday: 0, hour: 8 };
        let fire = at(2026, 1, 12, 8, 0, 0);

        assert_eq!(schedule.delay_until_next(now), expected_delay(now, fire));
    }

    #[test]
    fn interval_mode_is_a_fixed_period() {
        let schedule = Schedule::Interval { hours: 24 };
        let now = at(2026, 1, 6, 10, 0, 0);

        assert_eq!(
            schedule.delay_until_next(now),
            Duration::from_secs(24 * 3600)
        );
    }

    #[test]
    fn schedule_serde_weekly_round_trip() {
        let schedule = Schedule::Weekly { weekday: 1, hour: 8 };
        let json = serde_json::to_string(&schedule).unwrap();
        let restored: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, schedule);
    }

    #[test]
    fn schedule_serde_interval_round_trip() {
        let schedule = Schedule::Interval { hours: 168 };
        let json = serde_json::to_string(&schedule).unwrap();
        let restored: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, schedule);
    }

    #[test]
    fn schedule_display_names_the_mode() {
        let weekly = Schedule::Weekly { weekday: 1, hour: 8 };
        assert_eq!(weekly.to_string(), "weekly on Tuesday at 08:00");

        let interval = Schedule::Interval { hours: 24 };
        assert_eq!(interval.to_string(), "every 24 hours");
    }
}
