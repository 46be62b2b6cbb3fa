//! Environment-driven configuration, loaded once at startup.

use crate::error::{Result, SpotlightError};
use crate::schedule::Schedule;
use std::path::PathBuf;

/// Directory scanned for portraits when `IMAGE_DIR` is not set.
pub const DEFAULT_IMAGE_DIR: &str = "./img";

/// Announcement channel name when `ANNOUNCE_CHANNEL` is not set.
pub const DEFAULT_ANNOUNCE_CHANNEL: &str = "🤖┃teacher-of-the-day";

/// Runtime configuration for the bot.
///
/// Everything is read from the environment exactly once in
/// [`Config::from_env`]; the struct is then passed by reference to the
/// gateway, scheduler, and publisher. There is no ambient global state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot authentication token (`DISCORD_BOT_TOKEN`, required).
    pub bot_token: String,
    /// Numeric guild id (`GUILD_ID`, required).
    pub guild_id: u64,
    /// Directory scanned for candidate images (`IMAGE_DIR`).
    pub image_dir: PathBuf,
    /// Name of the announcement channel (`ANNOUNCE_CHANNEL`).
    pub announce_channel: String,
    /// Recurrence mode (`SCHEDULE_MODE` plus `TARGET_WEEKDAY`/`TARGET_HOUR`
    /// or `INTERVAL_HOURS`).
    pub schedule: Schedule,
}

impl Config {
    /// Load and validate configuration from the process environment.
    ///
    /// Missing or malformed required keys are a startup error; everything
    /// else falls back to the defaults the bot shipped with.
    pub fn from_env() -> Result<Self> {
        let bot_token = require("DISCORD_BOT_TOKEN")?;
        let guild_id = parse_guild_id(&require("GUILD_ID")?)?;
        let image_dir = PathBuf::from(env_or("IMAGE_DIR", DEFAULT_IMAGE_DIR));
        let announce_channel = env_or("ANNOUNCE_CHANNEL", DEFAULT_ANNOUNCE_CHANNEL);
        let schedule = schedule_from_env()?;

        Ok(Self {
            bot_token,
            guild_id,
            image_dir,
            announce_channel,
            schedule,
        })
    }
}

/// Resolve the schedule from `SCHEDULE_MODE` (`weekly` is the default).
///
/// Weekly mode fires at `TARGET_HOUR` (0–23, default 8) on `TARGET_WEEKDAY`
/// (0–6 with Monday = 0, default 1). Interval mode fires every
/// `INTERVAL_HOURS` hours (default 24) with no weekday alignment.
fn schedule_from_env() -> Result<Schedule> {
    let mode = env_or("SCHEDULE_MODE", "weekly");
    match mode.trim().to_ascii_lowercase().as_str() {
        "weekly" => Ok(Schedule::Weekly {
            weekday: parse_weekday(&env_or("TARGET_WEEKDAY", "1"))?,
            hour: parse_hour(&env_or("TARGET_HOUR", "8"))?,
        }),
        "interval" => Ok(Schedule::Interval {
            hours: parse_interval_hours(&env_or("INTERVAL_HOURS", "24"))?,
        }),
        other => Err(SpotlightError::Config(format!(
            "unknown SCHEDULE_MODE `{other}` (expected `weekly` or `interval`)"
        ))),
    }
}

fn require(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| SpotlightError::Config(format!("{key} is not set")))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

fn parse_guild_id(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| SpotlightError::Config(format!("GUILD_ID must be a numeric id, got `{raw}`")))
}

fn parse_weekday(raw: &str) -> Result<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|day| *day <= 6)
        .ok_or_else(|| {
            SpotlightError::Config(format!(
                "TARGET_WEEKDAY must be 0-6 (Monday = 0), got `{raw}`"
            ))
        })
}

fn parse_hour(raw: &str) -> Result<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|hour| *hour <= 23)
        .ok_or_else(|| SpotlightError::Config(format!("TARGET_HOUR must be 0-23, got `{raw}`")))
}

fn parse_interval_hours(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|hours| *hours >= 1)
        .ok_or_else(|| {
            SpotlightError::Config(format!("INTERVAL_HOURS must be at least 1, got `{raw}`"))
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn guild_id_parses_numeric() {
        assert_eq!(parse_guild_id("123456789").unwrap(), 123_456_789);
        assert_eq!(parse_guild_id(" 42 ").unwrap(), 42);
    }

    #[test]
    fn guild_id_rejects_non_numeric() {
        assert!(parse_guild_id("my-guild").is_err());
        assert!(parse_guild_id("").is_err());
    }

    #[test]
    fn weekday_accepts_monday_through_sunday() {
        assert_eq!(parse_weekday("0").unwrap(), 0);
        assert_eq!(parse_weekday("6").unwrap(), 6);
    }

    #[test]
    fn weekday_rejects_out_of_range() {
        assert!(parse_weekday("7").is_err());
        assert!(parse_weekday("monday").is_err());
    }

    #[test]
    fn hour_bounds_are_enforced() {
        assert_eq!(parse_hour("0").unwrap(), 0);
        assert_eq!(parse_hour("23").unwrap(), 23);
        assert!(parse_hour("24").is_err());
    }

    #[test]
    fn interval_hours_must_be_positive() {
        assert_eq!(parse_interval_hours("24").unwrap(), 24);
        assert!(parse_interval_hours("0").is_err());
    }
}
