//! Spotlight: scheduled Discord guild icon rotation.
//!
//! A long-lived bot that periodically picks a random portrait from a local
//! directory, fixes its EXIF orientation, sets it as the guild icon, and
//! announces the featured teacher in a designated text channel.
//!
//! # Architecture
//!
//! Independent stages wired together by one scheduler loop:
//! - **Catalog**: lists candidate images from the configured directory
//! - **Orientation**: rewrites tagged images upright before upload
//! - **Schedule**: computes the delay to the next weekday-aligned (or
//!   fixed-interval) occurrence
//! - **Publisher**: runs one pick → normalize → publish → announce pass
//! - **Discord**: gateway session (readiness, heartbeat) and REST client
//!
//! Only one run is ever in flight: the loop arms, sleeps, fires, and re-arms
//! strictly after the previous run completes, success or failure.

pub mod announce;
pub mod catalog;
pub mod config;
pub mod discord;
pub mod error;
pub mod orientation;
pub mod publisher;
pub mod schedule;

pub use config::Config;
pub use error::{Result, SpotlightError};
pub use publisher::RunOutcome;
pub use schedule::Schedule;
