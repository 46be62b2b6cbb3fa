//! One spotlight run: pick → normalize → publish → announce.

use crate::announce;
use crate::catalog;
use crate::config::Config;
use crate::discord::rest::RestClient;
use crate::error::Result;
use crate::orientation;
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::{info, warn};

/// How a single scheduled run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Icon updated; the announcement was sent if the channel exists.
    Published {
        /// Display name derived from the chosen image.
        display_name: String,
    },
    /// Configured guild could not be resolved; run skipped.
    GuildNotFound,
    /// Image directory had no candidates; run skipped.
    NoImages,
}

/// Execute one full run against the configured guild.
///
/// The skip outcomes (`GuildNotFound`, `NoImages`, missing announcement
/// channel) log a reason and return cleanly — they never fail the run.
/// Unexpected file, image, or API failures propagate to the scheduler loop,
/// which logs them and re-arms for the next occurrence.
pub async fn run_once(rest: &RestClient, config: &Config) -> Result<RunOutcome> {
    let Some(guild) = rest.fetch_guild(config.guild_id).await? else {
        warn!(guild_id = config.guild_id, "guild not found, skipping this run");
        return Ok(RunOutcome::GuildNotFound);
    };

    let images = catalog::list_images(&config.image_dir)?;
    let Some(image_path) = images.choose(&mut rand::thread_rng()).cloned() else {
        warn!(
            dir = %config.image_dir.display(),
            "no images found, skipping this run"
        );
        return Ok(RunOutcome::NoImages);
    };

    orientation::normalize_orientation(&image_path)?;
    let bytes = tokio::fs::read(&image_path).await?;
    rest.update_icon(config.guild_id, &bytes, content_type_for(&image_path))
        .await?;
    info!(guild = %guild.name, image = %image_path.display(), "guild icon changed");

    let display_name = announce::derive_display_name(&image_path);
    let channels = rest.list_text_channels(config.guild_id).await?;
    // A missing announcement channel is not an error: icon rotation counts.
    if let Some(channel) = channels.iter().find(|c| c.name == config.announce_channel) {
        let text = announce::format_announcement(&display_name, announce::random_marker());
        rest.send_message(&channel.id, &text).await?;
    }

    Ok(RunOutcome::Published { display_name })
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => "image/png",
        _ => "image/jpeg",
    }
}
