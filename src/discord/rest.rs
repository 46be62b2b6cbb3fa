//! Discord REST API client (v10).

use crate::error::{Result, SpotlightError};
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

/// Production API base. Tests swap this for a mock server via
/// [`RestClient::with_base_url`].
pub const API_BASE: &str = "https://discord.com/api/v10";

/// Channel type 0 — a regular guild text channel.
const GUILD_TEXT: u8 = 0;

/// A guild resolved by id.
#[derive(Debug, Clone, Deserialize)]
pub struct Guild {
    pub id: String,
    pub name: String,
}

/// A channel belonging to a guild.
#[derive(Debug, Clone, Deserialize)]
pub struct GuildChannel {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
}

/// Minimal REST client for the handful of calls the bot makes.
pub struct RestClient {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl RestClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: API_BASE.to_owned(),
            client: reqwest::Client::new(),
        }
    }

    /// Point the client at a different API base (mock servers in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    /// Resolve a guild by numeric id. A 404 means the guild does not exist
    /// or the bot is not a member — that is `None`, not an error.
    pub async fn fetch_guild(&self, guild_id: u64) -> Result<Option<Guild>> {
        let url = format!("{}/guilds/{guild_id}", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| SpotlightError::Api(format!("guild lookup failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpotlightError::Api(format!(
                "guild lookup failed ({status}): {body}"
            )));
        }

        let guild = response
            .json::<Guild>()
            .await
            .map_err(|e| SpotlightError::Api(format!("guild payload malformed: {e}")))?;
        Ok(Some(guild))
    }

    /// List the guild's text channels (other channel kinds are dropped).
    pub async fn list_text_channels(&self, guild_id: u64) -> Result<Vec<GuildChannel>> {
        let url = format!("{}/guilds/{guild_id}/channels", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| SpotlightError::Api(format!("channel list failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpotlightError::Api(format!(
                "channel list failed ({status}): {body}"
            )));
        }

        let channels = response
            .json::<Vec<GuildChannel>>()
            .await
            .map_err(|e| SpotlightError::Api(format!("channel payload malformed: {e}")))?;
        Ok(channels
            .into_iter()
            .filter(|c| c.kind == GUILD_TEXT)
            .collect())
    }

    /// Replace the guild icon. Discord takes the image as a base64 data URI.
    pub async fn update_icon(&self, guild_id: u64, image: &[u8], content_type: &str) -> Result<()> {
        let url = format!("{}/guilds/{guild_id}", self.base_url);
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        let body = json!({
            "icon": format!("data:{content_type};base64,{encoded}")
        });
        let response = self
            .client
            .patch(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| SpotlightError::Api(format!("icon update failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpotlightError::Api(format!(
                "icon update failed ({status}): {body}"
            )));
        }
        Ok(())
    }

    /// Post a plain text message to a channel.
    pub async fn send_message(&self, channel_id: &str, text: &str) -> Result<()> {
        let url = format!("{}/channels/{channel_id}/messages", self.base_url);
        let body = json!({
            "content": text
        });
        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| SpotlightError::Api(format!("message send failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SpotlightError::Api(format!(
                "message send failed ({status}): {body}"
            )));
        }
        Ok(())
    }
}
