//! Discord gateway session: connect, identify, heartbeat, readiness.
//!
//! The bot never consumes message events — the gateway exists to
//! authenticate the session and to fire the readiness event that starts the
//! scheduler. After READY, the loop keeps the session alive (heartbeats,
//! event drain) until the socket drops.

use crate::error::{Result, SpotlightError};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

/// Fired exactly once when the gateway session is fully established.
#[derive(Debug, Clone)]
pub struct ReadyEvent {
    /// Bot account username, for the startup log line.
    pub username: String,
}

/// GUILDS intent only — guild metadata, no message streams.
const GATEWAY_INTENTS: u64 = 1;

/// Connect to the gateway and run the session until it drops.
///
/// `api_base` is the REST base used for gateway discovery (swappable in
/// tests). Returns an error when the websocket closes or fails; the caller
/// treats that as fatal since the session is the process's reason to live.
pub async fn run_gateway(
    token: &str,
    api_base: &str,
    ready_tx: mpsc::Sender<ReadyEvent>,
) -> Result<()> {
    if token.trim().is_empty() {
        return Err(SpotlightError::Gateway("bot token is empty".to_owned()));
    }

    let client = reqwest::Client::new();
    let gateway_resp: serde_json::Value = client
        .get(format!("{api_base}/gateway/bot"))
        .header("Authorization", format!("Bot {token}"))
        .send()
        .await
        .map_err(|e| SpotlightError::Gateway(format!("gateway discovery failed: {e}")))?
        .json()
        .await
        .map_err(|e| SpotlightError::Gateway(format!("gateway discovery payload malformed: {e}")))?;

    let gateway_url = gateway_resp
        .get("url")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("wss://gateway.discord.gg");
    let ws_url = format!("{gateway_url}/?v=10&encoding=json");

    let (stream, _) = tokio_tungstenite::connect_async(&ws_url)
        .await
        .map_err(|e| SpotlightError::Gateway(format!("websocket connect failed: {e}")))?;
    let (mut write, mut read) = stream.split();

    let hello = read
        .next()
        .await
        .ok_or_else(|| SpotlightError::Gateway("no hello".to_owned()))?
        .map_err(|e| SpotlightError::Gateway(format!("websocket error: {e}")))?;
    let hello_text = match hello {
        Message::Text(text) => text.to_string(),
        _ => return Err(SpotlightError::Gateway("unexpected hello payload".to_owned())),
    };
    let hello_json: serde_json::Value = serde_json::from_str(&hello_text)
        .map_err(|e| SpotlightError::Gateway(format!("hello payload malformed: {e}")))?;
    let heartbeat_interval_ms = hello_json
        .get("d")
        .and_then(|v| v.get("heartbeat_interval"))
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(41_250);

    let identify = json!({
        "op": 2,
        "d": {
            "token": token,
            "intents": GATEWAY_INTENTS,
            "properties": {
                "os": std::env::consts::OS,
                "browser": "spotlight",
                "device": "spotlight"
            }
        }
    });
    write
        .send(Message::Text(identify.to_string()))
        .await
        .map_err(|e| SpotlightError::Gateway(format!("identify send failed: {e}")))?;

    let (hb_tx, mut hb_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_millis(heartbeat_interval_ms));
        loop {
            interval.tick().await;
            if hb_tx.send(()).await.is_err() {
                break;
            }
        }
    });

    let mut ready_sent = false;
    loop {
        tokio::select! {
            _ = hb_rx.recv() => {
                let heartbeat = json!({"op": 1, "d": serde_json::Value::Null});
                if write.send(Message::Text(heartbeat.to_string())).await.is_err() {
                    return Err(SpotlightError::Gateway("heartbeat failed".to_owned()));
                }
            }
            maybe_msg = read.next() => {
                let raw = match maybe_msg {
                    Some(Ok(Message::Text(text))) => text.to_string(),
                    Some(Ok(Message::Close(_))) | None => {
                        return Err(SpotlightError::Gateway("websocket closed".to_owned()));
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => {
                        return Err(SpotlightError::Gateway(format!("websocket error: {err}")));
                    }
                };

                let payload: serde_json::Value = match serde_json::from_str(&raw) {
                    Ok(v) => v,
                    Err(_) => continue,
                };

                let event_name = payload
                    .get("t")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default();
                if event_name != "READY" || ready_sent {
                    continue;
                }

                let username = payload
                    .get("d")
                    .and_then(|d| d.get("user"))
                    .and_then(|u| u.get("username"))
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown")
                    .to_owned();
                if ready_tx.send(ReadyEvent { username }).await.is_err() {
                    return Err(SpotlightError::Gateway("ready receiver dropped".to_owned()));
                }
                ready_sent = true;
            }
        }
    }
}
