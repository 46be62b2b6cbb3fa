//! Spotlight bot entrypoint.
//!
//! Bootstrap order: logging → config → image-directory fail-fast → gateway
//! session → (on readiness) scheduler loop. The loop runs until the process
//! is killed; a gateway exit is fatal.

use spotlight::config::Config;
use spotlight::discord::gateway;
use spotlight::discord::rest::{API_BASE, RestClient};
use spotlight::{catalog, schedule};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Fail-fast precondition: an empty image directory means the bot is
    // misconfigured, so terminate before any scheduling begins.
    if catalog::dir_is_empty(&config.image_dir)? {
        anyhow::bail!(
            "image directory {} is empty; add image files to continue",
            config.image_dir.display()
        );
    }

    let rest = RestClient::new(&config.bot_token);

    let (ready_tx, mut ready_rx) = mpsc::channel(1);
    let token = config.bot_token.clone();
    let mut gateway_task =
        tokio::spawn(async move { gateway::run_gateway(&token, API_BASE, ready_tx).await });

    // The readiness event starts the scheduler. If the gateway dies first,
    // the sender is dropped and the real error comes out of the join.
    let Some(ready) = ready_rx.recv().await else {
        return Err(gateway_exit_error(gateway_task.await));
    };
    tracing::info!(
        user = %ready.username,
        schedule = %config.schedule,
        "logged in, scheduler armed"
    );

    tokio::select! {
        () = schedule::run_loop(&rest, &config) => Ok(()),
        joined = &mut gateway_task => Err(gateway_exit_error(joined)),
    }
}

fn gateway_exit_error(
    joined: Result<spotlight::Result<()>, tokio::task::JoinError>,
) -> anyhow::Error {
    match joined {
        Ok(Ok(())) => anyhow::anyhow!("gateway session ended unexpectedly"),
        Ok(Err(err)) => anyhow::anyhow!("gateway session failed: {err}"),
        Err(err) => anyhow::anyhow!("gateway task panicked: {err}"),
    }
}
