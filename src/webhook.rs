use std::convert::Infallible;
use std::net::SocketAddr;

use axum::routing::get;
use teloxide::update_listeners::{webhooks, UpdateListener};
use tokio::net::TcpListener;

use crate::config::WebhookConfig;
use crate::errors::BotError;
use crate::types::BotType;

const LIVENESS_REPLY: &str = "MagicBox Bot is running";

/// Webhook delivery: registers the public URL with Telegram and serves the
/// update endpoint on `0.0.0.0:port`. `GET /` answers with a liveness
/// string so hosting platforms can probe the process.
pub async fn listener(
    bot: BotType,
    config: &WebhookConfig,
) -> Result<impl UpdateListener<Err = Infallible>, BotError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let options = webhooks::Options::new(addr, config.url.clone());

    let (listener, stop_flag, router) = webhooks::axum_to_router(bot, options).await?;
    let router = router.route("/", get(|| async { LIVENESS_REPLY }));

    let tcp = TcpListener::bind(addr).await?;
    log::info!("Webhook server listening on {}", addr);

    tokio::spawn(async move {
        if let Err(err) = axum::serve(tcp, router)
            .with_graceful_shutdown(stop_flag)
            .await
        {
            log::error!("Webhook server failed: {}", err);
        }
    });

    Ok(listener)
}
