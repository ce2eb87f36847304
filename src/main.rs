use std::sync::Arc;

use dotenv::dotenv;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

mod config;
mod errors;
mod handlers;
mod session;
mod storage;
mod types;
mod webhook;

use config::Config;
use handlers::command::Command;
use session::{ConversationState, SessionStore};
use storage::FeedbackStore;
use types::AppContext;

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();

    log::info!("Starting magicbox bot");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Configuration error: {}", err);
            std::process::exit(1);
        }
    };

    let bot = Bot::new(config.token.clone()).parse_mode(ParseMode::Html);

    let sessions = SessionStore::new(config.feedback_ttl);
    sessions.spawn_sweeper();

    let ctx = AppContext {
        feedback: FeedbackStore::new(&config.feedback_file),
        sessions,
        config: Arc::new(config),
    };

    let command_tree = dptree::entry()
        .filter_command::<Command>()
        .endpoint(handlers::command::receive_command);

    let feedback_tree = dptree::filter(|ctx: AppContext, msg: Message| {
        ctx.sessions.state_of(msg.chat.id) == ConversationState::AwaitingFeedback
    })
    .endpoint(handlers::feedback::receive_feedback);

    let attachment_tree =
        dptree::filter(|msg: Message| msg.photo().is_some() || msg.document().is_some())
            .endpoint(handlers::convert::receive_attachment);

    // First branch wins; a message matching none of them is dropped
    // without a reply.
    let tree = Update::filter_message()
        .branch(command_tree)
        .branch(feedback_tree)
        .branch(attachment_tree);

    log::debug!("Starting dispatcher");

    let mut dispatcher = Dispatcher::builder(bot.clone(), tree)
        .dependencies(dptree::deps![ctx.clone()])
        .enable_ctrlc_handler()
        .build();

    match &ctx.config.webhook {
        Some(webhook_config) => {
            let listener = match webhook::listener(bot, webhook_config).await {
                Ok(listener) => listener,
                Err(err) => {
                    log::error!("Failed to set up the webhook: {}", err);
                    std::process::exit(1);
                }
            };
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => dispatcher.dispatch().await,
    }
}
