use teloxide::prelude::*;
use teloxide::utils::html;

use crate::handlers::{reply_error, send_with_buttons};
use crate::types::{AppContext, BotType, HandlerResult};

const PROMPT: &str = "Please send your feedback as plain text, or /cancel to abort.";

/// `/feedback` entry point. Inline text is stored straight away, an empty
/// argument opens the waiting state for this chat.
pub async fn enter_or_submit(
    ctx: &AppContext,
    bot: &BotType,
    msg: &Message,
    text: &str,
) -> HandlerResult {
    let text = text.trim();
    if !text.is_empty() {
        return submit(ctx, bot, msg, text).await;
    }

    if ctx.sessions.begin_waiting(msg.chat.id) {
        send_with_buttons(bot, msg.chat.id, PROMPT, &["/cancel"]).await?;
    } else {
        bot.send_message(
            msg.chat.id,
            "I'm still waiting for your previous feedback. Send it now, or /cancel.",
        )
        .await?;
    }

    Ok(())
}

/// Endpoint for the next message of a chat that is waiting for feedback.
pub async fn receive_feedback(ctx: AppContext, bot: BotType, msg: Message) -> HandlerResult {
    let text = match msg.text() {
        Some(text) => text.trim(),
        None => {
            bot.send_message(msg.chat.id, PROMPT).await?;
            return Ok(());
        }
    };

    // Unknown commands and empty lines re-prompt instead of ending up in
    // the feedback file.
    if text.is_empty() || text.starts_with('/') {
        bot.send_message(msg.chat.id, PROMPT).await?;
        return Ok(());
    }

    submit(&ctx, &bot, &msg, text).await
}

pub async fn cancel(ctx: &AppContext, bot: &BotType, msg: &Message) -> HandlerResult {
    let reply = if ctx.sessions.finish(msg.chat.id) {
        "Feedback cancelled."
    } else {
        "Nothing to cancel."
    };
    send_with_buttons(bot, msg.chat.id, reply, &[]).await?;
    Ok(())
}

async fn submit(ctx: &AppContext, bot: &BotType, msg: &Message, text: &str) -> HandlerResult {
    // State goes back to idle before any side effect runs.
    ctx.sessions.finish(msg.chat.id);

    let user = msg.from.as_ref();
    let user_id = user
        .map(|u| u.id.to_string())
        .unwrap_or_else(|| msg.chat.id.to_string());

    log::debug!("Got feedback from user {}", user_id);

    if let Err(err) = ctx.feedback.append(&user_id, text).await {
        return reply_error(bot, msg.chat.id, err).await;
    }

    // A copy goes to the admin chat when one is configured. A failed
    // copy is only logged, the user still gets their confirmation.
    if let Some(admin_chat) = ctx.config.admin_chat {
        let name = user.map(|u| u.first_name.as_str()).unwrap_or("someone");
        let copy = format!(
            "📝 Feedback from {}: {}",
            html::escape(name),
            html::escape(text)
        );
        if let Err(err) = bot.send_message(admin_chat, copy).await {
            log::warn!("Failed to forward feedback to admin chat: {:?}", err);
        }
    }

    send_with_buttons(bot, msg.chat.id, "Thank you for your feedback!", &[]).await?;
    Ok(())
}
