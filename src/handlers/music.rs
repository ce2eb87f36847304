use teloxide::payloads::SendAudioSetters;
use teloxide::prelude::*;
use teloxide::types::InputFile;

use crate::errors::BotError;
use crate::handlers::reply_error;
use crate::types::{AppContext, BotType, HandlerResult};

/// `/music`: reply with the bundled sample track.
pub async fn send_sample(ctx: &AppContext, bot: &BotType, msg: &Message) -> HandlerResult {
    let path = &ctx.config.music_file;

    // InputFile reads the file lazily at send time, check up front so a
    // missing sample becomes a clean io error instead of a request error.
    if let Err(err) = tokio::fs::metadata(path).await {
        log::error!("Sample track {:?} is unavailable: {}", path, err);
        return reply_error(bot, msg.chat.id, BotError::Io(err)).await;
    }

    bot.send_audio(msg.chat.id, InputFile::file(path.clone()))
        .title("MagicBox Sample")
        .performer("MagicBox Bot")
        .await?;

    Ok(())
}
