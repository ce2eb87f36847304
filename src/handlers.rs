use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, ReplyMarkup};

use crate::errors::BotError;
use crate::types::{BotType, HandlerResult};

pub mod command;
pub mod convert;
pub mod feedback;
pub mod fun;
pub mod music;

/// Single reply layer for handler failures: log the real error, send the
/// user a plain sentence.
pub(crate) async fn reply_error(bot: &BotType, chat: ChatId, err: BotError) -> HandlerResult {
    log::error!("Handler failed for chat {}: {:?}", chat, err);
    bot.send_message(chat, err.user_message()).await?;
    Ok(())
}

/// Send a message with a one-time reply keyboard, or with the keyboard
/// removed when no buttons are given.
pub(crate) async fn send_with_buttons(
    bot: &BotType,
    chat: ChatId,
    text: impl Into<String>,
    buttons: &[&str],
) -> Result<(), BotError> {
    let markup = if buttons.is_empty() {
        ReplyMarkup::KeyboardRemove(KeyboardRemove::new())
    } else {
        let buttons: Vec<KeyboardButton> =
            buttons.iter().map(|b| KeyboardButton::new(*b)).collect();
        ReplyMarkup::Keyboard(
            KeyboardMarkup::new(vec![buttons])
                .resize_keyboard()
                .one_time_keyboard(),
        )
    };

    bot.send_message(chat, text).reply_markup(markup).await?;
    Ok(())
}
