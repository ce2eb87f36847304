use teloxide::macros::BotCommands;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands as _;

use crate::handlers::{feedback, fun, music, send_with_buttons};
use crate::types::{AppContext, BotType, HandlerResult};

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Show the welcome message")]
    Start,

    #[command(description = "Show all commands this bot understands")]
    Help,

    #[command(description = "Receive a sample track")]
    Music,

    #[command(description = "Convert an image to PNG")]
    Convert,

    #[command(description = "Leave feedback for the team")]
    Feedback(String),

    #[command(description = "Get a random joke")]
    Fun,

    #[command(description = "Stop whatever you are doing")]
    Cancel,
}

pub async fn receive_command(
    ctx: AppContext,
    bot: BotType,
    msg: Message,
    cmd: Command,
) -> HandlerResult {
    match cmd {
        Command::Start => {
            send_with_buttons(
                &bot,
                msg.chat.id,
                "Welcome to <b>MagicBox Bot</b>!\n\
                Here is what I can do for you:\n\
                /music - receive a sample track\n\
                /convert - turn any image into a PNG\n\
                /feedback - tell us what you think\n\
                /fun - hear a joke",
                &["/music", "/convert", "/feedback", "/fun"],
            )
            .await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::Music => {
            music::send_sample(&ctx, &bot, &msg).await?;
        }
        Command::Convert => {
            bot.send_message(
                msg.chat.id,
                "Send me a photo or an image file and I'll convert it to PNG.",
            )
            .await?;
        }
        Command::Feedback(text) => {
            feedback::enter_or_submit(&ctx, &bot, &msg, &text).await?;
        }
        Command::Fun => {
            fun::send_joke(&bot, &msg).await?;
        }
        Command::Cancel => {
            feedback::cancel(&ctx, &bot, &msg).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::utils::command::BotCommands as _;

    #[test]
    fn feedback_captures_the_rest_of_the_line() {
        let cmd = Command::parse("/feedback love the bot", "magicbox_bot").unwrap();
        assert_eq!(cmd, Command::Feedback("love the bot".to_string()));
    }

    #[test]
    fn feedback_without_text_parses_to_an_empty_argument() {
        let cmd = Command::parse("/feedback", "magicbox_bot").unwrap();
        assert_eq!(cmd, Command::Feedback(String::new()));
    }

    #[test]
    fn unknown_commands_do_not_parse() {
        assert!(Command::parse("/teleport", "magicbox_bot").is_err());
    }

    #[test]
    fn commands_are_lowercase() {
        assert_eq!(Command::parse("/fun", "magicbox_bot").unwrap(), Command::Fun);
        assert_eq!(
            Command::parse("/cancel@magicbox_bot", "magicbox_bot").unwrap(),
            Command::Cancel
        );
    }
}
