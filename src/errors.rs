use thiserror::Error;

/// Everything that can go wrong inside a handler or during startup.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("missing required environment variable {0}")]
    ConfigMissing(&'static str),

    #[error("invalid value for environment variable {0}")]
    ConfigInvalid(&'static str),

    #[error("telegram request failed: {0}")]
    Network(#[from] teloxide::RequestError),

    #[error("file download failed: {0}")]
    Download(#[from] teloxide::DownloadError),

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// The reply a user gets when a handler fails with this error.
    /// Details stay in the log, the user only sees a plain sentence.
    pub fn user_message(&self) -> &'static str {
        match self {
            BotError::ConfigMissing(_) | BotError::ConfigInvalid(_) => {
                "The bot is misconfigured, please try again later."
            }
            BotError::Network(_) => "Telegram is not responding right now, please try again later.",
            BotError::Download(_) => "I couldn't download that file, please send it again.",
            BotError::Decode(_) => "I couldn't read that as an image. Please send a valid image file.",
            BotError::Io(_) => "Something went wrong on my side, please try again later.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_ask_for_a_valid_image() {
        let err = BotError::from(image::load_from_memory(b"definitely not an image").unwrap_err());
        assert!(err.user_message().contains("valid image"));
    }

    #[test]
    fn io_errors_do_not_leak_details() {
        let err = BotError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "secret path"));
        assert!(!err.user_message().contains("secret"));
    }
}
