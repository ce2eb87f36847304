use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::errors::BotError;

/// Append-only feedback store. One line per submission, the file is
/// opened and closed per call.
#[derive(Clone, Debug)]
pub struct FeedbackStore {
    path: PathBuf,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FeedbackStore { path: path.into() }
    }

    pub async fn append(&self, user_id: &str, text: &str) -> Result<(), BotError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{user_id}: {text}\n").as_bytes())
            .await?;
        file.flush().await?;

        log::debug!("Stored feedback from user {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn appends_one_line_per_submission() {
        let dir = tempfile::tempdir().unwrap();
        let store = FeedbackStore::new(dir.path().join("feedback.txt"));

        store.append("1001", "love the bot").await.unwrap();
        store.append("1002", "needs more jokes").await.unwrap();

        let contents = std::fs::read_to_string(dir.path().join("feedback.txt")).unwrap();
        assert_eq!(contents, "1001: love the bot\n1002: needs more jokes\n");
    }

    #[tokio::test]
    async fn text_is_stored_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = FeedbackStore::new(dir.path().join("feedback.txt"));

        store.append("7", "  spaces and: colons stay  ").await.unwrap();

        let contents = std::fs::read_to_string(dir.path().join("feedback.txt")).unwrap();
        assert_eq!(contents, "7:   spaces and: colons stay  \n");
    }

    #[tokio::test]
    async fn creates_the_file_on_first_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.txt");
        assert!(!path.exists());

        FeedbackStore::new(&path).append("1", "hi").await.unwrap();
        assert!(path.exists());
    }
}
