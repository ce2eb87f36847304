use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use teloxide::types::ChatId;
use tokio::time::Instant;

const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Clone, Default, Debug, PartialEq)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingFeedback,
}

/// Per-chat conversation state. Only chats that are waiting for feedback
/// are stored, everyone else is implicitly `Idle`. A waiting entry older
/// than the ttl counts as abandoned and is dropped, either lazily when the
/// chat is looked up or by the periodic sweeper.
#[derive(Clone)]
pub struct SessionStore {
    waiting: Arc<Mutex<HashMap<ChatId, Instant>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        SessionStore {
            waiting: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn state_of(&self, chat: ChatId) -> ConversationState {
        let mut waiting = self.waiting.lock().unwrap();
        match waiting.get(&chat) {
            Some(entered) if entered.elapsed() <= self.ttl => ConversationState::AwaitingFeedback,
            Some(_) => {
                log::debug!("Feedback session for chat {} expired", chat);
                waiting.remove(&chat);
                ConversationState::Idle
            }
            None => ConversationState::Idle,
        }
    }

    /// Start waiting for feedback from `chat`. Returns false if the chat
    /// is already waiting, so a second submission cannot be opened before
    /// the first completes.
    pub fn begin_waiting(&self, chat: ChatId) -> bool {
        if self.state_of(chat) == ConversationState::AwaitingFeedback {
            return false;
        }
        self.waiting.lock().unwrap().insert(chat, Instant::now());
        true
    }

    /// Leave the waiting state. Returns false if the chat was not waiting.
    pub fn finish(&self, chat: ChatId) -> bool {
        self.waiting.lock().unwrap().remove(&chat).is_some()
    }

    /// Drop every waiting entry older than the ttl. Returns how many were
    /// reclaimed.
    pub fn sweep(&self) -> usize {
        let mut waiting = self.waiting.lock().unwrap();
        let before = waiting.len();
        waiting.retain(|_, entered| entered.elapsed() <= self.ttl);
        before - waiting.len()
    }

    /// Reclaim abandoned sessions in the background for the lifetime of
    /// the process.
    pub fn spawn_sweeper(&self) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(SWEEP_INTERVAL);
            loop {
                tick.tick().await;
                let removed = store.sweep();
                if removed > 0 {
                    log::debug!("Reclaimed {} abandoned feedback session(s)", removed);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAT: ChatId = ChatId(42);

    #[tokio::test(start_paused = true)]
    async fn waiting_is_tracked_per_chat() {
        let store = SessionStore::new(Duration::from_secs(10));
        assert_eq!(store.state_of(CHAT), ConversationState::Idle);

        assert!(store.begin_waiting(CHAT));
        assert_eq!(store.state_of(CHAT), ConversationState::AwaitingFeedback);
        assert_eq!(store.state_of(ChatId(7)), ConversationState::Idle);

        assert!(store.finish(CHAT));
        assert_eq!(store.state_of(CHAT), ConversationState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn a_second_submission_is_refused_while_one_is_open() {
        let store = SessionStore::new(Duration::from_secs(10));
        assert!(store.begin_waiting(CHAT));
        assert!(!store.begin_waiting(CHAT));
    }

    #[tokio::test(start_paused = true)]
    async fn waiting_expires_after_the_ttl() {
        let store = SessionStore::new(Duration::from_secs(10));
        assert!(store.begin_waiting(CHAT));

        tokio::time::advance(Duration::from_secs(11)).await;
        assert_eq!(store.state_of(CHAT), ConversationState::Idle);

        // An expired entry no longer blocks a fresh prompt.
        assert!(store.begin_waiting(CHAT));
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_reclaims_only_expired_entries() {
        let store = SessionStore::new(Duration::from_secs(10));
        assert!(store.begin_waiting(ChatId(1)));

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(store.begin_waiting(ChatId(2)));

        tokio::time::advance(Duration::from_secs(5)).await;
        assert_eq!(store.sweep(), 1);
        assert_eq!(store.state_of(ChatId(1)), ConversationState::Idle);
        assert_eq!(store.state_of(ChatId(2)), ConversationState::AwaitingFeedback);
    }

    #[tokio::test(start_paused = true)]
    async fn finish_reports_whether_anything_was_waiting() {
        let store = SessionStore::new(Duration::from_secs(10));
        assert!(!store.finish(CHAT));
        assert!(store.begin_waiting(CHAT));
        assert!(store.finish(CHAT));
    }
}
