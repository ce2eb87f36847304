use std::sync::Arc;

use teloxide::{adaptors::DefaultParseMode, Bot};

use crate::config::Config;
use crate::errors::BotError;
use crate::session::SessionStore;
use crate::storage::FeedbackStore;

pub type HandlerResult = Result<(), BotError>;

pub type BotType = DefaultParseMode<Bot>;

/// Shared state handed to every handler through the dispatcher's
/// dependency map.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub feedback: FeedbackStore,
}
