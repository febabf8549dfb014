/*!
 * Bounded in-memory conversation store.
 *
 * Each session id maps to its most recent turns. Appending past the limit
 * evicts the oldest turns, so memory per session stays bounded. The store is
 * shared by reference; the lock is held only while a map entry is touched.
 */

use log::debug;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};

use crate::app_config::ChatConfig;

use super::models::ChatTurn;

/// Keyed store of recent conversation turns
#[derive(Debug)]
pub struct ConversationStore {
    /// Turns kept per session
    max_messages: usize,
    /// Turns handed to the chat model as context
    history_messages: usize,
    /// Session id to turns, oldest first
    sessions: Mutex<HashMap<String, VecDeque<ChatTurn>>>,
}

impl ConversationStore {
    /// Create a store keeping at most `max_messages` turns per session
    ///
    /// `context` uses the default history length, capped at the limit.
    pub fn new(max_messages: usize) -> Self {
        let max_messages = max_messages.max(1);
        Self {
            max_messages,
            history_messages: ChatConfig::default().history_messages.min(max_messages),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Create a store from the chat configuration
    pub fn from_config(config: &ChatConfig) -> Self {
        let mut store = Self::new(config.max_messages);
        store.history_messages = config.history_messages.min(store.max_messages);
        store
    }

    /// Number of turns `context` returns
    pub fn history_messages(&self) -> usize {
        self.history_messages
    }

    /// Maximum number of turns kept per session
    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    /// Append a turn, evicting the oldest ones beyond the limit
    pub fn push(&self, session_id: &str, turn: ChatTurn) {
        let mut sessions = self.sessions.lock();
        let turns = sessions.entry(session_id.to_string()).or_default();
        turns.push_back(turn);
        while turns.len() > self.max_messages {
            turns.pop_front();
        }
    }

    /// Record a user message and the assistant's reply
    pub fn record_exchange(&self, session_id: &str, user: impl Into<String>, reply: impl Into<String>) {
        self.push(session_id, ChatTurn::user(user));
        self.push(session_id, ChatTurn::assistant(reply));
    }

    /// The last `n` turns of a session, oldest first
    pub fn recent(&self, session_id: &str, n: usize) -> Vec<ChatTurn> {
        let sessions = self.sessions.lock();
        match sessions.get(session_id) {
            Some(turns) => {
                let skip = turns.len().saturating_sub(n);
                turns.iter().skip(skip).cloned().collect()
            }
            None => Vec::new(),
        }
    }

    /// The turns to send to the chat model with the next message
    pub fn context(&self, session_id: &str) -> Vec<ChatTurn> {
        self.recent(session_id, self.history_messages)
    }

    /// Every turn kept for a session
    pub fn history(&self, session_id: &str) -> Vec<ChatTurn> {
        self.recent(session_id, self.max_messages)
    }

    /// Number of turns kept for a session
    pub fn len(&self, session_id: &str) -> usize {
        self.sessions.lock().get(session_id).map_or(0, VecDeque::len)
    }

    /// Whether the store holds no sessions
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Forget a session; unknown ids are ignored
    pub fn clear(&self, session_id: &str) {
        if self.sessions.lock().remove(session_id).is_some() {
            debug!("Cleared conversation history for session {}", session_id);
        }
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::from_config(&ChatConfig::default())
    }
}
