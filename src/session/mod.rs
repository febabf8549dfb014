/*!
 * Conversation history for the chat layer.
 *
 * This module provides:
 * - A keyed, bounded store of recent turns per session
 * - The turn and role types it holds
 */

pub mod models;
pub mod store;

// Re-export main types
pub use models::{ChatRole, ChatTurn};
pub use store::ConversationStore;
