//! Conversation domain module.
//!
//! - `message`: role-tagged conversation message types
//! - `manager`: the append-only transcript and turn mediation

mod manager;
mod message;

pub use manager::{
    APOLOGY_TECHNICAL, APOLOGY_UNDERSTANDING, ConversationManager, DEFAULT_CONTEXT_WINDOW,
    DEFAULT_SYSTEM_PROMPT,
};
pub use message::{ConversationMessage, MessageRole};
