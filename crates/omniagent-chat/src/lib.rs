//! Conversation management for omniagent
//!
//! This crate provides the per-conversation message store and the chat
//! session that moves each turn from the user to the dispatcher and back.

pub mod session;
pub mod store;

pub use session::{greeting, ChatSession, PendingTurn, SessionError, SessionId, SessionState};
pub use store::MessageStore;
