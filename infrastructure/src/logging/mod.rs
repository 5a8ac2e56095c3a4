//! Run transcript logging.
//!
//! Provides [`JsonlConversationLogger`], the JSONL implementation of the
//! [`ConversationLogger`](research_application::ConversationLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlConversationLogger;
