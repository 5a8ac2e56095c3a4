//! Conversation types exchanged with the generation backend.

pub mod entities;
pub mod response;
pub mod schema;
