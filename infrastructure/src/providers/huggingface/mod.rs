//! Hugging Face inference router provider
//!
//! Talks to the OpenAI-compatible `chat/completions` endpoint with bearer
//! authentication. Supports tool calling and JSON-schema constrained output.

mod gateway;
pub mod types;

pub use gateway::HuggingFaceGateway;
