//! Generation backends implementing `LlmGateway`

pub mod huggingface;

pub use huggingface::HuggingFaceGateway;
