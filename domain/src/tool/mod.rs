//! Tool domain module
//!
//! Research agents gather evidence through tools (web search and page
//! scraping). Every tool is described by a [`ToolDefinition`], advertised to
//! the backend through a [`ToolSpec`], invoked via a [`ToolCall`] and answers
//! with a [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! A failed tool is not an agent failure: the error is rendered into the
//! tool result message so the model can adjust its next step.

pub mod entities;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
