//! Research pipeline subdomain.
//!
//! - [`entities`]: plan, subtask and final report artifacts
//! - [`value_objects`]: per-subtask results and the aggregated outcome
//! - [`decomposition`]: parse-then-validate of the splitter's structured output
//! - [`phase`]: pipeline phases used for progress reporting

pub mod decomposition;
pub mod entities;
pub mod phase;
pub mod value_objects;
