//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: a validated research query
//! - [`model::ModelSpec`]: a model id bound to an inference provider
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod query;
