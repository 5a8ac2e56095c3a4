//! Report persistence

mod fs_store;

pub use fs_store::{FsReportStore, subagent_document, subagent_file_name};
