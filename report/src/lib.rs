//! Report output for benchmark results
//!
//! This crate provides:
//!
//! - [`CsvFileSink`], the file-backed report sink trials append to
//! - [`summarize`], which reads a finished report back and averages it per
//!   dataset size

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod sink;
mod summary;

pub use error::ReportError;
pub use sink::CsvFileSink;
pub use summary::{format_table, summarize, SizeSummary};
