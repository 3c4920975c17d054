//! Operator-facing summaries of wrapped and aggregate failures
//!
//! A summary is a deterministic, indented text report of a whole failure
//! tree. Wrapper layers are seen through with [`unwrap_chain`]; aggregates
//! branch into numbered members; causal chains are joined with
//! `which caused:` markers. Each leaf shows its message and, when a stack
//! was captured, just its first frame.
//!
//! # Example
//!
//! ```rust
//! use failure_summary::{Summary, SummaryConfig};
//! use unwrap_chain::{AggregateError, PlainError, Stack, TaskFailed};
//!
//! let plain = |m: &str| PlainError::with_stack(m, Stack::empty());
//! let err = TaskFailed::new(
//!     "fan-out",
//!     AggregateError::new()
//!         .with(TaskFailed::new("a", plain("disk full")))
//!         .with(plain("timed out")),
//! );
//!
//! let text = Summary::of(&err)
//!     .with_config(SummaryConfig::new().with_stack(false))
//!     .to_string();
//!
//! assert_eq!(
//!     text,
//!     "=== EXCEPTION SUMMARY ===\n\
//!      \n\
//!      aggregate failure (2 items):\n    \
//!      1. disk full\n    \
//!      --\n    \
//!      2. timed out\n"
//! );
//! ```
//!
//! # Modules
//!
//! - `render` - the recursive renderer and the fixed text of the format
//! - `report` - [`Summary`], [`summarize`], [`write_summary`] and [`log_summary`]
//! - `config` - [`SummaryConfig`] and environment loading

pub mod config;
pub mod error;
pub mod render;
pub mod report;

// Re-export commonly used types
pub use config::SummaryConfig;
pub use error::{Result, SummaryError};
pub use render::render;
pub use report::{log_summary, summarize, summarize_with, write_summary, Summary};
