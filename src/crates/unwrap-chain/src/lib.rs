//! See through wrapper errors
//!
//! Errors often reach the code that handles them wrapped in other errors: a
//! background task failed and its error was re-raised by whoever joined it,
//! or a library embedded the error to add context. Matching on the error's
//! type breaks as soon as a dependency changes how it wraps.
//!
//! This crate defines one extension point, [`Failure::unwrap_one`], and a set
//! of queries built only on it:
//!
//! - [`unwrap_one`] / [`is_wrapper`] - one step of unwrapping
//! - [`contains`] - does the chain hold a `T`
//! - [`walk_until`] - the first `T` in the chain, or a [`NotFound`] carrying
//!   the innermost error
//! - [`walk_to_root`] - the innermost error
//! - [`chain`] - iterate over every link
//!
//! The queries never allocate. An [`AggregateError`] or [`CausalChain`] is a
//! terminal link: classification does not branch into their members.
//!
//! # Example
//!
//! ```rust
//! use unwrap_chain::{contains, walk_to_root, walk_until, PlainError, TaskFailed};
//!
//! let err = TaskFailed::new("sync", TaskFailed::new("fetch", PlainError::new("timed out")));
//!
//! assert!(contains::<PlainError>(&err));
//! assert_eq!(walk_until::<TaskFailed>(&err).unwrap().name(), "sync");
//! assert_eq!(walk_to_root(&err).to_string(), "timed out");
//! assert!(walk_until::<std::io::Error>(&err).is_err());
//! ```
//!
//! # Features
//!
//! - `runtime` - [`task`] helpers for joining tokio tasks (enabled by default)

pub mod aggregate;
pub mod chain;
pub mod error;
pub mod failure;
pub mod in_flight;
pub mod stack;
pub mod wrappers;

#[cfg(feature = "runtime")]
pub mod task;

mod assert;

// Re-export commonly used types
pub use aggregate::{AggregateError, CausalChain};
pub use chain::{
    chain, chain_length, contains, is_wrapper, unwrap_one, walk_to_root, walk_until, Chain,
};
pub use error::{NotFound, Result};
pub use failure::Failure;
pub use stack::{Frame, Frames, Stack};
pub use wrappers::{PlainError, TaskFailed};
