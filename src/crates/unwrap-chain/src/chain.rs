//! Chain queries over wrapped errors
//!
//! Every query is defined in terms of [`unwrap_one`] and the identity check
//! in [`is_wrapper`]. None of them allocate: the walk holds a single
//! reference to the current link.

use crate::error::{NotFound, Result};
use crate::failure::Failure;

/// Single-step unwrap: the wrapped error, or `error` itself for non-wrappers
pub fn unwrap_one(error: &dyn Failure) -> &dyn Failure {
    error.unwrap_one().unwrap_or(error)
}

/// Whether unwrapping `error` yields a different error value
pub fn is_wrapper(error: &dyn Failure) -> bool {
    !unwrap_one(error).is_same(error)
}

/// Iterate over `error` and every error it wraps, outermost first
///
/// # Example
///
/// ```rust
/// use unwrap_chain::{chain, PlainError, TaskFailed};
///
/// let err = TaskFailed::new("fetch", PlainError::new("timed out"));
/// let messages: Vec<String> = chain(&err).map(|e| e.to_string()).collect();
/// assert_eq!(messages, ["task `fetch` failed", "timed out"]);
/// ```
pub fn chain(error: &dyn Failure) -> Chain<'_> {
    Chain { next: Some(error) }
}

/// Iterator returned by [`chain`]
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a dyn Failure>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a dyn Failure;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let inner = unwrap_one(current);
        self.next = if inner.is_same(current) {
            None
        } else {
            Some(inner)
        };
        Some(current)
    }
}

impl std::iter::FusedIterator for Chain<'_> {}

/// Whether any link of the chain starting at `error` is a `T`
pub fn contains<T: Failure>(error: &dyn Failure) -> bool {
    chain(error).any(|link| link.is::<T>())
}

/// The first link of the chain that is a `T`
///
/// # Errors
///
/// Returns [`NotFound`] carrying the innermost error when no link matches.
pub fn walk_until<T: Failure>(error: &dyn Failure) -> Result<'_, &T> {
    let mut last = error;
    for link in chain(error) {
        if let Some(found) = link.downcast_ref::<T>() {
            return Ok(found);
        }
        last = link;
    }

    tracing::trace!(
        requested = std::any::type_name::<T>(),
        "requested error type not found in chain"
    );
    Err(NotFound::new::<T>(last))
}

/// The innermost error of the chain
pub fn walk_to_root(error: &dyn Failure) -> &dyn Failure {
    let mut current = error;
    while is_wrapper(current) {
        current = unwrap_one(current);
    }
    current
}

/// Number of links in the chain (minimum 1)
pub fn chain_length(error: &dyn Failure) -> usize {
    chain(error).count()
}
