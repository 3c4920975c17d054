//! Per-thread record of failures currently being handled
//!
//! Code that is handling a failure registers it with [`handling`]. A failure
//! registered while an earlier one is still registered was raised while
//! handling it, so the stack reads as a [`CausalChain`], earliest first.
//!
//! # Example
//!
//! ```rust
//! use unwrap_chain::{in_flight, PlainError};
//!
//! let _outer = in_flight::handling(PlainError::new("request failed"));
//! {
//!     let _inner = in_flight::handling(PlainError::new("rollback failed"));
//!     assert_eq!(in_flight::depth(), 2);
//! }
//! assert_eq!(in_flight::current().to_string(), "request failed");
//! ```

use crate::aggregate::CausalChain;
use crate::failure::Failure;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

thread_local! {
    static IN_FLIGHT: RefCell<Vec<Arc<dyn Failure>>> = const { RefCell::new(Vec::new()) };
}

/// Register `failure` as being handled on this thread
pub fn handling(failure: impl Failure) -> Handling {
    handling_shared(Arc::new(failure))
}

/// Register an already shared failure as being handled on this thread
pub fn handling_shared(failure: Arc<dyn Failure>) -> Handling {
    let depth = IN_FLIGHT.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.push(Arc::clone(&failure));
        stack.len() - 1
    });
    tracing::trace!(depth, failure = %failure, "handling failure");

    Handling {
        failure,
        depth,
        _thread_bound: PhantomData,
    }
}

/// Snapshot of the failures being handled on this thread, earliest first
pub fn current() -> CausalChain {
    IN_FLIGHT.with(|stack| CausalChain::from_shared(stack.borrow().clone()))
}

/// Number of failures being handled on this thread
pub fn depth() -> usize {
    IN_FLIGHT.with(|stack| stack.borrow().len())
}

/// Guard returned by [`handling`]
///
/// Dropping it unregisters its failure and anything registered after it.
/// A guard whose failure was already unregistered by an earlier guard leaves
/// the stack alone.
#[must_use = "the failure is unregistered as soon as the guard is dropped"]
pub struct Handling {
    failure: Arc<dyn Failure>,
    depth: usize,
    _thread_bound: PhantomData<*const ()>,
}

impl Handling {
    /// The registered failure
    pub fn failure(&self) -> &dyn Failure {
        &*self.failure
    }
}

impl Drop for Handling {
    fn drop(&mut self) {
        IN_FLIGHT.with(|stack| {
            let mut stack = stack.borrow_mut();
            let registered = stack
                .get(self.depth)
                .is_some_and(|entry| Arc::ptr_eq(entry, &self.failure));
            if registered {
                stack.truncate(self.depth);
            }
        });
    }
}
