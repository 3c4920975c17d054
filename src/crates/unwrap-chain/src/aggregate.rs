//! Failures that branch or sequence instead of wrapping
//!
//! Both types here are terminal for the chain queries: neither has exactly
//! one child, so [`Failure::unwrap_one`] keeps its default. Structural
//! consumers such as summary renderers downcast to them and walk the members.

use crate::failure::Failure;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// An ordered set of failures from fanned-out work
#[derive(Debug, Default)]
pub struct AggregateError {
    failures: Vec<Box<dyn Failure>>,
}

impl AggregateError {
    /// Create an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregate from boxed failures, keeping their order
    pub fn from_boxed(failures: Vec<Box<dyn Failure>>) -> Self {
        Self { failures }
    }

    /// Append a failure
    pub fn push(&mut self, failure: impl Failure) {
        self.failures.push(Box::new(failure));
    }

    /// Append a failure, builder style
    pub fn with(mut self, failure: impl Failure) -> Self {
        self.push(failure);
        self
    }

    /// Number of member failures
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether there are no member failures
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Member failures in recorded order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &dyn Failure> + '_ {
        self.failures.iter().map(|failure| &**failure)
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failures.as_slice() {
            [] => write!(f, "no failures"),
            [only] => write!(f, "{}", only),
            [first, ..] => write!(f, "{} failures; first: {}", self.failures.len(), first),
        }
    }
}

impl FromIterator<Box<dyn Failure>> for AggregateError {
    fn from_iter<I: IntoIterator<Item = Box<dyn Failure>>>(iter: I) -> Self {
        Self::from_boxed(iter.into_iter().collect())
    }
}

impl StdError for AggregateError {}

impl Failure for AggregateError {}

/// Failures raised one while handling the previous, earliest first
#[derive(Debug, Clone, Default)]
pub struct CausalChain {
    failures: Vec<Arc<dyn Failure>>,
}

impl CausalChain {
    /// Start a chain with its earliest failure
    pub fn new(first: impl Failure) -> Self {
        Self {
            failures: vec![Arc::new(first) as Arc<dyn Failure>],
        }
    }

    /// Create a chain from shared failures, earliest first
    pub fn from_shared(failures: Vec<Arc<dyn Failure>>) -> Self {
        Self { failures }
    }

    /// Record a failure raised while handling the latest one
    pub fn then(mut self, failure: impl Failure) -> Self {
        self.failures.push(Arc::new(failure));
        self
    }

    /// Number of recorded failures
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// The most recently raised failure
    pub fn latest(&self) -> Option<&dyn Failure> {
        self.failures.last().map(|failure| &**failure)
    }

    /// Recorded failures, earliest first
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &dyn Failure> + '_ {
        self.failures.iter().map(|failure| &**failure)
    }
}

impl fmt::Display for CausalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.latest() {
            Some(latest) => write!(f, "{}", latest),
            None => write!(f, "no failures"),
        }
    }
}

impl StdError for CausalChain {}

impl Failure for CausalChain {}
