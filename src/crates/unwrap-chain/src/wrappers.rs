//! Built-in leaf and wrapper failures

use crate::failure::Failure;
use crate::stack::Stack;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// A leaf failure carrying a message and the stack it was raised on
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PlainError {
    message: String,
    stack: Stack,
}

impl PlainError {
    /// Create a new error, capturing the current call stack
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_stack(message, Stack::capture())
    }

    /// Create a new error with an explicit stack
    pub fn with_stack(message: impl Into<String>, stack: Stack) -> Self {
        Self {
            message: message.into(),
            stack,
        }
    }

    /// The error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Failure for PlainError {
    fn stack(&self) -> Option<&Stack> {
        Some(&self.stack)
    }
}

/// A failure that crossed a concurrency boundary
///
/// A background task failed and its error was re-raised to the code that
/// joined it. Unwrapping yields the task's own error.
#[derive(Debug)]
pub struct TaskFailed {
    task: String,
    failure: Box<dyn Failure>,
    stack: Stack,
}

impl TaskFailed {
    /// Wrap the error raised by the task `task`
    pub fn new(task: impl Into<String>, failure: impl Failure) -> Self {
        Self::from_boxed(task, Box::new(failure))
    }

    /// Wrap an already boxed failure
    pub fn from_boxed(task: impl Into<String>, failure: Box<dyn Failure>) -> Self {
        Self {
            task: task.into(),
            failure,
            stack: Stack::capture(),
        }
    }

    /// Name of the failed task
    pub fn name(&self) -> &str {
        &self.task
    }

    /// The task's own error
    pub fn failure(&self) -> &dyn Failure {
        &*self.failure
    }
}

impl fmt::Display for TaskFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task `{}` failed", self.task)
    }
}

impl StdError for TaskFailed {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.failure.as_error())
    }
}

impl Failure for TaskFailed {
    fn unwrap_one(&self) -> Option<&dyn Failure> {
        Some(&*self.failure)
    }

    fn stack(&self) -> Option<&Stack> {
        Some(&self.stack)
    }
}
