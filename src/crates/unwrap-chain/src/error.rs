//! Error types for chain queries.

use crate::failure::Failure;
use std::any::TypeId;
use thiserror::Error;

/// Result type for chain queries that can miss.
pub type Result<'a, T> = std::result::Result<T, NotFound<'a>>;

/// A chain walk reached its innermost error without finding the requested type.
///
/// Carries the terminal error so the caller can still report the root cause.
#[derive(Debug, Error)]
#[error("no `{requested}` in error chain; innermost error: {root}")]
pub struct NotFound<'a> {
    requested: &'static str,
    requested_id: TypeId,
    root: &'a dyn Failure,
}

impl<'a> NotFound<'a> {
    pub(crate) fn new<T: Failure>(root: &'a dyn Failure) -> Self {
        Self {
            requested: std::any::type_name::<T>(),
            requested_id: TypeId::of::<T>(),
            root,
        }
    }

    /// Name of the type that was asked for
    pub fn requested(&self) -> &'static str {
        self.requested
    }

    /// `TypeId` of the type that was asked for
    pub fn requested_type_id(&self) -> TypeId {
        self.requested_id
    }

    /// The fully unwrapped error the walk stopped at
    pub fn root(&self) -> &'a dyn Failure {
        self.root
    }
}
