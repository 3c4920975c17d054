//! The `Failure` trait: the single extension point for wrapper errors
//!
//! Any error type becomes visible to the chain queries by implementing
//! [`Failure`]. Plain errors take the defaults; wrapper errors override
//! [`Failure::unwrap_one`] to hand out the error they carry.

use crate::stack::Stack;
use std::any::{Any, TypeId};
use std::error::Error as StdError;

/// An error value that may wrap another, more meaningful error
///
/// # Example
///
/// ```rust
/// use unwrap_chain::{walk_to_root, Failure, PlainError};
/// use std::fmt;
///
/// #[derive(Debug)]
/// struct Retried {
///     attempts: u32,
///     last: PlainError,
/// }
///
/// impl fmt::Display for Retried {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "gave up after {} attempts", self.attempts)
///     }
/// }
///
/// impl std::error::Error for Retried {}
///
/// impl Failure for Retried {
///     fn unwrap_one(&self) -> Option<&dyn Failure> {
///         Some(&self.last)
///     }
/// }
///
/// let err = Retried { attempts: 3, last: PlainError::new("connection reset") };
/// assert_eq!(walk_to_root(&err).to_string(), "connection reset");
/// ```
pub trait Failure: StdError + Erased + Send + Sync + 'static {
    /// Single-step unwrap
    ///
    /// Returns the wrapped error, or `None` when this error is not a wrapper.
    /// Implementations must not form a cycle: every chain has to reach an
    /// error that returns `None`.
    fn unwrap_one(&self) -> Option<&dyn Failure> {
        None
    }

    /// Call-stack context captured when this error was raised
    fn stack(&self) -> Option<&Stack> {
        None
    }
}

/// Type-erasure helpers implemented for every [`Failure`]
#[doc(hidden)]
pub trait Erased {
    fn as_any(&self) -> &dyn Any;
    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static);
}

impl<T: Failure> Erased for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }
}

impl dyn Failure {
    /// Whether the concrete type of this error is `T`
    pub fn is<T: Failure>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast to the concrete type `T`
    pub fn downcast_ref<T: Failure>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Concrete type of this error
    pub fn concrete_type_id(&self) -> TypeId {
        Any::type_id(self.as_any())
    }

    /// Identity comparison
    ///
    /// Two errors are the same value when they live at the same address and
    /// have the same concrete type. The type check matters for wrappers that
    /// hold their inner error inline as the first field.
    pub fn is_same(&self, other: &dyn Failure) -> bool {
        let this = self as *const dyn Failure as *const ();
        let that = other as *const dyn Failure as *const ();
        std::ptr::eq(this, that) && self.concrete_type_id() == other.concrete_type_id()
    }
}

macro_rules! terminal_failures {
    ($($ty:ty),* $(,)?) => {
        $(impl Failure for $ty {})*
    };
}

terminal_failures!(
    std::io::Error,
    std::fmt::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::num::TryFromIntError,
    std::str::ParseBoolError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    std::env::VarError,
);

#[cfg(feature = "runtime")]
terminal_failures!(tokio::task::JoinError);
