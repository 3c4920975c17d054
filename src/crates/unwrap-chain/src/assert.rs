//! Test assertion for wrapped errors

/// Assert that `result` is an `Err` whose chain contains a `$ty`
///
/// # Example
///
/// ```rust
/// use unwrap_chain::{assert_chain_contains, PlainError, TaskFailed};
///
/// let result: Result<(), TaskFailed> = Err(TaskFailed::new("load", PlainError::new("missing")));
/// assert_chain_contains!(result, PlainError);
/// ```
#[macro_export]
macro_rules! assert_chain_contains {
    ($result:expr, $ty:ty $(,)?) => {
        match &$result {
            ::std::result::Result::Ok(_) => ::std::panic!(
                "expected an error containing `{}`, got Ok",
                ::std::any::type_name::<$ty>()
            ),
            ::std::result::Result::Err(err) => {
                let err: &dyn $crate::Failure = err;
                if !$crate::contains::<$ty>(err) {
                    ::std::panic!(
                        "expected an error containing `{}`, got: {}",
                        ::std::any::type_name::<$ty>(),
                        $crate::walk_to_root(err)
                    );
                }
            }
        }
    };
}
