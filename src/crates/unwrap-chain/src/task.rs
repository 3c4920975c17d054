//! Joining background tasks
//!
//! These helpers reshape task failures so they can be classified with the
//! chain queries: a single task's failure becomes a [`TaskFailed`] wrapper,
//! a fan-out's failures become an [`AggregateError`] of wrappers.

use crate::aggregate::AggregateError;
use crate::failure::Failure;
use crate::wrappers::TaskFailed;
use futures::future::join_all as join_futures;
use tokio::task::JoinHandle;

/// Await a task, wrapping its error (or its panic/cancellation) in [`TaskFailed`]
///
/// # Example
///
/// ```rust
/// use unwrap_chain::{task, walk_to_root, PlainError};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let handle = tokio::spawn(async { Err::<(), _>(PlainError::new("quota exceeded")) });
/// let err = task::join("upload", handle).await.unwrap_err();
/// assert_eq!(walk_to_root(&err).to_string(), "quota exceeded");
/// # }
/// ```
pub async fn join<T, E>(
    name: impl Into<String>,
    handle: JoinHandle<Result<T, E>>,
) -> Result<T, TaskFailed>
where
    E: Failure,
{
    let name = name.into();
    match handle.await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            tracing::debug!(task = %name, error = %err, "task returned an error");
            Err(TaskFailed::new(name, err))
        }
        Err(join_err) => {
            tracing::debug!(task = %name, error = %join_err, "task did not complete");
            Err(TaskFailed::new(name, join_err))
        }
    }
}

/// Await every task, in order
///
/// Returns all values when every task succeeded. Otherwise returns an
/// [`AggregateError`] holding one [`TaskFailed`] per failed task, in the
/// order the tasks were given. Every task is awaited either way.
pub async fn join_all<T, E, S>(
    handles: Vec<(S, JoinHandle<Result<T, E>>)>,
) -> Result<Vec<T>, AggregateError>
where
    E: Failure,
    S: Into<String>,
{
    let total = handles.len();
    let results = join_futures(handles.into_iter().map(|(name, handle)| join(name, handle))).await;

    let mut values = Vec::with_capacity(total);
    let mut failures = AggregateError::new();
    for result in results {
        match result {
            Ok(value) => values.push(value),
            Err(failed) => failures.push(failed),
        }
    }

    if failures.is_empty() {
        Ok(values)
    } else {
        tracing::debug!(
            failed = failures.len(),
            total,
            "fan-out finished with failures"
        );
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{contains, walk_to_root, walk_until, PlainError};

    #[tokio::test]
    async fn test_join_success() {
        let handle = tokio::spawn(async { Ok::<_, PlainError>(7) });
        let value = join("compute", handle).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_join_wraps_task_error() {
        let handle = tokio::spawn(async { Err::<(), _>(PlainError::new("bad row")) });
        let err = join("import", handle).await.unwrap_err();

        assert_eq!(err.name(), "import");
        assert!(contains::<PlainError>(&err));
        assert_eq!(walk_to_root(&err).to_string(), "bad row");
    }

    #[tokio::test]
    async fn test_join_wraps_panic() {
        let handle = tokio::spawn(async {
            if true {
                panic!("worker exploded");
            }
            Ok::<(), PlainError>(())
        });
        let err = join("worker", handle).await.unwrap_err();

        let join_err = walk_until::<tokio::task::JoinError>(&err).unwrap();
        assert!(join_err.is_panic());
    }

    #[tokio::test]
    async fn test_join_all_success_keeps_order() {
        let handles = (0..4)
            .map(|i| {
                let handle = tokio::spawn(async move { Ok::<_, PlainError>(i * 10) });
                (format!("task-{i}"), handle)
            })
            .collect();
        let values = join_all(handles).await.unwrap();
        assert_eq!(values, [0, 10, 20, 30]);
    }

    #[tokio::test]
    async fn test_join_all_collects_failures_in_order() {
        let handles = (0..4)
            .map(|i| {
                let handle = tokio::spawn(async move {
                    if i % 2 == 1 {
                        Err(PlainError::new(format!("task {i} failed")))
                    } else {
                        Ok(i)
                    }
                });
                (format!("task-{i}"), handle)
            })
            .collect();

        let agg = join_all(handles).await.unwrap_err();
        assert_eq!(agg.len(), 2);

        let roots: Vec<String> = agg.iter().map(|e| walk_to_root(e).to_string()).collect();
        assert_eq!(roots, ["task 1 failed", "task 3 failed"]);
    }
}
