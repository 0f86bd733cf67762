//! Bounded-concurrency scheduling.
//!
//! [`async_limit`] runs a list of deferred tasks on the tokio runtime with at
//! most `limit` of them in flight, tracked by a [`JoinSet`]. Results come back
//! in input order regardless of completion order.
//!
//! The first failure resolves the whole call. Tasks still in flight are not
//! interrupted: they are detached, keep running to completion, and their
//! results are discarded. Tasks not yet started are never started.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;

use super::error::LimitError;

/// Runs `tasks` with at most `limit` in flight and returns their results in
/// input order.
///
/// Tasks are spawned in input order, each as soon as a slot frees up. An
/// empty task list resolves to an empty vector without spawning anything.
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// - [`LimitError::InvalidLimit`] when `limit` is zero.
/// - [`LimitError::Task`] with the index and error of the first task to fail
///   (by completion time). Tasks already in flight are detached and finish
///   in the background.
/// - [`LimitError::Join`] when a task panics.
///
/// # Examples
///
/// ```
/// use propflow::flow::async_limit;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let tasks: Vec<_> = (1..=4)
///     .map(|n| move || async move { Ok::<_, String>(n * n) })
///     .collect();
///
/// assert_eq!(async_limit(2, tasks).await.unwrap(), vec![1, 4, 9, 16]);
/// # });
/// ```
pub async fn async_limit<T, Fut, V, E>(limit: usize, tasks: Vec<T>) -> Result<Vec<V>, LimitError<E>>
where
    T: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<V, E>> + Send + 'static,
    V: Send + 'static,
    E: Send + 'static,
{
    if limit == 0 {
        return Err(LimitError::InvalidLimit);
    }

    let total = tasks.len();
    let mut pending = tasks.into_iter().enumerate();
    let mut running = JoinSet::new();
    let mut entries = Vec::with_capacity(total);

    loop {
        while running.len() < limit {
            let Some((index, task)) = pending.next() else {
                break;
            };
            tracing::debug!(index, in_flight = running.len() + 1, "launching task");
            running.spawn(async move { (index, task().await) });
        }

        let Some(joined) = running.join_next().await else {
            break;
        };

        let (index, outcome) = match joined {
            Ok(completed) => completed,
            Err(join_error) => {
                tracing::warn!(in_flight = running.len(), "task panicked");
                running.detach_all();
                return Err(LimitError::Join(join_error));
            }
        };

        match outcome {
            Ok(value) => entries.push((index, value)),
            Err(error) => {
                tracing::warn!(
                    index,
                    detached = running.len(),
                    abandoned = pending.len(),
                    "task failed; letting tasks in flight finish"
                );
                running.detach_all();
                return Err(LimitError::Task { index, error });
            }
        }
    }

    tracing::debug!(completed = total, "all tasks completed");
    Ok(into_input_order(entries))
}

/// Applies `function` to every element of `list` with at most `limit`
/// calls in flight; see [`async_limit`].
///
/// `function` is shared by every task through an [`Arc`].
///
/// # Errors
///
/// As [`async_limit`].
pub async fn async_map_limit<I, F, Fut, V, E>(
    limit: usize,
    function: F,
    list: I,
) -> Result<Vec<V>, LimitError<E>>
where
    I: IntoIterator,
    I::Item: Send + 'static,
    F: Fn(I::Item) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<V, E>> + Send + 'static,
    V: Send + 'static,
    E: Send + 'static,
{
    let function = Arc::new(function);
    let tasks: Vec<_> = list
        .into_iter()
        .map(|element| {
            let function = Arc::clone(&function);
            move || function(element)
        })
        .collect();
    async_limit(limit, tasks).await
}

fn into_input_order<V>(mut entries: Vec<(usize, V)>) -> Vec<V> {
    entries.sort_unstable_by_key(|(index, _)| *index);
    entries.into_iter().map(|(_, value)| value).collect()
}
