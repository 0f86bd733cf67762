use thiserror::Error;

/// Error returned by the bounded-concurrency schedulers.
#[derive(Debug, Error)]
pub enum LimitError<E> {
    /// The concurrency limit was zero.
    #[error("concurrency limit must be greater than 0")]
    InvalidLimit,

    /// The task at `index` failed. Tasks still running at that point were
    /// abandoned and their results discarded.
    #[error("task {index} failed: {error}")]
    Task {
        /// Position of the failing task in the input.
        index: usize,
        /// The task's own error.
        #[source]
        error: E,
    },

    /// A spawned task panicked or was cancelled before producing a result.
    #[error("spawned task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl<E> LimitError<E> {
    /// Position of the failing task, if a task failed.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Task { index, .. } => Some(*index),
            Self::InvalidLimit | Self::Join(_) => None,
        }
    }

    /// Unwraps the failing task's own error, if a task failed.
    #[must_use]
    pub fn into_task_error(self) -> Option<E> {
        match self {
            Self::Task { error, .. } => Some(error),
            Self::InvalidLimit | Self::Join(_) => None,
        }
    }
}
