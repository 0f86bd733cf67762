//! Compiling paths into composed accessors.
//!
//! A path is compiled once into a list of stages, mirroring the segments:
//!
//! ```text
//! "a.b[].c"  ->  focus(a), focus(b), lift(b), focus(c)
//! ```
//!
//! Applying a transform folds the stages from the right, each stage wrapping
//! the one after it, so the resulting function receives the root, focuses on
//! the first key and threads the rest of the chain as the transform for that
//! key. This is `compose(focus(a), focus(b), lift, focus(c))(transform)`.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;

use super::error::PathResult;
use super::segment::Path;
use super::strategy::{ArrayStrategy, At, Lift, ObjectStrategy, On};

/// A composed synchronous accessor: `root -> result`.
pub type Accessor<'f> = Box<dyn Fn(Value) -> PathResult<Value> + 'f>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Stage {
    Focus(Arc<str>),
    Lift(Arc<str>),
}

struct Compiled<O, A> {
    path: Path,
    stages: SmallVec<[Stage; 8]>,
    object: O,
    array: A,
}

impl<O, A> Compiled<O, A> {
    fn new(object: O, array: A, path: Path) -> Self {
        let stages = path
            .iter()
            .fold(SmallVec::new(), |mut stages: SmallVec<[Stage; 8]>, segment| {
                let key: Arc<str> = Arc::from(segment.key());
                if segment.is_array_step() {
                    stages.push(Stage::Focus(Arc::clone(&key)));
                    stages.push(Stage::Lift(key));
                } else {
                    stages.push(Stage::Focus(key));
                }
                stages
            });
        tracing::trace!(path = %path, stages = stages.len(), "compiled property path");
        Self {
            path,
            stages,
            object,
            array,
        }
    }
}

impl<O: ObjectStrategy, A: ArrayStrategy> Compiled<O, A> {
    fn run_stage(
        &self,
        position: usize,
        next: &dyn Fn(Value) -> PathResult<Value>,
        container: Value,
    ) -> PathResult<Value> {
        match &self.stages[position] {
            Stage::Focus(key) => self.object.focus(key, next, container),
            Stage::Lift(key) => self.array.lift(key, next, container),
        }
    }
}

/// A path compiled against a synchronous strategy pair.
///
/// Cloning is cheap; clones share the compiled stages.
///
/// # Examples
///
/// ```
/// use propflow::path::{At, Lift, On, prop_path};
/// use serde_json::{Value, json};
///
/// let data = json!({ "a": { "b": [{ "c": 1 }, { "c": 2 }, { "c": 3 }] } });
/// let double = |value: Value| json!(value.as_i64().unwrap_or_default() * 2);
///
/// let read = prop_path(At, Lift, "a.b[].c").apply(double);
/// assert_eq!(read(data.clone()).unwrap(), json!([2, 4, 6]));
///
/// let write = prop_path(On, Lift, "a.b[].c").apply(double);
/// assert_eq!(
///     write(data).unwrap(),
///     json!({ "a": { "b": [{ "c": 2 }, { "c": 4 }, { "c": 6 }] } })
/// );
/// ```
pub struct PropPath<O, A> {
    compiled: Arc<Compiled<O, A>>,
}

impl<O, A> PropPath<O, A> {
    /// Compiles `path` against the given strategies.
    #[must_use]
    pub fn new(object: O, array: A, path: Path) -> Self {
        Self {
            compiled: Arc::new(Compiled::new(object, array, path)),
        }
    }

    /// The parsed path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.compiled.path
    }

    /// Number of strategy applications per traversal of a single branch.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.compiled.stages.len()
    }
}

impl<O: ObjectStrategy, A: ArrayStrategy> PropPath<O, A> {
    /// Builds the accessor that runs `transform` at the leaf (or leaves).
    ///
    /// The accessor can be applied to any number of roots.
    pub fn apply<'f, F>(&self, transform: F) -> Accessor<'f>
    where
        F: Fn(Value) -> Value + 'f,
        O: 'f,
        A: 'f,
    {
        self.try_apply(move |value| Ok(transform(value)))
    }

    /// Like [`apply`](Self::apply) for a transform that can fail.
    pub fn try_apply<'f, F>(&self, transform: F) -> Accessor<'f>
    where
        F: Fn(Value) -> PathResult<Value> + 'f,
        O: 'f,
        A: 'f,
    {
        let leaf: Accessor<'f> = Box::new(transform);
        (0..self.compiled.stages.len())
            .rev()
            .fold(leaf, |next, position| {
                let compiled = Arc::clone(&self.compiled);
                let stage: Accessor<'f> =
                    Box::new(move |container| compiled.run_stage(position, &*next, container));
                stage
            })
    }

    /// Applies `transform` through the path to `root` in one call.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`](super::PathError) when `root` does not match
    /// the shape of the path.
    pub fn run<'f, F>(&self, transform: F, root: Value) -> PathResult<Value>
    where
        F: Fn(Value) -> Value + 'f,
        O: 'f,
        A: 'f,
    {
        self.apply(transform)(root)
    }
}

impl<O, A> Clone for PropPath<O, A> {
    fn clone(&self) -> Self {
        Self {
            compiled: Arc::clone(&self.compiled),
        }
    }
}

impl<O, A> fmt::Debug for PropPath<O, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("PropPath")
            .field("path", &self.compiled.path.to_string())
            .field("stages", &self.compiled.stages.len())
            .finish_non_exhaustive()
    }
}

/// Compiles `path` against an object strategy and an array strategy.
pub fn prop_path<O, A>(object: O, array: A, path: &str) -> PropPath<O, A>
where
    O: ObjectStrategy,
    A: ArrayStrategy,
{
    PropPath::new(object, array, Path::parse(path))
}

/// Copy-on-write update path: `prop_path(On, Lift, path)`.
pub fn sync_prop_path(path: &str) -> PropPath<On, Lift> {
    prop_path(On, Lift, path)
}

/// Read path: `prop_path(At, Lift, path)`.
pub fn sync_read_path(path: &str) -> PropPath<At, Lift> {
    prop_path(At, Lift, path)
}

#[cfg(feature = "async")]
pub use self::asynchronous::*;

#[cfg(feature = "async")]
mod asynchronous {
    use std::fmt;
    use std::future::Future;
    use std::sync::Arc;

    use futures::future::FutureExt;
    use serde_json::Value;

    use super::{Compiled, Stage};
    use crate::path::PathResult;
    use crate::path::async_strategy::{
        AsyncAccessor, AsyncArrayStrategy, AsyncAt, AsyncLift, AsyncObjectStrategy, AsyncOn,
    };
    use crate::path::segment::Path;

    impl<O: AsyncObjectStrategy, A: AsyncArrayStrategy> Compiled<O, A> {
        fn run_async_stage<'f>(
            &self,
            position: usize,
            next: AsyncAccessor<'f>,
            container: Value,
        ) -> futures::future::BoxFuture<'f, PathResult<Value>> {
            match &self.stages[position] {
                Stage::Focus(key) => self.object.focus(Arc::clone(key), next, container),
                Stage::Lift(key) => self.array.lift(Arc::clone(key), next, container),
            }
        }
    }

    /// A path compiled against an asynchronous strategy pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use propflow::path::async_prop_path;
    /// use serde_json::{Value, json};
    ///
    /// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
    /// let data = json!({ "a": { "b": [{ "c": 1 }, { "c": 2 }] } });
    /// let double = async_prop_path("a.b[].c").apply(|value: Value| async move {
    ///     tokio::task::yield_now().await;
    ///     json!(value.as_i64().unwrap_or_default() * 2)
    /// });
    ///
    /// assert_eq!(
    ///     double(data).await.unwrap(),
    ///     json!({ "a": { "b": [{ "c": 2 }, { "c": 4 }] } })
    /// );
    /// # });
    /// ```
    pub struct AsyncPropPath<O, A> {
        compiled: Arc<Compiled<O, A>>,
    }

    impl<O, A> AsyncPropPath<O, A> {
        /// Compiles `path` against the given async strategies.
        #[must_use]
        pub fn new(object: O, array: A, path: Path) -> Self {
            Self {
                compiled: Arc::new(Compiled::new(object, array, path)),
            }
        }

        /// The parsed path.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.compiled.path
        }
    }

    impl<O: AsyncObjectStrategy, A: AsyncArrayStrategy> AsyncPropPath<O, A> {
        /// Builds the accessor that awaits `transform` at the leaf (or leaves).
        pub fn apply<'f, F, Fut>(&self, transform: F) -> AsyncAccessor<'f>
        where
            F: Fn(Value) -> Fut + Send + Sync + 'f,
            Fut: Future<Output = Value> + Send + 'f,
            O: 'f,
            A: 'f,
        {
            self.try_apply(move |value| transform(value).map(PathResult::Ok))
        }

        /// Like [`apply`](Self::apply) for a transform whose future can fail.
        pub fn try_apply<'f, F, Fut>(&self, transform: F) -> AsyncAccessor<'f>
        where
            F: Fn(Value) -> Fut + Send + Sync + 'f,
            Fut: Future<Output = PathResult<Value>> + Send + 'f,
            O: 'f,
            A: 'f,
        {
            let leaf: AsyncAccessor<'f> = Arc::new(move |value| transform(value).boxed());
            (0..self.compiled.stages.len())
                .rev()
                .fold(leaf, |next, position| {
                    let compiled = Arc::clone(&self.compiled);
                    let stage: AsyncAccessor<'f> = Arc::new(move |container| {
                        compiled.run_async_stage(position, Arc::clone(&next), container)
                    });
                    stage
                })
        }

        /// Applies `transform` through the path to `root` in one call.
        ///
        /// # Errors
        ///
        /// Fails with a [`PathError`](crate::path::PathError) when `root`
        /// does not match the shape of the path.
        pub async fn run<'f, F, Fut>(&self, transform: F, root: Value) -> PathResult<Value>
        where
            F: Fn(Value) -> Fut + Send + Sync + 'f,
            Fut: Future<Output = Value> + Send + 'f,
            O: 'f,
            A: 'f,
        {
            self.apply(transform)(root).await
        }
    }

    impl<O, A> Clone for AsyncPropPath<O, A> {
        fn clone(&self) -> Self {
            Self {
                compiled: Arc::clone(&self.compiled),
            }
        }
    }

    impl<O, A> fmt::Debug for AsyncPropPath<O, A> {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter
                .debug_struct("AsyncPropPath")
                .field("path", &self.compiled.path.to_string())
                .field("stages", &self.compiled.stages.len())
                .finish_non_exhaustive()
        }
    }

    /// Compiles `path` against an async object strategy and an async array
    /// strategy.
    pub fn prop_path_async<O, A>(object: O, array: A, path: &str) -> AsyncPropPath<O, A>
    where
        O: AsyncObjectStrategy,
        A: AsyncArrayStrategy,
    {
        AsyncPropPath::new(object, array, Path::parse(path))
    }

    /// Async copy-on-write update path: `prop_path_async(AsyncOn, AsyncLift, path)`.
    pub fn async_prop_path(path: &str) -> AsyncPropPath<AsyncOn, AsyncLift> {
        prop_path_async(AsyncOn, AsyncLift, path)
    }

    /// Async read path: `prop_path_async(AsyncAt, AsyncLift, path)`.
    pub fn async_read_path(path: &str) -> AsyncPropPath<AsyncAt, AsyncLift> {
        prop_path_async(AsyncAt, AsyncLift, path)
    }

    static_assertions::assert_impl_all!(AsyncPropPath<AsyncOn, AsyncLift>: Send, Sync, Clone);
    static_assertions::assert_impl_all!(AsyncAccessor<'static>: Send, Sync);
}

static_assertions::assert_impl_all!(PropPath<On, Lift>: Send, Sync, Clone);
