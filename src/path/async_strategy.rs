//! Asynchronous accessor strategies.
//!
//! The async strategies mirror [`At`](super::At), [`On`](super::On) and
//! [`Lift`](super::Lift), except that the remainder of the chain returns a
//! future. Each strategy awaits that future before (for [`AsyncOn`])
//! rebuilding its container.
//!
//! Keys are handed over as `Arc<str>` so the returned future owns everything
//! it needs and does not borrow the strategy.
//!
//! A function of the shape
//! `fn<'f>(Arc<str>, AsyncAccessor<'f>, Value) -> BoxFuture<'f, PathResult<Value>>`
//! is an async strategy for either side of the pair.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, try_join_all};
use serde_json::Value;

use super::error::PathResult;
use super::strategy::{into_array, into_object, take_field};

/// The remainder of a compiled async chain, as seen by one stage.
pub type AsyncAccessor<'f> =
    Arc<dyn Fn(Value) -> BoxFuture<'f, PathResult<Value>> + Send + Sync + 'f>;

/// Async strategy applied at a record step.
pub trait AsyncObjectStrategy: Send + Sync {
    /// Applies `next` to the value under `key` in `container`.
    ///
    /// The returned future fails when `container` has the wrong shape or
    /// when the future produced by `next` fails.
    fn focus<'f>(
        &self,
        key: Arc<str>,
        next: AsyncAccessor<'f>,
        container: Value,
    ) -> BoxFuture<'f, PathResult<Value>>;
}

/// Async strategy applied at the element level of an array step.
pub trait AsyncArrayStrategy: Send + Sync {
    /// Applies `next` to every element of `container`.
    fn lift<'f>(
        &self,
        key: Arc<str>,
        next: AsyncAccessor<'f>,
        container: Value,
    ) -> BoxFuture<'f, PathResult<Value>>;
}

impl<F> AsyncObjectStrategy for F
where
    F: for<'f> Fn(Arc<str>, AsyncAccessor<'f>, Value) -> BoxFuture<'f, PathResult<Value>>
        + Send
        + Sync,
{
    fn focus<'f>(
        &self,
        key: Arc<str>,
        next: AsyncAccessor<'f>,
        container: Value,
    ) -> BoxFuture<'f, PathResult<Value>> {
        self(key, next, container)
    }
}

impl<F> AsyncArrayStrategy for F
where
    F: for<'f> Fn(Arc<str>, AsyncAccessor<'f>, Value) -> BoxFuture<'f, PathResult<Value>>
        + Send
        + Sync,
{
    fn lift<'f>(
        &self,
        key: Arc<str>,
        next: AsyncAccessor<'f>,
        container: Value,
    ) -> BoxFuture<'f, PathResult<Value>> {
        self(key, next, container)
    }
}

/// Async read strategy; see [`At`](super::At).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsyncAt;

/// Async copy-on-write update strategy; see [`On`](super::On).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsyncOn;

/// Async array strategy.
///
/// All element futures are started together and awaited jointly; the output
/// keeps element order. The first failure fails the whole lift and drops the
/// element futures still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsyncLift;

impl AsyncObjectStrategy for AsyncAt {
    fn focus<'f>(
        &self,
        key: Arc<str>,
        next: AsyncAccessor<'f>,
        container: Value,
    ) -> BoxFuture<'f, PathResult<Value>> {
        async move {
            let mut record = into_object(&key, container)?;
            next(take_field(&mut record, &key)).await
        }
        .boxed()
    }
}

impl AsyncObjectStrategy for AsyncOn {
    fn focus<'f>(
        &self,
        key: Arc<str>,
        next: AsyncAccessor<'f>,
        container: Value,
    ) -> BoxFuture<'f, PathResult<Value>> {
        async move {
            let mut record = into_object(&key, container)?;
            let updated = next(take_field(&mut record, &key)).await?;
            record.insert(key.to_string(), updated);
            PathResult::Ok(Value::Object(record))
        }
        .boxed()
    }
}

impl AsyncArrayStrategy for AsyncLift {
    fn lift<'f>(
        &self,
        key: Arc<str>,
        next: AsyncAccessor<'f>,
        container: Value,
    ) -> BoxFuture<'f, PathResult<Value>> {
        async move {
            let items = into_array(&key, container)?;
            let lifted = try_join_all(items.into_iter().map(next.as_ref())).await?;
            PathResult::Ok(Value::Array(lifted))
        }
        .boxed()
    }
}
