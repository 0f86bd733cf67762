//! Synchronous accessor strategies.
//!
//! A compiled path is a chain of strategy applications. Every stage receives
//! the *next* stage as its transform together with the container at its
//! level:
//!
//! - an [`ObjectStrategy`] focuses on one key of a record,
//! - an [`ArrayStrategy`] lifts the next stage over every element of a
//!   sequence.
//!
//! Two object strategies ship with the crate: [`At`] reads (the result of the
//! chain is whatever the transform returns) and [`On`] rebuilds (the result
//! is the container with the focused value replaced). [`Lift`] is the array
//! strategy for both.
//!
//! Any closure with the right shape is a strategy too, on either side of the
//! pair:
//!
//! ```
//! use propflow::path::{At, Lift, PathError, PathResult, prop_path};
//! use serde_json::{Map, Value, json};
//!
//! // Like `On`, but starts from 0 where the key is missing.
//! let on_or_zero = |key: &str,
//!                   next: &dyn Fn(Value) -> PathResult<Value>,
//!                   container: Value|
//!  -> PathResult<Value> {
//!     let mut record: Map<String, Value> = container.as_object().cloned().unwrap_or_default();
//!     let current = record.remove(key).unwrap_or(json!(0));
//!     record.insert(key.to_owned(), next(current)?);
//!     Ok(Value::Object(record))
//! };
//!
//! let bump = prop_path(on_or_zero, Lift, "hits").apply(|hits| json!(hits.as_i64().unwrap_or(0) + 1));
//! assert_eq!(bump(json!({})).unwrap(), json!({ "hits": 1 }));
//!
//! // Lifts over the non-null elements only.
//! let skip_nulls = |key: &str,
//!                   next: &dyn Fn(Value) -> PathResult<Value>,
//!                   container: Value|
//!  -> PathResult<Value> {
//!     let Value::Array(items) = container else {
//!         return Err(PathError::transform(format!("{key} is not a list")));
//!     };
//!     items
//!         .into_iter()
//!         .filter(|item| !item.is_null())
//!         .map(next)
//!         .collect::<PathResult<Vec<_>>>()
//!         .map(Value::Array)
//! };
//!
//! let names = prop_path(At, skip_nulls, "users[].name").apply(|name| name);
//! assert_eq!(
//!     names(json!({ "users": [{ "name": "ada" }, null, { "name": "lin" }] })).unwrap(),
//!     json!(["ada", "lin"])
//! );
//! ```

use serde_json::{Map, Value};

use super::error::{PathError, PathResult};

/// The remainder of a compiled chain, as seen by one stage.
pub type Next<'n> = &'n dyn Fn(Value) -> PathResult<Value>;

/// Strategy applied at a record step.
pub trait ObjectStrategy {
    /// Applies `next` to the value under `key` in `container`.
    ///
    /// # Errors
    ///
    /// Returns an error when `container` has the wrong shape or when `next`
    /// fails.
    fn focus(&self, key: &str, next: Next<'_>, container: Value) -> PathResult<Value>;
}

/// Strategy applied at the element level of an array step.
pub trait ArrayStrategy {
    /// Applies `next` to every element of `container`.
    ///
    /// `key` names the array segment and is only used for diagnostics.
    ///
    /// # Errors
    ///
    /// Returns an error when `container` is not an array or when `next`
    /// fails for any element.
    fn lift(&self, key: &str, next: Next<'_>, container: Value) -> PathResult<Value>;
}

impl<F> ObjectStrategy for F
where
    F: Fn(&str, Next<'_>, Value) -> PathResult<Value>,
{
    fn focus(&self, key: &str, next: Next<'_>, container: Value) -> PathResult<Value> {
        self(key, next, container)
    }
}

impl<F> ArrayStrategy for F
where
    F: Fn(&str, Next<'_>, Value) -> PathResult<Value>,
{
    fn lift(&self, key: &str, next: Next<'_>, container: Value) -> PathResult<Value> {
        self(key, next, container)
    }
}

/// Read strategy: hands the focused value to the transform and returns its
/// result without rebuilding the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct At;

/// Copy-on-write update strategy: returns the container with the focused
/// value replaced by the transform's result. Sibling keys are moved over
/// unchanged; a missing key is inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct On;

/// Array strategy: maps the transform over every element, in order,
/// stopping at the first failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lift;

impl ObjectStrategy for At {
    fn focus(&self, key: &str, next: Next<'_>, container: Value) -> PathResult<Value> {
        let mut record = into_object(key, container)?;
        next(take_field(&mut record, key))
    }
}

impl ObjectStrategy for On {
    fn focus(&self, key: &str, next: Next<'_>, container: Value) -> PathResult<Value> {
        let mut record = into_object(key, container)?;
        let updated = next(take_field(&mut record, key))?;
        record.insert(key.to_owned(), updated);
        Ok(Value::Object(record))
    }
}

impl ArrayStrategy for Lift {
    fn lift(&self, key: &str, next: Next<'_>, container: Value) -> PathResult<Value> {
        into_array(key, container)?
            .into_iter()
            .map(next)
            .collect::<PathResult<Vec<_>>>()
            .map(Value::Array)
    }
}

pub(crate) fn into_object(key: &str, container: Value) -> PathResult<Map<String, Value>> {
    match container {
        Value::Object(record) => Ok(record),
        other => Err(PathError::not_an_object(key, &other)),
    }
}

pub(crate) fn into_array(key: &str, container: Value) -> PathResult<Vec<Value>> {
    match container {
        Value::Array(items) => Ok(items),
        other => Err(PathError::not_an_array(key, &other)),
    }
}

/// Moves the value out of `record[key]`, leaving `null` in its slot so a
/// later insert keeps the key's position. A missing key reads as `null`.
pub(crate) fn take_field(record: &mut Map<String, Value>, key: &str) -> Value {
    record.get_mut(key).map(Value::take).unwrap_or(Value::Null)
}
