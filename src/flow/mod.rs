//! Async control flow over sequences.
//!
//! Two families of combinators live here:
//!
//! - **Sequential folds.** [`async_reduce`] and the helpers built on it
//!   ([`async_flow`], [`async_take_while_right`]) await one step at a time.
//!   No two steps ever overlap.
//! - **Bounded concurrency.** [`async_limit`] and [`async_map_limit`] spawn
//!   deferred tasks on the tokio runtime with at most `limit` in flight and
//!   collect the results in input order.
//!
//! Every combinator short-circuits on the first error. The folds are plain
//! futures and run on any executor; the schedulers need a tokio runtime.
//!
//! # Example
//!
//! ```
//! use propflow::flow::{async_flow, async_map_limit};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let ids = [3_u32, 1, 2];
//!
//! let sequential = async_flow(|id: &u32| {
//!     let id = *id;
//!     async move { Ok::<_, String>(format!("user-{id}")) }
//! }, &ids)
//! .await
//! .unwrap();
//!
//! let concurrent = async_map_limit(2, |id: u32| async move {
//!     Ok::<_, String>(format!("user-{id}"))
//! }, ids)
//! .await
//! .unwrap();
//!
//! assert_eq!(sequential, concurrent);
//! # });
//! ```

mod error;
mod fold;
mod limit;

pub use error::LimitError;
pub use fold::{async_flow, async_reduce, async_take_while_right};
pub use limit::{async_limit, async_map_limit};
