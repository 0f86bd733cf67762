//! Path-compiled accessors over [`serde_json::Value`] trees.
//!
//! A path string such as `"a.b[].c"` is parsed once into a [`Path`] and
//! compiled against a pair of strategies: one applied at each record step,
//! one applied at each array step. Applying a transform to the compiled path
//! yields a function from a root value to a result.
//!
//! | constructor          | object strategy | array strategy | result                        |
//! |----------------------|-----------------|----------------|-------------------------------|
//! | [`sync_prop_path`]   | [`On`]          | [`Lift`]       | the root, leaves transformed  |
//! | [`sync_read_path`]   | [`At`]          | [`Lift`]       | the transformed leaves        |
//! | `async_prop_path`    | `AsyncOn`       | `AsyncLift`    | as `sync_prop_path`, awaited  |
//! | `async_read_path`    | `AsyncAt`       | `AsyncLift`    | as `sync_read_path`, awaited  |
//!
//! Array steps nest: the value found under `b` in `"a.b[].c"` must be an
//! array, and the rest of the path (`c`) is applied to every element. The
//! read result therefore has one level of array per `[]` in the path.
//!
//! # Example
//!
//! ```
//! use propflow::path::{sync_prop_path, sync_read_path};
//! use serde_json::json;
//!
//! let catalog = json!({
//!     "shelves": [
//!         { "books": [{ "title": "a" }, { "title": "b" }] },
//!         { "books": [{ "title": "c" }] },
//!     ],
//!     "owner": "library",
//! });
//!
//! let titles = sync_read_path("shelves[].books[].title").apply(|title| title);
//! assert_eq!(titles(catalog.clone()).unwrap(), json!([["a", "b"], ["c"]]));
//!
//! let shout = sync_prop_path("shelves[].books[].title")
//!     .apply(|title| json!(title.as_str().unwrap_or_default().to_uppercase()));
//! let updated = shout(catalog).unwrap();
//! assert_eq!(updated["shelves"][1]["books"][0]["title"], json!("C"));
//! assert_eq!(updated["owner"], json!("library"));
//! ```

#[cfg(feature = "async")]
mod async_strategy;
mod compiler;
mod error;
mod segment;
mod strategy;

#[cfg(feature = "async")]
pub use async_strategy::{
    AsyncAccessor, AsyncArrayStrategy, AsyncAt, AsyncLift, AsyncObjectStrategy, AsyncOn,
};
pub use compiler::{Accessor, PropPath, prop_path, sync_prop_path, sync_read_path};
#[cfg(feature = "async")]
pub use compiler::{AsyncPropPath, async_prop_path, async_read_path, prop_path_async};
pub use error::{PathError, PathResult};
pub use segment::{Path, PathSegment};
pub use strategy::{ArrayStrategy, At, Lift, Next, ObjectStrategy, On};
