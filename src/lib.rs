//! # propflow
//!
//! Path-compiled accessor combinators and bounded-concurrency async
//! combinators.
//!
//! ## Overview
//!
//! - **Function Composition**: `compose!`, `compose_async!` and the
//!   arity-declared `curry!` macro
//! - **Path Accessors**: a path such as `"orders[].lines[].price"` is compiled
//!   once into a reusable function that reads or rebuilds a
//!   [`serde_json::Value`] tree, fanning out over arrays at `[]` segments,
//!   with synchronous or asynchronous transforms
//! - **Async Flow**: a sequential async fold (`async_reduce`) with its
//!   forward and backward instantiations, and an ordered scheduler that runs
//!   at most `limit` tasks at once (`async_limit`)
//!
//! ## Feature Flags
//!
//! - `compose`: Function composition utilities
//! - `path`: Path compiler and synchronous strategies
//! - `async`: Async strategies, the sequential fold and the tokio-backed scheduler
//! - `serde`: `Serialize`/`Deserialize` for [`path::Path`]
//! - `preserve_order`: Keep object key order (forwards to `serde_json`)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use propflow::prelude::*;
//! use serde_json::json;
//!
//! let order = json!({ "lines": [{ "qty": 1 }, { "qty": 4 }] });
//!
//! let quantities = sync_read_path("lines[].qty").apply(identity);
//! assert_eq!(quantities(order.clone()).unwrap(), json!([1, 4]));
//!
//! let doubled = sync_prop_path("lines[].qty")
//!     .apply(|qty| json!(qty.as_i64().unwrap_or_default() * 2));
//! assert_eq!(
//!     doubled(order).unwrap(),
//!     json!({ "lines": [{ "qty": 2 }, { "qty": 8 }] })
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use propflow::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "compose")]
    pub use crate::compose::*;

    #[cfg(feature = "path")]
    pub use crate::path::*;

    #[cfg(feature = "async")]
    pub use crate::flow::*;
}

#[cfg(feature = "compose")]
pub mod compose;

#[cfg(feature = "path")]
pub mod path;

#[cfg(feature = "async")]
pub mod flow;
