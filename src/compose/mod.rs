//! Function composition utilities.
//!
//! The path compiler and the async combinators are built from a small set of
//! composition primitives. They are exported so that callers can assemble
//! their own transforms in the same style.
//!
//! # Overview
//!
//! - [`compose!`]: Compose functions right-to-left (mathematical composition)
//! - [`compose_async!`]: Compose future-returning functions right-to-left,
//!   awaiting each stage before handing its output to the next
//! - [`curry!`]: Turn a function into a chain of single-argument closures,
//!   one per declared parameter
//!
//! # Helper Functions
//!
//! - [`identity`]: Returns its argument unchanged
//! - [`constant`]: Creates a function that always returns the same value
//!
//! # Examples
//!
//! ```
//! use propflow::{compose, curry};
//!
//! fn add_one(x: i32) -> i32 { x + 1 }
//! fn double(x: i32) -> i32 { x * 2 }
//!
//! let composed = compose!(add_one, double);
//! assert_eq!(composed(5), 11);
//!
//! fn clamp(low: i32, high: i32, value: i32) -> i32 { value.max(low).min(high) }
//!
//! let clamp_to_percent = curry!(clamp => low, high, value)(0)(100);
//! assert_eq!(clamp_to_percent(140), 100);
//! assert_eq!(clamp_to_percent(-3), 0);
//! ```
//!
//! # Laws
//!
//! - **Associativity**: `compose!(f, compose!(g, h)) == compose!(compose!(f, g), h)`
//! - **Identity**: `compose!(identity, f) == f == compose!(f, identity)`
//! - **Curry equivalence**: `curry!(f => a, b)(x)(y) == f(x, y)`

mod compose_macro;
mod curry_macro;
mod utils;

pub use utils::{constant, identity};

// Re-export macros (they are already at crate root via #[macro_export])
pub use crate::compose;
#[cfg(feature = "async")]
pub use crate::compose_async;
pub use crate::curry;
