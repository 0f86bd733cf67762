//! Helper combinators used alongside the composition macros.

/// Returns the value unchanged.
///
/// Handing `identity` to an update path rebuilds the tree without changing
/// it; handing it to a read path returns the focused value(s).
///
/// # Examples
///
/// ```
/// use propflow::compose::identity;
///
/// assert_eq!(identity(42), 42);
/// assert_eq!(identity(vec![1, 2, 3]), vec![1, 2, 3]);
/// ```
#[inline]
pub fn identity<T>(value: T) -> T {
    value
}

/// Creates a function that always returns the given value, ignoring its input.
///
/// # Examples
///
/// ```
/// use propflow::compose::constant;
/// use serde_json::{Value, json};
///
/// let reset = constant::<_, Value>(json!(0));
/// assert_eq!(reset(json!({"stale": true})), json!(0));
/// ```
#[inline]
pub fn constant<T: Clone, U>(value: T) -> impl Fn(U) -> T {
    move |_| value.clone()
}
