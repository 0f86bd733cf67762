//! The `compose!` and `compose_async!` macros.

/// Composes functions from right to left.
///
/// `compose!(f, g, h)(x)` is equivalent to `f(g(h(x)))`.
///
/// # Syntax
///
/// - `compose!(f)` - Returns `f` unchanged
/// - `compose!(f, g)` - Returns `|x| f(g(x))`
/// - `compose!(f, g, h, ...)` - Composes any number of functions
///
/// # Examples
///
/// ```
/// use propflow::compose;
/// use serde_json::{Value, json};
///
/// let to_number = |value: Value| value.as_i64().unwrap_or_default();
/// let double = |number: i64| number * 2;
/// let wrap = |number: i64| json!({ "doubled": number });
///
/// let pipeline = compose!(wrap, double, to_number);
/// assert_eq!(pipeline(json!(21)), json!({ "doubled": 42 }));
/// ```
#[macro_export]
macro_rules! compose {
    ($function:expr) => {
        $function
    };

    ($outer_function:expr, $inner_function:expr $(,)?) => {{
        let outer = $outer_function;
        let inner = $inner_function;
        move |input| outer(inner(input))
    }};

    // compose!(f, g, h, ...) = compose!(f, compose!(g, h, ...))
    ($outer_function:expr, $($remaining_functions:expr),+ $(,)?) => {{
        let outer = $outer_function;
        let inner_composed = $crate::compose!($($remaining_functions),+);
        move |input| outer(inner_composed(input))
    }};
}

/// Composes future-returning functions from right to left.
///
/// `compose_async!(f, g)(x)` awaits `g(x)` and then awaits `f` applied to its
/// output. Every stage must return a future; wrap a plain function with
/// `|x| async move { f(x) }` to use it as a stage.
///
/// Each composed stage is shared through an [`Arc`](std::sync::Arc) so the
/// resulting closure stays `Fn` and may be called any number of times.
///
/// # Examples
///
/// ```
/// use propflow::compose_async;
///
/// let fetch = |id: u32| async move { id * 10 };
/// let render = |score: u32| async move { format!("score={score}") };
///
/// let lookup = compose_async!(render, fetch);
/// let rendered = futures::executor::block_on(lookup(4));
/// assert_eq!(rendered, "score=40");
/// ```
#[cfg(feature = "async")]
#[macro_export]
macro_rules! compose_async {
    ($function:expr) => {
        $function
    };

    ($outer_function:expr, $inner_function:expr $(,)?) => {{
        let outer = ::std::sync::Arc::new($outer_function);
        let inner = $inner_function;
        move |input| {
            let pending = inner(input);
            let outer = ::std::sync::Arc::clone(&outer);
            async move { outer(pending.await).await }
        }
    }};

    ($outer_function:expr, $($remaining_functions:expr),+ $(,)?) => {{
        let outer = ::std::sync::Arc::new($outer_function);
        let inner_composed = $crate::compose_async!($($remaining_functions),+);
        move |input| {
            let pending = inner_composed(input);
            let outer = ::std::sync::Arc::clone(&outer);
            async move { outer(pending.await).await }
        }
    }};
}
