//! The `curry!` macro: currying by declared arity.
//!
//! Rust cannot ask a function how many parameters it takes, so the arity is
//! declared at the call site by naming the parameters:
//! `curry!(function => first, second, third)` produces
//! `|first| |second| |third| function(first, second, third)`.
//!
//! The function and every bound argument are kept in [`Rc`](std::rc::Rc)s so
//! each intermediate closure is `Fn` and can be applied any number of times.
//! Bound arguments are cloned out on every final call, so all arguments but
//! the last must implement [`Clone`].

/// Converts a function into curried form from a declared parameter list.
///
/// The parameter names only label the closures; any identifiers work.
///
/// # Examples
///
/// ```
/// use propflow::curry;
///
/// fn volume(width: u32, height: u32, depth: u32) -> u32 {
///     width * height * depth
/// }
///
/// let curried = curry!(volume => width, height, depth);
/// let square_base = curried(2)(2);
/// assert_eq!(square_base(5), 20);
/// assert_eq!(square_base(1), 4);
///
/// // Splitting the arguments differently gives the same answer.
/// assert_eq!(curried(2)(2)(5), volume(2, 2, 5));
/// ```
///
/// A single declared parameter is just a by-value wrapper:
///
/// ```
/// use propflow::curry;
///
/// let shout = curry!(|text: &str| text.to_uppercase() => text);
/// assert_eq!(shout("hi"), "HI");
/// ```
#[macro_export]
macro_rules! curry {
    // Last parameter: call through with every bound argument cloned out.
    (@bind $function:ident [$($bound:ident)*] $last:ident) => {
        move |$last| {
            $function(
                $(::std::rc::Rc::unwrap_or_clone(::std::rc::Rc::clone(&$bound)),)*
                $last,
            )
        }
    };

    (@bind $function:ident [$($bound:ident)*] $next:ident $($rest:ident)+) => {
        move |$next| {
            let $function = ::std::rc::Rc::clone(&$function);
            $(let $bound = ::std::rc::Rc::clone(&$bound);)*
            let $next = ::std::rc::Rc::new($next);
            $crate::curry!(@bind $function [$($bound)* $next] $($rest)+)
        }
    };

    ($function:expr => $only:ident $(,)?) => {{
        let function = $function;
        move |$only| function($only)
    }};

    ($function:expr => $first:ident, $($rest:ident),+ $(,)?) => {{
        let function = ::std::rc::Rc::new($function);
        $crate::curry!(@bind function [] $first $($rest)+)
    }};
}
