//! Sequential async fold and its instantiations.
//!
//! [`async_reduce`] is an index-driven fold: the caller picks the starting
//! index, how the index moves, and when to stop. Steps never overlap; step
//! `n + 1` starts only after the future of step `n` has resolved. The first
//! failing step ends the fold with its error.
//!
//! [`async_flow`] walks forward and collects every result (a sequential async
//! map). [`async_take_while_right`] walks backward and stops at the first
//! element, counted from the end, that fails the predicate.

use std::collections::VecDeque;
use std::future::Future;

/// Folds `sequence` with an asynchronous step, one element at a time.
///
/// Starting at `start_index`, each round awaits
/// `step(accumulator, &sequence[index])`, then asks
/// `continue_predicate(index, sequence, &accumulator)` whether to go on; if
/// so the next round runs at `next_index(index)`.
///
/// The fold also ends, with the current accumulator, as soon as the index
/// falls outside `sequence`; `step` is never called out of range. An empty
/// sequence therefore resolves to `initial`.
///
/// Termination is otherwise up to the caller: `next_index` has to move
/// toward making the predicate false or leaving the sequence.
///
/// # Errors
///
/// Returns the error of the first step that fails; later elements are not
/// visited.
///
/// # Examples
///
/// ```
/// use propflow::flow::async_reduce;
///
/// # futures::executor::block_on(async {
/// let readings = [3, 8, 2, 9, 4];
///
/// // Sum every other reading, front to back.
/// let total = async_reduce(
///     |index, sequence: &[i32], _: &i32| index + 2 < sequence.len(),
///     |index| index + 2,
///     0,
///     |sum, reading| async move { Ok::<_, String>(sum + reading) },
///     0,
///     &readings,
/// )
/// .await;
///
/// assert_eq!(total, Ok(3 + 2 + 4));
/// # });
/// ```
pub async fn async_reduce<'s, T, B, E, P, N, F, Fut>(
    mut continue_predicate: P,
    mut next_index: N,
    start_index: usize,
    mut step: F,
    initial: B,
    sequence: &'s [T],
) -> Result<B, E>
where
    P: FnMut(usize, &[T], &B) -> bool,
    N: FnMut(usize) -> usize,
    F: FnMut(B, &'s T) -> Fut,
    Fut: Future<Output = Result<B, E>>,
{
    let mut index = start_index;
    let mut accumulator = initial;

    while let Some(element) = sequence.get(index) {
        tracing::trace!(index, "async fold step");
        accumulator = step(accumulator, element).await?;
        if !continue_predicate(index, sequence, &accumulator) {
            break;
        }
        index = next_index(index);
    }

    Ok(accumulator)
}

/// Maps `function` over `list` strictly in order, awaiting each result
/// before starting the next.
///
/// # Errors
///
/// Returns the first error produced by `function`; the remaining elements
/// are not visited.
///
/// # Examples
///
/// ```
/// use propflow::flow::async_flow;
///
/// # futures::executor::block_on(async {
/// let lengths = async_flow(
///     |word: &&str| {
///         let length = word.len();
///         async move { Ok::<_, String>(length) }
///     },
///     &["a", "bbb", "cc"],
/// )
/// .await;
///
/// assert_eq!(lengths, Ok(vec![1, 3, 2]));
/// # });
/// ```
pub async fn async_flow<'s, T, U, E, F, Fut>(mut function: F, list: &'s [T]) -> Result<Vec<U>, E>
where
    F: FnMut(&'s T) -> Fut,
    Fut: Future<Output = Result<U, E>>,
{
    let last = list.len().saturating_sub(1);

    async_reduce(
        |index, _, _| index < last,
        |index| index + 1,
        0,
        |mut collected: Vec<U>, element| {
            let pending = function(element);
            async move {
                collected.push(pending.await?);
                Ok::<_, E>(collected)
            }
        },
        Vec::with_capacity(list.len()),
        list,
    )
    .await
}

/// Returns the longest suffix of `list` whose elements all satisfy
/// `predicate`, in original order.
///
/// Elements are tested from the last one backward; the first failure stops
/// the scan, and elements to its left are never tested.
///
/// # Errors
///
/// Returns the first error produced by `predicate`.
///
/// # Examples
///
/// ```
/// use propflow::flow::async_take_while_right;
///
/// # futures::executor::block_on(async {
/// let is_even = |number: &i32| {
///     let even = number % 2 == 0;
///     async move { Ok::<_, String>(even) }
/// };
///
/// assert_eq!(async_take_while_right(is_even, &[1, 2, 3, 4]).await, Ok(vec![4]));
/// assert_eq!(async_take_while_right(is_even, &[1, 2, 6, 4]).await, Ok(vec![2, 6, 4]));
/// # });
/// ```
pub async fn async_take_while_right<'s, T, E, P, Fut>(
    mut predicate: P,
    list: &'s [T],
) -> Result<Vec<T>, E>
where
    T: Clone,
    P: FnMut(&'s T) -> Fut,
    Fut: Future<Output = Result<bool, E>>,
{
    let Some(last) = list.len().checked_sub(1) else {
        return Ok(Vec::new());
    };

    let (_, collected) = async_reduce(
        |index, _, (passing, _): &(bool, VecDeque<T>)| index > 0 && *passing,
        |index| index - 1,
        last,
        |(_, mut collected): (bool, VecDeque<T>), element: &'s T| {
            let pending = predicate(element);
            async move {
                let passing = pending.await?;
                if passing {
                    collected.push_front(element.clone());
                }
                Ok::<_, E>((passing, collected))
            }
        },
        (true, VecDeque::new()),
        list,
    )
    .await?;

    Ok(collected.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::RefCell;
    use std::time::Duration;

    async fn ready<T>(value: T) -> Result<T, String> {
        Ok(value)
    }

    #[rstest]
    #[tokio::test]
    async fn reduce_of_empty_sequence_is_initial() {
        let empty: [i32; 0] = [];
        let result = async_reduce(
            |_, _, _: &i32| true,
            |index| index + 1,
            0,
            |sum, element| ready(sum + element),
            42,
            &empty,
        )
        .await;
        assert_eq!(result, Ok(42));
    }

    #[rstest]
    #[tokio::test]
    async fn reduce_stops_when_predicate_fails() {
        let visited = RefCell::new(Vec::new());
        let result = async_reduce(
            |_, _, sum: &i32| *sum < 6,
            |index| index + 1,
            0,
            |sum, element: &i32| {
                visited.borrow_mut().push(*element);
                ready(sum + element)
            },
            0,
            &[1, 2, 3, 4, 5],
        )
        .await;
        assert_eq!(result, Ok(6));
        assert_eq!(*visited.borrow(), vec![1, 2, 3]);
    }

    #[rstest]
    #[tokio::test]
    async fn reduce_stops_when_index_leaves_sequence() {
        let result = async_reduce(
            |_, _, _: &Vec<i32>| true,
            |index| index + 1,
            1,
            |mut seen: Vec<i32>, element: &i32| {
                seen.push(*element);
                ready(seen)
            },
            Vec::new(),
            &[10, 20, 30],
        )
        .await;
        assert_eq!(result, Ok(vec![20, 30]));
    }

    #[rstest]
    #[tokio::test]
    async fn reduce_propagates_first_error_and_skips_rest() {
        let visited = RefCell::new(Vec::new());
        let result = async_reduce(
            |_, _, _: &i32| true,
            |index| index + 1,
            0,
            |sum, element: &i32| {
                visited.borrow_mut().push(*element);
                let element = *element;
                async move {
                    if element == 2 {
                        Err(format!("bad element {element}"))
                    } else {
                        Ok(sum + element)
                    }
                }
            },
            0,
            &[1, 2, 3],
        )
        .await;
        assert_eq!(result, Err("bad element 2".to_owned()));
        assert_eq!(*visited.borrow(), vec![1, 2]);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn flow_is_strictly_sequential() {
        let active = RefCell::new(0usize);
        let peak = RefCell::new(0usize);
        let result = async_flow(
            |number: &u64| {
                let number = *number;
                let active = &active;
                let peak = &peak;
                async move {
                    *active.borrow_mut() += 1;
                    let now = *active.borrow();
                    peak.replace_with(|&mut old| old.max(now));
                    tokio::time::sleep(Duration::from_millis(50 - number * 10)).await;
                    *active.borrow_mut() -= 1;
                    Ok::<_, String>(number * 100)
                }
            },
            &[1, 2, 3],
        )
        .await;
        assert_eq!(result, Ok(vec![100, 200, 300]));
        assert_eq!(*peak.borrow(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn flow_of_empty_list_is_empty() {
        let empty: [u8; 0] = [];
        let result = async_flow(|byte: &u8| ready(*byte), &empty).await;
        assert_eq!(result, Ok(Vec::new()));
    }

    #[rstest]
    #[case(&[1, 2, 3, 4], &[4])]
    #[case(&[2, 4, 6], &[2, 4, 6])]
    #[case(&[2, 4, 5], &[])]
    #[case(&[], &[])]
    #[tokio::test]
    async fn take_while_right_keeps_even_suffix(#[case] list: &[i32], #[case] expected: &[i32]) {
        let result = async_take_while_right(|number: &i32| ready(number % 2 == 0), list).await;
        assert_eq!(result, Ok(expected.to_vec()));
    }

    #[rstest]
    #[tokio::test]
    async fn take_while_right_never_tests_left_of_failure() {
        let tested = RefCell::new(Vec::new());
        let result = async_take_while_right(
            |number: &i32| {
                tested.borrow_mut().push(*number);
                ready(*number > 2)
            },
            &[5, 1, 3, 4],
        )
        .await;
        assert_eq!(result, Ok(vec![3, 4]));
        assert_eq!(*tested.borrow(), vec![4, 3, 1]);
    }
}
