//! Smaller sequence helpers: repetition, bulk removal from either end, predicate search.

use std::iter::FusedIterator;

use crate::{
    args::{ToInt, to_count},
    exception::RunResult,
};

/// Repeats `source` forever. An empty source yields nothing.
#[must_use]
pub fn cycle<T>(source: &[T]) -> Cycle<'_, T> {
    Cycle {
        source,
        remaining: None,
        pos: 0,
    }
}

/// Repeats `source` `times` times. Zero or negative counts yield nothing.
pub fn cycle_n<T>(source: &[T], times: impl ToInt) -> RunResult<Cycle<'_, T>> {
    let times = usize::try_from(times.to_int()?).unwrap_or(0);
    Ok(Cycle {
        source,
        remaining: Some(times),
        pos: 0,
    })
}

/// Lazy repetition of a borrowed sequence.
#[derive(Debug, Clone)]
pub struct Cycle<'a, T> {
    source: &'a [T],
    /// Full passes left to start, `None` for unbounded.
    remaining: Option<usize>,
    pos: usize,
}

impl<'a, T> Iterator for Cycle<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.source.is_empty() {
            return None;
        }
        if self.pos == 0 {
            match &mut self.remaining {
                Some(0) => return None,
                Some(passes) => *passes -= 1,
                None => {}
            }
        }
        let item = &self.source[self.pos];
        self.pos = (self.pos + 1) % self.source.len();
        Some(item)
    }
}

impl<T> FusedIterator for Cycle<'_, T> {}

/// Removes and returns the last `n` elements, in their original order.
///
/// `n` is clamped to the length; a negative `n` fails with `InvalidArgument`.
pub fn pop_n<T>(source: &mut Vec<T>, n: impl ToInt) -> RunResult<Vec<T>> {
    let n = to_count(n)?;
    let first = source.len().saturating_sub(n);
    Ok(source.split_off(first))
}

/// Removes and returns the first `n` elements.
///
/// `n` is clamped to the length; a negative `n` fails with `InvalidArgument`.
pub fn shift_n<T>(source: &mut Vec<T>, n: impl ToInt) -> RunResult<Vec<T>> {
    let n = to_count(n)?.min(source.len());
    Ok(source.drain(..n).collect())
}

/// Index of the first element satisfying `pred`.
pub fn find_index<T>(source: &[T], pred: impl FnMut(&T) -> bool) -> Option<usize> {
    source.iter().position(pred)
}

/// Index of the last element satisfying `pred`.
pub fn rfind_index<T>(source: &[T], pred: impl FnMut(&T) -> bool) -> Option<usize> {
    source.iter().rposition(pred)
}
