//! Shuffling and sampling without replacement.
//!
//! Everything here is one partial Fisher–Yates pass: for `i` in `0..n`, draw `r` uniformly
//! from `[i, len)` and swap positions `i` and `r`. Running it for every position shuffles;
//! running it for the first `n` positions leaves a uniform `n`-element sample at the front.
//!
//! The plain functions draw from the thread-local generator; the `_with_rng` forms take any
//! [`rand::Rng`] so callers can seed for reproducible output.

use rand::Rng;
use tracing::debug;

use crate::{
    args::{ToInt, to_count},
    exception::RunResult,
};

/// Runs the first `n` steps of a Fisher–Yates shuffle over `items`.
fn partial_shuffle<T, R: Rng + ?Sized>(items: &mut [T], n: usize, rng: &mut R) {
    let len = items.len();
    for i in 0..n.min(len) {
        let r = rng.gen_range(i..len);
        items.swap(i, r);
    }
}

/// Shuffles `source` in place and returns it.
pub fn shuffle_in_place<T>(source: &mut [T]) -> &mut [T] {
    shuffle_in_place_with_rng(source, &mut rand::thread_rng())
}

pub fn shuffle_in_place_with_rng<'a, T, R: Rng + ?Sized>(source: &'a mut [T], rng: &mut R) -> &'a mut [T] {
    let len = source.len();
    partial_shuffle(source, len, rng);
    source
}

/// Returns a shuffled copy of `source`.
#[must_use]
pub fn shuffle<T: Clone>(source: &[T]) -> Vec<T> {
    shuffle_with_rng(source, &mut rand::thread_rng())
}

pub fn shuffle_with_rng<T: Clone, R: Rng + ?Sized>(source: &[T], rng: &mut R) -> Vec<T> {
    let mut result = source.to_vec();
    shuffle_in_place_with_rng(&mut result, rng);
    result
}

/// Returns `n` elements of `source` drawn without replacement, in random order.
///
/// `n` larger than the source is clamped, so the result is then a full shuffle.
/// A negative `n` fails with `InvalidArgument`.
pub fn sample<T: Clone>(source: &[T], n: impl ToInt) -> RunResult<Vec<T>> {
    sample_with_rng(source, n, &mut rand::thread_rng())
}

pub fn sample_with_rng<T: Clone, R: Rng + ?Sized>(source: &[T], n: impl ToInt, rng: &mut R) -> RunResult<Vec<T>> {
    let mut n = to_count(n)?;
    if n > source.len() {
        debug!(requested = n, len = source.len(), "sample size clamped to source length");
        n = source.len();
    }
    let mut result = source.to_vec();
    partial_shuffle(&mut result, n, rng);
    result.truncate(n);
    Ok(result)
}

/// Returns one uniformly chosen element, or `None` for an empty source.
#[must_use]
pub fn sample_one<T>(source: &[T]) -> Option<&T> {
    sample_one_with_rng(source, &mut rand::thread_rng())
}

pub fn sample_one_with_rng<'a, T, R: Rng + ?Sized>(source: &'a [T], rng: &mut R) -> Option<&'a T> {
    if source.is_empty() {
        return None;
    }
    source.get(rng.gen_range(0..source.len()))
}
