//! k-combinations and cartesian products.
//!
//! Both engines are pull-based iterators over an explicit index vector, so a consumer
//! that stops early pays only for what it pulled and the state never grows past one
//! index per pick (combinations) or per input sequence (products).
//!
//! | Iterator | Output size | Space |
//! |----------|-------------|-------|
//! | `Combinations(n, k)` | C(n,k) | O(k) indices |
//! | `Product` (m pools) | ∏ len(pool) | O(m) indices + pool slices |

use std::iter::FusedIterator;

use smallvec::SmallVec;
use tracing::trace;

use crate::{
    args::ToInt,
    exception::RunResult,
    resource::ResourceLimits,
    value::Value,
};

/// Stack-allocated index threshold. For up to 8 picks or pools, indices live on the stack.
const INLINE_CAPACITY: usize = 8;

type IndexVec = SmallVec<[usize; INLINE_CAPACITY]>;

// =============================================================================
// Combinations
// =============================================================================

/// Returns a lazy sequence of the `num`-element combinations of `source`.
///
/// Combinations are produced in lexicographic order of their source indices, each one
/// keeping the elements in their original order. A `num` outside `0..=source.len()` is
/// not an error: the sequence is simply empty.
///
/// ```
/// let combos: Vec<_> = retrofit::combinations(&[1, 2, 3], 2).unwrap().collect();
/// assert_eq!(combos, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
/// ```
pub fn combinations<T>(source: &[T], num: impl ToInt) -> RunResult<Combinations<'_, T>> {
    let num = num.to_int()?;
    Ok(Combinations::new(source, num))
}

/// Calls `f` once per combination and hands `source` back unchanged.
pub fn each_combination<T: Clone>(source: &[T], num: impl ToInt, mut f: impl FnMut(Vec<T>)) -> RunResult<&[T]> {
    for combo in combinations(source, num)? {
        f(combo);
    }
    Ok(source)
}

/// Eagerly builds the combinations of a list value as a vector of list values.
///
/// `source` must be a list and `num` must coerce to an integer.
pub fn combinations_of(source: &Value, num: &Value, limits: &ResourceLimits) -> RunResult<Vec<Value>> {
    let pool = source.as_list()?;
    let combos = combinations(pool, num)?;
    limits.check_items(combos.total())?;
    Ok(combos.map(Value::List).collect())
}

/// Successive k-combinations of a borrowed sequence.
///
/// Holds `picks`, a strictly increasing vector of source indices. Position `p` of
/// `picks` never exceeds `len - k + p`. Each step emits the picked values, then bumps
/// the rightmost pick still below its bound and packs every later pick directly after it.
///
/// Cloning a fresh handle before consuming it gives a restartable sequence.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    source: &'a [T],
    picks: IndexVec,
    in_range: bool,
    emitted: usize,
    done: bool,
}

impl<'a, T> Combinations<'a, T> {
    fn new(source: &'a [T], num: i64) -> Self {
        let size = source.len();
        match usize::try_from(num) {
            Ok(num) if num <= size => Self {
                source,
                picks: (0..num).collect(),
                in_range: true,
                emitted: 0,
                done: false,
            },
            _ => {
                trace!(num, size, "combination size out of range, sequence is empty");
                Self {
                    source,
                    picks: IndexVec::new(),
                    in_range: false,
                    emitted: 0,
                    done: true,
                }
            }
        }
    }

    /// Total number of combinations this handle enumerates from the start, or `None` on overflow.
    #[must_use]
    pub fn total(&self) -> Option<usize> {
        if !self.in_range {
            return Some(0);
        }
        checked_binomial(self.source.len(), self.picks.len())
    }

    /// Largest index position `p` may hold.
    #[inline]
    fn max_pick(&self, position: usize) -> usize {
        self.source.len() - self.picks.len() + position
    }

    /// Moves to the next index tuple. Returns false once every pick sits at its bound.
    fn advance(&mut self) -> bool {
        let Some(pos) = (0..self.picks.len())
            .rev()
            .find(|&pos| self.picks[pos] < self.max_pick(pos))
        else {
            return false;
        };
        let first = self.picks[pos] + 1;
        for (offset, pick) in self.picks[pos..].iter_mut().enumerate() {
            *pick = first + offset;
        }
        true
    }
}

impl<T: Clone> Iterator for Combinations<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        let combo = self.picks.iter().map(|&i| self.source[i].clone()).collect();
        self.emitted += 1;
        if !self.advance() {
            self.done = true;
        }
        Some(combo)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.done, self.total(), self.emitted)
    }
}

impl<T: Clone> FusedIterator for Combinations<'_, T> {}

/// Exact remaining length, or a lower bound when the total overflows `usize`.
fn remaining_hint(done: bool, total: Option<usize>, emitted: usize) -> (usize, Option<usize>) {
    if done {
        return (0, Some(0));
    }
    match total {
        Some(total) => {
            let remaining = total - emitted;
            (remaining, Some(remaining))
        }
        None => (usize::MAX - emitted, None),
    }
}

/// `C(n, k)` with overflow detection.
///
/// Each intermediate value `C(n, i) * (n - i)` is exactly divisible by `i + 1`, so the
/// running product stays integral.
pub(crate) fn checked_binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: usize = 1;
    for i in 0..k {
        result = result.checked_mul(n - i)? / (i + 1);
    }
    Some(result)
}

// =============================================================================
// Product
// =============================================================================

/// Returns the lazy cartesian product of `pools`.
///
/// Tuples take one element from each pool, in pool order, with the last pool varying
/// fastest. Any empty pool makes the product empty; no pools at all give one empty tuple.
///
/// ```
/// let pairs: Vec<_> = retrofit::product([&[1, 2][..], &[3, 4][..]]).collect();
/// assert_eq!(pairs, vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]]);
/// ```
pub fn product<'a, T, I>(pools: I) -> Product<'a, T>
where
    I: IntoIterator<Item = &'a [T]>,
    T: 'a,
{
    Product::new(pools.into_iter().collect())
}

/// Eagerly builds the cartesian product of list values.
///
/// Every element of `sequences` must be a list; the first one plays the receiver.
pub fn product_of(sequences: &[Value], limits: &ResourceLimits) -> RunResult<Vec<Value>> {
    let pools = sequences.iter().map(Value::as_list).collect::<RunResult<Vec<_>>>()?;
    let tuples = product(pools);
    limits.check_items(tuples.total())?;
    Ok(tuples.map(Value::List).collect())
}

/// Cartesian product of borrowed pools.
///
/// Odometer-style: the rightmost index increments first and cascades left on overflow.
#[derive(Debug, Clone)]
pub struct Product<'a, T> {
    pools: SmallVec<[&'a [T]; INLINE_CAPACITY]>,
    indices: IndexVec,
    emitted: usize,
    done: bool,
}

impl<'a, T> Product<'a, T> {
    fn new(pools: SmallVec<[&'a [T]; INLINE_CAPACITY]>) -> Self {
        let done = pools.iter().any(|pool| pool.is_empty());
        let indices = SmallVec::from_elem(0, pools.len());
        Self {
            pools,
            indices,
            emitted: 0,
            done,
        }
    }

    /// Total number of tuples in the product, or `None` on overflow.
    ///
    /// An empty pool makes the total zero however large the other pools are.
    #[must_use]
    pub fn total(&self) -> Option<usize> {
        if self.pools.iter().any(|pool| pool.is_empty()) {
            return Some(0);
        }
        self.pools.iter().try_fold(1usize, |acc, pool| acc.checked_mul(pool.len()))
    }

    fn advance(&mut self) -> bool {
        for i in (0..self.indices.len()).rev() {
            self.indices[i] += 1;
            if self.indices[i] < self.pools[i].len() {
                return true;
            }
            self.indices[i] = 0;
        }
        false
    }
}

impl<T: Clone> Iterator for Product<'_, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }
        let tuple = self
            .indices
            .iter()
            .zip(&self.pools)
            .map(|(&idx, pool)| pool[idx].clone())
            .collect();
        self.emitted += 1;
        if !self.advance() {
            self.done = true;
        }
        Some(tuple)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        remaining_hint(self.done, self.total(), self.emitted)
    }
}

impl<T: Clone> FusedIterator for Product<'_, T> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn picks_stay_strictly_increasing() {
        let source: Vec<usize> = (0..7).collect();
        for combo in combinations(&source, 3).unwrap() {
            assert!(combo.windows(2).all(|w| w[0] < w[1]), "{combo:?}");
        }
    }

    #[test]
    fn full_size_yields_source_once() {
        let combos: Vec<_> = combinations(&['a', 'b', 'c'], 3).unwrap().collect();
        assert_eq!(combos, vec![vec!['a', 'b', 'c']]);
    }

    #[test]
    fn empty_source_size_zero_yields_one_empty_combination() {
        let combos: Vec<Vec<u8>> = combinations(&[], 0).unwrap().collect();
        assert_eq!(combos, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn out_of_range_sizes_are_empty() {
        assert_eq!(combinations(&[1, 2], 3).unwrap().count(), 0);
        assert_eq!(combinations(&[1, 2], -1).unwrap().count(), 0);
        assert_eq!(combinations(&[1, 2], 3).unwrap().total(), Some(0));
    }

    #[test]
    fn binomial_matches_known_values() {
        assert_eq!(checked_binomial(7, 3), Some(35));
        assert_eq!(checked_binomial(0, 0), Some(1));
        assert_eq!(checked_binomial(3, 5), Some(0));
        assert_eq!(checked_binomial(usize::MAX, 2), None);
    }

    #[test]
    fn product_total_and_cascade() {
        let a = [0, 1];
        let b = [0, 1, 2];
        let product = product([&a[..], &b[..]]);
        assert_eq!(product.total(), Some(6));
        let tuples: Vec<_> = product.collect();
        assert_eq!(tuples.len(), 6);
        assert_eq!(tuples[2], vec![0, 2]);
        assert_eq!(tuples[3], vec![1, 0]);
    }

    #[test]
    fn size_hints_count_down_exactly() {
        let source = [1, 2, 3, 4];
        let mut combos = combinations(&source, 2).unwrap();
        assert_eq!(combos.size_hint(), (6, Some(6)));
        combos.next();
        combos.next();
        assert_eq!(combos.size_hint(), (4, Some(4)));
        assert_eq!(combos.by_ref().count(), 4);
        assert_eq!(combos.size_hint(), (0, Some(0)));

        let mut tuples = product([&[1, 2][..], &[3, 4, 5][..]]);
        tuples.next();
        assert_eq!(tuples.size_hint(), (5, Some(5)));
    }

    #[test]
    fn overflowing_size_hint_has_no_upper_bound() {
        let pool = [0u8; 1 << 16];
        let pools = [&pool[..]; 5];
        let tuples = product(pools);
        assert_eq!(tuples.total(), None);
        assert_eq!(tuples.size_hint(), (usize::MAX, None));
    }

    #[test]
    fn empty_pool_zeroes_an_overflowing_total() {
        let pool = [0u8; 1 << 16];
        let tuples = product([&pool[..], &pool[..], &pool[..], &pool[..], &pool[..], &[][..]]);
        assert_eq!(tuples.total(), Some(0));
        assert_eq!(tuples.size_hint(), (0, Some(0)));
    }

    #[test]
    fn product_of_no_pools_is_one_empty_tuple() {
        let tuples: Vec<Vec<i32>> = product(std::iter::empty::<&[i32]>()).collect();
        assert_eq!(tuples, vec![Vec::<i32>::new()]);
    }
}
