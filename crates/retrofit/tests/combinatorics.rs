/// Tests for k-combinations and cartesian products through the public API.
///
/// Covers the counting law C(n, k), ordering guarantees, the degenerate sizes that
/// still produce one result, and the eager `_of` forms with their item limits.
use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use retrofit::{ExcType, ResourceLimits, Value, combinations, combinations_of, each_combination, product, product_of};

fn binomial(n: usize, k: usize) -> usize {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

/// Every (n, k) pair with k <= n yields exactly C(n, k) distinct combinations.
#[test]
fn combination_counts_follow_binomial() {
    for n in 0..=8 {
        let source: Vec<usize> = (0..n).collect();
        for k in 0..=n {
            let combos: Vec<_> = combinations(&source, k).unwrap().collect();
            assert_eq!(combos.len(), binomial(n, k), "C({n}, {k})");
            let unique: BTreeSet<_> = combos.iter().collect();
            assert_eq!(unique.len(), combos.len(), "duplicates in C({n}, {k})");
        }
    }
}

/// Combinations come out in lexicographic order of source positions.
#[test]
fn combinations_are_lexicographic() {
    let combos: Vec<_> = combinations(&['a', 'b', 'c', 'd'], 2).unwrap().collect();
    assert_eq!(
        combos,
        vec![
            vec!['a', 'b'],
            vec!['a', 'c'],
            vec!['a', 'd'],
            vec!['b', 'c'],
            vec!['b', 'd'],
            vec!['c', 'd'],
        ]
    );
}

#[test]
fn zero_and_full_size_yield_one_combination() {
    let source = [1, 2, 3];
    assert_eq!(combinations(&source, 0).unwrap().collect::<Vec<_>>(), vec![Vec::<i32>::new()]);
    assert_eq!(combinations(&source, 3).unwrap().collect::<Vec<_>>(), vec![vec![1, 2, 3]]);
}

#[test]
fn out_of_range_size_is_empty_not_an_error() {
    assert_eq!(combinations(&[1, 2, 3], 4).unwrap().count(), 0);
    assert_eq!(combinations(&[1, 2, 3], -1).unwrap().count(), 0);
}

/// A cloned handle restarts from the beginning regardless of the original's progress.
#[test]
fn cloned_handle_restarts() {
    let source = [1, 2, 3];
    let fresh = combinations(&source, 2).unwrap();
    let mut consumed = fresh.clone();
    consumed.next();
    assert_eq!(consumed.count(), 2);
    assert_eq!(fresh.count(), 3);
}

#[test]
fn each_combination_returns_receiver() {
    let source = vec![1, 2, 3];
    let mut seen = Vec::new();
    let returned = each_combination(&source, 2, |combo| seen.push(combo)).unwrap();
    assert_eq!(returned, &source[..]);
    assert_eq!(seen, vec![vec![1, 2], vec![1, 3], vec![2, 3]]);
}

#[test]
fn product_orders_last_pool_fastest() {
    let tuples: Vec<_> = product([&[1, 2][..], &[3, 4][..]]).collect();
    assert_eq!(tuples, vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]]);
}

#[test]
fn product_with_an_empty_pool_is_empty() {
    assert_eq!(product([&[1, 2][..], &[][..]]).count(), 0);
    assert_eq!(product([&[1, 2][..], &[][..]]).total(), Some(0));
}

#[test]
fn product_size_is_the_product_of_lengths() {
    let pools: [&[u8]; 3] = [&[1, 2], &[3, 4, 5], &[6, 7, 8, 9]];
    let tuples = product(pools);
    assert_eq!(tuples.total(), Some(24));
    assert_eq!(tuples.count(), 24);
}

#[test]
fn product_of_a_single_pool_wraps_each_element() {
    let tuples: Vec<_> = product([&["x", "y"][..]]).collect();
    assert_eq!(tuples, vec![vec!["x"], vec!["y"]]);
}

#[test]
fn eager_forms_take_values() {
    let source = Value::from(vec![1, 2, 3]);
    let combos = combinations_of(&source, &Value::Int(2), &ResourceLimits::new()).unwrap();
    assert_eq!(combos.len(), 3);
    assert_eq!(combos[0], Value::from(vec![1, 2]));

    let tuples = product_of(&[Value::from(vec![1, 2]), Value::from(vec![3, 4])], &ResourceLimits::new()).unwrap();
    assert_eq!(Value::List(tuples), Value::from(vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]]));
}

#[test]
fn eager_forms_respect_item_limit() {
    let limits = ResourceLimits::new().max_items(5);
    let source = Value::from(vec![1, 2, 3, 4]);
    let err = combinations_of(&source, &Value::Int(2), &limits).unwrap_err();
    assert_eq!(err.exc_type(), ExcType::LimitExceeded);

    let within = combinations_of(&source, &Value::Int(3), &limits).unwrap();
    assert_eq!(within.len(), 4);
}

#[test]
fn eager_forms_reject_non_list_receivers() {
    let err = combinations_of(&Value::Int(3), &Value::Int(1), &ResourceLimits::new()).unwrap_err();
    assert_eq!(err.exc_type(), ExcType::InvalidArgument);

    let err = combinations_of(&Value::from(vec![1]), &Value::from("two"), &ResourceLimits::new()).unwrap_err();
    assert_eq!(err.exc_type(), ExcType::InvalidArgument);
}

/// An empty pool empties the product even when the other pools alone would overflow.
#[test]
fn empty_pool_beats_overflow_under_a_limit() {
    let wide = Value::from((0..10_000).collect::<Vec<i32>>());
    let mut sequences = vec![wide; 5];
    sequences.push(Value::List(Vec::new()));
    let tuples = product_of(&sequences, &ResourceLimits::new().max_items(1000)).unwrap();
    assert!(tuples.is_empty());
}

#[test]
fn collected_lengths_match_size_hints() {
    let source: Vec<u32> = (0..9).collect();
    let combos = combinations(&source, 4).unwrap();
    assert_eq!(combos.size_hint(), (126, Some(126)));
    assert_eq!(combos.count(), 126);
}
