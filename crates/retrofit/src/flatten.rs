//! Bounded-depth flattening of nested sequences.
//!
//! Traversal is depth-first over an explicit work stack of `(iterator, remaining depth)`
//! frames, so arbitrarily deep inputs never grow the call stack. Once a frame's budget is
//! spent, nested elements below it are copied verbatim.

use tracing::trace;

use crate::{
    args::{ToInt, to_depth},
    exception::RunResult,
    value::Value,
};

/// Element types that may hold a nested sequence of themselves.
///
/// Elements returning `None` are leaves and are always copied as-is.
pub trait Nested: Sized {
    fn as_nested(&self) -> Option<&[Self]>;
}

impl Nested for Value {
    fn as_nested(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Nested for serde_json::Value {
    fn as_nested(&self) -> Option<&[Self]> {
        self.as_array().map(Vec::as_slice)
    }
}

/// Returns a copy of `source` with nested sequences expanded up to `depth` levels.
///
/// A negative `depth` means no limit.
///
/// ```
/// use retrofit::{Value, flatten};
///
/// let nested = Value::from(vec![Value::Int(1), Value::from(vec![Value::Int(2), Value::from(vec![3])])]);
/// let flat = flatten(nested.as_list().unwrap(), 1).unwrap();
/// assert_eq!(flat, vec![Value::Int(1), Value::Int(2), Value::from(vec![3])]);
/// ```
pub fn flatten<T: Nested + Clone>(source: &[T], depth: impl ToInt) -> RunResult<Vec<T>> {
    let depth = to_depth(depth)?;
    Ok(flatten_into(source, depth).0)
}

/// Returns a copy of `source` with every level of nesting expanded.
pub fn flatten_all<T: Nested + Clone>(source: &[T]) -> Vec<T> {
    flatten_into(source, usize::MAX).0
}

/// Flattens `source` in place.
///
/// Returns `None` when nothing was expanded (no nested elements, or `depth == 0`), so
/// callers can branch on whether the receiver changed.
pub fn flatten_in_place<T: Nested + Clone>(source: &mut Vec<T>, depth: impl ToInt) -> RunResult<Option<&mut Vec<T>>> {
    let depth = to_depth(depth)?;
    let (flat, changed) = flatten_into(source, depth);
    if !changed {
        trace!(depth, len = source.len(), "flatten left receiver unchanged");
        return Ok(None);
    }
    *source = flat;
    Ok(Some(source))
}

/// Shared traversal. The flag reports whether any nested element was expanded.
fn flatten_into<T: Nested + Clone>(source: &[T], depth: usize) -> (Vec<T>, bool) {
    let mut out = Vec::with_capacity(source.len());
    let mut changed = false;
    let mut stack = vec![(source.iter(), depth)];

    while let Some((iter, remaining)) = stack.last_mut() {
        let remaining = *remaining;
        let Some(item) = iter.next() else {
            stack.pop();
            continue;
        };
        match item.as_nested() {
            Some(inner) if remaining > 0 => {
                changed = true;
                stack.push((inner.iter(), remaining - 1));
            }
            _ => out.push(item.clone()),
        }
    }

    (out, changed)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn json_list(value: serde_json::Value) -> Vec<serde_json::Value> {
        match value {
            serde_json::Value::Array(items) => items,
            other => vec![other],
        }
    }

    #[test]
    fn depth_one_expands_a_single_level() {
        let source = json_list(json!([1, [2, [3, [4]]]]));
        assert_eq!(flatten(&source, 1).unwrap(), json_list(json!([1, 2, [3, [4]]])));
    }

    #[test]
    fn negative_depth_expands_everything() {
        let source = json_list(json!([1, [2, [3, [4]]]]));
        assert_eq!(flatten(&source, -1).unwrap(), json_list(json!([1, 2, 3, 4])));
        assert_eq!(flatten_all(&source), json_list(json!([1, 2, 3, 4])));
    }

    #[test]
    fn empty_nested_sequences_disappear() {
        let source = json_list(json!([[], [[]], 1]));
        assert_eq!(flatten_all(&source), json_list(json!([1])));
        assert_eq!(flatten(&source, 1).unwrap(), json_list(json!([[], 1])));
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        let mut value = json!(0);
        for _ in 0..100_000 {
            value = json!([value]);
        }
        let source = vec![value];
        assert_eq!(flatten_all(&source), vec![json!(0)]);
        // dropping a 100k-deep serde_json value recurses, so leak it
        std::mem::forget(source);
    }

    #[test]
    fn in_place_reports_no_change() {
        let mut flat = json_list(json!([1, 2]));
        assert!(flatten_in_place(&mut flat, -1).unwrap().is_none());

        let mut nested = json_list(json!([1, [2]]));
        assert!(flatten_in_place(&mut nested, 0).unwrap().is_none());
        assert_eq!(nested, json_list(json!([1, [2]])));

        let changed = flatten_in_place(&mut nested, 1).unwrap().expect("nested input changes");
        assert_eq!(*changed, json_list(json!([1, 2])));
    }
}
