/// Tests for bounded-depth flattening through the public API.
use pretty_assertions::assert_eq;
use retrofit::{ExcType, Value, flatten, flatten_all, flatten_in_place};

fn list(items: Vec<Value>) -> Value {
    Value::List(items)
}

/// `[1, [2, [3, [4]]]]`
fn nested_sample() -> Vec<Value> {
    vec![
        Value::Int(1),
        list(vec![Value::Int(2), list(vec![Value::Int(3), list(vec![Value::Int(4)])])]),
    ]
}

#[test]
fn depth_one_expands_one_level() {
    let flat = flatten(&nested_sample(), 1).unwrap();
    assert_eq!(
        flat,
        vec![
            Value::Int(1),
            Value::Int(2),
            list(vec![Value::Int(3), list(vec![Value::Int(4)])])
        ]
    );
}

#[test]
fn unbounded_depth_expands_everything() {
    let expected: Vec<Value> = (1..=4).map(Value::Int).collect();
    assert_eq!(flatten(&nested_sample(), -1).unwrap(), expected);
    assert_eq!(flatten_all(&nested_sample()), expected);
}

#[test]
fn depth_zero_is_a_copy() {
    assert_eq!(flatten(&nested_sample(), 0).unwrap(), nested_sample());
}

/// Flattening preserves the left-to-right order of leaves.
#[test]
fn leaf_order_is_preserved() {
    let source = vec![
        list(vec![Value::from("a"), Value::from("b")]),
        Value::from("c"),
        list(vec![list(vec![Value::from("d")]), Value::from("e")]),
    ];
    let flat: Vec<String> = flatten_all(&source).iter().map(|v| v.as_str().unwrap().to_owned()).collect();
    assert_eq!(flat, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn in_place_reports_whether_anything_changed() {
    let mut flat = vec![Value::Int(1), Value::Int(2)];
    assert!(flatten_in_place(&mut flat, -1).unwrap().is_none());

    let mut nested = nested_sample();
    assert!(flatten_in_place(&mut nested, 0).unwrap().is_none());
    assert_eq!(nested, nested_sample());

    let changed = flatten_in_place(&mut nested, 2).unwrap().expect("receiver changed");
    assert_eq!(
        changed,
        &vec![Value::Int(1), Value::Int(2), Value::Int(3), list(vec![Value::Int(4)])]
    );
}

#[test]
fn non_integer_depth_is_rejected() {
    let err = flatten(&nested_sample(), &Value::from("deep")).unwrap_err();
    assert_eq!(err.exc_type(), ExcType::InvalidArgument);
}

#[test]
fn float_depth_truncates() {
    assert_eq!(flatten(&nested_sample(), &Value::Float(1.9)).unwrap(), flatten(&nested_sample(), 1).unwrap());
}
