//! Dynamic values for callers whose inputs are not statically typed.
//!
//! Nested lists for flattening, heterogeneous argument lists for cartesian products and
//! untyped command-line input all arrive as [`Value`]s. The `as_*` accessors are the
//! value-level half of the coercion gate: each either returns the canonical form or fails
//! with `InvalidArgument`, never probing further.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use crate::exception::{ExcType, RunResult};

/// Type tag of a [`Value`], used in coercion error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize, Deserialize)]
pub enum Type {
    NoneType,
    Bool,
    Int,
    Float,
    Str,
    Bytes,
    List,
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
}

impl Value {
    #[must_use]
    pub fn value_type(&self) -> Type {
        match self {
            Self::None => Type::NoneType,
            Self::Bool(_) => Type::Bool,
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::Str(_) => Type::Str,
            Self::Bytes(_) => Type::Bytes,
            Self::List(_) => Type::List,
        }
    }

    /// Converts this value to an integer.
    ///
    /// Floats truncate toward zero; non-finite floats and floats outside the `i64`
    /// range fail. Booleans and strings have no integer conversion.
    pub fn as_int(&self) -> RunResult<i64> {
        match self {
            Self::Int(i) => Ok(*i),
            Self::Float(f) => float_to_int(*f),
            other => Err(ExcType::no_implicit_conversion(other.value_type(), "Integer")),
        }
    }

    /// Borrows the text of a `Str` value.
    pub fn as_str(&self) -> RunResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            other => Err(ExcType::no_implicit_conversion(other.value_type(), "String")),
        }
    }

    /// Borrows the bytes of a `Bytes` or `Str` value.
    pub fn as_bytes(&self) -> RunResult<&[u8]> {
        match self {
            Self::Bytes(b) => Ok(b),
            Self::Str(s) => Ok(s.as_bytes()),
            other => Err(ExcType::no_implicit_conversion(other.value_type(), "Bytes")),
        }
    }

    /// Borrows the elements of a `List` value.
    pub fn as_list(&self) -> RunResult<&[Value]> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(ExcType::no_implicit_conversion(other.value_type(), "Array")),
        }
    }

    /// Non-failing probe for a list: the elements, or `None` for any other type.
    #[must_use]
    pub fn try_list(&self) -> Option<&[Value]> {
        self.as_list().ok()
    }

    /// Non-failing probe for text: the string, or `None` for any other type.
    #[must_use]
    pub fn try_str(&self) -> Option<&str> {
        self.as_str().ok()
    }
}

#[expect(clippy::cast_possible_truncation, reason = "range is checked before the cast")]
fn float_to_int(f: f64) -> RunResult<i64> {
    // i64::MAX is not representable as f64; 2^63 is the first value out of range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !f.is_finite() {
        return Err(ExcType::invalid_argument(format!("{f} cannot be converted to an integer")));
    }
    let truncated = f.trunc();
    if truncated >= LIMIT || truncated < -LIMIT {
        return Err(ExcType::integer_out_of_range(f));
    }
    Ok(truncated as i64)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bytes(bytes) => {
                f.write_str("b\"")?;
                for byte in bytes {
                    write!(f, "{}", std::ascii::escape_default(*byte))?;
                }
                f.write_str("\"")
            }
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    /// JSON objects have no counterpart and become `None`; numbers that fit `i64`
    /// stay integers, everything else numeric becomes a float.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null | serde_json::Value::Object(_) => Self::None,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => n.as_f64().map_or(Self::None, Self::Float),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::None => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Int(i) => Self::from(i),
            Value::Float(f) => serde_json::Number::from_f64(f).map_or(Self::Null, Self::Number),
            Value::Str(s) => Self::String(s),
            Value::Bytes(bytes) => Self::Array(bytes.into_iter().map(Self::from).collect()),
            Value::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
        }
    }
}
