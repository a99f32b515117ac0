//! Argument coercion.
//!
//! Every integer- or text-typed parameter of the primitives goes through one of the
//! capability traits here. A type either implements the capability or the call fails
//! with `InvalidArgument` before any algorithm runs.

use crate::{
    exception::{ExcType, RunResult},
    value::Value,
};

/// Types that can be converted to a canonical integer.
pub trait ToInt {
    fn to_int(&self) -> RunResult<i64>;
}

/// Types that may expose a text view.
pub trait ToText {
    /// Returns the text, or `None` if this value has no text form.
    fn try_text(&self) -> Option<&str>;

    /// Returns the text, failing with `InvalidArgument` if there is none.
    fn to_text(&self) -> RunResult<&str>;
}

macro_rules! to_int_lossless {
    ($($ty:ty),*) => {
        $(
            impl ToInt for $ty {
                fn to_int(&self) -> RunResult<i64> {
                    Ok(i64::from(*self))
                }
            }
        )*
    };
}

macro_rules! to_int_checked {
    ($($ty:ty),*) => {
        $(
            impl ToInt for $ty {
                fn to_int(&self) -> RunResult<i64> {
                    i64::try_from(*self).map_err(|_| ExcType::integer_out_of_range(self))
                }
            }
        )*
    };
}

to_int_lossless!(i8, i16, i32, i64, u8, u16, u32);
to_int_checked!(u64, usize, isize, i128, u128);

impl ToInt for Value {
    fn to_int(&self) -> RunResult<i64> {
        self.as_int()
    }
}

impl<T: ToInt + ?Sized> ToInt for &T {
    fn to_int(&self) -> RunResult<i64> {
        (**self).to_int()
    }
}

impl ToText for str {
    fn try_text(&self) -> Option<&str> {
        Some(self)
    }

    fn to_text(&self) -> RunResult<&str> {
        Ok(self)
    }
}

impl ToText for String {
    fn try_text(&self) -> Option<&str> {
        Some(self)
    }

    fn to_text(&self) -> RunResult<&str> {
        Ok(self)
    }
}

impl ToText for Value {
    fn try_text(&self) -> Option<&str> {
        self.as_str().ok()
    }

    fn to_text(&self) -> RunResult<&str> {
        self.as_str()
    }
}

impl<T: ToText + ?Sized> ToText for &T {
    fn try_text(&self) -> Option<&str> {
        (**self).try_text()
    }

    fn to_text(&self) -> RunResult<&str> {
        (**self).to_text()
    }
}

/// Coerces a count argument, rejecting negative values.
pub(crate) fn to_count(n: impl ToInt) -> RunResult<usize> {
    let n = n.to_int()?;
    if n < 0 {
        return Err(ExcType::negative_size());
    }
    usize::try_from(n).map_err(|_| ExcType::integer_out_of_range(n))
}

/// Coerces a depth argument; any negative value means "no limit".
pub(crate) fn to_depth(depth: impl ToInt) -> RunResult<usize> {
    let depth = depth.to_int()?;
    Ok(usize::try_from(depth).unwrap_or(usize::MAX))
}
