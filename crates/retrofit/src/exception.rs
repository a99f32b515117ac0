use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Result type alias for operations that can fail.
pub type RunResult<T> = Result<T, Exception>;

/// Kinds of failure a primitive can report.
///
/// Uses strum derives for automatic `Display`, `FromStr`, and `Into<&'static str>` implementations.
/// The string representation matches the variant name exactly (e.g., `InvalidArgument` -> "InvalidArgument").
///
/// "No match" and "combination size out of range" are not represented here: both are
/// success outcomes with defined sentinel results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
pub enum ExcType {
    /// A parameter failed coercion or violated a documented range.
    InvalidArgument,
    /// Malformed UTF-8 input under the strict decode policy.
    UndefinedByteSequence,
    /// Eager materialization would exceed the configured item limit.
    LimitExceeded,
}

/// An error raised by one of the primitives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exception {
    exc_type: ExcType,
    arg: Option<String>,
}

impl Exception {
    /// Creates a new exception with the given type and optional argument message.
    #[must_use]
    pub fn new(exc_type: ExcType, arg: Option<String>) -> Self {
        Self { exc_type, arg }
    }

    /// Creates a new exception with the given type and argument message.
    #[must_use]
    pub fn new_msg(exc_type: ExcType, arg: impl fmt::Display) -> Self {
        Self::new(exc_type, Some(arg.to_string()))
    }

    /// Creates a new exception with no message.
    #[must_use]
    pub fn new_none(exc_type: ExcType) -> Self {
        Self::new(exc_type, None)
    }

    #[must_use]
    pub fn exc_type(&self) -> ExcType {
        self.exc_type
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.arg.as_deref()
    }

    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.arg
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg {
            Some(arg) => write!(f, "{}: {arg}", self.exc_type),
            None => write!(f, "{}", self.exc_type),
        }
    }
}

impl std::error::Error for Exception {}

impl ExcType {
    /// Creates a simple InvalidArgument with a custom message.
    #[must_use]
    pub(crate) fn invalid_argument(msg: impl fmt::Display) -> Exception {
        Exception::new_msg(Self::InvalidArgument, msg)
    }

    /// Creates an InvalidArgument for a value that has no conversion to the requested form.
    ///
    /// Format: `no implicit conversion of Str into Integer`
    #[must_use]
    pub(crate) fn no_implicit_conversion(from: impl fmt::Display, into: &str) -> Exception {
        Self::invalid_argument(format!("no implicit conversion of {from} into {into}"))
    }

    /// Creates an InvalidArgument for a negative count passed to a truncating operation.
    #[must_use]
    pub(crate) fn negative_size() -> Exception {
        Self::invalid_argument("negative array size")
    }

    /// Creates an InvalidArgument for an integer that does not fit the target width.
    #[must_use]
    pub(crate) fn integer_out_of_range(value: impl fmt::Display) -> Exception {
        Self::invalid_argument(format!("integer {value} out of range"))
    }

    /// Creates an UndefinedByteSequence describing where decoding stopped.
    #[must_use]
    pub(crate) fn undefined_byte_sequence(offset: usize, detail: impl fmt::Display) -> Exception {
        Exception::new_msg(Self::UndefinedByteSequence, format!("{detail} at byte offset {offset}"))
    }
}
