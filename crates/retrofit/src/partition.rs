//! Splitting text around the first or last match of a pattern.
//!
//! The two directions deliberately disagree on where unmatched text goes:
//! `partition_first` puts it in `before`, `partition_last` puts it in `after`.

use std::{borrow::Cow, ops::Range};

use serde::Serialize;

#[cfg(feature = "patterns")]
use regex_automata::{Anchored, Input, meta};

use crate::{exception::RunResult, value::Value};

/// What to search for: a literal substring or a compiled regular expression.
#[derive(Debug, Clone)]
pub enum Pattern<'p> {
    Literal(Cow<'p, str>),
    #[cfg(feature = "patterns")]
    Regex(meta::Regex),
}

impl<'p> From<&'p str> for Pattern<'p> {
    fn from(literal: &'p str) -> Self {
        Self::Literal(Cow::Borrowed(literal))
    }
}

impl From<String> for Pattern<'_> {
    fn from(literal: String) -> Self {
        Self::Literal(Cow::Owned(literal))
    }
}

impl<'p> From<&'p String> for Pattern<'p> {
    fn from(literal: &'p String) -> Self {
        Self::Literal(Cow::Borrowed(literal))
    }
}

#[cfg(feature = "patterns")]
impl From<meta::Regex> for Pattern<'_> {
    fn from(regex: meta::Regex) -> Self {
        Self::Regex(regex)
    }
}

impl<'p> TryFrom<&'p Value> for Pattern<'p> {
    type Error = crate::exception::Exception;

    /// Only string values are patterns; everything else fails the text coercion.
    fn try_from(value: &'p Value) -> RunResult<Self> {
        value.as_str().map(Pattern::from)
    }
}

impl Pattern<'_> {
    /// Compiles `source` as a regular expression, mapping syntax errors to `InvalidArgument`.
    #[cfg(feature = "patterns")]
    pub fn regex(source: &str) -> RunResult<Self> {
        meta::Regex::new(source)
            .map(Self::Regex)
            .map_err(|err| crate::exception::ExcType::invalid_argument(format!("invalid pattern: {err}")))
    }

    /// Byte range of the leftmost match.
    fn find_first(&self, text: &str) -> Option<Range<usize>> {
        match self {
            Self::Literal(literal) => text.find(&**literal).map(|start| start..start + literal.len()),
            #[cfg(feature = "patterns")]
            Self::Regex(regex) => regex.find(text).map(|m| m.range()),
        }
    }

    /// Byte range of the match with the greatest start position.
    ///
    /// For regexes every char boundary is tried from the end of `text` backwards with an
    /// anchored search, so a failed attempt stops as soon as the pattern cannot continue.
    /// Look-around assertions still see the whole text.
    fn find_last(&self, text: &str) -> Option<Range<usize>> {
        match self {
            Self::Literal(literal) => text.rfind(&**literal).map(|start| start..start + literal.len()),
            #[cfg(feature = "patterns")]
            Self::Regex(regex) => {
                if !regex.is_match(text) {
                    return None;
                }
                let starts = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));
                starts.rev().find_map(|start| {
                    let input = Input::new(text).range(start..).anchored(Anchored::Yes);
                    regex.search(&input).map(|m| m.range())
                })
            }
        }
    }
}

/// `(before, matched, after)` slices of the partitioned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Partition<'t> {
    pub before: &'t str,
    pub matched: &'t str,
    pub after: &'t str,
}

impl<'t> Partition<'t> {
    fn around(text: &'t str, range: Range<usize>) -> Self {
        Self {
            before: &text[..range.start],
            matched: &text[range.clone()],
            after: &text[range.end..],
        }
    }

    #[must_use]
    pub fn parts(&self) -> (&'t str, &'t str, &'t str) {
        (self.before, self.matched, self.after)
    }

    #[must_use]
    pub fn to_owned_parts(&self) -> (String, String, String) {
        (self.before.to_owned(), self.matched.to_owned(), self.after.to_owned())
    }
}

/// Splits `text` around the first match of `pattern`.
///
/// Without a match the whole text is the `before` part: `(text, "", "")`.
///
/// ```
/// let parts = retrofit::partition_first("hello world", "o").parts();
/// assert_eq!(parts, ("hell", "o", " world"));
/// ```
pub fn partition_first<'t, 'p>(text: &'t str, pattern: impl Into<Pattern<'p>>) -> Partition<'t> {
    match pattern.into().find_first(text) {
        Some(range) => Partition::around(text, range),
        None => Partition {
            before: text,
            matched: "",
            after: "",
        },
    }
}

/// Splits `text` around the last match of `pattern`.
///
/// Without a match the whole text is the `after` part: `("", "", text)`.
///
/// ```
/// let parts = retrofit::partition_last("hello world", "o").parts();
/// assert_eq!(parts, ("hello w", "o", "rld"));
/// ```
pub fn partition_last<'t, 'p>(text: &'t str, pattern: impl Into<Pattern<'p>>) -> Partition<'t> {
    match pattern.into().find_last(text) {
        Some(range) => Partition::around(text, range),
        None => Partition {
            before: "",
            matched: "",
            after: text,
        },
    }
}

/// Coercing form of [`partition_first`] for dynamic arguments.
pub fn partition_first_of<'t>(text: &'t Value, pattern: &Value) -> RunResult<Partition<'t>> {
    let text = text.as_str()?;
    Ok(partition_first(text, Pattern::try_from(pattern)?))
}

/// Coercing form of [`partition_last`] for dynamic arguments.
pub fn partition_last_of<'t>(text: &'t Value, pattern: &Value) -> RunResult<Partition<'t>> {
    let text = text.as_str()?;
    Ok(partition_last(text, Pattern::try_from(pattern)?))
}
