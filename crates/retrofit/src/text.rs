//! Small string queries with fixed semantics.

use crate::{
    args::{ToInt, ToText},
    exception::RunResult,
};

/// Whether every byte of `text` is 7-bit ASCII.
#[must_use]
pub fn ascii_only(text: &str) -> bool {
    text.is_ascii()
}

/// Whether `text` starts with any of `prefixes`. Candidates without a text form are skipped.
pub fn starts_with_any<I>(text: &str, prefixes: I) -> bool
where
    I: IntoIterator,
    I::Item: ToText,
{
    prefixes
        .into_iter()
        .any(|prefix| prefix.try_text().is_some_and(|prefix| text.starts_with(prefix)))
}

/// Whether `text` ends with any of `suffixes`. Candidates without a text form are skipped.
pub fn ends_with_any<I>(text: &str, suffixes: I) -> bool
where
    I: IntoIterator,
    I::Item: ToText,
{
    suffixes
        .into_iter()
        .any(|suffix| suffix.try_text().is_some_and(|suffix| text.ends_with(suffix)))
}

/// The first character of `text` as a string slice.
#[must_use]
pub fn first_char(text: &str) -> Option<&str> {
    text.chars().next().map(|c| &text[..c.len_utf8()])
}

/// The characters of `text`, each as a string slice.
pub fn chars(text: &str) -> impl DoubleEndedIterator<Item = &str> {
    text.char_indices().map(move |(i, c)| &text[i..i + c.len_utf8()])
}

/// Calls `f` for every character of `text` and hands `text` back.
pub fn each_char(text: &str, f: impl FnMut(&str)) -> &str {
    chars(text).for_each(f);
    text
}

/// Empties `text` in place, keeping its allocation.
pub fn clear(text: &mut String) -> &mut String {
    text.clear();
    text
}

/// Length of `text` in bytes.
#[must_use]
pub fn byte_size(text: &str) -> usize {
    text.len()
}

/// Byte at `index`; negative indices count from the end.
pub fn getbyte(text: &str, index: impl ToInt) -> RunResult<Option<u8>> {
    let index = index.to_int()?;
    let bytes = text.as_bytes();
    let resolved = if index < 0 {
        usize::try_from(index.unsigned_abs())
            .ok()
            .and_then(|back| bytes.len().checked_sub(back))
    } else {
        usize::try_from(index).ok()
    };
    Ok(resolved.and_then(|i| bytes.get(i).copied()))
}
