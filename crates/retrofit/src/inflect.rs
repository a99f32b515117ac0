//! Case-style rewrites for identifiers and module paths.
//!
//! Each rewrite is a fixed pipeline of regular-expression substitutions with no other
//! decision logic. `::` separates path segments, `/` is its file-path spelling.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static PATH_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| compile(r"/(.?)"));
static WORD_START: LazyLock<Regex> = LazyLock::new(|| compile(r"(?:^|_)(.)"));
static ACRONYM_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| compile(r"([A-Z]+)([A-Z][a-z])"));
static WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| compile(r"([a-z\d])([A-Z])"));
static MODULE_PREFIX: LazyLock<Regex> = LazyLock::new(|| compile(r"(?m)^.*::"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("inflection patterns are valid")
}

/// Case of the first letter produced by [`camelize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FirstLetter {
    #[default]
    Upper,
    Lower,
}

/// `active_model/errors` -> `ActiveModel::Errors` (or `activeModel::Errors` with `Lower`).
#[must_use]
pub fn camelize(text: &str, first_letter: FirstLetter) -> String {
    let upper = camelize_upper(text);
    match first_letter {
        FirstLetter::Upper => upper,
        FirstLetter::Lower => {
            let mut chars = text.chars();
            let Some(first) = chars.next() else {
                return upper;
            };
            let rest = upper.char_indices().nth(1).map_or("", |(i, _)| &upper[i..]);
            first.to_lowercase().chain(rest.chars()).collect()
        }
    }
}

fn camelize_upper(text: &str) -> String {
    let paths = PATH_SEPARATOR.replace_all(text, |caps: &Captures<'_>| format!("::{}", caps[1].to_uppercase()));
    WORD_START
        .replace_all(&paths, |caps: &Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

/// `ActiveModel::Errors` -> `active_model/errors`.
#[must_use]
pub fn underscore(text: &str) -> String {
    let text = text.replace("::", "/");
    let text = ACRONYM_BOUNDARY.replace_all(&text, "${1}_${2}");
    let text = WORD_BOUNDARY.replace_all(&text, "${1}_${2}");
    text.replace('-', "_").to_lowercase()
}

/// `puni_puni` -> `puni-puni`.
#[must_use]
pub fn dasherize(text: &str) -> String {
    text.replace('_', "-")
}

/// `ActiveRecord::CoreExtensions::String::Inflections` -> `Inflections`.
#[must_use]
pub fn demodulize(text: &str) -> String {
    MODULE_PREFIX.replace_all(text, "").into_owned()
}
