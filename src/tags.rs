//! Helpers for the comma-separated multi-value fields (`de_rol`, `para_rol`,
//! `tag_tema`).

use crate::models::{Email, TokenField};
use std::collections::BTreeSet;

/// Delimiter between tokens in a stored field
pub const TOKEN_DELIMITER: char = ',';

/// Separator written between tokens when joining
pub const TOKEN_SEPARATOR: &str = ", ";

/// Split a joined field into trimmed, non-empty tokens in their original order.
///
/// Duplicates are kept.
#[must_use]
pub fn split_tokens(value: &str) -> Vec<&str> {
    value
        .split(TOKEN_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Join tokens with `", "`.
///
/// The output splits back into the same tokens as long as none of them
/// contains a comma or is blank.
#[must_use]
pub fn join_tokens<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for token in tokens {
        if !joined.is_empty() {
            joined.push_str(TOKEN_SEPARATOR);
        }
        joined.push_str(token.as_ref());
    }
    joined
}

/// Rewrite a joined field into its canonical `", "`-separated form.
#[must_use]
pub fn canonical_tokens(value: &str) -> String {
    join_tokens(split_tokens(value))
}

/// True if `value` contains `token` as one of its split tokens.
#[must_use]
pub fn has_token(value: &str, token: &str) -> bool {
    split_tokens(value).contains(&token)
}

/// Sorted, deduplicated set of tokens found in `field` across `records`.
#[must_use]
pub fn distinct_tokens<'a, I>(records: I, field: TokenField) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Email>,
{
    records
        .into_iter()
        .flat_map(|email| split_tokens(field.value(email)))
        .map(str::to_string)
        .collect()
}
