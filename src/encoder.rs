//! CSV encoding of records for export.
//!
//! Output has the sixteen data columns in [`Column::ALL`] order; `id` and
//! `read` are session-local and never written. Each line, the last included,
//! ends with `\n`.
//!
//! `asunto` and `cuerpo` are always quoted. What happens to the other fields
//! depends on the [`QuotePolicy`]:
//!
//! - [`QuotePolicy::Necessary`] (default) writes them raw unless they contain a
//!   comma, a quote or a line break. Multi-value fields such as
//!   `"legal, finance"` therefore come back intact.
//! - [`QuotePolicy::FreeText`] always writes them raw. A comma or quote in, say,
//!   `tag_tema` then produces a line the decoder splits differently.
//! - [`QuotePolicy::All`] quotes every field, header included.

use crate::models::{Column, Email};
use serde::{Deserialize, Serialize};

/// Which fields get wrapped in double quotes on export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotePolicy {
    /// Quote `asunto` and `cuerpo` only
    FreeText,
    /// Quote `asunto` and `cuerpo`, plus any field that would not survive raw
    #[default]
    Necessary,
    /// Quote every field, header included
    All,
}

impl QuotePolicy {
    fn quotes(self, column: Column, value: &str) -> bool {
        match self {
            Self::FreeText => column.is_free_text(),
            Self::Necessary => column.is_free_text() || needs_quotes(value),
            Self::All => true,
        }
    }
}

fn needs_quotes(value: &str) -> bool {
    value.contains([',', '"', '\n', '\r'])
}

/// Encode records with the default quoting policy.
#[must_use]
pub fn encode<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Email>,
{
    encode_with(records, QuotePolicy::default())
}

/// Encode records with an explicit quoting policy.
#[must_use]
pub fn encode_with<'a, I>(records: I, policy: QuotePolicy) -> String
where
    I: IntoIterator<Item = &'a Email>,
{
    let mut out = String::new();

    for (position, column) in Column::ALL.into_iter().enumerate() {
        if position > 0 {
            out.push(',');
        }
        if policy == QuotePolicy::All {
            push_quoted(&mut out, column.name());
        } else {
            out.push_str(column.name());
        }
    }
    out.push('\n');

    for email in records {
        for (position, column) in Column::ALL.into_iter().enumerate() {
            if position > 0 {
                out.push(',');
            }
            let value = email.field(column);
            if policy.quotes(column, value) {
                push_quoted(&mut out, value);
            } else {
                out.push_str(value);
            }
        }
        out.push('\n');
    }

    out
}

/// Append `value` wrapped in double quotes with inner quotes doubled
fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
}
