//! Filter pipeline producing the working view over a record collection.
//!
//! Four conjunctive stages: sender roles, recipient roles, tags, free text.
//! A stage with nothing selected passes every record. Within a role or tag
//! stage a record passes if it carries at least one selected token.

use crate::metrics::MetricsCollector;
use crate::models::{Email, TokenField};
use crate::tags::split_tokens;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tag filter token that selects records with no tags at all
pub const UNTAGGED_SENTINEL: &str = "Sin tema";

/// Token selections for the role and tag stages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Selected sender roles
    pub de_roles: BTreeSet<String>,
    /// Selected recipient roles
    pub para_roles: BTreeSet<String>,
    /// Selected tags, possibly including [`UNTAGGED_SENTINEL`]
    pub tags: BTreeSet<String>,
}

impl FilterState {
    /// Empty selection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any stage has a selection
    #[must_use]
    pub fn is_active(&self) -> bool {
        !(self.de_roles.is_empty() && self.para_roles.is_empty() && self.tags.is_empty())
    }

    /// Drop every selection
    pub fn clear(&mut self) {
        self.de_roles.clear();
        self.para_roles.clear();
        self.tags.clear();
    }

    /// Selection set backing one field's stage
    pub fn selection_mut(&mut self, field: TokenField) -> &mut BTreeSet<String> {
        match field {
            TokenField::DeRol => &mut self.de_roles,
            TokenField::ParaRol => &mut self.para_roles,
            TokenField::TagTema => &mut self.tags,
        }
    }

    /// Add `token` to a stage if absent, remove it if present.
    ///
    /// Returns whether the token is selected afterwards.
    pub fn toggle(&mut self, field: TokenField, token: &str) -> bool {
        let selection = self.selection_mut(field);
        if selection.remove(token) {
            false
        } else {
            selection.insert(token.to_string());
            true
        }
    }

    fn passes(&self, email: &Email) -> bool {
        intersects(&self.de_roles, &email.de_rol)
            && intersects(&self.para_roles, &email.para_rol)
            && self.passes_tags(email)
    }

    fn passes_tags(&self, email: &Email) -> bool {
        if self.tags.is_empty() {
            return true;
        }
        if self.tags.contains(UNTAGGED_SENTINEL) && email.is_untagged() {
            return true;
        }
        intersects(&self.tags, &email.tag_tema)
    }
}

/// Lower-cased free-text term, prepared once per pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: Option<String>,
}

impl SearchQuery {
    /// Prepare a query; a blank term yields an inactive query
    #[must_use]
    pub fn new(term: &str) -> Self {
        let trimmed = term.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }

    /// True when the term is non-blank
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    /// Case-insensitive substring match against subject, sender, recipients,
    /// tags and body
    #[must_use]
    pub fn matches(&self, email: &Email) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        [&email.asunto, &email.de, &email.para, &email.tag_tema, &email.cuerpo]
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}

fn intersects(selected: &BTreeSet<String>, joined: &str) -> bool {
    selected.is_empty() || split_tokens(joined).into_iter().any(|token| selected.contains(token))
}

/// True if `email` survives every active stage
#[must_use]
pub fn matches(email: &Email, filters: &FilterState, query: &SearchQuery) -> bool {
    filters.passes(email) && query.matches(email)
}

/// Run the pipeline, keeping survivors in their original relative order.
#[must_use]
pub fn apply<'a, I>(records: I, filters: &FilterState, search_term: &str) -> Vec<&'a Email>
where
    I: IntoIterator<Item = &'a Email>,
{
    let query = SearchQuery::new(search_term);
    let mut total = 0;
    let kept: Vec<&Email> = records
        .into_iter()
        .inspect(|_| total += 1)
        .filter(|email| matches(email, filters, &query))
        .collect();

    MetricsCollector::default().record_filter(total, kept.len());
    tracing::trace!(total, kept = kept.len(), "Applied filters");
    kept
}
