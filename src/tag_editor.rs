//! Draft of one record's tag list while the user edits it.
//!
//! Nothing touches the store until [`TagDraft::commit`] hands the joined
//! string to [`RecordStore::set_tags`](crate::store::RecordStore::set_tags).

use crate::error::{StoreError, TagError};
use crate::models::{Email, EmailId};
use crate::store::RecordStore;
use crate::tags::{join_tokens, split_tokens};
use crate::validation::InputValidator;
use std::collections::BTreeSet;

/// Editable tag list for a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    email_id: EmailId,
    tags: Vec<String>,
}

impl TagDraft {
    /// Seed a draft from a record's current tags
    #[must_use]
    pub fn for_email(email: &Email) -> Self {
        Self {
            email_id: email.id,
            tags: split_tokens(&email.tag_tema)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Record this draft belongs to
    #[must_use]
    pub const fn email_id(&self) -> EmailId {
        self.email_id
    }

    /// Tags in insertion order
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Append a tag after trimming; blank and duplicate tags are rejected
    pub fn add(&mut self, tag: &str) -> Result<(), TagError> {
        let tag = InputValidator::validate_tag(tag, self.tags.as_slice())?;
        self.tags.push(tag);
        Ok(())
    }

    /// Remove a tag; returns whether it was present
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|current| current != tag);
        self.tags.len() != before
    }

    /// Known tags not yet in the draft, in sorted order
    #[must_use]
    pub fn suggestions<'a>(&self, all_tags: &'a BTreeSet<String>) -> Vec<&'a str> {
        all_tags
            .iter()
            .filter(|tag| !self.tags.contains(tag))
            .map(String::as_str)
            .collect()
    }

    /// Joined value that will be stored
    #[must_use]
    pub fn joined(&self) -> String {
        join_tokens(&self.tags)
    }

    /// Write the draft to the store
    pub fn commit(self, store: &mut RecordStore) -> Result<(), StoreError> {
        store.set_tags(self.email_id, &self.joined())
    }
}
