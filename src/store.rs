//! The record store: single owner of the canonical collection.
//!
//! Loads replace the collection wholesale and bump a generation counter so
//! collaborators holding per-collection state (selection, filters, page) can
//! tell that the records they refer to are gone. Only two per-record mutations
//! exist: marking a record read and replacing its tags. Tag changes set the
//! dirty flag; it stays set until the host confirms the export was delivered.

use crate::decoder::decode;
use crate::encoder::{encode_with, QuotePolicy};
use crate::error::{DecodeError, StoreError};
use crate::metrics::MetricsCollector;
use crate::models::{Email, EmailId, TokenField};
use crate::tags::{canonical_tokens, distinct_tokens};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Canonical record collection plus unsaved-change tracking
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Email>,
    dirty: bool,
    generation: u64,
    quote_policy: QuotePolicy,
    metrics: MetricsCollector,
}

impl RecordStore {
    /// Empty store with the default export quoting
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty store that exports with `policy`
    #[must_use]
    pub fn with_quote_policy(policy: QuotePolicy) -> Self {
        Self {
            quote_policy: policy,
            ..Self::default()
        }
    }

    /// Decode `csv_text` and replace the whole collection with the result.
    ///
    /// On failure the current collection, dirty flag and generation are left
    /// exactly as they were.
    pub fn load(&mut self, csv_text: &str) -> Result<(), DecodeError> {
        let records = decode(csv_text)?;
        self.replace(records);
        Ok(())
    }

    /// Swap in an already-decoded collection
    pub fn replace(&mut self, records: Vec<Email>) {
        self.records = records;
        self.dirty = false;
        self.generation += 1;
        info!(
            records = self.records.len(),
            generation = self.generation,
            "Replaced record collection"
        );
    }

    /// All records in collection order
    #[must_use]
    pub fn records(&self) -> &[Email] {
        &self.records
    }

    /// Record with the given id
    #[must_use]
    pub fn get(&self, id: EmailId) -> Option<&Email> {
        self.position(id).map(|index| &self.records[index])
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is loaded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when tags changed since the last load or confirmed save
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Counter bumped by every successful load; 0 means nothing loaded yet
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Mark a record as read. Unknown ids are ignored.
    pub fn mark_read(&mut self, id: EmailId) {
        let Some(index) = self.position(id) else {
            debug!(id, "Ignoring mark_read for unknown email");
            return;
        };
        let email = &mut self.records[index];
        if !email.read {
            email.read = true;
            self.metrics.record_opened();
        }
    }

    /// Replace a record's tags and mark the collection dirty.
    ///
    /// The value is stored in canonical `", "`-joined form.
    pub fn set_tags(&mut self, id: EmailId, tags: &str) -> Result<(), StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(id))?;
        let canonical = canonical_tokens(tags);
        debug!(id, tags = %canonical, "Updating tags");

        self.records[index].tag_tema = canonical;
        self.dirty = true;
        self.metrics.record_tag_update();
        Ok(())
    }

    /// Encode the current collection as CSV. Does not clear the dirty flag.
    #[must_use]
    pub fn export(&self) -> String {
        let csv = encode_with(&self.records, self.quote_policy);
        self.metrics.record_export(self.records.len(), csv.len());
        info!(records = self.records.len(), bytes = csv.len(), "Generated export");
        csv
    }

    /// Clear the dirty flag once an export has reached the user
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Sorted distinct tags across the collection
    #[must_use]
    pub fn all_tag_tokens(&self) -> BTreeSet<String> {
        self.distinct_tokens(TokenField::TagTema)
    }

    /// Sorted distinct tokens of any multi-value field
    #[must_use]
    pub fn distinct_tokens(&self, field: TokenField) -> BTreeSet<String> {
        distinct_tokens(&self.records, field)
    }

    fn position(&self, id: EmailId) -> Option<usize> {
        // ids equal row indices unless the collection was handed in reordered
        match self.records.get(id) {
            Some(email) if email.id == id => Some(id),
            _ => self.records.iter().position(|email| email.id == id),
        }
    }
}
