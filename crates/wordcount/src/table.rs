//! Insertion-ordered map from surface form to [`WordEntry`].
//!
//! Entries live in slots. Merging moves an entry out of its slot, leaving an
//! empty tombstone that still answers lookups (as "consumed") until the next
//! [`FrequencyTable::compact`].

use std::collections::HashMap;

use tracing::warn;
use wordcount_morph::Stemmer;

use crate::entry::{ContextSnapshot, WordEntry};

#[derive(Debug, Clone)]
struct Slot {
    key: String,
    entry: Option<WordEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    slots: Vec<Slot>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`, creating its entry on first sighting.
    pub fn record(&mut self, word: &str, context: ContextSnapshot) {
        let Some(slot) = self.slot_of(word) else {
            self.push_slot(word.to_string(), WordEntry::new(context, word));
            return;
        };
        match self.slots[slot].entry.as_mut() {
            Some(entry) => entry.inc(context),
            None => warn!("dropping occurrence of `{word}`: its entry was already merged away"),
        }
    }

    fn push_slot(&mut self, key: String, entry: WordEntry) {
        self.index.insert(key.clone(), self.slots.len());
        self.slots.push(Slot {
            key,
            entry: Some(entry),
        });
    }

    pub fn get(&self, key: &str) -> Option<&WordEntry> {
        let slot = *self.index.get(key)?;
        self.slots[slot].entry.as_ref()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Occurrences across all live entries.
    pub fn total_count(&self) -> u64 {
        self.iter().map(|(_, entry)| entry.total_count()).sum()
    }

    /// Occurrences across all live entries, summed from the variant counts.
    pub fn recount(&self) -> u64 {
        self.iter().map(|(_, entry)| entry.recount()).sum()
    }

    /// Live entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WordEntry)> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.entry.as_ref().map(|e| (s.key.as_str(), e)))
    }

    /// Attach stems to every variant of every live entry.
    pub fn attach_stems(&mut self, stemmer: &dyn Stemmer) {
        for entry in self.slots.iter_mut().filter_map(|s| s.entry.as_mut()) {
            for variant in entry.variants_mut() {
                let stems = stemmer.stems(variant.form());
                variant.set_stems(stems);
            }
        }
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn slot_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub(crate) fn key_at(&self, slot: usize) -> &str {
        &self.slots[slot].key
    }

    pub(crate) fn is_live(&self, slot: usize) -> bool {
        self.slots[slot].entry.is_some()
    }

    pub(crate) fn entry_mut(&mut self, slot: usize) -> Option<&mut WordEntry> {
        self.slots[slot].entry.as_mut()
    }

    /// Move the entry out of `slot`, leaving a tombstone. A second take yields `None`.
    pub(crate) fn take(&mut self, slot: usize) -> Option<WordEntry> {
        self.slots[slot].entry.take()
    }

    /// Drop all tombstones in one batch, returning how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|s| s.entry.is_some());
        self.index = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, s)| (s.key.clone(), i))
            .collect();
        before - self.slots.len()
    }

    /// Change the key of a live entry in place. Fails if `new_key` is taken.
    pub fn rename(&mut self, old_key: &str, new_key: String) -> bool {
        if self.index.contains_key(&new_key) {
            return false;
        }
        let Some(slot) = self.index.remove(old_key) else {
            return false;
        };
        self.slots[slot].key = new_key.clone();
        self.index.insert(new_key, slot);
        true
    }
}
