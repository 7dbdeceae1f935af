//! Per-cluster accumulator: the surface forms merged under one canonical word,
//! their counts, captured contexts and the markers of the rules that merged them.

use wordcount_types::{Marker, MarkerSet, Token, TokenKind};

use crate::window::ContextWindow;

/// Tokens surrounding one occurrence, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSnapshot {
    tokens: Vec<Token>,
}

impl ContextSnapshot {
    pub fn capture(window: &ContextWindow<Token>) -> Self {
        Self {
            tokens: window.iter().cloned().collect(),
        }
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens.iter().map(|t| t.kind)
    }
}

/// One surface form inside an entry, with the contexts it was seen in.
#[derive(Debug, Clone)]
pub struct Variant {
    form: String,
    count: u64,
    contexts: Vec<ContextSnapshot>,
    stems: Vec<String>,
}

impl Variant {
    fn new(form: String, context: ContextSnapshot) -> Self {
        Self {
            form,
            count: 1,
            contexts: vec![context],
            stems: Vec::new(),
        }
    }

    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn contexts(&self) -> &[ContextSnapshot] {
        &self.contexts
    }

    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    pub(crate) fn set_stems(&mut self, stems: Vec<String>) {
        self.stems = stems;
    }

    #[cfg(test)]
    pub(crate) fn set_count(&mut self, count: u64) {
        self.count = count;
    }
}

#[derive(Debug, Clone)]
pub struct WordEntry {
    variants: Vec<Variant>,
    markers: MarkerSet,
    total: u64,
}

impl WordEntry {
    pub fn new(context: ContextSnapshot, word: impl Into<String>) -> Self {
        Self {
            variants: vec![Variant::new(word.into(), context)],
            markers: MarkerSet::new(),
            total: 1,
        }
    }

    /// Count another occurrence of the first-seen form.
    pub fn inc(&mut self, context: ContextSnapshot) {
        let first = &mut self.variants[0];
        first.count += 1;
        first.contexts.push(context);
        self.total += 1;
    }

    /// Absorb `other`, which is consumed and can never be merged again.
    ///
    /// The total is recomputed from the variants. Returns `false` when it
    /// differs from the sum of both totals before the merge.
    pub fn merge(&mut self, other: WordEntry) -> bool {
        let expected = self.total + other.total;
        self.markers.union_with(&other.markers);
        self.variants.extend(other.variants);
        self.total = self.recount();
        self.total == expected
    }

    pub fn mark(&mut self, marker: Marker) {
        self.markers.insert(marker);
    }

    /// Form the entry was created from. The table key may differ after the
    /// ending fix-up.
    pub fn first_form(&self) -> &str {
        &self.variants[0].form
    }

    pub fn total_count(&self) -> u64 {
        self.total
    }

    /// Sum of the per-variant counts, recomputed from scratch.
    pub fn recount(&self) -> u64 {
        self.variants.iter().map(|v| v.count).sum()
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub(crate) fn variants_mut(&mut self) -> &mut [Variant] {
        &mut self.variants
    }

    pub fn counts(&self) -> Vec<u64> {
        self.variants.iter().map(|v| v.count).collect()
    }

    pub fn forms(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.form.as_str()).collect()
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Every captured context, grouped by variant, paired with its form.
    pub fn contexts(&self) -> impl Iterator<Item = (&str, &ContextSnapshot)> + '_ {
        self.variants
            .iter()
            .flat_map(|v| v.contexts.iter().map(move |c| (v.form.as_str(), c)))
    }
}
