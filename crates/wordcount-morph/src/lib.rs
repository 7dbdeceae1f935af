//! Affix rules for merging Egyptian Arabic word variants.
//!
//! A [`RuleSet`] is an ordered list of [`Phase`]s. An affix phase pairs a
//! [`Transform`] with affixes and exception lists: given a base word and an
//! affix it produces the inflected surface form to look for. An irregular
//! phase maps suppletive forms straight onto their lemma. The crate only
//! describes rules; applying them to counted words is left to the caller.
//!
//! # How a rule is read
//! 1. Build the candidate with [`AffixRule::candidate`] (`None` means the rule
//!    does not apply to this word/affix pair).
//! 2. Skip the whole rule if [`AffixRule::is_exception`] protects the word.
//! 3. If the candidate was observed, fold it into the base word's entry and
//!    record the affix's [`Marker`](wordcount_types::Marker).
//!
//! # Example
//! ```rust
//! use wordcount_morph::{Phase, RuleSet};
//!
//! let rules = RuleSet::egyptian();
//! let Phase::Affix { rules: nouns, .. } = &rules.phases[6] else { unreachable!() };
//! let al = &nouns[0].affixes[1];
//! assert_eq!(nouns[0].candidate("بيت", al).as_deref(), Some("البيت"));
//! ```
//!
//! Rule tables can also be loaded from JSON with [`RuleSet::load`].

pub mod egyptian;
pub mod rules;

pub use rules::{
    Affix, AffixRule, EndingFixup, Fold, JoinPair, Phase, RuleError, RuleSet, Transform,
};

/// Optional stemming capability, consulted after merging for reporting only.
pub trait Stemmer {
    fn stems(&self, word: &str) -> Vec<String>;
}

impl<F> Stemmer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn stems(&self, word: &str) -> Vec<String> {
        self(word)
    }
}
