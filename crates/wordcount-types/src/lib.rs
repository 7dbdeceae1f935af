//! Shared vocabulary for the word counter: tokens as produced by a tokenizer
//! and the markers recording which merge rules shaped a word cluster.
//!
//! Use [`Token`] and [`TokenKind`] to feed the counter, and [`MarkerSet`] to
//! inspect which affix categories fired for a merged entry.
//!
//! ```rust
//! use wordcount_types::{Marker, MarkerSet, Token, TokenKind};
//!
//! let tok = Token::word("كتاب");
//! assert_eq!(tok.kind, TokenKind::Word);
//!
//! let mut markers = MarkerSet::new();
//! markers.insert(Marker::NounPrefix);
//! assert_eq!(markers.tags(), vec!["noun-prefix"]);
//! ```

use std::fmt;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

/// Classification attached to each token by the tokenizer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Word,
    Delimiter,
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Word => "word",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Unknown => "unknown",
        })
    }
}

/// A piece of input text and its kind. Immutable once produced.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn word(text: impl Into<String>) -> Self {
        Self::new(text, TokenKind::Word)
    }

    pub fn delimiter(text: impl Into<String>) -> Self {
        Self::new(text, TokenKind::Delimiter)
    }

    pub fn unknown(text: impl Into<String>) -> Self {
        Self::new(text, TokenKind::Unknown)
    }
}

/// Affix category recorded on an entry when a merge rule of that category fired.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Marker {
    Allograph,
    FeminineSingular,
    FemininePlural,
    NounPrefix,
    NounSuffix,
    VerbPrefix,
    VerbSuffix,
    IndeterminatePrefix,
    IndeterminateSuffix,
    IrregularJoin,
}

impl Marker {
    pub const ALL: [Marker; 10] = [
        Marker::Allograph,
        Marker::FeminineSingular,
        Marker::FemininePlural,
        Marker::NounPrefix,
        Marker::NounSuffix,
        Marker::VerbPrefix,
        Marker::VerbSuffix,
        Marker::IndeterminatePrefix,
        Marker::IndeterminateSuffix,
        Marker::IrregularJoin,
    ];

    /// Stable tag used in reports.
    pub fn tag(self) -> &'static str {
        match self {
            Marker::Allograph => "allograph",
            Marker::FeminineSingular => "feminine-singular",
            Marker::FemininePlural => "feminine-plural",
            Marker::NounPrefix => "noun-prefix",
            Marker::NounSuffix => "noun-suffix",
            Marker::VerbPrefix => "verb-prefix",
            Marker::VerbSuffix => "verb-suffix",
            Marker::IndeterminatePrefix => "indeterminate-prefix",
            Marker::IndeterminateSuffix => "indeterminate-suffix",
            Marker::IrregularJoin => "irregular-join",
        }
    }

    fn bit(self) -> usize {
        self as usize
    }

    fn from_bit(bit: usize) -> Option<Self> {
        Self::ALL.get(bit).copied()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Fixed-size set of [`Marker`]s backed by a single 16-bit word.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct MarkerSet {
    bits: BitArray<[u16; 1], Lsb0>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, marker: Marker) {
        self.bits.set(marker.bit(), true);
    }

    pub fn contains(&self, marker: Marker) -> bool {
        self.bits[marker.bit()]
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Add every marker of `other` to this set.
    pub fn union_with(&mut self, other: &MarkerSet) {
        for bit in other.bits.iter_ones() {
            self.bits.set(bit, true);
        }
    }

    /// Markers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Marker> + '_ {
        self.bits.iter_ones().filter_map(Marker::from_bit)
    }

    /// Report tags sorted alphabetically.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = self.iter().map(Marker::tag).collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for MarkerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Marker> for MarkerSet {
    fn from_iter<I: IntoIterator<Item = Marker>>(iter: I) -> Self {
        let mut set = MarkerSet::new();
        for marker in iter {
            set.insert(marker);
        }
        set
    }
}
