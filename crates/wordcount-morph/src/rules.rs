use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wordcount_types::Marker;

/// Problems found while validating a [`RuleSet`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule set has no phases")]
    NoPhases,
    #[error("phase `{phase}` contains an empty affix")]
    EmptyAffix { phase: String },
    #[error("phase `{phase}` replaces an empty ending")]
    EmptyEnding { phase: String },
    #[error("phase `{phase}` contains a join with an empty side")]
    EmptyJoin { phase: String },
    #[error("phase `{phase}` joins `{word}` to itself")]
    SelfJoin { phase: String, word: String },
    #[error("phase `{phase}` joins `{source_word}` to both `{first}` and `{second}`")]
    ConflictingJoin {
        phase: String,
        source_word: String,
        first: String,
        second: String,
    },
    #[error("ending fix-up has an empty side")]
    EmptyFixup,
}

/// Character-sequence substitution applied to a word before suffixing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fold {
    pub from: String,
    pub to: String,
}

/// How a word and an affix produce the surface form to look for.
///
/// The current word is the base; the produced candidate is the inflected or
/// variant spelling that gets absorbed into it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Transform {
    /// `affix + word`
    Prefix,
    /// `word + affix`, optionally folding `from` to `to` everywhere in the word first.
    Suffix {
        #[serde(default)]
        fold: Option<Fold>,
    },
    /// Words ending in `ending` have it replaced by the affix.
    ReplaceEnding { ending: String },
    /// Every occurrence of the affix inside the word is replaced by `with`.
    ReplaceAll { with: String },
}

impl Transform {
    /// Candidate surface form, or `None` when the transform does not apply.
    pub fn apply(&self, word: &str, affix: &str) -> Option<String> {
        match self {
            Transform::Prefix => Some(format!("{affix}{word}")),
            Transform::Suffix { fold } => {
                let base = match fold {
                    Some(fold) if !fold.from.is_empty() => word.replace(&fold.from, &fold.to),
                    _ => word.to_string(),
                };
                Some(format!("{base}{affix}"))
            }
            Transform::ReplaceEnding { ending } => word
                .strip_suffix(ending.as_str())
                .map(|stem| format!("{stem}{affix}")),
            Transform::ReplaceAll { with } => {
                if affix.is_empty() || !word.contains(affix) {
                    return None;
                }
                let replaced = word.replace(affix, with);
                (replaced != word).then_some(replaced)
            }
        }
    }
}

/// One affix string paired with the marker recorded when it merges something.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Affix {
    pub text: String,
    pub marker: Marker,
    /// Words that look like a base for this affix but must never absorb anything.
    #[serde(default)]
    pub exceptions: BTreeSet<String>,
}

impl Affix {
    pub fn new(text: impl Into<String>, marker: Marker) -> Self {
        Self {
            text: text.into(),
            marker,
            exceptions: BTreeSet::new(),
        }
    }

    pub fn with_exceptions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions.extend(words.into_iter().map(Into::into));
        self
    }
}

/// A transform applied with each of an ordered list of affixes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AffixRule {
    pub transform: Transform,
    pub affixes: Vec<Affix>,
    /// Exceptions shared by every affix of the rule.
    #[serde(default)]
    pub exceptions: BTreeSet<String>,
}

impl AffixRule {
    pub fn new(transform: Transform, affixes: Vec<Affix>) -> Self {
        Self {
            transform,
            affixes,
            exceptions: BTreeSet::new(),
        }
    }

    pub fn with_exceptions<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exceptions.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn candidate(&self, word: &str, affix: &Affix) -> Option<String> {
        self.transform.apply(word, &affix.text)
    }

    /// Whether `word` is protected from absorbing forms through `affix`.
    pub fn is_exception(&self, word: &str, affix: &Affix) -> bool {
        self.exceptions.contains(word) || affix.exceptions.contains(word)
    }
}

/// Suppletive pair: the entry for `from` is absorbed by the entry for `to`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct JoinPair {
    pub from: String,
    pub to: String,
}

impl JoinPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// One merge pass over the whole table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Phase {
    Affix {
        name: String,
        /// Words shorter than this (in characters) are skipped.
        #[serde(default)]
        min_len: usize,
        rules: Vec<AffixRule>,
    },
    Irregular {
        name: String,
        joins: Vec<JoinPair>,
    },
}

impl Phase {
    pub fn affix(name: impl Into<String>, min_len: usize, rules: Vec<AffixRule>) -> Self {
        Phase::Affix {
            name: name.into(),
            min_len,
            rules,
        }
    }

    pub fn irregular(name: impl Into<String>, joins: Vec<JoinPair>) -> Self {
        Phase::Irregular {
            name: name.into(),
            joins,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Phase::Affix { name, .. } | Phase::Irregular { name, .. } => name,
        }
    }

    fn validate(&self) -> Result<(), RuleError> {
        let phase = || self.name().to_string();
        match self {
            Phase::Affix { rules, .. } => {
                for rule in rules {
                    if let Transform::ReplaceEnding { ending } = &rule.transform
                        && ending.is_empty()
                    {
                        return Err(RuleError::EmptyEnding { phase: phase() });
                    }
                    if rule.affixes.iter().any(|a| a.text.is_empty()) {
                        return Err(RuleError::EmptyAffix { phase: phase() });
                    }
                }
            }
            Phase::Irregular { joins, .. } => {
                let mut seen: HashMap<&str, &str> = HashMap::new();
                for join in joins {
                    if join.from.is_empty() || join.to.is_empty() {
                        return Err(RuleError::EmptyJoin { phase: phase() });
                    }
                    if join.from == join.to {
                        return Err(RuleError::SelfJoin {
                            phase: phase(),
                            word: join.from.clone(),
                        });
                    }
                    if let Some(first) = seen.insert(&join.from, &join.to)
                        && first != join.to
                    {
                        return Err(RuleError::ConflictingJoin {
                            phase: phase(),
                            source_word: join.from.clone(),
                            first: first.to_string(),
                            second: join.to.clone(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// Rewrites the display key of ambiguous allograph clusters after merging.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EndingFixup {
    pub from: String,
    pub to: String,
}

/// Complete, ordered merge configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub phases: Vec<Phase>,
    /// Words processed by every affix phase regardless of `min_len`.
    #[serde(default)]
    pub always_eligible: BTreeSet<String>,
    #[serde(default)]
    pub ending_fixup: Option<EndingFixup>,
}

impl RuleSet {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self {
            phases,
            ..Self::default()
        }
    }

    /// Load a JSON rule file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read rule file {}", path.display()))?;
        let rules = Self::from_json(&raw)
            .with_context(|| format!("parse rule file {}", path.display()))?;
        Ok(rules)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let rules: RuleSet = serde_json::from_str(raw).context("decode rule set")?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        if self.phases.is_empty() {
            return Err(RuleError::NoPhases);
        }
        for phase in &self.phases {
            phase.validate()?;
        }
        if let Some(fixup) = &self.ending_fixup
            && (fixup.from.is_empty() || fixup.to.is_empty())
        {
            return Err(RuleError::EmptyFixup);
        }
        Ok(())
    }

    pub fn is_always_eligible(&self, word: &str) -> bool {
        self.always_eligible.contains(word)
    }
}
