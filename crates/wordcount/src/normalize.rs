//! Merges inflected and variant spellings into the entry of their base word.
//!
//! Phases run in the order given by the [`RuleSet`]. A form absorbed in one
//! phase leaves the table when the phase ends, so later phases never see it.
//! Every phase must leave the table's occurrence total unchanged.

use std::collections::HashMap;

use tracing::{debug, info, warn};
use wordcount_morph::{AffixRule, EndingFixup, JoinPair, Phase, RuleSet};
use wordcount_types::Marker;

use crate::error::CountError;
use crate::table::FrequencyTable;

/// Outcome of one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseStats {
    pub name: String,
    pub merges: usize,
    pub entries_left: usize,
    pub total: u64,
}

pub struct Normalizer<'r> {
    rules: &'r RuleSet,
}

impl<'r> Normalizer<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    /// Run every phase, then the ending fix-up.
    pub fn normalize(&self, table: &mut FrequencyTable) -> Result<Vec<PhaseStats>, CountError> {
        let mut stats = Vec::with_capacity(self.rules.phases.len());
        for phase in &self.rules.phases {
            stats.push(self.run_phase(table, phase)?);
        }
        if let Some(fixup) = &self.rules.ending_fixup {
            let renamed = fix_ambiguous_endings(table, fixup);
            info!("rewrote {renamed} ambiguous endings");
        }
        Ok(stats)
    }

    pub fn run_phase(
        &self,
        table: &mut FrequencyTable,
        phase: &Phase,
    ) -> Result<PhaseStats, CountError> {
        let expected = table.total_count();
        let mut pass = Pass::new(table, phase.name());

        match phase {
            Phase::Affix { min_len, rules, .. } => {
                for slot in 0..pass.table.slot_count() {
                    self.apply_affix_rules(&mut pass, slot, *min_len, rules);
                }
            }
            Phase::Irregular { joins, .. } => {
                let joins = join_map(joins);
                for slot in 0..pass.table.slot_count() {
                    pass.join(slot, &joins);
                }
            }
        }

        let merges = pass.merges;
        table.compact();
        let actual = table.recount();
        let entries_left = table.len();
        if actual != expected {
            return Err(CountError::InvariantViolation {
                phase: phase.name().to_string(),
                expected,
                actual,
                entries: entries_left,
            });
        }

        info!(
            "phase {}: {merges} merges, {entries_left} entries left",
            phase.name()
        );
        Ok(PhaseStats {
            name: phase.name().to_string(),
            merges,
            entries_left,
            total: actual,
        })
    }

    fn apply_affix_rules(&self, pass: &mut Pass<'_>, slot: usize, min_len: usize, rules: &[AffixRule]) {
        let word = pass.table.key_at(slot).to_string();
        if word.chars().count() < min_len && !self.rules.is_always_eligible(&word) {
            return;
        }

        for rule in rules {
            for affix in &rule.affixes {
                let Some(candidate) = rule.candidate(&word, affix) else {
                    continue;
                };
                if rule.is_exception(&word, affix) {
                    break;
                }
                let Some(victim) = pass.table.slot_of(&candidate) else {
                    continue;
                };
                let Some(owner) = pass.resolve(slot) else {
                    continue;
                };
                if pass.absorb(owner, victim, affix.marker) {
                    debug!(
                        "{}: `{candidate}` merged into `{}` via `{}`",
                        pass.phase,
                        pass.table.key_at(owner),
                        affix.text
                    );
                }
            }
        }
    }
}

/// Mutable state of a single phase over the table.
struct Pass<'t> {
    table: &'t mut FrequencyTable,
    phase: &'t str,
    /// Consumed slot to the slot that absorbed it.
    absorbed_by: HashMap<usize, usize>,
    merges: usize,
}

impl<'t> Pass<'t> {
    fn new(table: &'t mut FrequencyTable, phase: &'t str) -> Self {
        Self {
            table,
            phase,
            absorbed_by: HashMap::new(),
            merges: 0,
        }
    }

    /// Live slot currently holding the occurrences of `slot`.
    fn resolve(&self, mut slot: usize) -> Option<usize> {
        while !self.table.is_live(slot) {
            slot = *self.absorbed_by.get(&slot)?;
        }
        Some(slot)
    }

    /// Move `victim` into `owner`. Consumed victims and self-merges are refused.
    fn absorb(&mut self, owner: usize, victim: usize, marker: Marker) -> bool {
        if owner == victim || !self.table.is_live(owner) {
            return false;
        }
        let Some(entry) = self.table.take(victim) else {
            return false;
        };
        let balanced = match self.table.entry_mut(owner) {
            Some(target) => {
                target.mark(marker);
                target.merge(entry)
            }
            None => false,
        };
        if !balanced {
            warn!(
                "{}: counts of `{}` no longer add up after a merge",
                self.phase,
                self.table.key_at(owner)
            );
        }
        self.absorbed_by.insert(victim, owner);
        self.merges += 1;
        true
    }

    fn join(&mut self, slot: usize, joins: &HashMap<&str, &str>) {
        if !self.table.is_live(slot) {
            return;
        }
        let Some(&target_key) = joins.get(self.table.key_at(slot)) else {
            return;
        };
        let Some(target) = self.table.slot_of(target_key) else {
            return;
        };
        let Some(owner) = self.resolve(target) else {
            return;
        };
        if self.absorb(owner, slot, Marker::IrregularJoin) {
            debug!(
                "{}: `{}` joined into `{}`",
                self.phase,
                self.table.key_at(slot),
                self.table.key_at(owner)
            );
        }
    }
}

fn join_map(joins: &[JoinPair]) -> HashMap<&str, &str> {
    joins
        .iter()
        .map(|j| (j.from.as_str(), j.to.as_str()))
        .collect()
}

/// Rewrite keys ending in `fixup.from` to end in `fixup.to` for entries that
/// merged allographs. Returns the number of rewritten keys.
pub fn fix_ambiguous_endings(table: &mut FrequencyTable, fixup: &EndingFixup) -> usize {
    let renames: Vec<(String, String)> = table
        .iter()
        .filter(|(_, entry)| entry.markers().contains(Marker::Allograph))
        .filter_map(|(key, _)| {
            key.strip_suffix(fixup.from.as_str())
                .map(|stem| (key.to_string(), format!("{stem}{}", fixup.to)))
        })
        .collect();

    let mut renamed = 0;
    for (old, new) in renames {
        if table.rename(&old, new.clone()) {
            renamed += 1;
        } else {
            warn!("keeping `{old}`: `{new}` is already an entry of its own");
        }
    }
    renamed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ContextSnapshot;
    use wordcount_morph::{Affix, Transform};

    fn table_of(words: &[&str]) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for word in words {
            table.record(word, ContextSnapshot::from_tokens(Vec::new()));
        }
        table
    }

    fn prefix_phase(min_len: usize, affixes: Vec<Affix>) -> Phase {
        Phase::affix(
            "prefixes",
            min_len,
            vec![AffixRule::new(Transform::Prefix, affixes)],
        )
    }

    fn keys(table: &FrequencyTable) -> Vec<&str> {
        table.iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn merges_prefixed_forms_into_base() {
        let rules = RuleSet::new(vec![prefix_phase(
            0,
            vec![Affix::new("ال", Marker::NounPrefix)],
        )]);
        let mut table = table_of(&["بيت", "البيت", "البيت", "باب"]);
        let stats = Normalizer::new(&rules).normalize(&mut table).unwrap();

        assert_eq!(stats[0].merges, 1);
        assert_eq!(keys(&table), vec!["بيت", "باب"]);
        let entry = table.get("بيت").unwrap();
        assert_eq!(entry.forms(), vec!["بيت", "البيت"]);
        assert_eq!(entry.counts(), vec![1, 2]);
        assert!(entry.markers().contains(Marker::NounPrefix));
    }

    #[test]
    fn exception_blocks_merge() {
        let rules = RuleSet::new(vec![prefix_phase(
            0,
            vec![Affix::new("ال", Marker::NounPrefix).with_exceptions(["بيت"])],
        )]);
        let mut table = table_of(&["بيت", "البيت"]);
        Normalizer::new(&rules).normalize(&mut table).unwrap();
        assert_eq!(keys(&table), vec!["بيت", "البيت"]);
        assert!(table.get("بيت").unwrap().markers().is_empty());
    }

    #[test]
    fn exception_aborts_remaining_affixes_of_the_rule() {
        let rules = RuleSet::new(vec![prefix_phase(
            0,
            vec![
                Affix::new("و", Marker::IndeterminatePrefix).with_exceptions(["بيت"]),
                Affix::new("ال", Marker::NounPrefix),
            ],
        )]);
        let mut table = table_of(&["بيت", "البيت", "وبيت"]);
        Normalizer::new(&rules).normalize(&mut table).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn consumed_entry_keeps_feeding_its_absorber() {
        let rules = RuleSet::new(vec![prefix_phase(
            0,
            vec![
                Affix::new("ال", Marker::NounPrefix),
                Affix::new("و", Marker::IndeterminatePrefix),
            ],
        )]);
        let mut table = table_of(&["بيت", "البيت", "والبيت"]);
        Normalizer::new(&rules).normalize(&mut table).unwrap();

        assert_eq!(keys(&table), vec!["بيت"]);
        let entry = table.get("بيت").unwrap();
        assert_eq!(entry.forms(), vec!["بيت", "البيت", "والبيت"]);
        assert_eq!(entry.total_count(), 3);
        assert!(entry.markers().contains(Marker::IndeterminatePrefix));
    }

    #[test]
    fn short_words_are_skipped_unless_always_eligible() {
        let mut rules = RuleSet::new(vec![prefix_phase(
            3,
            vec![Affix::new("و", Marker::IndeterminatePrefix)],
        )]);
        rules.always_eligible.insert("ل".to_string());
        let mut table = table_of(&["ل", "ول", "دي", "ودي"]);
        Normalizer::new(&rules).normalize(&mut table).unwrap();
        assert_eq!(keys(&table), vec!["ل", "دي", "ودي"]);
        assert_eq!(table.get("ل").unwrap().total_count(), 2);
    }

    #[test]
    fn rerunning_a_phase_changes_nothing() {
        let rules = RuleSet::new(vec![prefix_phase(
            0,
            vec![Affix::new("ال", Marker::NounPrefix)],
        )]);
        let mut table = table_of(&["بيت", "البيت", "باب", "الباب", "الباب"]);
        let normalizer = Normalizer::new(&rules);
        let first = normalizer.run_phase(&mut table, &rules.phases[0]).unwrap();
        let second = normalizer.run_phase(&mut table, &rules.phases[0]).unwrap();
        assert_eq!(first.merges, 2);
        assert_eq!(second.merges, 0);
        assert_eq!(first.total, 5);
        assert_eq!(second.total, 5);
        assert_eq!(table.get("باب").unwrap().counts(), vec![1, 2]);
    }

    #[test]
    fn phase_fails_when_variant_counts_stop_adding_up() {
        let rules = RuleSet::new(vec![prefix_phase(
            0,
            vec![Affix::new("ال", Marker::NounPrefix)],
        )]);
        let mut table = table_of(&["بيت", "البيت"]);
        let slot = table.slot_of("البيت").unwrap();
        table.entry_mut(slot).unwrap().variants_mut()[0].set_count(7);

        let err = Normalizer::new(&rules).normalize(&mut table).unwrap_err();
        match err {
            CountError::InvariantViolation {
                phase,
                expected,
                actual,
                entries,
            } => {
                assert_eq!(phase, "prefixes");
                assert_eq!(expected, 2);
                assert_eq!(actual, 8);
                assert_eq!(entries, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn irregular_join_moves_source_into_target() {
        let rules = RuleSet::new(vec![Phase::irregular(
            "joins",
            vec![JoinPair::new("روح", "راح")],
        )]);
        let mut table = table_of(&["روح", "راح", "روح"]);
        Normalizer::new(&rules).normalize(&mut table).unwrap();

        assert!(!table.contains("روح"));
        let entry = table.get("راح").unwrap();
        assert_eq!(entry.forms(), vec!["راح", "روح"]);
        assert_eq!(entry.counts(), vec![1, 2]);
        assert!(entry.markers().contains(Marker::IrregularJoin));
    }

    #[test]
    fn irregular_join_follows_already_joined_targets() {
        let rules = RuleSet::new(vec![Phase::irregular(
            "joins",
            vec![JoinPair::new("أ", "ب"), JoinPair::new("ب", "ج")],
        )]);
        let mut table = table_of(&["ب", "أ", "ج"]);
        Normalizer::new(&rules).normalize(&mut table).unwrap();
        assert_eq!(keys(&table), vec!["ج"]);
        assert_eq!(table.get("ج").unwrap().total_count(), 3);
    }

    #[test]
    fn irregular_join_without_target_is_ignored() {
        let rules = RuleSet::new(vec![Phase::irregular(
            "joins",
            vec![JoinPair::new("روح", "راح")],
        )]);
        let mut table = table_of(&["روح"]);
        Normalizer::new(&rules).normalize(&mut table).unwrap();
        assert_eq!(keys(&table), vec!["روح"]);
    }

    #[test]
    fn allograph_clusters_end_in_alif_maqsura() {
        let mut rules = RuleSet::new(vec![Phase::affix(
            "allograph",
            0,
            vec![AffixRule::new(
                Transform::ReplaceEnding {
                    ending: "ي".to_string(),
                },
                vec![Affix::new("ى", Marker::Allograph)],
            )],
        )]);
        rules.ending_fixup = Some(EndingFixup {
            from: "ي".to_string(),
            to: "ى".to_string(),
        });
        let mut table = table_of(&["مصري", "مصرى", "في"]);
        Normalizer::new(&rules).normalize(&mut table).unwrap();

        assert_eq!(keys(&table), vec!["مصرى", "في"]);
        let entry = table.get("مصرى").unwrap();
        assert_eq!(entry.forms(), vec!["مصري", "مصرى"]);
    }

    #[test]
    fn fixup_leaves_colliding_keys_alone() {
        let mut table = table_of(&["مصري", "مصرى"]);
        let slot = table.slot_of("مصري").unwrap();
        table.entry_mut(slot).unwrap().mark(Marker::Allograph);
        let fixup = EndingFixup {
            from: "ي".to_string(),
            to: "ى".to_string(),
        };
        assert_eq!(fix_ambiguous_endings(&mut table, &fixup), 0);
        assert_eq!(keys(&table), vec!["مصري", "مصرى"]);
    }

    #[test]
    fn default_tables_conserve_counts() {
        let words = [
            "مدرسة", "مدرسات", "مدرستي", "بيت", "البيت", "للبيت", "وبيت", "بيتي",
            "بيتها", "أحمد", "احمد", "كتب", "كتاب", "الكتاب", "روح", "راح", "ماشفش", "شاف",
            "شف", "مصري", "مصرى", "علي", "على", "ل", "ول", "يكتب", "كتبوا", "ده", "دا",
        ];
        let mut table = table_of(&words);
        table.record("بيت", ContextSnapshot::from_tokens(Vec::new()));
        let before = table.total_count();

        let rules = RuleSet::egyptian();
        let stats = Normalizer::new(&rules).normalize(&mut table).unwrap();
        assert_eq!(stats.len(), rules.phases.len());
        assert!(stats.iter().all(|s| s.total == before));
        assert_eq!(table.total_count(), before);
        assert!(table.len() < words.len());

        let house = table.get("بيت").unwrap();
        assert!(house.forms().contains(&"البيت"));
        assert!(house.markers().contains(Marker::NounPrefix));
        assert!(house.forms().contains(&"للبيت"));
        assert!(table.get("مدرسة").unwrap().forms().contains(&"مدرسات"));
        assert!(!table.contains("دا"));
    }
}
