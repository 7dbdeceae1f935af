//! Ranked, sampled view of a normalized table, ready for serialization.

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use wordcount_types::Token;

use crate::config::CounterConfig;
use crate::entry::WordEntry;
use crate::error::TokenizationAnomaly;
use crate::rank::{rank, top};
use crate::sample::sample_contexts;
use crate::table::FrequencyTable;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub tokens_processed: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
    /// Word occurrences counted, across all entries.
    pub words_counted: u64,
    pub reported_occurrences: u64,
    pub unreported_occurrences: u64,
    pub entries: Vec<ReportEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<TokenizationAnomaly>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub word: String,
    pub count: u64,
    pub markers: Vec<&'static str>,
    pub forms: Vec<FormCount>,
    pub samples: Vec<Sample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormCount {
    pub form: String,
    pub count: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stems: Vec<String>,
}

/// One context snippet and the surface form found at its center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub form: String,
    pub tokens: Vec<Token>,
}

/// Per-run bookkeeping carried from ingestion into the report.
#[derive(Debug, Clone, Default)]
pub struct RunTotals {
    pub tokens_processed: usize,
    pub truncated: bool,
    pub anomalies: Vec<TokenizationAnomaly>,
}

impl Report {
    /// Rank `table`, keep the top entries and sample their contexts.
    ///
    /// Each entry samples from a generator freshly seeded with `config.seed`,
    /// so an entry's samples do not depend on which entries precede it.
    pub fn build(table: &FrequencyTable, totals: RunTotals, config: &CounterConfig) -> Self {
        let ranked = rank(table);
        let kept = top(&ranked, config.top_n);

        let entries: Vec<ReportEntry> = kept
            .iter()
            .map(|(word, entry)| report_entry(word, entry, config))
            .collect();

        let words_counted = table.total_count();
        let reported_occurrences: u64 = entries.iter().map(|e| e.count).sum();
        Report {
            tokens_processed: totals.tokens_processed,
            truncated: totals.truncated,
            words_counted,
            reported_occurrences,
            unreported_occurrences: words_counted - reported_occurrences,
            entries,
            anomalies: totals.anomalies,
        }
    }
}

fn report_entry(word: &str, entry: &WordEntry, config: &CounterConfig) -> ReportEntry {
    let mut forms: Vec<FormCount> = entry
        .variants()
        .iter()
        .map(|v| FormCount {
            form: v.form().to_string(),
            count: v.count(),
            stems: v.stems().to_vec(),
        })
        .collect();
    forms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.form.cmp(&b.form)));

    let mut rng = StdRng::seed_from_u64(config.seed);
    let samples = sample_contexts(entry, config.max_samples, &mut rng)
        .into_iter()
        .map(|(form, context)| Sample {
            form: form.to_string(),
            tokens: context.tokens().to_vec(),
        })
        .collect();

    ReportEntry {
        word: word.to_string(),
        count: entry.total_count(),
        markers: entry.markers().tags(),
        forms,
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ContextSnapshot;
    use wordcount_types::Marker;

    fn table_of(words: &[&str]) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for (i, word) in words.iter().enumerate() {
            let context = vec![Token::unknown(i.to_string()), Token::word(*word)];
            table.record(word, ContextSnapshot::from_tokens(context));
        }
        table
    }

    fn config(top_n: usize, max_samples: usize) -> CounterConfig {
        CounterConfig {
            top_n,
            max_samples,
            ..CounterConfig::default()
        }
    }

    #[test]
    fn totals_split_into_reported_and_unreported() {
        let table = table_of(&["في", "في", "في", "من", "من", "ده"]);
        let report = Report::build(&table, RunTotals::default(), &config(1, 10));
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.words_counted, 6);
        assert_eq!(report.reported_occurrences, 3);
        assert_eq!(report.unreported_occurrences, 3);
    }

    #[test]
    fn forms_list_by_count_then_alphabetically() {
        let mut table = table_of(&["بيت", "وبيت", "البيت", "البيت"]);
        for key in ["وبيت", "البيت"] {
            let slot = table.slot_of(key).unwrap();
            let absorbed = table.take(slot).unwrap();
            table.entry_mut(0).unwrap().merge(absorbed);
        }
        table.entry_mut(0).unwrap().mark(Marker::NounPrefix);
        table.compact();

        let report = Report::build(&table, RunTotals::default(), &config(10, 10));
        let entry = &report.entries[0];
        assert_eq!(entry.word, "بيت");
        assert_eq!(entry.count, 4);
        assert_eq!(entry.markers, vec!["noun-prefix"]);
        let forms: Vec<(&str, u64)> = entry
            .forms
            .iter()
            .map(|f| (f.form.as_str(), f.count))
            .collect();
        assert_eq!(forms, vec![("البيت", 2), ("بيت", 1), ("وبيت", 1)]);
        assert_eq!(entry.samples.len(), 4);
    }

    #[test]
    fn samples_are_capped_and_reproducible() {
        let words: Vec<&str> = std::iter::repeat_n("كتاب", 40).collect();
        let table = table_of(&words);
        let first = Report::build(&table, RunTotals::default(), &config(5, 7));
        let second = Report::build(&table, RunTotals::default(), &config(5, 7));
        assert_eq!(first.entries[0].samples.len(), 7);
        assert_eq!(first.entries[0].samples, second.entries[0].samples);
    }

    #[test]
    fn serializes_without_empty_optional_fields() {
        let table = table_of(&["ده"]);
        let report = Report::build(&table, RunTotals::default(), &config(1, 1));
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("anomalies").is_none());
        assert!(json.get("truncated").is_none());
        assert!(json["entries"][0]["forms"][0].get("stems").is_none());
        assert_eq!(json["entries"][0]["samples"][0]["tokens"][1]["kind"], "word");
    }
}
