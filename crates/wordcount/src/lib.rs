//! Frequency counting for Egyptian Arabic text.
//!
//! Words are counted as they pass the center of a sliding context window,
//! then merged into clusters by the phases of a [`RuleSet`], ranked, and
//! reported with a reproducible sample of their contexts.
//!
//! ```rust
//! use wordcount::{CounterConfig, WordCounter};
//! use wordcount_morph::RuleSet;
//! use wordcount_types::Token;
//!
//! let config = CounterConfig { window_len: 3, ..CounterConfig::default() };
//! let counter = WordCounter::new(config, RuleSet::egyptian()).unwrap();
//! let tokens = ["البيت", " ", "بيت", " ", "بيت"].map(|t| {
//!     if t == " " { Token::delimiter(t) } else { Token::word(t) }
//! });
//! let report = counter.run(tokens).unwrap();
//! assert_eq!(report.entries[0].word, "بيت");
//! assert_eq!(report.entries[0].count, 3);
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod ingest;
pub mod normalize;
pub mod rank;
pub mod report;
pub mod sample;
pub mod table;
pub mod tokenize;
pub mod window;

pub use config::{ConfigurationError, CounterConfig};
pub use entry::{ContextSnapshot, Variant, WordEntry};
pub use error::{CountError, TokenizationAnomaly};
pub use ingest::{Ingested, ingest};
pub use normalize::{Normalizer, PhaseStats};
pub use report::{FormCount, Report, ReportEntry, RunTotals, Sample};
pub use table::FrequencyTable;
pub use tokenize::Tokenizer;
pub use window::{ContextWindow, WindowFull};

use tracing::info;
use wordcount_morph::{RuleSet, Stemmer};
use wordcount_types::Token;

/// Counts, merges and reports one token stream at a time.
pub struct WordCounter {
    config: CounterConfig,
    rules: RuleSet,
    stemmer: Option<Box<dyn Stemmer>>,
}

impl WordCounter {
    pub fn new(config: CounterConfig, rules: RuleSet) -> Result<Self, ConfigurationError> {
        config.validate()?;
        rules.validate()?;
        Ok(Self {
            config,
            rules,
            stemmer: None,
        })
    }

    /// Attach stems to every reported form.
    pub fn with_stemmer(mut self, stemmer: impl Stemmer + 'static) -> Self {
        self.stemmer = Some(Box::new(stemmer));
        self
    }

    /// Ingest and normalize, leaving ranking to the caller.
    pub fn count<I>(&self, tokens: I) -> Result<Ingested, CountError>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut ingested = ingest(tokens, &self.config)?;
        let counted = ingested.table.total_count();
        let phases = Normalizer::new(&self.rules).normalize(&mut ingested.table)?;
        info!(
            "{} phases merged {} forms into {} entries",
            phases.len(),
            phases.iter().map(|p| p.merges).sum::<usize>(),
            ingested.table.len()
        );
        debug_assert_eq!(ingested.table.total_count(), counted);

        if let Some(stemmer) = &self.stemmer {
            ingested.table.attach_stems(stemmer.as_ref());
        }
        Ok(ingested)
    }

    pub fn run<I>(&self, tokens: I) -> Result<Report, CountError>
    where
        I: IntoIterator<Item = Token>,
    {
        let Ingested {
            table,
            tokens_processed,
            truncated,
            anomalies,
        } = self.count(tokens)?;
        let totals = RunTotals {
            tokens_processed,
            truncated,
            anomalies,
        };
        Ok(Report::build(&table, totals, &self.config))
    }
}
