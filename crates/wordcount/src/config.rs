use thiserror::Error;
use wordcount_morph::RuleError;

pub const DEFAULT_WINDOW_LEN: usize = 15;
pub const DEFAULT_TOP_N: usize = 100;
pub const DEFAULT_MAX_SAMPLES: usize = 10;
pub const DEFAULT_SEED: u64 = 22;
pub const DEFAULT_MAX_TOKENS: usize = 100_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("context window length must be odd and at least 3, got {0}")]
    WindowLength(usize),
    #[error("token limit must be positive")]
    ZeroTokenLimit,
    #[error("invalid rule set: {0}")]
    Rules(#[from] RuleError),
}

/// Knobs for one counting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    /// Tokens captured around each counted word, the word included.
    pub window_len: usize,
    /// Minimum number of ranked entries to report.
    pub top_n: usize,
    /// Maximum context samples per reported entry.
    pub max_samples: usize,
    pub seed: u64,
    /// Hard bound on processed tokens.
    pub max_tokens: usize,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            window_len: DEFAULT_WINDOW_LEN,
            top_n: DEFAULT_TOP_N,
            max_samples: DEFAULT_MAX_SAMPLES,
            seed: DEFAULT_SEED,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl CounterConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.window_len < 3 || self.window_len % 2 == 0 {
            return Err(ConfigurationError::WindowLength(self.window_len));
        }
        if self.max_tokens == 0 {
            return Err(ConfigurationError::ZeroTokenLimit);
        }
        Ok(())
    }
}
