use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wordcount::config::{
    DEFAULT_MAX_SAMPLES, DEFAULT_MAX_TOKENS, DEFAULT_SEED, DEFAULT_TOP_N, DEFAULT_WINDOW_LEN,
};
use wordcount::{CounterConfig, Tokenizer, WordCounter};
use wordcount_morph::RuleSet;

#[derive(Debug, Parser)]
#[command(name = "wordcount")]
#[command(about = "Count Egyptian Arabic words, merge their variants and sample their contexts")]
struct Args {
    /// UTF-8 text to count.
    file: PathBuf,
    /// Report at least this many of the most frequent words.
    #[arg(default_value_t = DEFAULT_TOP_N)]
    top_n: usize,
    /// Context samples per reported word.
    #[arg(default_value_t = DEFAULT_MAX_SAMPLES)]
    samples: usize,
    /// Tokens of context around each word, the word included. Must be odd.
    #[arg(long, env = "WORDCOUNT_WINDOW", default_value_t = DEFAULT_WINDOW_LEN)]
    window: usize,
    #[arg(long, env = "WORDCOUNT_SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// JSON rule file replacing the built-in Egyptian tables.
    #[arg(long, env = "WORDCOUNT_RULES")]
    rules: Option<PathBuf>,
    /// Stop after this many tokens.
    #[arg(long, env = "WORDCOUNT_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: usize,
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let rules = match &args.rules {
        Some(path) => {
            info!("using rules from {}", path.display());
            RuleSet::load(path)?
        }
        None => RuleSet::egyptian(),
    };
    let config = CounterConfig {
        window_len: args.window,
        top_n: args.top_n,
        max_samples: args.samples,
        seed: args.seed,
        max_tokens: args.max_tokens,
    };
    let counter = WordCounter::new(config, rules).context("invalid configuration")?;

    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("read {}", args.file.display()))?;
    info!("processing text in {}", args.file.display());

    let start = Instant::now();
    let tokenizer = Tokenizer::new().context("compile tokenizer patterns")?;
    let report = counter
        .run(tokenizer.tokens(&text))
        .with_context(|| format!("count words in {}", args.file.display()))?;
    info!(
        "counted {} words in {} ms",
        report.words_counted,
        start.elapsed().as_millis()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &report)?;
    } else {
        serde_json::to_writer(&mut out, &report)?;
    }
    writeln!(out)?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
