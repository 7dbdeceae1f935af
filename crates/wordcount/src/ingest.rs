//! Slides the context window over the token stream and counts every word that
//! passes the center position.

use tracing::{debug, info, warn};
use wordcount_types::{Token, TokenKind};

use crate::config::CounterConfig;
use crate::entry::ContextSnapshot;
use crate::error::{CountError, TokenizationAnomaly};
use crate::table::FrequencyTable;
use crate::window::ContextWindow;

/// First sentinel placed in the window before any input is read.
pub const START_SENTINEL: &str = "at the beginning";
/// Filler for the remaining slots before the center.
pub const FILL_SENTINEL: &str = ">";

#[derive(Debug, Clone)]
pub struct Ingested {
    pub table: FrequencyTable,
    /// Input tokens that passed the center of the window, of any kind.
    pub tokens_processed: usize,
    /// Whether the token bound stopped processing early.
    pub truncated: bool,
    pub anomalies: Vec<TokenizationAnomaly>,
}

/// Count the words of `tokens`.
///
/// The window is primed with sentinels so the first input token sits at the
/// center; at least `(window_len + 1) / 2` input tokens are required to fill it.
pub fn ingest<I>(tokens: I, config: &CounterConfig) -> Result<Ingested, CountError>
where
    I: IntoIterator<Item = Token>,
{
    config.validate()?;
    let mut window = ContextWindow::new(config.window_len);
    let center = window.center();
    let needed = config.window_len - center;

    push(&mut window, Token::unknown(START_SENTINEL));
    for _ in 1..center {
        push(&mut window, Token::unknown(FILL_SENTINEL));
    }

    let mut stream = tokens.into_iter();
    for got in 0..needed {
        let Some(token) = stream.next() else {
            return Err(CountError::InputTooShort { needed, got });
        };
        push(&mut window, token);
    }

    let mut table = FrequencyTable::new();
    let mut anomalies = Vec::new();
    let mut processed = 0usize;
    let mut truncated = false;

    loop {
        let Some(current) = window.peek_at(center) else {
            break;
        };
        if processed >= config.max_tokens {
            warn!(
                "stopping after {processed} tokens: safety limit of {} reached",
                config.max_tokens
            );
            truncated = true;
            break;
        }

        if current.text.is_empty() {
            let text: String = window.iter().map(|t| t.text.as_str()).collect();
            warn!("tokenization problem at token {processed}, check the input around: {text}");
            anomalies.push(TokenizationAnomaly {
                position: processed,
                window: text,
            });
        } else if current.kind == TokenKind::Word {
            table.record(&current.text, ContextSnapshot::capture(&window));
        }
        processed += 1;

        match stream.next() {
            Some(token) => push(&mut window, token),
            None => {
                window.pop();
            }
        }
    }

    info!(
        "processed {processed} tokens, {} distinct words, {} occurrences",
        table.len(),
        table.total_count()
    );
    debug!("{} tokenization anomalies", anomalies.len());
    Ok(Ingested {
        table,
        tokens_processed: processed,
        truncated,
        anomalies,
    })
}

fn push(window: &mut ContextWindow<Token>, token: Token) {
    // Overwriting windows never reject.
    let _ = window.push(token);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(window_len: usize) -> CounterConfig {
        CounterConfig {
            window_len,
            ..CounterConfig::default()
        }
    }

    fn words(items: &[&str]) -> Vec<Token> {
        items.iter().map(|w| Token::word(*w)).collect()
    }

    #[test]
    fn counts_every_word_with_centered_context() {
        let ingested = ingest(words(&["كتاب", "كتب", "كتاب"]), &config(3)).unwrap();
        assert_eq!(ingested.tokens_processed, 3);
        assert_eq!(ingested.table.total_count(), 3);

        let entry = ingested.table.get("كتاب").unwrap();
        assert_eq!(entry.total_count(), 2);
        let first = entry.variants()[0].contexts()[0].tokens();
        let texts: Vec<&str> = first.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec![START_SENTINEL, "كتاب", "كتب"]);
    }

    #[test]
    fn skips_delimiters_and_unknown_tokens() {
        let tokens = vec![
            Token::word("في"),
            Token::delimiter(" "),
            Token::unknown("2012"),
            Token::delimiter(" "),
            Token::word("في"),
        ];
        let ingested = ingest(tokens, &config(3)).unwrap();
        assert_eq!(ingested.tokens_processed, 5);
        assert_eq!(ingested.table.len(), 1);
        assert_eq!(ingested.table.get("في").unwrap().total_count(), 2);
    }

    #[test]
    fn fails_when_window_cannot_fill() {
        let err = ingest(words(&["كتاب"]), &config(3)).unwrap_err();
        assert!(matches!(
            err,
            CountError::InputTooShort { needed: 2, got: 1 }
        ));

        let err = ingest(words(&["ا", "ب", "ج"]), &config(15)).unwrap_err();
        assert!(matches!(
            err,
            CountError::InputTooShort { needed: 8, got: 3 }
        ));
    }

    #[test]
    fn empty_tokens_are_reported_and_skipped() {
        let tokens = vec![Token::word("ده"), Token::word(""), Token::word("ده")];
        let ingested = ingest(tokens, &config(3)).unwrap();
        assert_eq!(ingested.anomalies.len(), 1);
        assert_eq!(ingested.anomalies[0].position, 1);
        assert_eq!(ingested.table.total_count(), 2);
    }

    #[test]
    fn stops_at_token_limit() {
        let config = CounterConfig {
            window_len: 3,
            max_tokens: 2,
            ..CounterConfig::default()
        };
        let ingested = ingest(words(&["ا", "ب", "ج", "د"]), &config).unwrap();
        assert!(ingested.truncated);
        assert_eq!(ingested.tokens_processed, 2);
        assert_eq!(ingested.table.total_count(), 2);
    }

    #[test]
    fn rejects_invalid_window() {
        let err = ingest(words(&["ا", "ب"]), &config(4)).unwrap_err();
        assert!(matches!(err, CountError::Configuration(_)));
    }
}
