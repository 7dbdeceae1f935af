//! Splits raw text into words, unknown tokens and the delimiter runs between them.

use regex::Regex;
use wordcount_types::Token;

/// One or more delimiter units: markup entities, punctuation (Arabic and
/// typographic variants included), ASCII whitespace and directional marks.
/// No-break and other Unicode spaces stay inside tokens.
const DELIMITER_RUN: &str = r##"(?:&lt|&gt|&amp|[,.%]|[\-=|()<>'"#&/*;:?! \t\n\r\x0B\x0C\x{06D4}\x{2013}\x{2014}\x{27E8}\x{27E9}\x{2018}\x{2019}\x{2039}\x{203A}\x{201C}\x{201D}\x{2022}\x{061F}\x{060C}\x{200F}\x{202E}\x{202C}\x{200D}])+"##;
const ARABIC: &str = r"[\x{0600}-\x{06FF}]";

#[derive(Debug, Clone)]
pub struct Tokenizer {
    delimiters: Regex,
    arabic: Regex,
}

impl Tokenizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            delimiters: Regex::new(DELIMITER_RUN)?,
            arabic: Regex::new(ARABIC)?,
        })
    }

    pub fn tokens<'t>(&'t self, text: &'t str) -> Tokens<'t> {
        Tokens {
            tokenizer: self,
            text,
            pos: 0,
        }
    }

    /// Anything containing an Arabic-block character is a word.
    pub fn classify(&self, text: &str) -> Token {
        if self.arabic.is_match(text) {
            Token::word(text)
        } else {
            Token::unknown(text)
        }
    }
}

/// `,`, `.` and `%` only delimit when no digit follows, so `3.5` and `10%5`
/// stay whole.
fn trim_before_digit(rest: &str, end: usize) -> usize {
    let next_is_digit = rest[end..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit());
    let ends_in_separator = rest[..end].ends_with(|c: char| matches!(c, ',' | '.' | '%'));
    if next_is_digit && ends_in_separator {
        end - 1
    } else {
        end
    }
}

pub struct Tokens<'t> {
    tokenizer: &'t Tokenizer,
    text: &'t str,
    pos: usize,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let mut from = 0;
        let word_len = loop {
            let Some(found) = self.tokenizer.delimiters.find_at(rest, from) else {
                break rest.len();
            };
            let end = trim_before_digit(rest, found.end());
            if end == found.start() {
                from = found.end();
                continue;
            }
            if found.start() > 0 {
                break found.start();
            }
            self.pos += end;
            return Some(Token::delimiter(&rest[..end]));
        };

        self.pos += word_len;
        Some(self.tokenizer.classify(&rest[..word_len]))
    }
}
