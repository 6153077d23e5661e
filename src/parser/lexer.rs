//! Lexer (tokenizer) for menu declaration lines
//!
//! Splits one line of a declaration file into a flat list of tokens consumed
//! by [`super::directive`]. The scan is single-pass with a little state:
//!
//! - `#` starts a comment that runs to the end of the line
//! - runs of spaces and tabs (and stray `\r`/`\n`) separate tokens
//! - a double quote toggles "spaces are literal" until the next quote; the
//!   quote characters themselves are never part of a token
//!
//! Over-long tokens are truncated and surplus tokens are dropped. Neither is
//! an error.

/// Longest token kept, including room for the terminator of the on-disk format
pub const MAX_TOKEN_LENGTH: usize = 64;

/// Most tokens produced for a single line
pub const MAX_TOKEN_COUNT: usize = 128;

/// Tokenizer over a single line of text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    quoted: bool,
}

impl Lexer {
    pub fn new(line: &str) -> Self {
        Lexer {
            input: line.chars().collect(),
            position: 0,
            quoted: false,
        }
    }

    /// Tokenize the whole line
    pub fn tokenize(&mut self) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        loop {
            let ch = self.advance();
            let ends_line = matches!(ch, None | Some('#'));
            let separates = match ch {
                Some(' ') => !self.quoted,
                Some('\t') | Some('\r') | Some('\n') => true,
                _ => ends_line,
            };

            if separates {
                if current_len > 0 {
                    tokens.push(std::mem::take(&mut current));
                    current_len = 0;
                    if tokens.len() == MAX_TOKEN_COUNT {
                        break;
                    }
                }
                if ends_line {
                    break;
                }
            } else if ch == Some('"') {
                self.quoted = !self.quoted;
            } else if let Some(c) = ch {
                if current_len < MAX_TOKEN_LENGTH - 1 {
                    current.push(c);
                    current_len += 1;
                }
            }
        }

        tokens
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied();
        if ch.is_some() {
            self.position += 1;
        }
        ch
    }
}

/// Tokenize a single line
pub fn tokenize(line: &str) -> Vec<String> {
    Lexer::new(line).tokenize()
}
