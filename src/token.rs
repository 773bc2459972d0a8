//! Shell-style word splitting for a single RDB line.
//!
//! RDB lines are split the way a POSIX shell splits words:
//!
//! - Runs of unquoted non-whitespace characters form tokens
//! - `'...'` and `"..."` protect interior whitespace; the quotes are removed
//! - Quoted and unquoted pieces that touch form one token (`a"b c"d` is `ab cd`)
//! - An empty quoted string (`""` or `''`) is an empty token
//! - Outside quotes a backslash takes the next character literally
//! - Inside double quotes a backslash only escapes `"` and `\`
//! - Inside single quotes nothing is escaped
//!
//! ```rust
//! use rdb_json::tokenize;
//!
//! let tokens = tokenize(r#"#pair "wall start date" 2024-01-01"#).unwrap();
//! assert_eq!(tokens, vec!["#pair", "wall start date", "2024-01-01"]);
//!
//! // Unterminated quotes make the whole line unparsable
//! assert!(tokenize(r#"#pair "oops"#).is_err());
//! ```

use thiserror::Error;

/// Why a line could not be split into tokens.
///
/// This is a line-local condition: the parser drops the line and continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("no closing {quote} for quote opened at column {column}")]
    UnterminatedQuote { quote: char, column: usize },

    #[error("no character after escape at column {column}")]
    TrailingEscape { column: usize },
}

/// Splits `line` into tokens using shell quoting rules.
///
/// # Errors
///
/// Returns a [`TokenizeError`] if a quote is never closed or the line ends in
/// a lone backslash.
pub fn tokenize(line: &str) -> Result<Vec<String>, TokenizeError> {
    let mut tokenizer = Tokenizer::new(line);
    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

/// Cursor over one line of input.
struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Tokenizer {
            input,
            position: 0,
            column: 1,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        self.column += 1;
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if is_separator(ch) {
                self.next_char();
            } else {
                break;
            }
        }
    }

    /// Reads the next token, or `None` once only whitespace remains.
    fn next_token(&mut self) -> Result<Option<String>, TokenizeError> {
        self.skip_whitespace();
        if self.peek_char().is_none() {
            return Ok(None);
        }

        let mut token = String::new();
        while let Some(ch) = self.peek_char() {
            if is_separator(ch) {
                break;
            }
            let column = self.column;
            self.next_char();
            match ch {
                '\\' => match self.next_char() {
                    Some(escaped) => token.push(escaped),
                    None => return Err(TokenizeError::TrailingEscape { column }),
                },
                '\'' => self.read_single_quoted(&mut token, column)?,
                '"' => self.read_double_quoted(&mut token, column)?,
                other => token.push(other),
            }
        }
        Ok(Some(token))
    }

    fn read_single_quoted(&mut self, token: &mut String, column: usize) -> Result<(), TokenizeError> {
        loop {
            match self.next_char() {
                Some('\'') => return Ok(()),
                Some(ch) => token.push(ch),
                None => {
                    return Err(TokenizeError::UnterminatedQuote {
                        quote: '\'',
                        column,
                    })
                }
            }
        }
    }

    fn read_double_quoted(&mut self, token: &mut String, column: usize) -> Result<(), TokenizeError> {
        let unterminated = TokenizeError::UnterminatedQuote { quote: '"', column };
        loop {
            match self.next_char() {
                Some('"') => return Ok(()),
                Some('\\') => match self.next_char() {
                    Some(ch @ ('"' | '\\')) => token.push(ch),
                    Some(ch) => {
                        // Unknown escape - keep the backslash
                        token.push('\\');
                        token.push(ch);
                    }
                    None => return Err(unterminated),
                },
                Some(ch) => token.push(ch),
                None => return Err(unterminated),
            }
        }
    }
}

#[inline]
fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}
