//! Line-by-line dispatch of RDB directives.
//!
//! An RDB file is a sequence of lines whose first token is a directive tag:
//!
//! ```text
//! #start data file format 4
//! #pair "wall start date" "2024-01-01"
//! #altcols "incumbent" "incumbent num" "cost"
//! #altrow "incumbent" 1 10.5
//! #end data file format 4
//! ```
//!
//! | Tag | Minimum tokens | Effect |
//! |-----|----------------|--------|
//! | `#start` | 1 | Reads the token after `format` as the format version |
//! | `#end` | 1 | None (a differing format version is logged) |
//! | `#pair` | 3 | Sets `key` to the coerced, space-joined remaining tokens |
//! | `#altcols` | 3 | Defines a table, or checks a repeated definition |
//! | `#altrow` | 2 | Appends one coerced row to a defined table |
//!
//! Lines with any other first token are ignored. Lines that fail to tokenize
//! or carry too few tokens are skipped. Neither stops the conversion; only the
//! table errors described in [`Error`](crate::Error) do.

use crate::token::{tokenize, TokenizeError};
use crate::{Document, DocumentBuilder, Result, Scalar};
use std::fmt;
use tracing::{debug, trace, warn};

/// The directives the parser acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Start,
    End,
    Pair,
    AltCols,
    AltRow,
}

impl DirectiveKind {
    /// Recognizes a directive tag. Tags are case-sensitive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdb_json::DirectiveKind;
    ///
    /// assert_eq!(DirectiveKind::from_tag("#altrow"), Some(DirectiveKind::AltRow));
    /// assert_eq!(DirectiveKind::from_tag("#comment"), None);
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "#start" => Some(DirectiveKind::Start),
            "#end" => Some(DirectiveKind::End),
            "#pair" => Some(DirectiveKind::Pair),
            "#altcols" => Some(DirectiveKind::AltCols),
            "#altrow" => Some(DirectiveKind::AltRow),
            _ => None,
        }
    }

    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            DirectiveKind::Start => "#start",
            DirectiveKind::End => "#end",
            DirectiveKind::Pair => "#pair",
            DirectiveKind::AltCols => "#altcols",
            DirectiveKind::AltRow => "#altrow",
        }
    }

    /// Fewest tokens, tag included, that make the directive usable.
    #[must_use]
    pub const fn min_tokens(&self) -> usize {
        match self {
            DirectiveKind::Start | DirectiveKind::End => 1,
            DirectiveKind::AltRow => 2,
            DirectiveKind::Pair | DirectiveKind::AltCols => 3,
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Why a line was dropped without affecting the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Tokenize(TokenizeError),
    TooFewTokens {
        directive: DirectiveKind,
        found: usize,
        required: usize,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Tokenize(err) => write!(f, "{}", err),
            SkipReason::TooFewTokens {
                directive,
                found,
                required,
            } => write!(
                f,
                "{} needs at least {} tokens, found {}",
                directive, required, found
            ),
        }
    }
}

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// The directive was applied to the document.
    Applied(DirectiveKind),
    /// The line was empty or whitespace only.
    Blank,
    /// The first token is not a known directive.
    Ignored,
    /// The line was unusable and dropped.
    Skipped(SkipReason),
}

/// Per-outcome line counts for one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub applied: usize,
    pub blank: usize,
    pub ignored: usize,
    pub skipped: usize,
}

impl ParseStats {
    /// Total number of lines seen.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.applied + self.blank + self.ignored + self.skipped
    }

    fn record(&mut self, outcome: &LineOutcome) {
        match outcome {
            LineOutcome::Applied(_) => self.applied += 1,
            LineOutcome::Blank => self.blank += 1,
            LineOutcome::Ignored => self.ignored += 1,
            LineOutcome::Skipped(_) => self.skipped += 1,
        }
    }
}

/// Incremental RDB parser.
///
/// Feed it lines in order with [`feed_line`](Parser::feed_line), then call
/// [`finish`](Parser::finish). The document only becomes visible once the
/// whole input has been consumed; after a fatal error the parser should be
/// dropped.
///
/// # Examples
///
/// ```rust
/// use rdb_json::{DirectiveKind, LineOutcome, Parser};
///
/// let mut parser = Parser::new();
/// assert_eq!(
///     parser.feed_line("#pair seed 17").unwrap(),
///     LineOutcome::Applied(DirectiveKind::Pair)
/// );
/// assert_eq!(parser.feed_line("#comment hi").unwrap(), LineOutcome::Ignored);
///
/// let doc = parser.finish();
/// assert_eq!(doc.pair("seed").and_then(|v| v.as_i64()), Some(17));
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    builder: DocumentBuilder,
    line: usize,
    stats: ParseStats,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines consumed so far.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Processes one physical line.
    ///
    /// # Errors
    ///
    /// Returns the fatal table errors of
    /// [`DocumentBuilder::define_table`] and [`DocumentBuilder::append_row`],
    /// tagged with this line's number.
    pub fn feed_line(&mut self, raw: &str) -> Result<LineOutcome> {
        self.line += 1;
        let outcome = self.dispatch(raw)?;
        match &outcome {
            LineOutcome::Applied(kind) => trace!(line = self.line, directive = %kind, "applied"),
            LineOutcome::Blank => {}
            LineOutcome::Ignored => debug!(line = self.line, "ignoring unknown directive"),
            LineOutcome::Skipped(reason) => {
                debug!(line = self.line, reason = %reason, "skipping unusable line")
            }
        }
        self.stats.record(&outcome);
        Ok(outcome)
    }

    /// Ends the input and returns the finished document.
    #[must_use]
    pub fn finish(self) -> Document {
        debug!(
            lines = self.stats.lines(),
            applied = self.stats.applied,
            ignored = self.stats.ignored,
            skipped = self.stats.skipped,
            "input consumed"
        );
        self.builder.finalize()
    }

    fn dispatch(&mut self, raw: &str) -> Result<LineOutcome> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(LineOutcome::Blank);
        }

        let tokens = match tokenize(trimmed) {
            Ok(tokens) => tokens,
            Err(err) => return Ok(LineOutcome::Skipped(SkipReason::Tokenize(err))),
        };

        let Some(kind) = tokens.first().and_then(|tag| DirectiveKind::from_tag(tag)) else {
            return Ok(LineOutcome::Ignored);
        };

        if tokens.len() < kind.min_tokens() {
            return Ok(LineOutcome::Skipped(SkipReason::TooFewTokens {
                directive: kind,
                found: tokens.len(),
                required: kind.min_tokens(),
            }));
        }

        match kind {
            DirectiveKind::Start => {
                if let Some(declared) = format_field(&tokens) {
                    self.builder.set_format(declared);
                }
            }
            DirectiveKind::End => {
                if let Some(Some(declared)) = format_field(&tokens) {
                    if self.builder.format() != Some(declared) {
                        warn!(
                            line = self.line,
                            start = ?self.builder.format(),
                            end = declared,
                            "#end format differs from #start"
                        );
                    }
                }
            }
            DirectiveKind::Pair => {
                let value = Scalar::coerce(&tokens[2..].join(" "));
                if let Some(previous) = self.builder.set_pair(tokens[1].clone(), value) {
                    trace!(line = self.line, key = %tokens[1], previous = %previous, "pair overwritten");
                }
            }
            DirectiveKind::AltCols => {
                self.builder
                    .define_table(&tokens[1], &tokens[2..], self.line)?;
            }
            DirectiveKind::AltRow => {
                self.builder
                    .append_row(&tokens[1], &tokens[2..], self.line, raw)?;
            }
        }

        Ok(LineOutcome::Applied(kind))
    }
}

/// Finds the first `format` token and reads the token after it.
///
/// Returns `None` when there is no `format` token followed by another token,
/// `Some(None)` when the following token is not an integer.
fn format_field(tokens: &[String]) -> Option<Option<i64>> {
    tokens
        .windows(2)
        .find(|window| window[0] == "format")
        .map(|window| crate::scalar::parse_integer(&window[1]))
}
