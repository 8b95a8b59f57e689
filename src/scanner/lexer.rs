use winnow::prelude::*;
use winnow::stream::{LocatingSlice, Location, Stream};
use winnow::token::{any, take_till};

use crate::error::ScanError;
use crate::scanner::mode::{Mode, Trigger};
use crate::scanner::rules::{Action, Input, longest_match};
use crate::scanner::string::{self, DEFAULT_STRING_CAPACITY, Piece, StringBuffer};
use crate::scanner::token::{Span, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Maximum decoded length of a string literal, in characters.
    pub max_string_len: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_STRING_CAPACITY,
        }
    }
}

/// Mode-driven scanner over one source text. Yields token reports in source
/// order; lexical errors come out as ERROR tokens and scanning carries on.
pub struct Scanner<'a> {
    input: Input<'a>,
    mode: Mode,
    line: usize,
    buffer: StringBuffer,
    /// byte offset of the opening quote of the current string
    string_start: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, ScanOptions::default())
    }

    pub fn with_options(source: &'a str, options: ScanOptions) -> Self {
        Self {
            input: LocatingSlice::new(source),
            mode: Mode::Default,
            line: 1,
            buffer: StringBuffer::with_capacity(options.max_string_len),
            string_start: 0,
        }
    }

    /// Current line number (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn offset(&self) -> usize {
        self.input.current_token_start()
    }

    /// Consume `len` bytes, counting the newlines they contain.
    fn advance(&mut self, len: usize) -> &'a str {
        let lexeme = self.input.next_slice(len);
        self.line += lexeme.matches('\n').count();
        lexeme
    }

    fn transition(&mut self, trigger: Trigger) {
        let next = self.mode.transition(trigger);
        tracing::debug!(line = self.line, from = %self.mode, to = %next, "mode transition");
        self.mode = next;
    }

    fn step(&mut self) -> Option<Token> {
        match self.mode {
            Mode::Default => self.step_default(),
            Mode::BlockComment => {
                self.step_block_comment();
                None
            }
            Mode::String => self.step_string(),
        }
    }

    fn step_default(&mut self) -> Option<Token> {
        let start = self.offset();
        let Some((rule, len)) = longest_match(&mut self.input) else {
            return self.unrecognized(start);
        };
        let lexeme = self.advance(len);
        let span = Span::new(start, len);
        tracing::trace!(rule = rule.name, lexeme, "matched");

        match rule.action {
            Action::Emit(kind) => Some(Token::new(kind, lexeme, self.line, span)),
            Action::Skip => None,
            Action::Enter(trigger) => {
                if trigger == Trigger::OpenQuote {
                    self.buffer.clear();
                    self.string_start = start;
                }
                self.transition(trigger);
                None
            }
        }
    }

    fn unrecognized(&mut self, start: usize) -> Option<Token> {
        let c = any::<_, winnow::error::ContextError>
            .parse_next(&mut self.input)
            .ok()?;
        let span = Span::new(start, c.len_utf8());
        Some(Token::error(
            ScanError::UnrecognizedCharacter(c),
            self.line,
            span,
        ))
    }

    fn step_block_comment(&mut self) {
        if self.input.starts_with("*/") {
            self.advance(2);
            self.transition(Trigger::CloseComment);
            return;
        }
        let body = take_till::<_, _, winnow::error::ContextError>(1.., '*')
            .parse_next(&mut self.input.clone())
            .map(str::len)
            .unwrap_or(1);
        self.advance(body);
    }

    fn step_string(&mut self) -> Option<Token> {
        let piece = string::next_piece(&mut self.input).ok()?;
        match piece {
            Piece::Close => {
                self.transition(Trigger::CloseQuote);
                if self.buffer.is_truncated() {
                    tracing::debug!(
                        line = self.line,
                        kept = self.buffer.len(),
                        "string literal truncated"
                    );
                }
                let span = Span::new(self.string_start, self.offset() - self.string_start);
                Some(Token::new(
                    TokenKind::String,
                    self.buffer.take(),
                    self.line,
                    span,
                ))
            }
            Piece::LineBreak => {
                let span = Span::new(self.string_start, self.offset() - 1 - self.string_start);
                self.line += 1;
                self.buffer.clear();
                self.transition(Trigger::LineBreak);
                Some(Token::error(ScanError::UnterminatedString, self.line, span))
            }
            Piece::Escape(c) => {
                string::decode_escape(&mut self.buffer, c);
                None
            }
            Piece::LoneBackslash => {
                self.buffer.push('\\');
                None
            }
            Piece::Text(text) => {
                self.buffer.push_str(text);
                None
            }
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while !self.input.is_empty() {
            if let Some(token) = self.step() {
                tracing::trace!(line = token.line, kind = %token.kind, "token");
                return Some(token);
            }
        }
        None
    }
}

/// Scan all of `source` with default options.
pub fn scan_all(source: &str) -> Vec<Token> {
    Scanner::new(source).collect()
}

pub fn scan_all_with(source: &str, options: ScanOptions) -> Vec<Token> {
    Scanner::with_options(source, options).collect()
}
