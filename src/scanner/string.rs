use winnow::combinator::{alt, preceded};
use winnow::prelude::*;
use winnow::token::{any, take_till};

use crate::scanner::rules::Input;

/// Legacy bound on decoded string length, in characters.
pub const DEFAULT_STRING_CAPACITY: usize = 4095;

/// Decoded contents of the string literal being scanned.
///
/// Characters offered past `capacity` are dropped without error.
#[derive(Debug, Clone)]
pub struct StringBuffer {
    text: String,
    chars: usize,
    capacity: usize,
    truncated: bool,
}

impl StringBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::new(),
            chars: 0,
            capacity,
            truncated: false,
        }
    }

    pub fn push(&mut self, c: char) {
        if self.chars < self.capacity {
            self.text.push(c);
            self.chars += 1;
        } else {
            self.truncated = true;
        }
    }

    pub fn push_str(&mut self, s: &str) {
        for c in s.chars() {
            self.push(c);
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.chars = 0;
        self.truncated = false;
    }

    /// Hand out the contents and leave the buffer empty.
    pub fn take(&mut self) -> String {
        self.chars = 0;
        self.truncated = false;
        std::mem::take(&mut self.text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for StringBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STRING_CAPACITY)
    }
}

/// One lexeme inside a string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece<'a> {
    Close,
    LineBreak,
    Escape(char),
    /// backslash right before a newline or the end of input
    LoneBackslash,
    Text(&'a str),
}

pub fn next_piece<'a>(input: &mut Input<'a>) -> ModalResult<Piece<'a>> {
    alt((
        '"'.value(Piece::Close),
        '\n'.value(Piece::LineBreak),
        preceded('\\', any.verify(|c: &char| *c != '\n')).map(Piece::Escape),
        '\\'.value(Piece::LoneBackslash),
        take_till(1.., ['\\', '"', '\n']).map(Piece::Text),
    ))
    .parse_next(input)
}

/// Append the decoded form of `\X`. Unknown escapes go in verbatim.
pub fn decode_escape(buffer: &mut StringBuffer, escaped: char) {
    match escaped {
        'n' => buffer.push('\n'),
        't' => buffer.push('\t'),
        '"' => buffer.push('"'),
        '\\' => buffer.push('\\'),
        other => {
            buffer.push('\\');
            buffer.push(other);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use winnow::stream::LocatingSlice;

    fn pieces(source: &str) -> Vec<Piece<'_>> {
        let mut input = LocatingSlice::new(source);
        let mut out = Vec::new();
        while let Ok(piece) = next_piece(&mut input) {
            out.push(piece);
        }
        out
    }

    #[test]
    fn splits_text_escapes_and_quote() {
        assert_eq!(
            pieces(r#"ab\"cd" tail"#),
            vec![
                Piece::Text("ab"),
                Piece::Escape('"'),
                Piece::Text("cd"),
                Piece::Close,
                Piece::Text(" tail"),
            ]
        );
    }

    #[test]
    fn newline_ends_text_run() {
        assert_eq!(
            pieces("abc\nx"),
            vec![Piece::Text("abc"), Piece::LineBreak, Piece::Text("x")]
        );
    }

    #[test]
    fn backslash_before_newline_is_lone() {
        assert_eq!(
            pieces("a\\\n"),
            vec![Piece::Text("a"), Piece::LoneBackslash, Piece::LineBreak]
        );
    }

    #[test]
    fn backslash_at_end_is_lone() {
        assert_eq!(pieces("\\"), vec![Piece::LoneBackslash]);
    }

    #[rstest]
    #[case('n', "\n")]
    #[case('t', "\t")]
    #[case('"', "\"")]
    #[case('\\', "\\")]
    #[case('q', "\\q")]
    #[case('0', "\\0")]
    fn escapes(#[case] escaped: char, #[case] expected: &str) {
        let mut buffer = StringBuffer::default();
        decode_escape(&mut buffer, escaped);
        assert_eq!(buffer.as_str(), expected);
    }

    #[test]
    fn buffer_drops_past_capacity() {
        let mut buffer = StringBuffer::with_capacity(3);
        buffer.push_str("abcdef");
        assert_eq!(buffer.as_str(), "abc");
        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_truncated());
    }

    #[test]
    fn capacity_counts_characters_not_bytes() {
        let mut buffer = StringBuffer::with_capacity(2);
        buffer.push_str("ñé!");
        assert_eq!(buffer.as_str(), "ñé");
    }

    #[test]
    fn unknown_escape_can_be_cut_in_half() {
        let mut buffer = StringBuffer::with_capacity(1);
        decode_escape(&mut buffer, 'q');
        assert_eq!(buffer.as_str(), "\\");
    }

    #[test]
    fn take_resets() {
        let mut buffer = StringBuffer::with_capacity(2);
        buffer.push_str("xyz");
        assert_eq!(buffer.take(), "xy");
        assert!(buffer.is_empty());
        assert!(!buffer.is_truncated());
        buffer.push('k');
        assert_eq!(buffer.as_str(), "k");
    }

    #[test]
    fn clear_discards_contents() {
        let mut buffer = StringBuffer::default();
        buffer.push_str("partial");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_str(), "");
    }
}
