use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::ScanError;

/// Kind tag of a token report. The display label is what the reporter prints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumIter,
)]
pub enum TokenKind {
    // Numeric literals
    #[strum(serialize = "HEX")]
    Hex,
    #[strum(serialize = "SCIENTIFIC")]
    Scientific,
    #[strum(serialize = "FLOAT")]
    Float,
    #[strum(serialize = "INT")]
    Int,

    // Operators
    #[strum(serialize = "OP_REL")]
    OpRel,
    #[strum(serialize = "OP_LOG")]
    OpLog,
    #[strum(serialize = "OP_ARIT")]
    OpArit,

    #[strum(serialize = "ID")]
    Id,
    #[strum(serialize = "STRING")]
    String,

    // Punctuation
    #[strum(serialize = "LPAREN")]
    LParen,
    #[strum(serialize = "RPAREN")]
    RParen,
    #[strum(serialize = "LBRACE")]
    LBrace,
    #[strum(serialize = "RBRACE")]
    RBrace,
    #[strum(serialize = "SEMI")]
    Semi,
    #[strum(serialize = "COMMA")]
    Comma,

    #[strum(serialize = "ERROR")]
    Error,
}

impl TokenKind {
    pub fn label(self) -> &'static str {
        self.into()
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.offset.into(), span.len)
    }
}

/// One token report: a recognized lexeme, a decoded string, or a lexical error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub line: usize,
    pub kind: TokenKind,
    pub value: String,
    #[serde(skip)]
    pub span: Span,
    #[serde(skip)]
    pub error: Option<ScanError>,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: usize, span: Span) -> Self {
        Self {
            line,
            kind,
            value: value.into(),
            span,
            error: None,
        }
    }

    /// Build an ERROR token whose value is the error's message.
    pub fn error(error: ScanError, line: usize, span: Span) -> Self {
        Self {
            line,
            kind: TokenKind::Error,
            value: error.to_string(),
            span,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LINE: {}  TOKEN: {:<12}  VALUE: {}",
            self.line,
            self.kind.label(),
            self.value
        )
    }
}
