use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::scanner::token::Token;

// ============= Lexical errors (reported inline as ERROR tokens) =============

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("unterminated string before end of line")]
    UnterminatedString,

    #[error("unrecognized character: '{0}'")]
    UnrecognizedCharacter(char),
}

// ============= Diagnostics (miette rendering of ERROR tokens) =============

#[derive(Error, Debug, Diagnostic)]
pub enum ScanDiagnostic {
    #[error("line {line}: unterminated string before end of line")]
    #[diagnostic(
        code(toylex::unterminated_string),
        help("close the string with '\"' before the line ends")
    )]
    UnterminatedString {
        line: usize,
        #[label("string starts here")]
        span: SourceSpan,
        #[source_code]
        src: miette::NamedSource<String>,
    },

    #[error("line {line}: unrecognized character '{ch}'")]
    #[diagnostic(code(toylex::unrecognized_character))]
    UnrecognizedCharacter {
        ch: char,
        line: usize,
        #[label("here")]
        span: SourceSpan,
        #[source_code]
        src: miette::NamedSource<String>,
    },
}

impl ScanDiagnostic {
    /// Diagnostic for an ERROR token; `None` for any other token.
    pub fn from_token(token: &Token) -> Option<Self> {
        let span = SourceSpan::from(token.span);
        let src = miette::NamedSource::new("input", String::new());
        match token.error.as_ref()? {
            ScanError::UnterminatedString => Some(Self::UnterminatedString {
                line: token.line,
                span,
                src,
            }),
            ScanError::UnrecognizedCharacter(ch) => Some(Self::UnrecognizedCharacter {
                ch: *ch,
                line: token.line,
                span,
                src,
            }),
        }
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(self, name: impl Into<String>, source: impl Into<String>) -> Self {
        let src = miette::NamedSource::new(name.into(), source.into());
        match self {
            Self::UnterminatedString { line, span, .. } => {
                Self::UnterminatedString { line, span, src }
            }
            Self::UnrecognizedCharacter { ch, line, span, .. } => {
                Self::UnrecognizedCharacter { ch, line, span, src }
            }
        }
    }
}

// ============= Tests =============
