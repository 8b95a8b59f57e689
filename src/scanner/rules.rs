//! Default-mode rule table.
//!
//! Rules are declared in rank order. At every position the scanner runs all of
//! them and keeps the longest match; on equal length the earlier rule wins.
//! That is what keeps `0xFF` a single hex literal and `1.5e3` a single
//! scientific literal instead of a number followed by an identifier.

use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::stream::{LocatingSlice, Location, Stream};
use winnow::token::{any, one_of, take_till, take_while};

use crate::scanner::mode::Trigger;
use crate::scanner::token::TokenKind;

pub(crate) type Input<'a> = LocatingSlice<&'a str>;

type Matcher = fn(&mut Input<'_>) -> ModalResult<()>;

/// What the scanner does with a lexeme once its rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Emit(TokenKind),
    Skip,
    Enter(Trigger),
}

pub struct Rule {
    pub name: &'static str,
    pub action: Action,
    matcher: Matcher,
}

pub static RULES: &[Rule] = &[
    // Numbers: hex, scientific, float, int
    Rule {
        name: "hex",
        action: Action::Emit(TokenKind::Hex),
        matcher: hex,
    },
    Rule {
        name: "scientific",
        action: Action::Emit(TokenKind::Scientific),
        matcher: scientific,
    },
    Rule {
        name: "float",
        action: Action::Emit(TokenKind::Float),
        matcher: float,
    },
    Rule {
        name: "int",
        action: Action::Emit(TokenKind::Int),
        matcher: int,
    },
    // Two-character operators
    Rule {
        name: "rel2",
        action: Action::Emit(TokenKind::OpRel),
        matcher: relational_pair,
    },
    Rule {
        name: "log2",
        action: Action::Emit(TokenKind::OpLog),
        matcher: logical_pair,
    },
    // Single-character operators
    Rule {
        name: "rel1",
        action: Action::Emit(TokenKind::OpRel),
        matcher: relational,
    },
    Rule {
        name: "arit",
        action: Action::Emit(TokenKind::OpArit),
        matcher: arithmetic,
    },
    Rule {
        name: "not",
        action: Action::Emit(TokenKind::OpLog),
        matcher: not,
    },
    Rule {
        name: "id",
        action: Action::Emit(TokenKind::Id),
        matcher: identifier,
    },
    // Punctuation
    Rule {
        name: "lparen",
        action: Action::Emit(TokenKind::LParen),
        matcher: lparen,
    },
    Rule {
        name: "rparen",
        action: Action::Emit(TokenKind::RParen),
        matcher: rparen,
    },
    Rule {
        name: "lbrace",
        action: Action::Emit(TokenKind::LBrace),
        matcher: lbrace,
    },
    Rule {
        name: "rbrace",
        action: Action::Emit(TokenKind::RBrace),
        matcher: rbrace,
    },
    Rule {
        name: "semi",
        action: Action::Emit(TokenKind::Semi),
        matcher: semi,
    },
    Rule {
        name: "comma",
        action: Action::Emit(TokenKind::Comma),
        matcher: comma,
    },
    // Trivia and mode openers
    Rule {
        name: "line_comment",
        action: Action::Skip,
        matcher: line_comment,
    },
    Rule {
        name: "block_comment",
        action: Action::Enter(Trigger::OpenComment),
        matcher: block_comment_open,
    },
    Rule {
        name: "string",
        action: Action::Enter(Trigger::OpenQuote),
        matcher: quote,
    },
    Rule {
        name: "newline",
        action: Action::Skip,
        matcher: newline,
    },
    Rule {
        name: "whitespace",
        action: Action::Skip,
        matcher: whitespace,
    },
];

/// Find the winning rule at the current position and the byte length of its
/// lexeme. The input is left where it started.
pub fn longest_match(input: &mut Input<'_>) -> Option<(&'static Rule, usize)> {
    let checkpoint = input.checkpoint();
    let origin = input.current_token_start();
    let mut best: Option<(&'static Rule, usize)> = None;

    for rule in RULES {
        if (rule.matcher)(input).is_ok() {
            let len = input.current_token_start() - origin;
            if len > 0 && best.is_none_or(|(_, longest)| len > longest) {
                best = Some((rule, len));
            }
        }
        input.reset(&checkpoint);
    }

    best
}

fn hex(input: &mut Input<'_>) -> ModalResult<()> {
    (
        alt(("0x", "0X")),
        take_while(1.., |c: char| c.is_ascii_hexdigit()),
    )
        .void()
        .parse_next(input)
}

/// `12.` or `12.34`
fn point_mantissa(input: &mut Input<'_>) -> ModalResult<()> {
    (digit1, '.', digit0).void().parse_next(input)
}

/// `.5`
fn fraction_mantissa(input: &mut Input<'_>) -> ModalResult<()> {
    ('.', digit1).void().parse_next(input)
}

fn exponent(input: &mut Input<'_>) -> ModalResult<()> {
    (one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)
        .void()
        .parse_next(input)
}

fn scientific(input: &mut Input<'_>) -> ModalResult<()> {
    (alt((point_mantissa, int, fraction_mantissa)), exponent)
        .void()
        .parse_next(input)
}

fn float(input: &mut Input<'_>) -> ModalResult<()> {
    alt((point_mantissa, fraction_mantissa)).parse_next(input)
}

fn int(input: &mut Input<'_>) -> ModalResult<()> {
    digit1.void().parse_next(input)
}

fn relational_pair(input: &mut Input<'_>) -> ModalResult<()> {
    alt(("==", "!=", "<=", ">=")).void().parse_next(input)
}

fn logical_pair(input: &mut Input<'_>) -> ModalResult<()> {
    alt(("&&", "||")).void().parse_next(input)
}

fn relational(input: &mut Input<'_>) -> ModalResult<()> {
    one_of(['<', '>']).void().parse_next(input)
}

fn arithmetic(input: &mut Input<'_>) -> ModalResult<()> {
    one_of(['+', '-', '*', '/']).void().parse_next(input)
}

fn not(input: &mut Input<'_>) -> ModalResult<()> {
    '!'.void().parse_next(input)
}

fn identifier(input: &mut Input<'_>) -> ModalResult<()> {
    (
        any.verify(|c: &char| c.is_ascii_alphabetic() || *c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .void()
        .parse_next(input)
}

fn lparen(input: &mut Input<'_>) -> ModalResult<()> {
    '('.void().parse_next(input)
}

fn rparen(input: &mut Input<'_>) -> ModalResult<()> {
    ')'.void().parse_next(input)
}

fn lbrace(input: &mut Input<'_>) -> ModalResult<()> {
    '{'.void().parse_next(input)
}

fn rbrace(input: &mut Input<'_>) -> ModalResult<()> {
    '}'.void().parse_next(input)
}

fn semi(input: &mut Input<'_>) -> ModalResult<()> {
    ';'.void().parse_next(input)
}

fn comma(input: &mut Input<'_>) -> ModalResult<()> {
    ','.void().parse_next(input)
}

/// `//` through end of line, newline excluded
fn line_comment(input: &mut Input<'_>) -> ModalResult<()> {
    ("//", take_till(0.., '\n')).void().parse_next(input)
}

fn block_comment_open(input: &mut Input<'_>) -> ModalResult<()> {
    "/*".void().parse_next(input)
}

fn quote(input: &mut Input<'_>) -> ModalResult<()> {
    '"'.void().parse_next(input)
}

fn newline(input: &mut Input<'_>) -> ModalResult<()> {
    '\n'.void().parse_next(input)
}

fn whitespace(input: &mut Input<'_>) -> ModalResult<()> {
    take_while(1.., [' ', '\t', '\r']).void().parse_next(input)
}
