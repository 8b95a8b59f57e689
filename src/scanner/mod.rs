pub mod lexer;
pub mod mode;
pub mod rules;
pub mod string;
pub mod token;

pub use lexer::{ScanOptions, Scanner};
use token::Token;

/// Scan source code into its token reports.
pub fn scan(source: &str) -> Vec<Token> {
    lexer::scan_all(source)
}

/// Scan with explicit options.
pub fn scan_with(source: &str, options: ScanOptions) -> Vec<Token> {
    lexer::scan_all_with(source, options)
}
