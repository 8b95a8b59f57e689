use std::io::{self, Write};

use crate::scanner::token::Token;

/// Output layout of the report stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// `LINE: n  TOKEN: KIND          VALUE: text`
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub tokens: usize,
    pub errors: usize,
}

/// Writes one report per token to a sink, in scan order.
pub struct Reporter<W: Write> {
    out: W,
    format: Format,
    summary: Summary,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: Format) -> Self {
        Self {
            out,
            format,
            summary: Summary::default(),
        }
    }

    pub fn emit(&mut self, token: &Token) -> io::Result<()> {
        match self.format {
            Format::Text => writeln!(self.out, "{token}")?,
            Format::Json => {
                serde_json::to_writer(&mut self.out, token)?;
                writeln!(self.out)?;
            }
        }
        self.summary.tokens += 1;
        if token.is_error() {
            self.summary.errors += 1;
        }
        Ok(())
    }

    /// Flush the sink and return the counts.
    pub fn finish(mut self) -> io::Result<Summary> {
        self.out.flush()?;
        Ok(self.summary)
    }
}
