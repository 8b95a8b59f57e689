use std::io::{self, BufWriter, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use toylex::ScanDiagnostic;
use toylex::report::{Format, Reporter};
use toylex::scanner::{self, ScanOptions};

#[derive(Parser, Debug)]
#[command(name = "toylex", about = "Token scanner for a small Java-like language")]
struct Cli {
    /// Source file to scan (omit to read standard input)
    file: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Longest decoded string literal kept, in characters; the rest is dropped
    #[arg(long, value_name = "N", default_value_t = ScanOptions::default().max_string_len)]
    max_string_len: usize,

    /// Also render lexical errors as diagnostics on stderr
    #[arg(long)]
    diagnostics: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "toylex=debug" } else { "toylex=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn read_source(cli: &Cli) -> Result<String> {
    let bytes = match &cli.file {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("could not open source file '{}'", path.display()))?,
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("read standard input")?;
            bytes
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn source_name(cli: &Cli) -> String {
    cli.file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = read_source(&cli)?;
    let options = ScanOptions {
        max_string_len: cli.max_string_len,
    };

    let stdout = io::stdout();
    let mut reporter = Reporter::new(BufWriter::new(stdout.lock()), cli.format);
    for token in scanner::Scanner::with_options(&source, options) {
        reporter.emit(&token).context("write token report")?;
        if cli.diagnostics {
            if let Some(diag) = ScanDiagnostic::from_token(&token) {
                let diag = diag.with_source_code(source_name(&cli), source.clone());
                eprintln!("{:?}", miette::Report::new(diag));
            }
        }
    }
    let summary = reporter.finish().context("flush token reports")?;
    tracing::debug!(tokens = summary.tokens, errors = summary.errors, "scan finished");

    Ok(())
}
