//! CLI tool to convert an RDB file into JSON.
//!
//! Usage:
//!   rdb-to-json [RDB_FILE] [--pretty] [--indent N] [-o OUTPUT] [-v]
//!
//! If RDB_FILE is omitted or `-`, reads standard input. JSON is written to
//! standard output unless `-o` is given. Nothing is written when the input
//! cannot be converted.

use clap::Parser as ClapParser;
use rdb_json::{to_string_with_options, Document, JsonOptions, Parser, Result};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Convert an RDB file (search experiment format) to JSON.
#[derive(ClapParser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to RDB file (default: read from standard input)
    path: Option<String>,

    /// Pretty-print JSON with indentation
    #[arg(short, long)]
    pretty: bool,

    /// Spaces per indentation level when pretty-printing
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Write JSON to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let input: Box<dyn BufRead> = match args.path.as_deref() {
        None | Some("-") => Box::new(io::stdin().lock()),
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                eprintln!("Failed to open RDB file '{}': {}", path, e);
                return ExitCode::FAILURE;
            }
        },
    };

    let document = match convert(input) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error while parsing RDB input: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let options = JsonOptions::new()
        .with_pretty(args.pretty)
        .with_indent(args.indent);

    match write_output(&document, &options, args.output.as_ref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn convert(input: Box<dyn BufRead>) -> Result<Document> {
    let mut parser = Parser::new();
    for line in input.lines() {
        parser.feed_line(&line?)?;
    }

    let stats = *parser.stats();
    info!(
        lines = stats.lines(),
        applied = stats.applied,
        ignored = stats.ignored,
        skipped = stats.skipped,
        "parsed RDB input"
    );
    Ok(parser.finish())
}

fn write_output(document: &Document, options: &JsonOptions, output: Option<&PathBuf>) -> Result<()> {
    let mut json = to_string_with_options(document, options)?;
    if options.pretty {
        json.push('\n');
    }

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, json.as_bytes())?;
            debug!(path = %path.display(), bytes = json.len(), "wrote JSON");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(json.as_bytes())?;
            handle.flush()?;
        }
    }
    Ok(())
}
