use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use is_terminal::IsTerminal;
use tabjson::{ParseOptions, Record, WriteOptions, Writer};

/// Re-formats JSON into a sorted-key, tab-indented layout.
///
/// tj reads JSON from stdin or a file, parses it strictly, and writes it back
/// with object keys in canonical order, objects one entry per line, and
/// arrays on a single line. Useful for producing stable, diff-friendly JSON.
#[derive(Parser, Debug)]
#[command(name = "tj")]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file. If not specified, reads from stdin.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output file. If not specified, writes to stdout.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Significant digits for float output.
    #[arg(short, long, default_value = "12")]
    precision: usize,

    /// Maximum nesting depth accepted when parsing and writing.
    #[arg(long, default_value = "128")]
    max_depth: usize,

    /// Wrap the output in a named top-level record: `"KEY":<TAB>value`.
    #[arg(short, long, value_name = "KEY")]
    record: Option<String>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("tj: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let input = match &args.file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?,
        None => {
            if io::stdin().is_terminal() {
                return Err("no input file and stdin is a terminal; pipe JSON in or pass a FILE".into());
            }
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let parse_options = ParseOptions { max_depth: args.max_depth };
    let value = tabjson::parse_with(&input, parse_options)?;

    let writer = Writer::new(WriteOptions {
        float_precision: args.precision,
        max_depth: args.max_depth,
    });

    let mut rendered = Vec::new();
    match args.record {
        Some(key) => writer.write_record(&mut rendered, &Record::new(key, value))?,
        None => writer.write_value(&mut rendered, &value)?,
    }
    rendered.push(b'\n');

    match args.output {
        Some(path) => fs::write(&path, &rendered)
            .map_err(|e| format!("cannot write '{}': {}", path.display(), e))?,
        None => io::stdout().write_all(&rendered)?,
    }

    Ok(())
}
