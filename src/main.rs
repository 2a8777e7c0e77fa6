//! `enigma`: encrypts and decrypts messages with a configured rotor machine.
//!
//! **Usage:**
//! ```text
//! enigma <CONFIG> [INPUT] [OUTPUT]
//! ```
//!
//! Reads the machine description from `CONFIG`, then processes `INPUT`
//! (standard input if omitted) and writes to `OUTPUT` (standard output if
//! omitted). Exits with status 1 on any error.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use enigma::config::parse_config;
use enigma::session::process;

/// Rotor cipher machine simulator.
#[derive(Parser)]
#[command(
    name = "enigma",
    version,
    about = "Encrypt and decrypt messages with a rotor cipher machine"
)]
struct Args {
    /// Machine configuration file.
    config: PathBuf,

    /// File of settings and messages (default: standard input).
    input: Option<PathBuf>,

    /// File for processed messages (default: standard output).
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_line(&err));
            ExitCode::FAILURE
        }
    }
}

/// Formats `err` and its causes as one `Error: ...` line.
fn error_line(err: &anyhow::Error) -> String {
    format!("Error: {err:#}")
}

/// Loads the machine and processes the whole input.
fn run(args: &Args) -> Result<()> {
    let text = fs::read_to_string(&args.config)
        .with_context(|| format!("could not open {}", args.config.display()))?;
    let mut machine = parse_config(&text)
        .with_context(|| format!("invalid configuration in {}", args.config.display()))?;

    let input: Box<dyn io::BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn io::Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("could not open {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    process(&mut machine, input, output)?;
    Ok(())
}
