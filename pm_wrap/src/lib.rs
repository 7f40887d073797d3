//! pm_wrap
//!
//! Command line wrapper around the pattern matching engine: argument
//! parsing, sequence file ingestion, logging and error reporting.
#![deny(missing_docs)]

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use dnaseq::{read_pattern, read_sequence};
use itertools::Itertools;
use log::{debug, info, LevelFilter};
use pattern_match::{ExactScanner, HashedScanner, Modulus, SearchMode};
use pm_parameters::Parameters;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

/// Name of the binary.
pub const CMD: &str = "pattern_matching";

/// The `<ALG>` argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Algorithm(pub SearchMode);

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Algorithm> {
        Ok(Algorithm(match s.trim_start_matches('-') {
            "bf" | "brute-force" => SearchMode::BruteForce,
            "kr" | "karp-rabin" => SearchMode::KarpRabin,
            _ => bail!("Invalid algorithm. Use -bf for Brute Force or -kr for Karp-Rabin"),
        }))
    }
}

/// Count the occurrences of a DNA pattern in a DNA sequence.
///
/// Only the first line of each file is read. Characters other than
/// A, C, G, T (either case) are ignored.
#[derive(Parser, Debug)]
#[clap(name = CMD, version)]
pub struct PatternMatching {
    /// Matching algorithm: -bf for Brute Force or -kr for Karp-Rabin
    #[clap(value_name = "ALG", allow_hyphen_values = true)]
    pub algorithm: Algorithm,

    /// File holding the DNA sequence to search
    #[clap(value_name = "DNA_SEQUENCE_FILE")]
    pub dna_file: PathBuf,

    /// File holding the pattern to search for
    #[clap(value_name = "PATTERN_FILE")]
    pub pattern_file: PathBuf,

    /// Log progress to stderr
    #[clap(long)]
    pub verbose: bool,
}

/// Parameters from the global `parameters.toml`, or the defaults.
pub fn load_parameters() -> Result<Parameters> {
    Ok(Parameters {
        modulus: *pm_parameters::modulus()?,
        max_sequence_len: *pm_parameters::max_sequence_len()?,
    })
}

/// Read both inputs and count the matches with the selected algorithm.
pub fn run(args: &PatternMatching, params: &Parameters) -> Result<usize> {
    let modulus = Modulus::new(params.modulus).context("modulus must be at least 1")?;

    let text = read_sequence(&args.dna_file, "DNA sequence", params.max_sequence_len)
        .context("Failed to read DNA sequence file")?;
    let pattern = read_pattern(&args.pattern_file, params.max_sequence_len)
        .context("Failed to read pattern file")?;
    info!(
        "searching {} bases for a {} base pattern using {}",
        text.len(),
        pattern.len(),
        args.algorithm.0
    );

    let matches = match args.algorithm.0 {
        SearchMode::BruteForce => ExactScanner.matches(&text, &pattern).count(),
        SearchMode::KarpRabin => {
            let mut hits = HashedScanner::with_modulus(modulus).matches(&text, &pattern);
            let n = hits.by_ref().count();
            debug!(
                "{} fingerprint collisions rejected (modulus {})",
                hits.collisions(),
                modulus.get()
            );
            n
        }
    };
    info!("{matches} matches");
    Ok(matches)
}

/// The line printed on success.
pub fn report(matches: usize) -> String {
    format!("The pattern was found: {matches} times")
}

/// Install the logger. `RUST_LOG` overrides the level.
pub fn init_log(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Convert an io::error to a string and strip "(os error 2)" from the end.
fn io_error_to_string(err: &std::io::Error) -> String {
    let s = err.to_string();
    s.strip_suffix(&format!(" (os error {})", err.raw_os_error().unwrap_or(0)))
        .unwrap_or(&s)
        .to_string()
}

/// Format an error with its chain of causes.
pub fn format_error_chain(err: &anyhow::Error) -> String {
    err.chain()
        .map(|e| match e.downcast_ref::<std::io::Error>() {
            Some(io_err) => io_error_to_string(io_err),
            None => e.to_string(),
        })
        .join("\n\tCaused by: ")
}

/// Print an error chain.
pub fn print_error_chain(err: &anyhow::Error) {
    println!("ERROR: {}", format_error_chain(err));
}
