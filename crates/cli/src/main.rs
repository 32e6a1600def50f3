//! Set-associative cache simulator CLI.
//!
//! Replays a load/store trace against a write-back, write-allocate LRU cache
//! and prints one summary line. It performs:
//! 1. **Configuration:** Parses `-s`, `-b`, `-E`, `-t` and validates the geometry.
//! 2. **Simulation:** Runs the trace through the cache, optionally echoing each access (`-v`).
//! 3. **Reporting:** Prints the counters as text (default) or JSON (`--json`).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser};
use serde::Serialize;
use tracing::error;
use tracing_subscriber::EnvFilter;

use csim_core::common::{ConfigError, SimError};
use csim_core::{CacheGeometry, CacheStats, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator (write-back, write-allocate, LRU)",
    long_about = "Replay a memory trace of `L <hexaddr>,<size>` / `S <hexaddr>,<size>` lines against a cache of 2^s sets, E lines per set, and 2^b-byte blocks.\n\nThe -s, -b, -E, and -t options must be supplied for all simulations.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 0 -E 4 -b 0 -t traces/dave.trace"
)]
struct Cli {
    /// Verbose mode: report the effect of each memory operation.
    #[arg(short = 'v')]
    verbose: bool,

    /// Number of set index bits (there are 2**s sets).
    #[arg(short = 's', long = "set-bits", value_name = "s")]
    set_bits: Option<u32>,

    /// Number of block bits (there are 2**b bytes per block).
    #[arg(short = 'b', long = "block-bits", value_name = "b")]
    block_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', long = "ways", value_name = "E")]
    ways: Option<usize>,

    /// File name of the memory trace to process.
    #[arg(short = 't', long = "trace", value_name = "trace")]
    trace: Option<PathBuf>,

    /// Print the summary as a JSON object instead of the text line.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Builds the validated geometry from `-s`, `-b`, and `-E`.
    fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        let set_bits = self.set_bits.ok_or(ConfigError::MissingArgument('s'))?;
        let block_bits = self.block_bits.ok_or(ConfigError::MissingArgument('b'))?;
        let ways = self.ways.ok_or(ConfigError::MissingArgument('E'))?;
        CacheGeometry::new(set_bits, block_bits, ways)
    }
}

/// Result of a completed run, as printed by `--json`.
#[derive(Debug, Serialize)]
struct Summary {
    geometry: CacheGeometry,
    #[serde(flatten)]
    stats: CacheStats,
    miss_rate: f64,
}

impl Summary {
    fn new(geometry: CacheGeometry, stats: CacheStats) -> Self {
        Self {
            geometry,
            stats,
            miss_rate: stats.miss_rate(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match run(&cli) {
        Ok(summary) => {
            if cli.json {
                match serde_json::to_string(&summary) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("Error serializing statistics: {e}");
                        process::exit(1);
                    }
                }
            } else {
                summary.stats.print();
            }
        }
        Err(e) => {
            let _ = report(&e, &mut io::stderr().lock());
            process::exit(1);
        }
    }
}

/// Validates the configuration, replays the trace, and returns the final counters.
fn run(cli: &Cli) -> Result<Summary, SimError> {
    let geometry = cli.geometry()?;
    let trace = cli.trace.as_deref().ok_or(ConfigError::MissingArgument('t'))?;

    let mut sim = Simulator::new(geometry)?;
    if cli.verbose {
        sim.run_file(trace, |record, outcome| {
            println!(
                "{} {:x},{} {}",
                record.op,
                record.addr,
                record.size,
                outcome.label()
            );
        })?;
    } else {
        sim.run_file(trace, |_, _| {})?;
    }
    Ok(Summary::new(geometry, sim.finish()))
}

/// Writes the diagnostic for a failed run.
fn report(err: &SimError, out: &mut impl Write) -> io::Result<()> {
    match err {
        SimError::Config(_) => {
            writeln!(out, "{err}\n")?;
            writeln!(out, "{}", Cli::command().render_usage())
        }
        SimError::Parse(detail) => {
            error!(%detail, "rejected trace line");
            writeln!(out, "Error while parsing trace file.")
        }
        SimError::Allocation { .. } => {
            error!(%err, "cache allocation failed");
            writeln!(out, "Allocation error.")
        }
        SimError::Io { .. } | SimError::Read(_) => writeln!(out, "{err}"),
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
