//! Dark Matcher - replay binary
//!
//! Reads JSON-lines commands (stdin or `--input`), feeds them through one
//! matching engine and writes one JSON event per line to stdout. Logs go to
//! stderr so the event stream stays machine-readable.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dark_matcher::Replayer;

#[derive(Parser, Debug)]
#[command(name = "dark-matcher")]
#[command(about = "Replay order commands through a price-time priority matching engine")]
struct Cli {
    /// Command file (JSON lines); stdin when absent
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print the final book to stderr
    #[arg(long)]
    print_book: bool,

    /// Print an execution receipt as the last output line
    #[arg(long)]
    receipt: bool,

    /// Batch id recorded in the receipt
    #[arg(long, default_value_t = 0)]
    batch_id: u64,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let reader: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin().lock())),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut replayer = Replayer::new(cli.batch_id);

    for line in reader.lines() {
        let line = line.context("failed to read input")?;

        for event in replayer.apply_line(&line) {
            serde_json::to_writer(&mut out, &event)?;
            out.write_all(b"\n")?;
        }
    }

    let receipt = replayer.receipt();
    info!(
        batch_id = receipt.batch_id,
        orders = receipt.orders_processed,
        trades = receipt.trades_executed,
        cancelled = receipt.orders_cancelled,
        rejected = receipt.orders_rejected,
        fill_rate = receipt.fill_rate().unwrap_or(0.0),
        state_root = %receipt.state_root_hex(),
        "replay finished"
    );

    if cli.receipt {
        serde_json::to_writer(&mut out, &receipt)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    if cli.print_book {
        eprintln!("{}", replayer.engine().book());
    }

    Ok(())
}
