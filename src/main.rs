use anyhow::{Context, Result};
use clap::Parser;
use samebst::{CompareConfig, Comparator, Tree, Verdict};
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Build two random BSTs over the same values and check whether they hold the same values.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of values in each tree.
    #[arg(short = 'n', long, default_value_t = 1 << 20)]
    seed_count: i64,

    /// Values are `scale, 2 * scale, ..., seed_count * scale`.
    #[arg(short = 'k', long, default_value_t = 1)]
    scale: i64,

    /// In-flight values buffered per emission stream.
    #[arg(short, long, default_value_t = samebst::config::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Give up after this many milliseconds and report an indeterminate verdict.
    #[arg(short, long)]
    timeout_ms: Option<u64>,

    #[arg(short, long)]
    debug: bool,
}

fn setup_logging(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let start = Instant::now();
    let t1 = Tree::build(cli.seed_count, cli.scale);
    let t2 = Tree::build(cli.seed_count, cli.scale);
    info!(elapsed = ?start.elapsed(), nodes = t1.len(), "trees constructed");

    let config = CompareConfig::default().with_capacity(cli.capacity);
    let mut comparator = Comparator::new(config).context("failed to start emitters")?;

    let start = Instant::now();
    let verdict = match cli.timeout_ms {
        Some(ms) => comparator.same_within(&t1, &t2, Duration::from_millis(ms)),
        None => Verdict::from(comparator.same(&t1, &t2)),
    };
    info!(elapsed = ?start.elapsed(), "comparison computed");

    match verdict {
        Verdict::Equal => println!("same"),
        Verdict::NotEqual => println!("not same"),
        Verdict::Indeterminate => println!("indeterminate"),
    }
    Ok(())
}
