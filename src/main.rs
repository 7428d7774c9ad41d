use std::path::PathBuf;
use std::time::{Duration, Instant};

use netscan_rs::types::{ScanProgress, ScanSummary};
use netscan_rs::{ports, scanner, sink, targets};

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// netscan-rs — Concurrency-bounded async TCP connect port scanner.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "netscan-rs",
    version,
    about = "Concurrency-bounded async TCP connect port scanner.",
    long_about = None
)]
struct Cli {
    /// Host to scan: domain name, IPv4 literal, or CIDR block.
    /// Optional when --input is given.
    host: Option<String>,

    /// Ports to scan (e.g. 80,443 or 1-1000, or "-" for all 65535).
    #[arg(short, long, default_value = "1-1000")]
    ports: String,

    /// Max concurrent connection attempts.
    #[arg(short = 't', long = "threads", default_value_t = scanner::DEFAULT_CONCURRENCY)]
    threads: usize,

    /// File of hosts/domains, one per line; combined with HOST if both given.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// File to receive one plain-text line per open-port finding.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Per-attempt connect timeout in milliseconds.
    #[arg(long = "timeout-ms", default_value_t = scanner::DEFAULT_CONNECT_TIMEOUT_MS)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    if cli.host.is_none() && cli.input.is_none() {
        bail!("you must provide a host or an input file (--input)");
    }

    // All input validation happens up front; any failure here terminates the
    // run before a single connection attempt is made.
    let mut addrs = Vec::new();
    if let Some(host) = cli.host.as_deref() {
        addrs.extend(targets::expand_host(host).await?);
    }
    if let Some(path) = cli.input.as_deref() {
        addrs.extend(targets::load_hosts_from_path(path).await?);
    }
    let port_list = ports::parse_ports(&cli.ports)?;
    let tasks = targets::build_work_set(&addrs, &port_list);

    let outfile = match cli.output.as_deref() {
        Some(path) => Some(
            File::create(path)
                .await
                .with_context(|| format!("failed to open output file {}", path.display()))?,
        ),
        None => None,
    };

    println!(
        "{}",
        format!(
            "Starting scan: {} address(es) x {} port(s) = {} attempts, {} concurrent, {}ms timeout",
            addrs.len(),
            port_list.len(),
            tasks.len(),
            cli.threads,
            cli.timeout_ms
        )
        .blue()
    );

    let (tx, rx) = mpsc::unbounded_channel();
    let sink_task = tokio::spawn(sink::drain(rx, outfile));

    // Ctrl-C stops issuing new attempts; in-flight ones finish on their own.
    let cancel = CancellationToken::new();
    let cancel_ctrlc = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        cancel_ctrlc.cancel();
    });

    let progress = scanner::run_scan_with_progress(
        &tasks,
        cli.threads,
        Duration::from_millis(cli.timeout_ms),
        tx,
        cancel,
        ScanProgress::new(),
    )
    .await?;

    // The executor dropped its sender; the sink drains and returns.
    sink_task.await.context("result sink task failed")?;

    let summary = ScanSummary::from_progress(&progress, start.elapsed());
    print_summary(&summary);

    Ok(())
}

fn print_summary(summary: &ScanSummary) {
    let secs = summary.elapsed.as_secs();
    println!(
        "\n{}",
        format!(
            "Scan completed in {} minutes and {} seconds: {} open, {} closed, {} errors ({} attempts)",
            secs / 60,
            secs % 60,
            summary.open,
            summary.closed,
            summary.errors,
            summary.total
        )
        .yellow()
    );
}
