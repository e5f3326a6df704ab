use std::net::{IpAddr, ToSocketAddrs};
use std::process;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use port_scan_rs::types::ScanReport;
use port_scan_rs::{output, ports, scanner};

/// Concurrent async TCP connect scanner with passive banner grabbing.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "port-scan-rs",
    version,
    about = "Concurrent async TCP connect scanner with passive banner grabbing.",
    after_help = "Examples:\n  port-scan-rs 192.168.1.1\n  port-scan-rs example.com -p 80,443,8000-8100\n  port-scan-rs 10.0.0.1 -p 1-65535 -t 500 -T 0.5"
)]
struct Cli {
    /// Target IP address or hostname.
    target: String,

    /// Ports to scan: comma-separated ports and inclusive ranges (e.g. 80,443,8000-8100).
    #[arg(short = 'p', long, default_value = "1-1024")]
    ports: String,

    /// Max concurrent connection attempts.
    #[arg(short = 't', long, default_value_t = 100)]
    threads: usize,

    /// Connect and banner-read timeout in seconds.
    #[arg(short = 'T', long, default_value_t = 1.0)]
    timeout: f64,

    /// Disable colored output.
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let color = !cli.no_color;

    let ports = match ports::parse_port_spec(&cli.ports) {
        Ok(p) => p,
        Err(e) => {
            eprintln!(
                "{}",
                output::error_line(&format!("Invalid port specification: {e}"), color)
            );
            process::exit(1);
        }
    };

    let timeout = match parse_timeout(cli.timeout) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", output::error_line(&format!("{e}"), color));
            process::exit(1);
        }
    };

    let target = match resolve_target(&cli.target) {
        Ok(ip) => ip,
        Err(e) => {
            eprintln!("{}", output::error_line(&format!("{e:#}"), color));
            process::exit(1);
        }
    };

    let workers = scanner::effective_concurrency(cli.threads);
    println!(
        "{}",
        output::info_line(&format!("Starting scan on {target}"), color)
    );
    println!(
        "{}",
        output::info_line(
            &format!(
                "Scanning {} ports with {} workers (timeout {}s)",
                ports.len(),
                workers,
                cli.timeout
            ),
            color
        )
    );

    // Ctrl-C cancels the scan; the token is checked again after it returns.
    let cancel = CancellationToken::new();
    let cancel_ctrlc = cancel.clone();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        cancel_ctrlc.cancel();
    });

    let started = Instant::now();
    let results =
        scanner::scan_with_cancel(target, &ports, workers, timeout, cancel.clone()).await?;

    if cancel.is_cancelled() {
        println!("{}", output::notice_line("Scan interrupted by user.", color));
        return Ok(());
    }

    let report = ScanReport::assemble(target, &ports, results, started.elapsed());
    println!();
    print!("{}", output::render_report(&report, color));
    Ok(())
}

fn parse_timeout(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        bail!("Timeout must be a positive number of seconds, got {secs}");
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|_| anyhow!("Timeout of {secs} seconds is too large"))
}

/// Accept a literal IP as-is; otherwise resolve the hostname via DNS and take
/// the first address.
fn resolve_target(target: &str) -> Result<IpAddr> {
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(ip);
    }
    let mut addrs = (target, 80u16)
        .to_socket_addrs()
        .with_context(|| format!("Could not resolve hostname: {target}"))?;
    addrs
        .next()
        .map(|a| a.ip())
        .ok_or_else(|| anyhow!("Could not resolve hostname: {target}"))
}
