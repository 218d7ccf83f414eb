//! quadtop - four-quadrant terminal dashboard for host metrics.
//!
//! Usage:
//!   quadtop                       # refresh every second
//!   quadtop -i 5                  # refresh every 5 seconds
//!   quadtop --log-file q.log -v   # debug logs to a file

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

#[cfg(target_os = "linux")]
use quadtop::collector::RealHost;
#[cfg(not(target_os = "linux"))]
use quadtop::collector::mock::MockHost;
use quadtop::collector::Collector;
use quadtop::tui::App;

/// Terminal dashboard for CPU, memory, disk and network usage.
#[derive(Parser)]
#[command(name = "quadtop", version, about = "Four-quadrant system monitor")]
struct Args {
    /// Update interval in seconds (1-60).
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=60))]
    interval: u64,

    /// Path to /proc filesystem.
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Write logs to this file. Without it logs are discarded, since the
    /// dashboard owns the terminal.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Initializes logging into `log_file`.
///
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&PathBuf>) -> std::io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("quadtop={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // help and version go to stdout and are not failures
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    if let Err(e) = init_logging(args.verbose, args.quiet, args.log_file.as_ref()) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    #[cfg(target_os = "linux")]
    let collector = Collector::new(RealHost::new(), &args.proc_path);
    #[cfg(not(target_os = "linux"))]
    let collector = Collector::new(MockHost::typical_system(), &args.proc_path);

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    info!(
        interval = args.interval,
        proc_path = %args.proc_path,
        "starting quadtop"
    );

    let result = App::new(collector, Duration::from_secs(args.interval), running)
        .and_then(App::run);
    if let Err(e) = result {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!("quadtop terminated.");
}
