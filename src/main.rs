use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use gazepick::sink::{ChannelEventSink, EventSink, LogVisualSink, VisualSink};
use gazepick::{InputMsg, Session, TrackingConfig};

/// Dwell selection driver: JSON input messages on stdin, JSON events on stdout
#[derive(Parser, Debug)]
#[command(name = "gazepick")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file path (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = load_config(cli.config.as_deref())?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    runtime.block_on(run(config))
}

fn load_config(path: Option<&Path>) -> Result<TrackingConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match TrackingConfig::default_path() {
            Some(path) => path,
            None => {
                log::warn!("No config directory on this platform, using defaults");
                return Ok(TrackingConfig::default());
            }
        },
    };
    TrackingConfig::load(&path)
        .with_context(|| format!("Failed to load config: {}", path.display()))
}

async fn run(config: TrackingConfig) -> Result<()> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut session = Session::new(&config, ChannelEventSink::new(tx), LogVisualSink);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut fast = tokio::time::interval(config.ticks.fast());
    let mut slow = tokio::time::interval(config.ticks.slow());
    fast.set_missed_tick_behavior(MissedTickBehavior::Skip);
    slow.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(line) => handle_line(&mut session, &line),
                    None => break,
                }
            }
            _ = fast.tick() => {
                session.fast_tick(Instant::now());
            }
            _ = slow.tick() => {
                session.slow_tick(Instant::now());
            }
        }

        for event in rx.try_iter() {
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    log::info!("stdin closed, shutting down");
    Ok(())
}

fn handle_line<E: EventSink, V: VisualSink>(session: &mut Session<E, V>, line: &str) {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return;
    }
    match serde_json::from_str::<InputMsg>(line) {
        Ok(msg) => {
            if let Err(err) = session.handle(msg, Instant::now()) {
                log::warn!("Rejected input {:?}: {}", line, err);
            }
        }
        Err(err) => log::warn!("Malformed input {:?}: {}", line, err),
    }
}
