//! RAILBIRD — Poker Table Symbol Engine & Decision-Support Agent
//!
//! Entry point. Loads configuration, initialises structured logging,
//! builds the provider registry, and drives scraped table frames from the
//! replay source through the session loop with graceful shutdown.

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, error, info};

use railbird::config;
use railbird::engine::registry::EngineRegistry;
use railbird::engine::session::{FrameReport, Session};
use railbird::history::recorder::TextRecorder;
use railbird::history::{HandHistory, NullHistory};
use railbird::table::replay::ReplaySource;
use railbird::table::FrameSource;

const BANNER: &str = r#"
 ____      _    ___ _     ____ ___ ____  ____
|  _ \    / \  |_ _| |   | __ )_ _|  _ \|  _ \
| |_) |  / _ \  | || |   |  _ \| || |_) | | | |
|  _ <  / ___ \ | || |___| |_) | ||  _ <| |_| |
|_| \_\/_/   \_\___|_____|____/___|_| \_\____/

  Poker-table symbol engine & decision support
  v0.1.0 — Session Agent
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from TOML
    let cfg = config::AppConfig::load("config.toml")?;

    // Initialise structured logging
    init_logging();

    // Print startup banner
    println!("{BANNER}");
    info!(
        agent_name = %cfg.agent.name,
        frame_interval_ms = cfg.agent.frame_interval_ms,
        replay = %cfg.source.replay_path,
        "RAILBIRD starting up"
    );

    // -- Initialise components -------------------------------------------

    // Hand-history sink: a timestamped text log, or nothing at all
    let history: Box<dyn HandHistory> = if cfg.history.enabled {
        Box::new(TextRecorder::create(&cfg.history.path)?)
    } else {
        debug!("Hand-history recording disabled");
        Box::new(NullHistory)
    };

    // Provider registry (validates names, symbols, dependency order)
    let registry = EngineRegistry::standard()?;

    // Session driver (takes ownership of registry and history sink)
    let mut session = Session::new(
        registry,
        history,
        cfg.debug.clone(),
        cfg.watch.symbols.clone(),
    );

    // Frame source
    let mut source = ReplaySource::from_file(&cfg.source.replay_path, cfg.table.clone())?;
    info!(source = %source.name(), "Frame source ready");

    // -- Main loop -------------------------------------------------------

    let frame_interval = Duration::from_millis(cfg.agent.frame_interval_ms);
    let mut interval = tokio::time::interval(frame_interval);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!(
        interval_ms = cfg.agent.frame_interval_ms,
        "Entering frame loop. Press Ctrl+C to stop."
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match source.next_frame().await {
                    Ok(Some(frame)) => {
                        let report = session.process_frame(&frame);
                        log_frame_report(&report);
                    }
                    Ok(None) => {
                        info!("Frame source exhausted.");
                        break;
                    }
                    Err(e) => {
                        error!(error = %e, "Frame source failed");
                        break;
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received.");
                break;
            }
        }
    }

    info!(
        frames = session.frames(),
        hands = session.hands(),
        connections = session.connections(),
        "RAILBIRD shut down cleanly."
    );

    Ok(())
}

/// Log one frame report — chatty frames at info, quiet ones at debug.
fn log_frame_report(report: &FrameReport) {
    if report.eventful() {
        info!("{report}");
    } else {
        debug!("{report}");
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("railbird=info"));

    let json_logging = std::env::var("RAILBIRD_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
