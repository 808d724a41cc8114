use std::sync::Arc;

use clap::Parser;

use pulse_engine::{EventIngestor, HealthReporter, MetricsAggregator, SessionStore};
use pulse_server::{AppState, ServerConfig};
use pulse_telemetry::{init_telemetry, MetricsRecorder, TelemetryConfig, TelemetryEmitter};

/// In-process interaction telemetry aggregator.
#[derive(Parser, Debug)]
#[command(name = "pulse", version)]
struct Cli {
    /// Port to listen on (overrides PULSE_PORT).
    #[arg(long)]
    port: Option<u16>,

    /// Log level (overrides PULSE_LOG_LEVEL).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level.to_lowercase();
    }
    config.validate()?;

    init_telemetry(&TelemetryConfig {
        log_level: config.log_level.clone(),
        json_logs: config.json_logs(),
    });

    let recorder = Arc::new(MetricsRecorder::new());
    let emitter: Arc<dyn TelemetryEmitter> = recorder.clone();
    let store = Arc::new(SessionStore::new());
    let metrics = Arc::new(MetricsAggregator::new());
    let ingestor = Arc::new(EventIngestor::new(store.clone(), metrics.clone(), emitter));
    let reporter = Arc::new(HealthReporter::new(store.clone(), metrics.clone()));

    // The store never evicts on its own; this binary owns the timer.
    let _sweeper =
        pulse_server::start_sweep_task(store, config.session_ttl, config.sweep_interval);

    let state = AppState {
        ingestor,
        reporter,
        metrics,
        recorder,
    };
    let handle = pulse_server::start(config, state).await?;
    tracing::info!(port = handle.port, "pulse ready");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}
