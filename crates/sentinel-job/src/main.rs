//! Traffic Sentinel entry point.
//!
//! Runs exactly one invocation: simulated (or replayed) traffic is counted
//! per source address, classified, trimmed to the top entries, and written
//! as a JSON snapshot for the dashboard. The invocation response is printed
//! to stdout; the process exits non-zero when the run failed.

use std::process::ExitCode;

use sentinel_job::{JobConfig, LogFormat, build_pipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the pipeline cannot be
/// constructed. Run failures are reported through the invocation response.
#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing(LogFormat::from_env());

    info!("traffic-sentinel starting");

    let config = JobConfig::from_env()?;
    info!(
        bucket = config.bucket,
        top_k = config.top_k,
        publish_timeout_ms = config.publish_timeout.as_millis(),
        "configuration loaded"
    );

    let mut pipeline = build_pipeline(&config)?;
    let response = pipeline.handle_invocation(&serde_json::Value::Null).await;

    println!("{}", serde_json::to_string(&response)?);

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Initialize structured logging.
fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
