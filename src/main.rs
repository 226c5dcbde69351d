use std::io::{self, BufRead, Write};
use std::sync::Arc;
use anyhow::Context;
use order_compute::api::Gateway;
use order_compute::config::loader::AppConfig;
use order_compute::core::OrderComputeEngine;
use order_compute::observability::metrics::register_metrics;
use order_compute::observability::tracing::init_tracing;

fn main() -> anyhow::Result<()> {
    let env = std::env::args().nth(1).unwrap_or_else(|| "development".to_string());

    let config = AppConfig::load(&env).context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialize tracing")?;
    register_metrics().context("failed to register metrics")?;

    let engine = OrderComputeEngine::from_config(&config).context("invalid pair configuration")?;
    let gateway = Gateway::new(Arc::new(engine));

    tracing::info!(env = %env, pairs = config.pairs.len(), "Serving requests on stdin");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(stdout, "{}", gateway.handle_json(&line))?;
        stdout.flush()?;
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}
