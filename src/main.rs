use anyhow::{Context, Result};
use std::io;
use std::path::Path;
use tracing::info;

use rust_csma_ca::config::CONFIG_FILE;
use rust_csma_ca::report::{Reporter, TextReporter};
use rust_csma_ca::{ExperimentConfig, ExperimentRunner};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    info!("... CSMA/CA simulator is started ...");

    let config = if Path::new(CONFIG_FILE).exists() {
        info!(path = CONFIG_FILE, "loading sweep config");
        ExperimentConfig::load(CONFIG_FILE).context("Failed to load sweep config")?
    } else {
        ExperimentConfig::default()
    };
    let runner = ExperimentRunner::new(config)?;
    info!(seed = runner.seed(), "rerun with this seed to reproduce");

    let records = runner.run();

    let stdout = io::stdout();
    let mut reporter = TextReporter::new(stdout.lock());
    reporter.report_all(&records)?;
    Ok(())
}
