//! Terminal driver for the Iconic module.
//!
//! Assembles a simulated bomb from a scenario file, loads the bundled
//! dataset, optionally checks a remote source for a newer build, and drives
//! the module runtime from stdin.

mod config;
mod logging;
mod repl;
mod scenario;

use std::sync::Arc;

use anyhow::{Context, Result};

use iconic_content::BundledLoader;
use iconic_runtime::Runtime;

use config::ClientConfig;
use scenario::{Scenario, ScenarioHost};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;

    let scenario = match &config.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let host = Arc::new(ScenarioHost::new(&scenario));

    let bundled = BundledLoader::new(&config.data_dir)
        .load()
        .context("Failed to load bundled dataset")?;

    #[cfg_attr(not(feature = "remote"), allow(unused_mut))]
    let mut builder = Runtime::builder()
        .config(config.runtime_config(scenario.modules))
        .host(host.clone())
        .bundled(bundled);

    #[cfg(feature = "remote")]
    if let Some(url) = &config.remote_url {
        tracing::info!("Remote dataset source: {}", url);
        builder = builder.remote_source(Arc::new(iconic_content::HttpDatasetSource::new(url)));
    }

    #[cfg(not(feature = "remote"))]
    if config.remote_url.is_some() {
        tracing::warn!("ICONIC_REMOTE_URL is set but the remote feature is disabled");
    }

    let runtime = builder.build().await?;
    tracing::info!("Runtime started with modules {:?}", runtime.handle().module_ids());

    repl::run(runtime.handle(), host).await?;

    runtime.shutdown().await?;
    tracing::info!("Client shutdown complete");
    Ok(())
}
