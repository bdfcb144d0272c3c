//! High-level runtime orchestrator.
//!
//! The runtime installs the bundled dataset, owns the module worker and the
//! remote check task, and exposes a builder-based API for clients.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use iconic_content::{BundledData, DatasetSource, DatasetStore};
use iconic_core::{IconicConfig, PuzzleOrchestrator};

use crate::api::{ModuleHost, Result, RuntimeError, RuntimeHandle};
use crate::events::{DataEvent, Event, EventBus};
use crate::workers::{Command, ModuleWorker, spawn_remote_check};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub iconic: IconicConfig,
    /// Number of module instances mounted on the host bomb.
    pub module_count: usize,
    /// Interval between solved-list polls (one frame by default).
    pub poll_interval: Duration,
    /// Pause between forced-solve presses.
    pub forced_solve_delay: Duration,
    /// Session seed for part selection; random when `None`.
    pub seed: Option<u64>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            iconic: IconicConfig::default(),
            module_count: 1,
            poll_interval: Duration::from_millis(16),
            forced_solve_delay: Duration::from_millis(100),
            seed: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime hosting one or more Iconic modules
///
/// Design: Runtime owns workers and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
    fetch_handle: Option<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// An unfinished remote check is abandoned. The worker stops once every
    /// outstanding handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        if let Some(fetch_handle) = self.fetch_handle {
            fetch_handle.abort();
        }
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    host: Option<Arc<dyn ModuleHost>>,
    bundled: Option<BundledData>,
    remote: Option<Arc<dyn DatasetSource>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            host: None,
            bundled: None,
            remote: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required host bomb adapter
    pub fn host(mut self, host: Arc<dyn ModuleHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Provide the required bundled dataset
    pub fn bundled(mut self, bundled: BundledData) -> Self {
        self.bundled = Some(bundled);
        self
    }

    /// Set a remote dataset source (optional)
    ///
    /// Without one, the dataset check counts as finished immediately.
    pub fn remote_source(mut self, source: Arc<dyn DatasetSource>) -> Self {
        self.remote = Some(source);
        self
    }

    /// Build the runtime and start its workers
    pub async fn build(self) -> Result<Runtime> {
        let host = self.host.ok_or(RuntimeError::MissingHost)?;
        let bundled = self.bundled.ok_or(RuntimeError::MissingBundledData)?;

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let mut store = DatasetStore::new();
        let snapshot = store
            .load_bundled(&bundled.text, bundled.sprite)
            .map_err(RuntimeError::BundledDecode)?;
        event_bus.publish(Event::Data(DataEvent::BundledInstalled {
            timestamp: snapshot.timestamp(),
            icons: snapshot.icons().len(),
        }));

        let iconic = &self.config.iconic;
        let ignore_list = host.ignored_modules(&iconic.module_name, &iconic.default_ignore_list);
        let seed = self.config.seed.unwrap_or_else(rand::random);
        info!(
            target: "iconic::module",
            modules = self.config.module_count,
            ignored = ignore_list.len(),
            seed,
            "Starting module runtime"
        );

        let modules: Vec<PuzzleOrchestrator> = (0..self.config.module_count)
            .map(|_| PuzzleOrchestrator::new(iconic.clone(), ignore_list.as_slice(), seed))
            .collect();
        let module_ids: Arc<[u32]> = modules.iter().map(|m| m.module_id()).collect();

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);

        let fetch_handle = self
            .remote
            .map(|source| spawn_remote_check(source, command_tx.clone()));

        let worker = ModuleWorker::new(
            modules,
            store,
            Arc::clone(&host),
            fetch_handle.is_none(),
            self.config.poll_interval,
            command_rx,
            event_bus.clone(),
        );
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        let handle = RuntimeHandle::new(
            command_tx,
            event_bus,
            module_ids,
            self.config.forced_solve_delay,
        );

        Ok(Runtime {
            handle,
            worker_handle,
            fetch_handle,
        })
    }
}
