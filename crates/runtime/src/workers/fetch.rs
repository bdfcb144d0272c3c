//! One-shot remote dataset check.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use iconic_content::DatasetSource;

use super::Command;

/// Fetches once from `source` and hands the outcome to the module worker.
///
/// Completes exactly once per runtime; every outcome (payload, transport
/// failure, bad status) releases modules waiting on the dataset check.
pub fn spawn_remote_check(
    source: Arc<dyn DatasetSource>,
    command_tx: mpsc::Sender<Command>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!(target: "iconic::data", "Starting remote dataset check");
        let result = source.fetch().await;
        if command_tx.send(Command::RemoteFetched(result)).await.is_err() {
            debug!(target: "iconic::data", "Module worker stopped before remote check finished");
        }
    })
}
