//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving modules or streaming events from specific topics.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};

use iconic_core::{CommandResponse, ForcedStep};

use super::errors::{Result, RuntimeError};
use super::status::ModuleStatus;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    module_ids: Arc<[u32]>,
    forced_solve_delay: Duration,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        module_ids: Arc<[u32]>,
        forced_solve_delay: Duration,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            module_ids,
            forced_solve_delay,
        }
    }

    /// Ids of the modules hosted by this runtime, in creation order.
    pub fn module_ids(&self) -> &[u32] {
        &self.module_ids
    }

    /// Signal host activation. Startup runs once the remote dataset check
    /// has finished, which may already be the case.
    pub async fn activate(&self, module: u32) -> Result<()> {
        self.request(|reply| Command::Activate { module, reply })
            .await?
    }

    /// Select grid cell `index`. Returns whether the selection was correct,
    /// or `None` if no part was on display.
    pub async fn select(&self, module: u32, index: u32) -> Result<Option<bool>> {
        self.request(|reply| Command::Select {
            module,
            index,
            reply,
        })
        .await?
    }

    /// Run a scripted text command such as `press B7`.
    ///
    /// Returns `None` for commands the module does not handle.
    pub async fn command(&self, module: u32, line: &str) -> Result<Option<CommandResponse>> {
        let line = line.to_string();
        self.request(|reply| Command::ChatCommand {
            module,
            line,
            reply,
        })
        .await?
    }

    pub async fn focus(&self, module: u32) -> Result<()> {
        self.set_focus(module, true).await
    }

    pub async fn defocus(&self, module: u32) -> Result<()> {
        self.set_focus(module, false).await
    }

    /// Solve the module automatically, pressing the first cell of each
    /// active part with a fixed delay between steps.
    pub async fn force_solve(&self, module: u32) -> Result<()> {
        loop {
            let step = self
                .request(|reply| Command::ForcedSolveStep { module, reply })
                .await??;
            match step {
                ForcedStep::Done => return Ok(()),
                ForcedStep::Selected(_) | ForcedStep::Waiting => {
                    tokio::time::sleep(self.forced_solve_delay).await;
                }
            }
        }
    }

    /// Query the current module state (read-only snapshot)
    pub async fn status(&self, module: u32) -> Result<ModuleStatus> {
        self.request(|reply| Command::QueryStatus { module, reply })
            .await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Module` - Icons, selections, strikes, solves, display
    /// - `Topic::Data` - Dataset installation and remote reconciliation
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    async fn set_focus(&self, module: u32, focused: bool) -> Result<()> {
        self.request(|reply| Command::Focus {
            module,
            focused,
            reply,
        })
        .await?
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
