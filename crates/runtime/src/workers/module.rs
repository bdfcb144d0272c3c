//! Module worker that owns every [`PuzzleOrchestrator`] and the active
//! dataset.
//!
//! Receives commands from [`crate::RuntimeHandle`], runs the polling tick,
//! applies orchestrator effects to the host, and publishes events.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use iconic_content::{DatasetStore, FetchError, RemoteOutcome, RemotePayload};
use iconic_core::{
    CommandResponse, Display, Effect, ForcedStep, ModuleEnv, PcgRng, Phase, PuzzleOrchestrator,
};

use crate::api::{ModuleHost, ModuleStatus, Result, RuntimeError};
use crate::events::{DataEvent, Event, EventBus, ModuleEvent};

/// Commands that can be sent to the module worker
pub enum Command {
    /// Host activation signal for one module.
    Activate {
        module: u32,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Grid selection. Replies `None` when no part is on display.
    Select {
        module: u32,
        index: u32,
        reply: oneshot::Sender<Result<Option<bool>>>,
    },
    /// Scripted text command (`press <coord>`).
    ChatCommand {
        module: u32,
        line: String,
        reply: oneshot::Sender<Result<Option<CommandResponse>>>,
    },
    /// One step of the automatic solver.
    ForcedSolveStep {
        module: u32,
        reply: oneshot::Sender<Result<ForcedStep>>,
    },
    /// Pointer focus entered (`true`) or left (`false`) the module face.
    Focus {
        module: u32,
        focused: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Query the current module state (read-only).
    QueryStatus {
        module: u32,
        reply: oneshot::Sender<Result<ModuleStatus>>,
    },
    /// Outcome of the remote dataset check.
    RemoteFetched(std::result::Result<RemotePayload, FetchError>),
}

/// An orchestrator plus what was last published for it.
struct ModuleSlot {
    orchestrator: PuzzleOrchestrator,
    last_phase: Phase,
    last_display: Option<Display>,
}

/// Background task that serializes every module state transition.
pub struct ModuleWorker {
    modules: Vec<ModuleSlot>,
    store: DatasetStore,
    host: Arc<dyn ModuleHost>,
    rng: PcgRng,
    remote_checked: bool,
    poll_interval: Duration,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl ModuleWorker {
    pub fn new(
        modules: Vec<PuzzleOrchestrator>,
        store: DatasetStore,
        host: Arc<dyn ModuleHost>,
        remote_checked: bool,
        poll_interval: Duration,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            modules: modules
                .into_iter()
                .map(|orchestrator| ModuleSlot {
                    last_phase: orchestrator.phase(),
                    orchestrator,
                    last_display: None,
                })
                .collect(),
            store,
            host,
            rng: PcgRng,
            remote_checked,
            poll_interval,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Exits once every command sender is dropped.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = ticker.tick() => self.poll(),
            }
        }

        debug!(target: "iconic::module", "Module worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Activate { module, reply } => {
                let remote_checked = self.remote_checked;
                let result = self.with_module(module, |orchestrator, env| {
                    orchestrator.activate();
                    if remote_checked {
                        orchestrator.dataset_ready(env);
                    }
                });
                let _ = reply.send(result);
            }
            Command::Select {
                module,
                index,
                reply,
            } => {
                let result = self.with_module(module, |orchestrator, env| {
                    orchestrator.active()?;
                    let correct = orchestrator.is_correct(index);
                    orchestrator.on_selection(index, env);
                    Some(correct)
                });
                let _ = reply.send(result);
            }
            Command::ChatCommand {
                module,
                line,
                reply,
            } => {
                let result = self.with_module(module, |orchestrator, env| {
                    orchestrator.process_command(&line, env)
                });
                let _ = reply.send(result);
            }
            Command::ForcedSolveStep { module, reply } => {
                let result = self.with_module(module, |orchestrator, env| {
                    orchestrator.forced_solve_step(env)
                });
                let _ = reply.send(result);
            }
            Command::Focus {
                module,
                focused,
                reply,
            } => {
                let result = self.with_module(module, |orchestrator, _| {
                    if focused {
                        orchestrator.focus();
                    } else {
                        orchestrator.defocus();
                    }
                });
                let _ = reply.send(result);
            }
            Command::QueryStatus { module, reply } => {
                let _ = reply.send(self.status(module));
            }
            Command::RemoteFetched(result) => self.finish_remote_check(result),
        }
    }

    /// Runs `f` against one module, then applies the effects it produced.
    fn with_module<T>(
        &mut self,
        module: u32,
        f: impl FnOnce(&mut PuzzleOrchestrator, ModuleEnv<'_>) -> T,
    ) -> Result<T> {
        let env = ModuleEnv::new(self.host.as_ref(), &self.store, &self.rng);
        let slot = self
            .modules
            .iter_mut()
            .find(|slot| slot.orchestrator.module_id() == module)
            .ok_or(RuntimeError::UnknownModule(module))?;

        let output = f(&mut slot.orchestrator, env);
        Self::apply_effects(slot, self.host.as_ref(), &self.store, &self.event_bus);
        Ok(output)
    }

    fn poll(&mut self) {
        let env = ModuleEnv::new(self.host.as_ref(), &self.store, &self.rng);
        for slot in &mut self.modules {
            slot.orchestrator.poll(env);
            Self::apply_effects(slot, self.host.as_ref(), &self.store, &self.event_bus);
        }
    }

    fn finish_remote_check(&mut self, result: std::result::Result<RemotePayload, FetchError>) {
        let event = match self.install_remote(result) {
            Ok(RemoteOutcome::Installed(snapshot)) => DataEvent::RemoteInstalled {
                timestamp: snapshot.timestamp(),
                icons: snapshot.icons().len(),
            },
            Ok(RemoteOutcome::Stale { remote, baseline }) => {
                DataEvent::RemoteStale { remote, baseline }
            }
            Err(err) => {
                warn!(target: "iconic::data", "Remote data unavailable: {}", err);
                DataEvent::RemoteFailed {
                    error: err.to_string(),
                }
            }
        };
        self.event_bus.publish(Event::Data(event));

        self.remote_checked = true;
        let env = ModuleEnv::new(self.host.as_ref(), &self.store, &self.rng);
        for slot in &mut self.modules {
            slot.orchestrator.dataset_ready(env);
            Self::apply_effects(slot, self.host.as_ref(), &self.store, &self.event_bus);
        }
    }

    fn install_remote(
        &mut self,
        result: std::result::Result<RemotePayload, FetchError>,
    ) -> std::result::Result<RemoteOutcome, FetchError> {
        let payload = result?;
        let sprite = payload.sprite_sheet()?;
        Ok(self.store.load_remote(&payload.text, sprite)?)
    }

    fn status(&self, module: u32) -> Result<ModuleStatus> {
        let orchestrator = self
            .modules
            .iter()
            .map(|slot| &slot.orchestrator)
            .find(|orchestrator| orchestrator.module_id() == module)
            .ok_or(RuntimeError::UnknownModule(module))?;

        Ok(ModuleStatus {
            module_id: module,
            phase: orchestrator.phase(),
            stage: orchestrator.stage(),
            display: orchestrator.display(self.store.current().map(|s| s.sprite())),
            active_part: orchestrator.active().map(|active| {
                let part = active.part();
                (
                    part.name().to_string(),
                    part.indices().iter().copied().collect(),
                )
            }),
            queue: orchestrator.queue().map(str::to_string).collect(),
            recorded_solves: orchestrator.recorded_solves().to_vec(),
        })
    }

    /// Publishes lifecycle changes, carries queued effects out on the host,
    /// then publishes the display model if it changed.
    fn apply_effects(
        slot: &mut ModuleSlot,
        host: &dyn ModuleHost,
        store: &DatasetStore,
        event_bus: &EventBus,
    ) {
        let module_id = slot.orchestrator.module_id();
        let phase = slot.orchestrator.phase();

        if phase != slot.last_phase {
            debug!(
                target: "iconic::module",
                module_id,
                from = %slot.last_phase,
                to = %phase,
                "Phase changed"
            );
            if slot.last_phase == Phase::Uninitialized {
                event_bus.publish(Event::Module(ModuleEvent::Activated { module_id }));
            }
            if matches!(slot.last_phase, Phase::Uninitialized | Phase::AwaitingDataset)
                && phase != Phase::AwaitingDataset
            {
                event_bus.publish(Event::Module(ModuleEvent::Started { module_id }));
            }
            slot.last_phase = phase;
        }

        for effect in slot.orchestrator.take_effects() {
            match &effect {
                Effect::Strike => host.report_strike(module_id),
                Effect::Pass => host.report_pass(module_id),
                Effect::PlaySound(sound) => host.play_sound(module_id, *sound),
                Effect::IconPresented { .. } | Effect::SelectionJudged { .. } => {}
            }
            event_bus.publish(Event::Module(ModuleEvent::from_effect(module_id, effect)));
        }

        let display = slot
            .orchestrator
            .display(store.current().map(|snapshot| snapshot.sprite()));
        if slot.last_display.as_ref() != Some(&display) {
            slot.last_display = Some(display.clone());
            event_bus.publish(Event::Module(ModuleEvent::DisplayChanged { module_id, display }));
        }
    }
}
