//! Queue-driven puzzle state machine.
//!
//! [`PuzzleOrchestrator`] is the authoritative reducer for one module
//! instance. It reads the bomb roster, icon table, and randomness through a
//! [`ModuleEnv`] and never calls back into the host: every outward-facing
//! outcome is queued as an [`Effect`] for an adapter to carry out.
//!
//! Work items are unit names. Needy units are queued at startup, solved
//! units as the host reports them, and ignored units only once the solve
//! threshold is first reached.

mod command;
mod display;
mod effect;
mod phase;

pub use command::{
    COMMAND_HELP, ChatCommand, CommandRejection, CommandResponse, cell_position, parse_coordinate,
};
pub use display::{Display, IconTexture, UvRect};
pub use effect::{Effect, Sound};
pub use phase::{CompletionStage, Phase};

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, info, warn};

use crate::config::IconicConfig;
use crate::data::{IconRecord, PartRecord, SpriteSheet};
use crate::env::{ModuleEnv, compute_seed};
use phase::Lifecycle;

static NEXT_MODULE_ID: AtomicU32 = AtomicU32::new(1);

/// The icon on display and which of its parts the player must find.
///
/// Icon and part are held together so one can never be set without the other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveSelection {
    icon: Arc<IconRecord>,
    part: usize,
}

impl ActiveSelection {
    pub fn icon(&self) -> &Arc<IconRecord> {
        &self.icon
    }

    pub fn part(&self) -> &PartRecord {
        &self.icon.parts()[self.part]
    }

    pub fn part_index(&self) -> usize {
        self.part
    }
}

/// Result of one forced-solve step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForcedStep {
    /// A selection was made on the active part.
    Selected(u32),
    /// Nothing is on display yet; try again later.
    Waiting,
    /// The module is solved.
    Done,
}

/// State machine for one module instance.
pub struct PuzzleOrchestrator {
    module_id: u32,
    config: IconicConfig,
    ignore_list: HashSet<String>,
    lifecycle: Lifecycle,
    stage: CompletionStage,
    queue: VecDeque<String>,
    solves: Vec<String>,
    active: Option<ActiveSelection>,
    missing_name: Option<String>,
    focused: bool,
    session_seed: u64,
    draws: u64,
    effects: Vec<Effect>,
}

impl PuzzleOrchestrator {
    /// Creates an orchestrator with the ignore list resolved by the host.
    pub fn new<S: AsRef<str>>(config: IconicConfig, ignore_list: &[S], session_seed: u64) -> Self {
        Self {
            module_id: NEXT_MODULE_ID.fetch_add(1, Ordering::Relaxed),
            config,
            ignore_list: ignore_list
                .iter()
                .map(|name| name.as_ref().to_string())
                .collect(),
            lifecycle: Lifecycle::Uninitialized,
            stage: CompletionStage::Collecting,
            queue: VecDeque::new(),
            solves: Vec::new(),
            active: None,
            missing_name: None,
            focused: false,
            session_seed,
            draws: 0,
            effects: Vec::new(),
        }
    }

    pub fn module_id(&self) -> u32 {
        self.module_id
    }

    pub fn config(&self) -> &IconicConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match self.lifecycle {
            Lifecycle::Uninitialized => Phase::Uninitialized,
            Lifecycle::AwaitingDataset => Phase::AwaitingDataset,
            Lifecycle::Running if self.active.is_some() => Phase::AwaitingSelection,
            Lifecycle::Running => Phase::Idle,
            Lifecycle::Solved => Phase::Solved,
        }
    }

    pub fn stage(&self) -> CompletionStage {
        self.stage
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running | Lifecycle::Solved)
    }

    pub fn is_solved(&self) -> bool {
        self.lifecycle == Lifecycle::Solved
    }

    pub fn active(&self) -> Option<&ActiveSelection> {
        self.active.as_ref()
    }

    pub fn missing_name(&self) -> Option<&str> {
        self.missing_name.as_deref()
    }

    /// Pending unit names, next first.
    pub fn queue(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    /// Every solve accounted for so far, ignored ones included.
    pub fn recorded_solves(&self) -> &[String] {
        &self.solves
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_list.contains(name)
    }

    /// Drains effects produced since the last call, in emission order.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Host activation signal. Startup waits for [`Self::dataset_ready`].
    pub fn activate(&mut self) {
        if self.lifecycle != Lifecycle::Uninitialized {
            return;
        }
        self.lifecycle = Lifecycle::AwaitingDataset;
        debug!(
            target: "iconic::module",
            module_id = self.module_id,
            "Activated, waiting for dataset check"
        );
    }

    /// The remote dataset check has finished; run the startup sequence.
    ///
    /// No-op unless activated and still waiting.
    pub fn dataset_ready(&mut self, env: ModuleEnv<'_>) {
        if self.lifecycle != Lifecycle::AwaitingDataset {
            return;
        }

        let solvable = env.bomb().solvable_module_names();
        for name in env.bomb().module_names() {
            if !solvable.contains(&name) {
                debug!(
                    target: "iconic::module",
                    module_id = self.module_id,
                    module = %name,
                    "Queueing needy module"
                );
                self.enqueue(name, env);
            }
        }

        self.lifecycle = Lifecycle::Running;
        self.check_queue(env);
        self.settle(env);
    }

    /// Polling tick: account for units the host has solved since last time.
    pub fn poll(&mut self, env: ModuleEnv<'_>) {
        if self.lifecycle != Lifecycle::Running || self.stage == CompletionStage::AbsorbingIgnored {
            return;
        }

        let mut solved = env.bomb().solved_module_names();
        if solved.len() <= self.solves.len() {
            return;
        }

        // Multiset difference: twin units solve under the same name.
        for recorded in &self.solves {
            if let Some(position) = solved.iter().position(|name| name == recorded) {
                solved.remove(position);
            }
        }

        self.solves.extend(solved.iter().cloned());
        for name in solved {
            if self.is_ignored(&name) {
                info!(
                    target: "iconic::module",
                    module_id = self.module_id,
                    module = %name,
                    "Ignored module solved"
                );
            } else {
                self.enqueue(name, env);
            }
        }

        self.settle(env);
    }

    /// Returns true if selecting `index` would satisfy the active part.
    pub fn is_correct(&self, index: u32) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.part().contains(index))
    }

    /// Adjudicates a grid selection against the active part.
    pub fn on_selection(&mut self, index: u32, env: ModuleEnv<'_>) {
        let Some(active) = self.active.take() else {
            return;
        };

        let part = active.part();
        let correct = part.contains(index);
        let (column, row) = cell_position(index);
        info!(
            target: "iconic::module",
            module_id = self.module_id,
            "{} part of {} selected, \"{}\" {} ({}, {})",
            if correct { "Correct" } else { "Incorrect" },
            active.icon().name(),
            part.name(),
            if correct { "is at" } else { "is not at" },
            column,
            row
        );

        self.effects.push(Effect::SelectionJudged {
            icon: active.icon().name().to_string(),
            part: part.name().to_string(),
            index,
            correct,
        });
        if correct {
            self.effects.push(Effect::PlaySound(Sound::Blip));
        } else {
            info!(target: "iconic::module", module_id = self.module_id, "Strike!");
            self.effects.push(Effect::Strike);
        }

        self.missing_name = None;
        self.check_queue(env);
        self.settle(env);
    }

    /// Handles a scripted text command. `None` if the command is not ours.
    pub fn process_command(&mut self, line: &str, env: ModuleEnv<'_>) -> Option<CommandResponse> {
        let command = match ChatCommand::parse(line)? {
            Ok(command) => command,
            Err(rejection) => return Some(CommandResponse::Error(rejection.to_string())),
        };

        match command {
            ChatCommand::Press(index) => {
                let correct = self.is_correct(index);
                self.on_selection(index, env);
                Some(CommandResponse::Pressed {
                    points: u32::from(correct),
                })
            }
        }
    }

    /// Presses the first cell of the active part.
    pub fn forced_solve_step(&mut self, env: ModuleEnv<'_>) -> ForcedStep {
        if self.is_solved() {
            return ForcedStep::Done;
        }
        let Some(active) = &self.active else {
            return ForcedStep::Waiting;
        };

        // An empty part cannot be satisfied; cell 0 keeps the queue moving.
        let index = active.part().first_index().unwrap_or(0);
        self.on_selection(index, env);
        ForcedStep::Selected(index)
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn defocus(&mut self) {
        self.focused = false;
    }

    /// Display model, given the sprite sheet of the active dataset.
    pub fn display(&self, sprite: Option<&SpriteSheet>) -> Display {
        let (text, texture, uv) = match (&self.active, sprite) {
            (Some(active), Some(sprite)) => (
                active.part().name().to_string(),
                IconTexture::Sprite,
                UvRect::for_icon(active.icon(), sprite),
            ),
            (Some(active), None) => (
                active.part().name().to_string(),
                IconTexture::Sprite,
                UvRect::FULL,
            ),
            (None, _) if self.is_solved() => {
                (Display::SOLVED_TEXT.to_string(), IconTexture::Solved, UvRect::FULL)
            }
            (None, _) => (Display::IDLE_TEXT.to_string(), IconTexture::Empty, UvRect::FULL),
        };

        Display {
            text,
            texture,
            uv,
            missing_name: self.missing_name.clone(),
            grid_enabled: self.active.is_some(),
            captures_input: self.focused,
        }
    }

    fn enqueue(&mut self, name: String, env: ModuleEnv<'_>) {
        self.queue.push_back(name);
        self.check_queue(env);
    }

    /// Pops queued names until one resolves to a playable icon.
    ///
    /// A name with no icon (or an icon without parts) leaves `missing_name`
    /// set and falls back to the configured fallback icon; if that is not
    /// playable either the name is dropped and the next one tried. The annotation is only cleared by a selection.
    fn check_queue(&mut self, env: ModuleEnv<'_>) {
        while self.active.is_none() {
            let Some(next) = self.queue.pop_front() else {
                return;
            };

            // An icon with no parts is treated like a missing one.
            let playable = |name: &str| {
                env.icons()
                    .icon(name)
                    .filter(|icon| !icon.parts().is_empty())
            };
            let (icon, substitute_for) = match playable(next.as_str()) {
                Some(icon) => (icon, None),
                None => {
                    self.missing_name = Some(next.clone());
                    let Some(fallback) = playable(self.config.fallback_icon.as_str()) else {
                        warn!(
                            target: "iconic::module",
                            module_id = self.module_id,
                            "Could not find an icon for \"{}\" and could not find the {} icon, moving on to next solve if applicable",
                            next,
                            self.config.fallback_icon
                        );
                        continue;
                    };
                    info!(
                        target: "iconic::module",
                        module_id = self.module_id,
                        "Could not find an icon for \"{}\", using {}",
                        next,
                        self.config.fallback_icon
                    );
                    (fallback, Some(next))
                }
            };

            let seed = compute_seed(self.session_seed, self.draws, self.module_id);
            self.draws += 1;
            let Some(part) = env.rng().pick_index(seed, icon.parts().len()) else {
                warn!(
                    target: "iconic::module",
                    module_id = self.module_id,
                    icon = icon.name(),
                    "Icon has no parts, skipping"
                );
                continue;
            };

            let active = ActiveSelection { icon, part };
            debug!(
                target: "iconic::module",
                module_id = self.module_id,
                icon = active.icon().name(),
                part = active.part().name(),
                "Presenting icon"
            );
            self.effects.push(Effect::IconPresented {
                icon: active.icon().name().to_string(),
                part: active.part().name().to_string(),
                substitute_for,
            });
            self.active = Some(active);
        }
    }

    /// Runs the completion check whenever the module is left with nothing to
    /// show and nothing queued.
    fn settle(&mut self, env: ModuleEnv<'_>) {
        if self.lifecycle != Lifecycle::Running || self.active.is_some() || !self.queue.is_empty() {
            return;
        }

        let solvable = env.bomb().solvable_module_names();
        let required = solvable.iter().filter(|name| !self.is_ignored(name)).count();
        let counted = self.solves.iter().filter(|name| !self.is_ignored(name)).count();
        if counted < required {
            return;
        }

        match self.stage {
            CompletionStage::Collecting => {
                self.absorb_ignored(&solvable, env);
                // Nothing absorbed (or nothing playable): finish right away.
                self.settle(env);
            }
            CompletionStage::AbsorbingIgnored => {
                info!(target: "iconic::module", module_id = self.module_id, "Module solved");
                self.lifecycle = Lifecycle::Solved;
                self.effects.push(Effect::Pass);
                self.effects.push(Effect::PlaySound(Sound::GoodGame));
            }
        }
    }

    /// Queues every ignored solvable unit except the first entry naming this
    /// module.
    fn absorb_ignored(&mut self, solvable: &[String], env: ModuleEnv<'_>) {
        let mut skipped_self = false;
        let ignored: Vec<String> = solvable
            .iter()
            .filter(|name| self.is_ignored(name))
            .cloned()
            .collect();

        debug!(
            target: "iconic::module",
            module_id = self.module_id,
            count = ignored.len(),
            "Absorbing ignored modules"
        );

        self.stage = CompletionStage::AbsorbingIgnored;
        for name in ignored {
            if !skipped_self && name == self.config.module_name {
                skipped_self = true;
            } else {
                self.enqueue(name, env);
            }
        }
    }
}
