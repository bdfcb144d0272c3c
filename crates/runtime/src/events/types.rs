//! Event payloads published by the module worker.

use serde::{Deserialize, Serialize};

use iconic_core::{Display, Effect, Sound, Timestamp};

/// Per-module outcomes, in the order the orchestrator produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModuleEvent {
    /// The host activated the module; startup waits for the dataset check.
    Activated { module_id: u32 },

    /// Startup ran against the settled dataset.
    Started { module_id: u32 },

    IconPresented {
        module_id: u32,
        icon: String,
        part: String,
        /// Queued unit the fallback icon stands in for.
        substitute_for: Option<String>,
    },

    SelectionJudged {
        module_id: u32,
        icon: String,
        part: String,
        index: u32,
        correct: bool,
    },

    Strike { module_id: u32 },

    Solved { module_id: u32 },

    Sound { module_id: u32, sound: Sound },

    DisplayChanged { module_id: u32, display: Display },
}

impl ModuleEvent {
    pub fn module_id(&self) -> u32 {
        match self {
            Self::Activated { module_id }
            | Self::Started { module_id }
            | Self::IconPresented { module_id, .. }
            | Self::SelectionJudged { module_id, .. }
            | Self::Strike { module_id }
            | Self::Solved { module_id }
            | Self::Sound { module_id, .. }
            | Self::DisplayChanged { module_id, .. } => *module_id,
        }
    }

    pub(crate) fn from_effect(module_id: u32, effect: Effect) -> Self {
        match effect {
            Effect::IconPresented {
                icon,
                part,
                substitute_for,
            } => Self::IconPresented {
                module_id,
                icon,
                part,
                substitute_for,
            },
            Effect::SelectionJudged {
                icon,
                part,
                index,
                correct,
            } => Self::SelectionJudged {
                module_id,
                icon,
                part,
                index,
                correct,
            },
            Effect::Strike => Self::Strike { module_id },
            Effect::Pass => Self::Solved { module_id },
            Effect::PlaySound(sound) => Self::Sound { module_id, sound },
        }
    }
}

/// Dataset installation and remote reconciliation outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataEvent {
    BundledInstalled { timestamp: Timestamp, icons: usize },

    RemoteInstalled { timestamp: Timestamp, icons: usize },

    /// The remote build was not newer than the active one.
    RemoteStale {
        remote: Timestamp,
        baseline: Timestamp,
    },

    /// The remote check ended without an override.
    RemoteFailed { error: String },
}
