use iconic_core::{CompletionStage, Display, Phase};

/// Point-in-time view of one module, for queries and frontends.
#[derive(Clone, Debug, PartialEq)]
pub struct ModuleStatus {
    pub module_id: u32,
    pub phase: Phase,
    pub stage: CompletionStage,
    pub display: Display,
    /// Part currently awaiting a selection, with its valid cell indices.
    pub active_part: Option<(String, Vec<u32>)>,
    pub queue: Vec<String>,
    pub recorded_solves: Vec<String>,
}

impl ModuleStatus {
    pub fn is_solved(&self) -> bool {
        self.phase == Phase::Solved
    }
}
