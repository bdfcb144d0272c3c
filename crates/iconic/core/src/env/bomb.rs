/// Read-only view of the host bomb's puzzle units.
///
/// Names are display names. `solved_module_names` grows monotonically and is
/// polled; the host never pushes solve events.
pub trait BombOracle: Send + Sync {
    /// Every unit on the bomb, including needy units and this module.
    fn module_names(&self) -> Vec<String>;

    /// Units that have a conventional solve signal.
    fn solvable_module_names(&self) -> Vec<String>;

    /// Units solved so far, in solve order.
    fn solved_module_names(&self) -> Vec<String>;
}

/// Fixed roster, handy for tests and scripted hosts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticBomb {
    pub modules: Vec<String>,
    pub solvable: Vec<String>,
    pub solved: Vec<String>,
}

impl StaticBomb {
    /// Builds a roster where `needy` units are present but not solvable.
    pub fn new<S: AsRef<str>>(solvable: &[S], needy: &[S]) -> Self {
        let solvable: Vec<String> = solvable.iter().map(|s| s.as_ref().to_string()).collect();
        let mut modules = solvable.clone();
        modules.extend(needy.iter().map(|s| s.as_ref().to_string()));
        Self {
            modules,
            solvable,
            solved: Vec::new(),
        }
    }

    pub fn solve(&mut self, name: &str) {
        self.solved.push(name.to_string());
    }
}

impl BombOracle for StaticBomb {
    fn module_names(&self) -> Vec<String> {
        self.modules.clone()
    }

    fn solvable_module_names(&self) -> Vec<String> {
        self.solvable.clone()
    }

    fn solved_module_names(&self) -> Vec<String> {
        self.solved.clone()
    }
}
