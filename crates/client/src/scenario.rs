//! Simulated bomb backing the terminal driver.
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use serde::Deserialize;

use iconic_content::LoadResult;
use iconic_core::{BombOracle, Sound, StaticBomb};
use iconic_runtime::ModuleHost;

/// Bomb layout read from a scenario TOML file.
///
/// ```toml
/// modules = 1
/// solvable = ["Iconic", "Wires", "Keypad"]
/// needy = ["Knob"]
/// ignore = ["Iconic", "Souvenir"]  # optional, replaces the default list
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Iconic modules mounted on the bomb.
    #[serde(default = "Scenario::default_modules")]
    pub modules: usize,
    pub solvable: Vec<String>,
    #[serde(default)]
    pub needy: Vec<String>,
    pub ignore: Option<Vec<String>>,
}

impl Scenario {
    fn default_modules() -> usize {
        1
    }

    /// Load a scenario from a TOML file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Self> {
        let scenario: Scenario = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario TOML: {}", e))?;
        anyhow::ensure!(scenario.modules >= 1, "Scenario needs at least one module");
        Ok(scenario)
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            modules: 1,
            solvable: ["Iconic", "Wires", "Keypad", "Password"]
                .into_iter()
                .map(String::from)
                .collect(),
            needy: vec!["Knob".to_string()],
            ignore: None,
        }
    }
}

/// Host adapter over a scenario; units are solved from the terminal.
pub struct ScenarioHost {
    bomb: Mutex<StaticBomb>,
    ignore: Option<Vec<String>>,
    strikes: AtomicU32,
    passes: AtomicU32,
}

impl ScenarioHost {
    pub fn new(scenario: &Scenario) -> Self {
        let mut solvable = scenario.solvable.clone();
        // Every mounted module is itself a solvable unit.
        let mounted = solvable.iter().filter(|name| name.as_str() == "Iconic").count();
        solvable.extend((mounted..scenario.modules).map(|_| "Iconic".to_string()));

        Self {
            bomb: Mutex::new(StaticBomb::new(solvable.as_slice(), scenario.needy.as_slice())),
            ignore: scenario.ignore.clone(),
            strikes: AtomicU32::new(0),
            passes: AtomicU32::new(0),
        }
    }

    /// Marks a unit solved. Returns false if it is not a solvable unit on the
    /// bomb or every copy of it is already solved.
    pub fn solve(&self, name: &str) -> bool {
        let mut bomb = self.bomb();
        let present = bomb.solvable.iter().filter(|unit| *unit == name).count();
        let solved = bomb.solved.iter().filter(|unit| *unit == name).count();
        if solved >= present {
            return false;
        }
        bomb.solve(name);
        true
    }

    pub fn strikes(&self) -> u32 {
        self.strikes.load(Ordering::SeqCst)
    }

    pub fn passes(&self) -> u32 {
        self.passes.load(Ordering::SeqCst)
    }

    /// Solvable units not yet solved, in roster order.
    pub fn unsolved(&self) -> Vec<String> {
        let bomb = self.bomb();
        let mut solved = bomb.solved.clone();
        bomb.solvable
            .iter()
            .filter(|name| match solved.iter().position(|s| s == *name) {
                Some(position) => {
                    solved.remove(position);
                    false
                }
                None => true,
            })
            .cloned()
            .collect()
    }

    fn bomb(&self) -> MutexGuard<'_, StaticBomb> {
        self.bomb.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BombOracle for ScenarioHost {
    fn module_names(&self) -> Vec<String> {
        self.bomb().module_names()
    }

    fn solvable_module_names(&self) -> Vec<String> {
        self.bomb().solvable_module_names()
    }

    fn solved_module_names(&self) -> Vec<String> {
        self.bomb().solved_module_names()
    }
}

impl ModuleHost for ScenarioHost {
    fn report_strike(&self, module_id: u32) {
        let total = self.strikes.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::warn!(module_id, total, "Strike");
    }

    fn report_pass(&self, module_id: u32) {
        self.passes.fetch_add(1, Ordering::SeqCst);
        tracing::info!(module_id, "Module passed");
    }

    fn play_sound(&self, module_id: u32, sound: Sound) {
        tracing::debug!(module_id, %sound, "Sound");
    }

    fn ignored_modules(&self, _module_name: &str, defaults: &[String]) -> Vec<String> {
        self.ignore.clone().unwrap_or_else(|| defaults.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scenario_with_defaults() {
        let scenario = Scenario::parse(r#"solvable = ["Iconic", "Wires"]"#).unwrap();
        assert_eq!(scenario.modules, 1);
        assert!(scenario.needy.is_empty());
        assert!(scenario.ignore.is_none());
    }

    #[test]
    fn rejects_unknown_keys_and_zero_modules() {
        assert!(Scenario::parse("solvable = []\nbogus = 1").is_err());
        assert!(Scenario::parse("modules = 0\nsolvable = []").is_err());
    }

    #[test]
    fn loads_scenario_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bomb.toml");
        std::fs::write(&path, "modules = 2\nsolvable = [\"Wires\"]\nneedy = [\"Knob\"]").unwrap();

        let scenario = Scenario::load(&path).unwrap();
        let host = ScenarioHost::new(&scenario);
        assert_eq!(
            host.solvable_module_names(),
            vec!["Wires".to_string(), "Iconic".to_string(), "Iconic".to_string()]
        );
        assert_eq!(host.module_names().last().map(String::as_str), Some("Knob"));
    }

    #[test]
    fn solving_tracks_twin_units() {
        let scenario = Scenario {
            modules: 1,
            solvable: vec!["Iconic".into(), "Wires".into(), "Wires".into()],
            needy: Vec::new(),
            ignore: Some(vec!["Iconic".into()]),
        };
        let host = ScenarioHost::new(&scenario);

        assert!(host.solve("Wires"));
        assert!(host.solve("Wires"));
        assert!(!host.solve("Wires"));
        assert!(!host.solve("Keypad"));
        assert_eq!(host.unsolved(), vec!["Iconic".to_string()]);
        assert_eq!(
            host.ignored_modules("Iconic", &["Souvenir".to_string()]),
            vec!["Iconic".to_string()]
        );
    }
}
