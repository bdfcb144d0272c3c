//! Host bomb adapter consumed by the module worker.

use iconic_core::{BombOracle, Sound};

/// The bomb a module is mounted on.
///
/// Roster queries come from [`BombOracle`]; the remaining methods carry the
/// module's outcomes back to the host. Calls happen on the worker task, so
/// implementations should return promptly.
pub trait ModuleHost: BombOracle {
    fn report_strike(&self, module_id: u32);

    fn report_pass(&self, module_id: u32);

    fn play_sound(&self, _module_id: u32, _sound: Sound) {}

    /// Final ignore list for `module_name`. Hosts with external mission
    /// configuration may override or extend the defaults.
    fn ignored_modules(&self, _module_name: &str, defaults: &[String]) -> Vec<String> {
        defaults.to_vec()
    }
}
